use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::RedisMapError;
use crate::error::Result;

const HOST_KEY: &str = "redis.host";
const PORT_KEY: &str = "redis.port";

/// Where the Redis server lives. Read once at startup and handed to
/// [`RedisProvider::new`](crate::RedisProvider::new).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", 6379)
    }
}

impl RedisConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Load `redis.host` and `redis.port` from a `.properties` file.
    ///
    /// Only a simple subset of the format is read: one `key=value` or
    /// `key: value` per line, plus `#` and `!` comments. Whitespace-only
    /// separators, line continuations and escapes are not supported.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        contents.parse()
    }

    pub fn url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }
}

impl std::str::FromStr for RedisConfig {
    type Err = RedisMapError;

    fn from_str(input: &str) -> Result<Self> {
        let properties = parse_properties(input);

        let host = properties
            .get(HOST_KEY)
            .filter(|host| !host.is_empty())
            .ok_or_else(|| RedisMapError::Config(format!("missing {}", HOST_KEY)))?;
        let port = properties
            .get(PORT_KEY)
            .ok_or_else(|| RedisMapError::Config(format!("missing {}", PORT_KEY)))?;
        let port = port
            .parse::<u16>()
            .map_err(|err| RedisMapError::Config(format!("bad {} {:?}: {}", PORT_KEY, port, err)))?;

        Ok(Self::new(host.clone(), port))
    }
}

fn parse_properties(input: &str) -> HashMap<String, String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| {
            let split = line.find(|c: char| c == '=' || c == ':')?;
            let (key, value) = line.split_at(split);
            Some((key.trim().to_string(), value[1..].trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_host_and_port() {
        let config: RedisConfig = "redis.host=localhost\nredis.port=6380\n".parse().unwrap();
        assert_eq!(config, RedisConfig::new("localhost", 6380));
        assert_eq!(config.url(), "redis://localhost:6380/");
    }

    #[test]
    fn skips_comments_and_accepts_colons() {
        let input = "# connection\n! legacy comment\n\nredis.host : cache.internal\nredis.port: 7000\nother=ignored";
        let config: RedisConfig = input.parse().unwrap();
        assert_eq!(config, RedisConfig::new("cache.internal", 7000));
    }

    #[test]
    fn missing_host_is_an_error() {
        let err = "redis.port=6379".parse::<RedisConfig>().unwrap_err();
        assert!(matches!(err, RedisMapError::Config(_)));
    }

    #[test]
    fn missing_port_is_an_error() {
        let err = "redis.host=localhost".parse::<RedisConfig>().unwrap_err();
        assert!(matches!(err, RedisMapError::Config(_)));
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = "redis.host=localhost\nredis.port=http"
            .parse::<RedisConfig>()
            .unwrap_err();
        assert!(matches!(err, RedisMapError::Config(_)));

        let err = "redis.host=localhost\nredis.port=70000"
            .parse::<RedisConfig>()
            .unwrap_err();
        assert!(matches!(err, RedisMapError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "redis.host=127.0.0.1").unwrap();
        writeln!(file, "redis.port=6379").unwrap();
        let config = RedisConfig::load(file.path()).unwrap();
        assert_eq!(config, RedisConfig::default());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = RedisConfig::load(dir.path().join("application.properties")).unwrap_err();
        assert!(matches!(err, RedisMapError::IO(_)));
    }
}
