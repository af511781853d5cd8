use std::collections::HashMap;

use redis::Client;
use redis::Commands;
use redis::Connection;

use super::ConnectionProvider;
use super::HashConnection;
use crate::config::RedisConfig;
use crate::error::RedisMapError;
use crate::error::Result;

/// Opens a fresh Redis connection for every operation.
///
/// The [`Client`] only holds connection info, so nothing a returned
/// [`Connection`] needs is torn down when `acquire` returns.
#[derive(Clone)]
pub struct RedisProvider {
    client: Client,
}

impl RedisProvider {
    /// Fails if the configured address is not a valid Redis URL. Does not
    /// connect.
    pub fn new(config: &RedisConfig) -> Result<Self> {
        let client = Client::open(config.url()).map_err(RedisMapError::Redis)?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl ConnectionProvider for RedisProvider {
    type Connection = Connection;

    fn acquire(&self) -> Result<Connection> {
        self.client
            .get_connection()
            .map_err(RedisMapError::Connection)
    }
}

// Commands has methods of the same names, hence the qualified calls.
impl HashConnection for Connection {
    fn hlen(&mut self, name: &str) -> Result<usize> {
        let len: usize = Commands::hlen(self, name)?;
        Ok(len)
    }

    fn hexists(&mut self, name: &str, key: &str) -> Result<bool> {
        let exists: bool = Commands::hexists(self, name, key)?;
        Ok(exists)
    }

    fn hkeys(&mut self, name: &str) -> Result<Vec<String>> {
        let keys: Vec<String> = Commands::hkeys(self, name)?;
        Ok(keys)
    }

    fn hvals(&mut self, name: &str) -> Result<Vec<String>> {
        let values: Vec<String> = Commands::hvals(self, name)?;
        Ok(values)
    }

    fn hget(&mut self, name: &str, key: &str) -> Result<Option<String>> {
        let value: Option<String> = Commands::hget(self, name, key)?;
        Ok(value)
    }

    fn hset(&mut self, name: &str, key: &str, value: &str) -> Result<()> {
        Commands::hset::<_, _, _, ()>(self, name, key, value)?;
        Ok(())
    }

    fn hdel(&mut self, name: &str, key: &str) -> Result<bool> {
        let removed: usize = Commands::hdel(self, name, key)?;
        Ok(removed > 0)
    }

    fn hgetall(&mut self, name: &str) -> Result<HashMap<String, String>> {
        let entries: HashMap<String, String> = Commands::hgetall(self, name)?;
        Ok(entries)
    }

    fn del(&mut self, name: &str) -> Result<bool> {
        let removed: usize = Commands::del(self, name)?;
        Ok(removed > 0)
    }
}
