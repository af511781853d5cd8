use std::collections::HashMap;
use std::collections::HashSet;

use slog::debug;
use slog::o;
use slog::Discard;
use slog::Logger;

use crate::connections::ConnectionProvider;
use crate::connections::HashConnection;
use crate::error::RedisMapError;
use crate::error::Result;

/// A string-to-string map stored in a single Redis hash.
///
/// Nothing is cached: each call acquires a connection from the provider,
/// issues its hash command(s) and releases the connection before returning.
/// Calls that issue more than one command (`put`, `remove`, `put_all`) are
/// not atomic with respect to other writers.
///
/// ```
/// use redis_map::RedisMap;
/// use redis_map::SledProvider;
/// use tempfile::TempDir;
///
/// let dir = TempDir::new().unwrap();
/// let map = RedisMap::new("users", SledProvider::open(dir.path()).unwrap());
///
/// assert_eq!(map.put("alice", "admin").unwrap(), None);
/// assert_eq!(map.get("alice").unwrap(), Some("admin".to_owned()));
/// ```
pub struct RedisMap<P: ConnectionProvider> {
    name: String,
    provider: P,
    log: Logger,
}

impl<P: ConnectionProvider> RedisMap<P> {
    pub fn new(name: impl Into<String>, provider: P) -> Self {
        Self {
            name: name.into(),
            provider,
            log: Logger::root(Discard, o!()),
        }
    }

    pub fn with_logger(mut self, log: Logger) -> Self {
        self.log = log.new(o!("map" => self.name.clone()));
        self
    }

    /// The hash this map reads and writes.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Result<usize> {
        let size = self.provider.acquire()?.hlen(&self.name)?;
        debug!(self.log, "size() = {}", size);
        Ok(size)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.size()? == 0)
    }

    pub fn contains_key(&self, key: &str) -> Result<bool> {
        let found = self.provider.acquire()?.hexists(&self.name, key)?;
        debug!(self.log, "contains_key({}) = {}", key, found);
        Ok(found)
    }

    /// Fetches every value and scans them.
    pub fn contains_value(&self, value: &str) -> Result<bool> {
        let found = self
            .provider
            .acquire()?
            .hvals(&self.name)?
            .iter()
            .any(|v| v == value);
        debug!(self.log, "contains_value({}) = {}", value, found);
        Ok(found)
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.provider.acquire()?.hget(&self.name, key)?;
        debug!(self.log, "get({}) = {:?}", key, value);
        Ok(value)
    }

    /// Store `value` under `key` and return the value it replaced.
    ///
    /// The previous value is read before the write, on the same connection.
    pub fn put(&self, key: &str, value: &str) -> Result<Option<String>> {
        let mut conn = self.provider.acquire()?;
        let previous = conn.hget(&self.name, key)?;
        conn.hset(&self.name, key, value)?;
        debug!(self.log, "put({}, {}) = {:?}", key, value, previous);
        Ok(previous)
    }

    /// [`put`](Self::put) for callers whose key or value may be missing.
    ///
    /// A missing key or value is rejected before anything is sent.
    pub fn try_put(&self, key: Option<&str>, value: Option<&str>) -> Result<Option<String>> {
        let key = key.ok_or_else(|| RedisMapError::InvalidArgument("missing key".to_owned()))?;
        let value =
            value.ok_or_else(|| RedisMapError::InvalidArgument("missing value".to_owned()))?;
        self.put(key, value)
    }

    pub fn remove(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.provider.acquire()?;
        let previous = conn.hget(&self.name, key)?;
        conn.hdel(&self.name, key)?;
        debug!(self.log, "remove({}) = {:?}", key, previous);
        Ok(previous)
    }

    /// Calls [`put`](Self::put) for each pair in order.
    ///
    /// Stops at the first error; pairs before it stay written.
    pub fn put_all<I, K, V>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in entries {
            self.put(key.as_ref(), value.as_ref())?;
        }
        Ok(())
    }

    /// Delete the whole hash.
    pub fn clear(&self) -> Result<()> {
        let existed = self.provider.acquire()?.del(&self.name)?;
        debug!(self.log, "clear()"; "existed" => existed);
        Ok(())
    }

    pub fn key_set(&self) -> Result<HashSet<String>> {
        let keys = self.provider.acquire()?.hkeys(&self.name)?;
        debug!(self.log, "key_set() = {} keys", keys.len());
        Ok(keys.into_iter().collect())
    }

    pub fn values(&self) -> Result<Vec<String>> {
        let values = self.provider.acquire()?.hvals(&self.name)?;
        debug!(self.log, "values() = {} values", values.len());
        Ok(values)
    }

    /// Every entry, fetched with a single `HGETALL`.
    pub fn entry_set(&self) -> Result<HashMap<String, String>> {
        let entries = self.provider.acquire()?.hgetall(&self.name)?;
        debug!(self.log, "entry_set() = {} entries", entries.len());
        Ok(entries)
    }
}
