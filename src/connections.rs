use std::collections::HashMap;

use crate::error::Result;

/// The hash commands a [`RedisMap`](crate::RedisMap) issues against a store.
///
/// `name` is the hash holding the collection, `key` is a field inside it.
pub trait HashConnection {
    fn hlen(&mut self, name: &str) -> Result<usize>;

    fn hexists(&mut self, name: &str, key: &str) -> Result<bool>;

    fn hkeys(&mut self, name: &str) -> Result<Vec<String>>;

    fn hvals(&mut self, name: &str) -> Result<Vec<String>>;

    fn hget(&mut self, name: &str, key: &str) -> Result<Option<String>>;

    fn hset(&mut self, name: &str, key: &str, value: &str) -> Result<()>;

    /// Returns whether the field existed.
    fn hdel(&mut self, name: &str, key: &str) -> Result<bool>;

    fn hgetall(&mut self, name: &str) -> Result<HashMap<String, String>>;

    /// Delete the whole hash. Returns whether it existed.
    fn del(&mut self, name: &str) -> Result<bool>;
}

/// Hands out a connection per operation.
///
/// Dropping the connection releases it. A connection must stay usable for as
/// long as the caller holds it, regardless of what happens to the provider.
pub trait ConnectionProvider {
    type Connection: HashConnection;

    fn acquire(&self) -> Result<Self::Connection>;
}

mod redis;
pub use self::redis::RedisProvider;

mod sled;
pub use self::sled::SledConnection;
pub use self::sled::SledProvider;
