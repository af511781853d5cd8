mod config;
pub use config::RedisConfig;

mod connections;
pub use connections::ConnectionProvider;
pub use connections::HashConnection;
pub use connections::RedisProvider;
pub use connections::SledConnection;
pub use connections::SledProvider;

mod error;
pub use error::RedisMapError;
pub use error::Result;

mod map;
pub use map::RedisMap;
