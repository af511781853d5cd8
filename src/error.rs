use std::error;
use std::fmt;
use std::io;
use std::result;
use std::string::FromUtf8Error;

#[derive(Debug)]
pub enum RedisMapError {
    InvalidArgument(String),
    Connection(redis::RedisError),
    Redis(redis::RedisError),
    Sled(sled::Error),
    Utf8(FromUtf8Error),
    Config(String),
    IO(io::Error),
}

impl fmt::Display for RedisMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Self::Connection(err) => write!(f, "Connection: {}", err),
            Self::Redis(err) => write!(f, "Redis: {}", err),
            Self::Sled(err) => write!(f, "Sled: {}", err),
            Self::Utf8(err) => write!(f, "Utf8: {}", err),
            Self::Config(msg) => write!(f, "Config: {}", msg),
            Self::IO(err) => write!(f, "IO: {}", err),
        }
    }
}

impl error::Error for RedisMapError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::Connection(source) => Some(source),
            Self::Redis(source) => Some(source),
            Self::Sled(source) => Some(source),
            Self::Utf8(source) => Some(source),
            Self::Config(_) => None,
            Self::IO(source) => Some(source),
        }
    }
}

impl From<redis::RedisError> for RedisMapError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_io_error()
            || e.is_connection_refusal()
            || e.is_connection_dropped()
            || e.is_timeout()
        {
            Self::Connection(e)
        } else {
            Self::Redis(e)
        }
    }
}

impl From<sled::Error> for RedisMapError {
    fn from(e: sled::Error) -> Self {
        Self::Sled(e)
    }
}

impl From<FromUtf8Error> for RedisMapError {
    fn from(e: FromUtf8Error) -> Self {
        Self::Utf8(e)
    }
}

impl From<io::Error> for RedisMapError {
    fn from(e: io::Error) -> Self {
        Self::IO(e)
    }
}

pub type Result<T> = result::Result<T, RedisMapError>;

#[cfg(test)]
mod tests {
    use super::*;
    use redis::ErrorKind;

    #[test]
    fn command_errors_stay_redis_errors() {
        let err = RedisMapError::from(redis::RedisError::from((
            ErrorKind::TypeError,
            "WRONGTYPE",
        )));
        assert!(matches!(err, RedisMapError::Redis(_)));

        let err = RedisMapError::from(redis::RedisError::from((
            ErrorKind::ResponseError,
            "ERR unknown command",
        )));
        assert!(matches!(err, RedisMapError::Redis(_)));
    }

    #[test]
    fn io_errors_are_connection_failures() {
        let err = RedisMapError::from(redis::RedisError::from(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "connection refused",
        )));
        assert!(matches!(err, RedisMapError::Connection(_)));

        let err = RedisMapError::from(redis::RedisError::from(io::Error::new(
            io::ErrorKind::TimedOut,
            "timed out",
        )));
        assert!(matches!(err, RedisMapError::Connection(_)));
    }
}
