use core::fmt;
use heed3::{Error as HeedError, MdbError};
use sonic_rs::Error as SonicError;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    StorageConnectionError(String, std::io::Error),
    StorageError(String),
    ConversionError(String),
    BlogNotFound,
    UserNotFound,
    DuplicateKey(String),
    ConfigFileNotFound,
    New(String),
}

impl std::error::Error for StoreError {}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {e}"),
            StoreError::StorageConnectionError(msg, e) => write!(f, "Error: {msg} {e}"),
            StoreError::StorageError(msg) => write!(f, "Storage error: {msg}"),
            StoreError::ConversionError(msg) => write!(f, "Conversion error: {msg}"),
            StoreError::BlogNotFound => write!(f, "Blog not found"),
            StoreError::UserNotFound => write!(f, "User not found"),
            StoreError::DuplicateKey(msg) => write!(f, "Duplicate key on unique index: {msg}"),
            StoreError::ConfigFileNotFound => write!(f, "Config file not found"),
            StoreError::New(msg) => write!(f, "Store error: {msg}"),
        }
    }
}

impl From<HeedError> for StoreError {
    fn from(error: HeedError) -> Self {
        match error {
            HeedError::Mdb(MdbError::KeyExist) => StoreError::DuplicateKey(error.to_string()),
            _ => StoreError::StorageError(error.to_string()),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(error: std::io::Error) -> Self {
        StoreError::Io(error)
    }
}

impl From<SonicError> for StoreError {
    fn from(error: SonicError) -> Self {
        StoreError::ConversionError(format!("sonic error: {error}"))
    }
}

impl From<bincode::Error> for StoreError {
    fn from(error: bincode::Error) -> Self {
        StoreError::ConversionError(format!("bincode error: {error}"))
    }
}

impl From<uuid::Error> for StoreError {
    fn from(error: uuid::Error) -> Self {
        StoreError::ConversionError(format!("uuid error: {error}"))
    }
}

impl From<&'static str> for StoreError {
    fn from(error: &'static str) -> Self {
        StoreError::New(error.to_string())
    }
}

impl From<String> for StoreError {
    fn from(error: String) -> Self {
        StoreError::New(error)
    }
}
