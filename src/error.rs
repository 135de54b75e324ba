use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntakeError>;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("encryption failed")]
    Encryption,
    #[error("decryption failed: {0}")]
    Decryption(&'static str),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("rocksdb error: {0}")]
    RocksDb(#[from] rocksdb::Error),
}
