use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuireError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Malformed import: {0}")]
    MalformedImport(String),

    #[error("No page at index {0}")]
    InvalidSelection(usize),

    #[error("Cannot delete the last remaining page")]
    CannotDeleteLastPage,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuireError>;
