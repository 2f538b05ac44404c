//! Error types for showroom

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Brand not found: {0}")]
    BrandNotFound(String),

    #[error("Car model not found: {0}")]
    ModelNotFound(String),

    #[error("Variant not found: {0}")]
    VariantNotFound(u64),

    #[error("Image not found: {0}")]
    MediaNotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// True for the error cases surfaced to clients as HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::BrandNotFound(_)
                | Error::ModelNotFound(_)
                | Error::VariantNotFound(_)
                | Error::MediaNotFound(_)
        )
    }
}
