use thiserror::Error;

/// Main error type for CIFS codec operations
#[derive(Error, Debug)]
pub enum CifsError {
    #[error("Buffer bounds exceeded: {0}")]
    Bounds(String),

    #[error("DER type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Malformed DER length: {0}")]
    MalformedLength(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for CIFS codec operations
pub type CifsResult<T> = Result<T, CifsError>;
