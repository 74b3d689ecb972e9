// ============================================================================
// ERRORS - failures surfaced by the HTTP boundary and durable storage
// ============================================================================

use thiserror::Error;

/// Failure of a remote call. Stored in cache entries, hence `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The service answered 2xx with `success: false`.
    #[error("rejected by service: {0}")]
    Rejected(String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("could not schedule request: {0}")]
    Spawn(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("could not serialize value: {0}")]
    Serialize(String),

    #[error("could not deserialize stored value: {0}")]
    Deserialize(String),

    #[error("could not write to storage: {0}")]
    Write(String),
}
