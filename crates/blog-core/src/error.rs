//! Shared error type across blog crates.

use thiserror::Error;

use crate::post::PostId;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Requested post does not exist.
    NotFound,
    /// Invalid input / malformed request.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and error bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BlogError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("post not found: {0}")]
    NotFound(PostId),
    #[error("snapshot deserialization failed: {0}")]
    Deserialization(String),
    #[error("snapshot io failed: {0}")]
    PersistenceIo(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl BlogError {
    /// Map internal error to a stable client-facing code.
    ///
    /// Snapshot failures never reach a client directly; they surface as
    /// `INTERNAL`.
    pub fn client_code(&self) -> ClientCode {
        match self {
            BlogError::NotFound(_) => ClientCode::NotFound,
            BlogError::BadRequest(_) => ClientCode::BadRequest,
            BlogError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            BlogError::Deserialization(_)
            | BlogError::PersistenceIo(_)
            | BlogError::Internal(_) => ClientCode::Internal,
        }
    }
}
