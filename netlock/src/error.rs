//! High-level error types
//!
//! The inbound API collaborator maps [`ErrorKind`] to its transport-level
//! status; the library itself never exits the process on a send failure.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed address or door number; caught before any I/O
    #[error("Validation error: {0}")]
    Validation(#[from] netlock_core::Error),

    /// Port cannot be opened or a write failed; the supervisor will retry
    #[error("Connection error: {0}")]
    Connection(#[from] netlock_transport::Error),

    /// Startup configuration problem
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Anything else; always logged with full context, never absorbed
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Coarse error classification for the inbound API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Connection,
    Config,
    Unexpected,
}

impl Error {
    /// Classify this error for the caller
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Connection(_) => ErrorKind::Connection,
            Self::Config(_) => ErrorKind::Config,
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Check if the background supervisor can recover from this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
