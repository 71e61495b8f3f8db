//! Error types for memsession
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::store::Pragma;

/// Result type alias using SessionError
pub type Result<T> = std::result::Result<T, SessionError>;

/// Unified error type for memsession operations
#[derive(Debug, Error)]
pub enum SessionError {
    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Store error: {0}")]
    Store(String),

    #[error("Store not initialized: sessions table does not exist")]
    NotInitialized,

    #[error("Store connection is closed")]
    Closed,

    #[error("Store operation interrupted")]
    Interrupted,

    #[error("Pragma rejected: {0}")]
    PragmaRejected(Pragma),

    // -------------------------------------------------------------------------
    // Storage Handle Errors
    // -------------------------------------------------------------------------
    #[error("Storage is not open")]
    NotOpen,

    #[error("Incomplete session: {0} is not set")]
    Incomplete(&'static str),

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Invalid session string encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
