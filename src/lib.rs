//! # memsession
//!
//! Ephemeral, process-local session storage for an MTProto-style client:
//! - Session state kept entirely in memory, gone on exit or delete
//! - Bootstrap from a portable, URL-safe base64 session string
//! - Historical binary layouts recognized by exact byte length
//! - Best-effort store tuning and error-swallowing teardown
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     MemoryStorage                            │
//! │              (open / delete / accessors)                     │
//! └──────────────┬───────────────────────────────┬──────────────┘
//!                │                               │
//!                ▼                               ▼
//!   ┌────────────────────────┐      ┌────────────────────────┐
//!   │        format          │      │         store          │
//!   │ base64 → layout lookup │      │  Connection (RwLock)   │
//!   │   → decoded fields     │      │  pragmas / setters     │
//!   └────────────────────────┘      └────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod format;
pub mod store;
pub mod storage;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SessionError, Result};
pub use config::{Config, PerformanceMode};
pub use storage::{MemoryStorage, OpenOutcome, TuningReport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of memsession
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
