//! Store Module
//!
//! Volatile backing store for session fields.
//!
//! ## Responsibilities
//! - Schema setup (`initialize`, idempotent)
//! - Typed get/set of each session field
//! - Best-effort performance knobs (pragmas), each may be rejected
//! - Interrupt and close
//!
//! ## Data Structure Choice
//! One session row behind a `parking_lot::RwLock`:
//! - Fields are independent key/value writes, no cross-field transactions
//! - Connections are `Send + Sync` so they can cross threads when the
//!   caller serializes access itself

mod memory;

pub use memory::{MemoryConnection, MemoryConnector};

use std::fmt;

use crate::error::Result;
use crate::format::AuthKey;

/// Data center assigned to a freshly initialized row
pub const DEFAULT_DC_ID: u8 = 2;

/// Best-effort performance knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pragma {
    /// No rollback journal (durability off)
    JournalOff,

    /// No synchronous flushes
    SynchronousOff,

    /// Temporary data kept in memory
    TempStoreMemory,
}

impl fmt::Display for Pragma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pragma::JournalOff => write!(f, "journal_mode=OFF"),
            Pragma::SynchronousOff => write!(f, "synchronous=OFF"),
            Pragma::TempStoreMemory => write!(f, "temp_store=MEMORY"),
        }
    }
}

/// Snapshot of the session row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub dc_id: u8,
    pub api_id: Option<u32>,
    pub test_mode: Option<bool>,
    pub auth_key: Option<AuthKey>,
    /// Unix seconds of the last update; 0 for a restored session
    pub date: i64,
    pub user_id: Option<u64>,
    pub is_bot: Option<bool>,
}

impl SessionRow {
    /// Whether the row carries an auth key
    ///
    /// `open` succeeding does not imply this; a legacy or malformed session
    /// string leaves the row unauthorized.
    pub fn is_authorized(&self) -> bool {
        self.auth_key.is_some()
    }
}

impl Default for SessionRow {
    fn default() -> Self {
        Self {
            dc_id: DEFAULT_DC_ID,
            api_id: None,
            test_mode: None,
            auth_key: None,
            date: 0,
            user_id: None,
            is_bot: None,
        }
    }
}

/// A connection to the backing store
///
/// Every write fails with `NotInitialized` until `initialize` has run and
/// with `Closed` after `close`.
pub trait Connection: Send + Sync {
    /// Request a performance knob
    fn pragma(&self, pragma: Pragma) -> Result<()>;

    /// Create the schema and default row if missing
    fn initialize(&self) -> Result<()>;

    fn set_dc_id(&self, dc_id: u8) -> Result<()>;
    fn set_api_id(&self, api_id: Option<u32>) -> Result<()>;
    fn set_test_mode(&self, test_mode: bool) -> Result<()>;
    fn set_auth_key(&self, auth_key: AuthKey) -> Result<()>;
    fn set_user_id(&self, user_id: Option<u64>) -> Result<()>;
    fn set_is_bot(&self, is_bot: bool) -> Result<()>;
    fn set_date(&self, date: i64) -> Result<()>;

    /// Read the current row
    fn row(&self) -> Result<SessionRow>;

    /// Abort in-flight work; the next operation fails with `Interrupted`
    fn interrupt(&self);

    /// Release all resources
    fn close(&self) -> Result<()>;
}

/// Acquires store connections
pub trait Connector {
    type Conn: Connection;

    fn connect(&self) -> Result<Self::Conn>;
}
