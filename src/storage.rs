//! Storage Module
//!
//! Owns the store connection and bootstraps it from a session string.
//!
//! ## Responsibilities
//! - Acquire the in-memory connection and request best-effort tuning
//! - Decode the configured session string and populate the store
//! - Report legacy and malformed strings without writing anything
//! - Close the connection on delete, swallowing close-time failures

use tracing::{debug, error, info, warn};

use crate::config::{Config, PerformanceMode};
use crate::error::{Result, SessionError};
use crate::format::{self, Decoded, Layout, SessionState};
use crate::store::{Connection, Connector, MemoryConnector, Pragma, SessionRow};

/// How an `open` call ended
///
/// Every variant leaves a usable store; only `Restored` leaves it authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// No session string configured; the row holds defaults
    Empty,

    /// Session string decoded with the current layout and written
    Restored,

    /// Session string matched a historical layout; nothing written
    LegacyFormat(Layout),

    /// Session string matched no layout; nothing written
    InvalidLength { actual: usize, expected: usize },
}

impl OpenOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, OpenOutcome::Restored)
    }
}

/// Result of requesting the performance knobs
#[derive(Debug, Default)]
pub struct TuningReport {
    /// Knobs the store accepted
    pub applied: Vec<Pragma>,

    /// Knobs the store rejected, with the reason
    pub rejected: Vec<(Pragma, SessionError)>,
}

impl TuningReport {
    /// True when nothing was rejected
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Request each enabled knob independently
///
/// Never fails: rejections are collected so the caller can log them and
/// carry on with the store's defaults.
pub fn tune<C: Connection + ?Sized>(conn: &C, mode: &PerformanceMode) -> TuningReport {
    let mut report = TuningReport::default();

    for pragma in mode.pragmas() {
        match conn.pragma(pragma) {
            Ok(()) => report.applied.push(pragma),
            Err(e) => report.rejected.push((pragma, e)),
        }
    }

    report
}

/// Ephemeral session storage
///
/// ## Lifecycle
/// - `open` acquires a connection, tunes it, initializes the schema and
///   restores the configured session string. Call it once.
/// - `delete` interrupts and closes the connection, then clears the handle.
///   It never fails and may be called any number of times.
/// - Dropping the storage closes a still-open connection as a safety net.
///   Call `delete` rather than relying on it.
pub struct MemoryStorage<C: Connector = MemoryConnector> {
    /// Storage configuration
    config: Config,

    /// Source of store connections
    connector: C,

    /// Live connection, `None` before open and after delete
    conn: Option<C::Conn>,
}

impl MemoryStorage<MemoryConnector> {
    /// Create storage backed by the in-memory store
    pub fn new(config: Config) -> Self {
        Self::with_connector(config, MemoryConnector)
    }
}

impl<C: Connector> MemoryStorage<C> {
    /// Create storage backed by a custom connector
    pub fn with_connector(config: Config, connector: C) -> Self {
        Self {
            config,
            connector,
            conn: None,
        }
    }

    /// Open the store and restore the configured session string
    ///
    /// Steps:
    /// 1. Acquire a connection (kept in the handle before anything else runs)
    /// 2. Request the performance knobs, logging rejections
    /// 3. Initialize the schema
    /// 4. Decode and write the session string, if one is configured
    ///
    /// Store failures in steps 1, 3 and 4 propagate; the handle still owns
    /// the connection so `delete` stays effective.
    pub fn open(&mut self) -> Result<OpenOutcome> {
        let name = self.config.name.as_str();

        // Step 1: Acquire the connection, replacing any previous one
        let conn = self.connector.connect()?;
        if let Some(previous) = self.conn.take() {
            warn!(storage = name, "open called on an open storage; closing previous connection");
            if let Err(e) = previous.close() {
                debug!(storage = name, error = %e, "Error closing previous memory connection");
            }
        }
        let conn = self.conn.insert(conn);

        // Step 2: Best-effort tuning
        let report = tune(&*conn, &self.config.performance);
        for (pragma, e) in &report.rejected {
            warn!(storage = name, %pragma, error = %e, "Failed to set pragma optimization");
        }

        // Step 3: Schema
        conn.initialize()?;

        // Step 4: Session string
        let session_string = match self.config.session_string.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => {
                debug!(storage = name, "no session string supplied");
                return Ok(OpenOutcome::Empty);
            }
        };

        let buffer = format::decode_session_string(session_string)?;

        match format::decode(&buffer) {
            Decoded::Current(state) => {
                write_state(&*conn, state)?;
                info!(storage = name, "restored session from session string");
                Ok(OpenOutcome::Restored)
            }
            Decoded::Legacy(legacy) => {
                warn!(
                    storage = name,
                    layout = %legacy.layout,
                    "You are using an old session string format. Use export_session_string to update"
                );
                Ok(OpenOutcome::LegacyFormat(legacy.layout))
            }
            Decoded::InvalidLength { actual, expected } => {
                error!(
                    storage = name,
                    "Invalid session string size: {} bytes. Expected {} bytes.",
                    actual,
                    expected
                );
                Ok(OpenOutcome::InvalidLength { actual, expected })
            }
        }
    }

    /// Close the store and clear the handle
    ///
    /// Close-time failures are logged at debug level and swallowed.
    pub fn delete(&mut self) {
        if let Some(conn) = self.conn.take() {
            conn.interrupt();
            if let Err(e) = conn.close() {
                debug!(storage = %self.config.name, error = %e, "Error closing memory connection");
            }
        }
    }

    /// Build a session string from the current store contents
    ///
    /// Requires auth_key. Unset api_id / user_id are encoded as 0 and unset
    /// flags as false.
    pub fn export_session_string(&self) -> Result<String> {
        let row = self.state()?;

        let auth_key = row.auth_key.ok_or(SessionError::Incomplete("auth_key"))?;

        let state = SessionState {
            dc_id: row.dc_id,
            api_id: row.api_id,
            test_mode: row.test_mode.unwrap_or(false),
            auth_key,
            user_id: row.user_id,
            is_bot: row.is_bot.unwrap_or(false),
        };

        Ok(format::encode_session_string(&state))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Whether a connection is currently held
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// The live connection, if any
    pub fn connection(&self) -> Option<&C::Conn> {
        self.conn.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Snapshot of the session row
    pub fn state(&self) -> Result<SessionRow> {
        self.conn()?.row()
    }

    pub fn set_dc_id(&self, dc_id: u8) -> Result<()> {
        self.conn()?.set_dc_id(dc_id)
    }

    pub fn set_api_id(&self, api_id: Option<u32>) -> Result<()> {
        self.conn()?.set_api_id(api_id)
    }

    pub fn set_test_mode(&self, test_mode: bool) -> Result<()> {
        self.conn()?.set_test_mode(test_mode)
    }

    pub fn set_auth_key(&self, auth_key: format::AuthKey) -> Result<()> {
        self.conn()?.set_auth_key(auth_key)
    }

    pub fn set_user_id(&self, user_id: Option<u64>) -> Result<()> {
        self.conn()?.set_user_id(user_id)
    }

    pub fn set_is_bot(&self, is_bot: bool) -> Result<()> {
        self.conn()?.set_is_bot(is_bot)
    }

    pub fn set_date(&self, date: i64) -> Result<()> {
        self.conn()?.set_date(date)
    }

    fn conn(&self) -> Result<&C::Conn> {
        self.conn.as_ref().ok_or(SessionError::NotOpen)
    }
}

impl<C: Connector> Drop for MemoryStorage<C> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            let _ = conn.close();
        }
    }
}

/// Write a decoded session into the store
///
/// api_id goes first; the remaining fields are independent writes.
fn write_state<C: Connection + ?Sized>(conn: &C, state: SessionState) -> Result<()> {
    conn.set_api_id(state.api_id)?;

    conn.set_dc_id(state.dc_id)?;
    conn.set_test_mode(state.test_mode)?;
    conn.set_auth_key(state.auth_key)?;
    conn.set_user_id(state.user_id)?;
    conn.set_is_bot(state.is_bot)?;
    conn.set_date(0)?;

    Ok(())
}
