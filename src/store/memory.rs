//! In-memory store implementation
//!
//! Single session row behind an RwLock; nothing ever touches disk.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::{Result, SessionError};
use crate::format::AuthKey;
use super::{Connection, Connector, Pragma, SessionRow};

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Opens in-memory connections
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryConnector;

impl Connector for MemoryConnector {
    type Conn = MemoryConnection;

    fn connect(&self) -> Result<MemoryConnection> {
        Ok(MemoryConnection::new())
    }
}

/// Connection state guarded by the RwLock
#[derive(Debug, Default)]
struct Inner {
    /// `None` until `initialize` creates the row
    row: Option<SessionRow>,

    /// Pragmas applied so far, in request order
    pragmas: Vec<Pragma>,

    closed: bool,
}

/// A volatile, process-local connection
#[derive(Debug)]
pub struct MemoryConnection {
    id: u64,
    inner: RwLock<Inner>,
    interrupted: AtomicBool,
}

impl MemoryConnection {
    /// Create a fresh, uninitialized connection
    pub fn new() -> Self {
        let id = NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed);
        debug!(connection = id, "opened in-memory connection");

        Self {
            id,
            inner: RwLock::new(Inner::default()),
            interrupted: AtomicBool::new(false),
        }
    }

    /// Process-unique connection id (for logs)
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Pragmas applied so far
    pub fn pragmas(&self) -> Vec<Pragma> {
        self.inner.read().pragmas.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.read().closed
    }

    /// Consume a pending interrupt, failing the current operation
    fn check_interrupt(&self) -> Result<()> {
        if self.interrupted.swap(false, Ordering::AcqRel) {
            return Err(SessionError::Interrupted);
        }
        Ok(())
    }

    /// Apply a mutation to the session row
    fn update<F>(&self, field: &'static str, apply: F) -> Result<()>
    where
        F: FnOnce(&mut SessionRow),
    {
        self.check_interrupt()?;

        let mut inner = self.inner.write();
        if inner.closed {
            return Err(SessionError::Closed);
        }
        let row = inner.row.as_mut().ok_or(SessionError::NotInitialized)?;
        apply(row);

        trace!(connection = self.id, field, "updated session field");
        Ok(())
    }
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection for MemoryConnection {
    fn pragma(&self, pragma: Pragma) -> Result<()> {
        self.check_interrupt()?;

        let mut inner = self.inner.write();
        if inner.closed {
            return Err(SessionError::Closed);
        }
        if !inner.pragmas.contains(&pragma) {
            inner.pragmas.push(pragma);
        }

        trace!(connection = self.id, %pragma, "applied pragma");
        Ok(())
    }

    fn initialize(&self) -> Result<()> {
        self.check_interrupt()?;

        let mut inner = self.inner.write();
        if inner.closed {
            return Err(SessionError::Closed);
        }
        if inner.row.is_none() {
            inner.row = Some(SessionRow::default());
            debug!(connection = self.id, "created sessions table");
        }
        Ok(())
    }

    fn set_dc_id(&self, dc_id: u8) -> Result<()> {
        self.update("dc_id", |row| row.dc_id = dc_id)
    }

    fn set_api_id(&self, api_id: Option<u32>) -> Result<()> {
        self.update("api_id", |row| row.api_id = api_id)
    }

    fn set_test_mode(&self, test_mode: bool) -> Result<()> {
        self.update("test_mode", |row| row.test_mode = Some(test_mode))
    }

    fn set_auth_key(&self, auth_key: AuthKey) -> Result<()> {
        self.update("auth_key", |row| row.auth_key = Some(auth_key))
    }

    fn set_user_id(&self, user_id: Option<u64>) -> Result<()> {
        self.update("user_id", |row| row.user_id = user_id)
    }

    fn set_is_bot(&self, is_bot: bool) -> Result<()> {
        self.update("is_bot", |row| row.is_bot = Some(is_bot))
    }

    fn set_date(&self, date: i64) -> Result<()> {
        self.update("date", |row| row.date = date)
    }

    fn row(&self) -> Result<SessionRow> {
        self.check_interrupt()?;

        let inner = self.inner.read();
        if inner.closed {
            return Err(SessionError::Closed);
        }
        inner.row.clone().ok_or(SessionError::NotInitialized)
    }

    fn interrupt(&self) {
        self.interrupted.store(true, Ordering::Release);
    }

    fn close(&self) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.closed {
            return Err(SessionError::Closed);
        }
        inner.closed = true;
        inner.row = None;
        inner.pragmas.clear();
        self.interrupted.store(false, Ordering::Release);

        debug!(connection = self.id, "closed in-memory connection");
        Ok(())
    }
}
