//! Test doubles for the bootstrap sequence
//!
//! `RecordingConnector` hands out connections that journal every call and
//! delegate to a real in-memory connection, with switchable failures.

use std::sync::Arc;

use memsession::format::{encode_session_string, AuthKey, SessionState, AUTH_KEY_SIZE};
use memsession::store::{Connection, Connector, MemoryConnection, Pragma, SessionRow};
use memsession::{Result, SessionError};
use parking_lot::Mutex;

/// One observed store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Connect,
    Pragma(Pragma),
    Initialize,
    Set(&'static str),
    Row,
    Interrupt,
    Close,
}

/// Shared call log
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Call>>>);

impl Journal {
    fn push(&self, call: Call) {
        self.0.lock().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().clone()
    }

    /// Names of the fields written, in order
    pub fn setters(&self) -> Vec<&'static str> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Set(field) => Some(field),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.calls().iter().filter(|call| *call == wanted).count()
    }
}

/// Every tuning knob
pub const ALL_PRAGMAS: &[Pragma] = &[
    Pragma::JournalOff,
    Pragma::SynchronousOff,
    Pragma::TempStoreMemory,
];

/// Switchable failures
#[derive(Debug, Clone, Copy, Default)]
pub struct Faults {
    /// Knobs the store refuses
    pub rejected_pragmas: &'static [Pragma],
    pub fail_initialize: bool,
    /// Field whose setter fails
    pub fail_setter: Option<&'static str>,
    pub fail_close: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingConnector {
    pub journal: Journal,
    pub faults: Faults,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_faults(faults: Faults) -> Self {
        Self {
            journal: Journal::default(),
            faults,
        }
    }
}

impl Connector for RecordingConnector {
    type Conn = RecordingConnection;

    fn connect(&self) -> Result<RecordingConnection> {
        self.journal.push(Call::Connect);
        Ok(RecordingConnection {
            inner: MemoryConnection::new(),
            journal: self.journal.clone(),
            faults: self.faults,
        })
    }
}

pub struct RecordingConnection {
    inner: MemoryConnection,
    journal: Journal,
    faults: Faults,
}

impl RecordingConnection {
    /// The wrapped in-memory connection
    pub fn inner(&self) -> &MemoryConnection {
        &self.inner
    }

    fn set(&self, field: &'static str, apply: impl FnOnce(&MemoryConnection) -> Result<()>) -> Result<()> {
        self.journal.push(Call::Set(field));
        if self.faults.fail_setter == Some(field) {
            return Err(SessionError::Store(format!("cannot write {}", field)));
        }
        apply(&self.inner)
    }
}

impl Connection for RecordingConnection {
    fn pragma(&self, pragma: Pragma) -> Result<()> {
        self.journal.push(Call::Pragma(pragma));
        if self.faults.rejected_pragmas.contains(&pragma) {
            return Err(SessionError::PragmaRejected(pragma));
        }
        self.inner.pragma(pragma)
    }

    fn initialize(&self) -> Result<()> {
        self.journal.push(Call::Initialize);
        if self.faults.fail_initialize {
            return Err(SessionError::Store("disk I/O error".to_string()));
        }
        self.inner.initialize()
    }

    fn set_dc_id(&self, dc_id: u8) -> Result<()> {
        self.set("dc_id", |c| c.set_dc_id(dc_id))
    }

    fn set_api_id(&self, api_id: Option<u32>) -> Result<()> {
        self.set("api_id", |c| c.set_api_id(api_id))
    }

    fn set_test_mode(&self, test_mode: bool) -> Result<()> {
        self.set("test_mode", |c| c.set_test_mode(test_mode))
    }

    fn set_auth_key(&self, auth_key: AuthKey) -> Result<()> {
        self.set("auth_key", |c| c.set_auth_key(auth_key))
    }

    fn set_user_id(&self, user_id: Option<u64>) -> Result<()> {
        self.set("user_id", |c| c.set_user_id(user_id))
    }

    fn set_is_bot(&self, is_bot: bool) -> Result<()> {
        self.set("is_bot", |c| c.set_is_bot(is_bot))
    }

    fn set_date(&self, date: i64) -> Result<()> {
        self.set("date", |c| c.set_date(date))
    }

    fn row(&self) -> Result<SessionRow> {
        self.journal.push(Call::Row);
        self.inner.row()
    }

    fn interrupt(&self) {
        self.journal.push(Call::Interrupt);
        self.inner.interrupt();
    }

    fn close(&self) -> Result<()> {
        self.journal.push(Call::Close);
        if self.faults.fail_close {
            return Err(SessionError::Store("database is locked".to_string()));
        }
        self.inner.close()
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn sample_key() -> AuthKey {
    let mut key = [0u8; AUTH_KEY_SIZE];
    for (i, byte) in key.iter_mut().enumerate() {
        *byte = (255 - i) as u8;
    }
    AuthKey::new(key)
}

pub fn sample_state() -> SessionState {
    SessionState {
        dc_id: 5,
        api_id: Some(94_575),
        test_mode: true,
        auth_key: sample_key(),
        user_id: Some(1_087_968_824),
        is_bot: false,
    }
}

pub fn current_session_string() -> String {
    encode_session_string(&sample_state())
}

/// Unpadded URL-safe base64 of raw bytes
pub fn to_session_string(bytes: &[u8]) -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;

    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn legacy_32_bytes() -> Vec<u8> {
    let mut buf = vec![2, 0];
    buf.extend_from_slice(sample_key().as_bytes());
    buf.extend_from_slice(&123_456u32.to_be_bytes());
    buf.push(1);
    buf
}

pub fn legacy_64_bytes() -> Vec<u8> {
    let mut buf = vec![2, 0];
    buf.extend_from_slice(sample_key().as_bytes());
    buf.extend_from_slice(&5_000_000_000u64.to_be_bytes());
    buf.push(1);
    buf
}
