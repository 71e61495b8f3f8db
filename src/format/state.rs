//! Decoded session records

use std::fmt;

use super::layout::{Layout, AUTH_KEY_SIZE};

/// Session authentication key
///
/// Fixed width; `Debug` prints a CRC32 checksum instead of key material.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthKey([u8; AUTH_KEY_SIZE]);

impl AuthKey {
    pub fn new(bytes: [u8; AUTH_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; AUTH_KEY_SIZE] {
        &self.0
    }

    /// CRC32 of the key, safe to log
    pub fn checksum(&self) -> u32 {
        crc32fast::hash(&self.0)
    }
}

impl fmt::Debug for AuthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthKey(crc32={:08x})", self.checksum())
    }
}

/// A session decoded from the current layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Data center the session is bound to
    pub dc_id: u8,

    /// Application id; always `Some` when decoded
    pub api_id: Option<u32>,

    /// Whether the test network is used
    pub test_mode: bool,

    /// Session authentication key
    pub auth_key: AuthKey,

    /// Authenticated user, if known
    pub user_id: Option<u64>,

    /// Whether the session belongs to a bot account
    pub is_bot: bool,
}

/// A session decoded from a historical layout
///
/// Never written to the store; kept so callers can report what was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacySession {
    /// The layout that matched
    pub layout: Layout,
    pub dc_id: u8,
    pub test_mode: bool,
    pub auth_key: AuthKey,
    /// Widened to 64 bits regardless of the wire width
    pub user_id: u64,
    pub is_bot: bool,
}

/// Result of decoding a session buffer
///
/// Exactly one variant per buffer, chosen by its length alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Buffer matched the current layout
    Current(SessionState),

    /// Buffer matched a historical layout
    Legacy(LegacySession),

    /// Buffer matched no layout
    InvalidLength { actual: usize, expected: usize },
}
