//! Layout definitions
//!
//! Fixed-width record layouts and the length lookup table.

use std::fmt;

/// Auth key width in every known layout
pub const AUTH_KEY_SIZE: usize = 256;

const DC_ID_WIDTH: usize = 1;
const API_ID_WIDTH: usize = 4;
const BOOL_WIDTH: usize = 1;
const USER_ID_32_WIDTH: usize = 4;
const USER_ID_64_WIDTH: usize = 8;

/// dc_id + api_id + test_mode + auth_key + user_id (64) + is_bot
pub const CURRENT_SIZE: usize =
    DC_ID_WIDTH + API_ID_WIDTH + BOOL_WIDTH + AUTH_KEY_SIZE + USER_ID_64_WIDTH + BOOL_WIDTH;

/// dc_id + test_mode + auth_key + user_id (32) + is_bot
pub const LEGACY_32_SIZE: usize =
    DC_ID_WIDTH + BOOL_WIDTH + AUTH_KEY_SIZE + USER_ID_32_WIDTH + BOOL_WIDTH;

/// dc_id + test_mode + auth_key + user_id (64) + is_bot
pub const LEGACY_64_SIZE: usize =
    DC_ID_WIDTH + BOOL_WIDTH + AUTH_KEY_SIZE + USER_ID_64_WIDTH + BOOL_WIDTH;

/// A known session string layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Current layout, carries api_id
    Current,

    /// Historical layout with a 32-bit user id
    Legacy32,

    /// Historical layout with a 64-bit user id
    Legacy64,
}

/// Length lookup table, checked in order
pub const LAYOUTS: [(usize, Layout); 3] = [
    (CURRENT_SIZE, Layout::Current),
    (LEGACY_32_SIZE, Layout::Legacy32),
    (LEGACY_64_SIZE, Layout::Legacy64),
];

// Every table entry must agree with its layout and no two sizes may collide.
const _: () = {
    let mut i = 0;
    while i < LAYOUTS.len() {
        assert!(LAYOUTS[i].0 == LAYOUTS[i].1.size(), "layout table size mismatch");
        let mut j = i + 1;
        while j < LAYOUTS.len() {
            assert!(LAYOUTS[i].0 != LAYOUTS[j].0, "two layouts share a byte length");
            j += 1;
        }
        i += 1;
    }
};

impl Layout {
    /// Total encoded size in bytes
    pub const fn size(self) -> usize {
        match self {
            Layout::Current => CURRENT_SIZE,
            Layout::Legacy32 => LEGACY_32_SIZE,
            Layout::Legacy64 => LEGACY_64_SIZE,
        }
    }

    /// Whether this layout predates the current one
    pub const fn is_legacy(self) -> bool {
        !matches!(self, Layout::Current)
    }

    /// Find the layout whose size equals `len` exactly
    pub fn for_len(len: usize) -> Option<Layout> {
        LAYOUTS
            .iter()
            .find(|(size, _)| *size == len)
            .map(|(_, layout)| *layout)
    }

    /// Short human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Layout::Current => "current",
            Layout::Legacy32 => "legacy-32",
            Layout::Legacy64 => "legacy-64",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.name(), self.size())
    }
}
