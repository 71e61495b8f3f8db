//! Session String Format Module
//!
//! Binary layouts for portable session strings.
//!
//! ## Transport
//! A session string is URL-safe base64, unpadded by convention. Padding is
//! restored before decoding; the decoded buffer is one fixed-width record.
//!
//! ## Layouts (big-endian, selected by exact length only)
//!
//! ### Current (271 bytes)
//! ```text
//! ┌────────┬──────────┬──────────┬────────────────┬────────────┬──────────┐
//! │ DC (1) │ API (4)  │ Test (1) │ AuthKey (256)  │ User (8)   │ Bot (1)  │
//! └────────┴──────────┴──────────┴────────────────┴────────────┴──────────┘
//! ```
//!
//! ### Legacy, 32-bit user id (263 bytes)
//! ```text
//! ┌────────┬──────────┬────────────────┬────────────┬──────────┐
//! │ DC (1) │ Test (1) │ AuthKey (256)  │ User (4)   │ Bot (1)  │
//! └────────┴──────────┴────────────────┴────────────┴──────────┘
//! ```
//!
//! ### Legacy, 64-bit user id (267 bytes)
//! ```text
//! ┌────────┬──────────┬────────────────┬────────────┬──────────┐
//! │ DC (1) │ Test (1) │ AuthKey (256)  │ User (8)   │ Bot (1)  │
//! └────────┴──────────┴────────────────┴────────────┴──────────┘
//! ```
//!
//! The layouts carry no version tag, so total length is the only
//! discriminator and no two layouts may share a size.

mod layout;
mod state;
mod codec;

pub use layout::{
    Layout, LAYOUTS, AUTH_KEY_SIZE, CURRENT_SIZE, LEGACY_32_SIZE, LEGACY_64_SIZE,
};
pub use state::{AuthKey, Decoded, LegacySession, SessionState};
pub use codec::{
    decode, encode, restore_padding, decode_session_string, encode_session_string,
};
