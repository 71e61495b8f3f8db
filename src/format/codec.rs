//! Session codec
//!
//! Encoding and decoding functions for session strings.
//!
//! ## Decode Pipeline
//! ```text
//! "AQAAB..."  ──restore padding──▶  "AQAAB...="  ──base64url──▶  [u8; N]
//!                                                                  │
//!                                        Layout::for_len(N) ◀──────┘
//!                                                │
//!                        ┌───────────────────────┼───────────────────────┐
//!                        ▼                       ▼                       ▼
//!                     Current                 Legacy*              InvalidLength
//! ```

use std::borrow::Cow;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use bytes::{Buf, BufMut};

use crate::error::Result;
use super::layout::{Layout, AUTH_KEY_SIZE, CURRENT_SIZE};
use super::state::{AuthKey, Decoded, LegacySession, SessionState};

/// URL-safe engine for restored (padded) session strings
///
/// Trailing bits are tolerated because older exporters did not zero them.
const SESSION_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

// =============================================================================
// Transport (base64url)
// =============================================================================

/// Restore base64 padding: append `=` until the length is a multiple of 4
pub fn restore_padding(encoded: &str) -> Cow<'_, str> {
    match encoded.len() % 4 {
        0 => Cow::Borrowed(encoded),
        rem => {
            let mut padded = String::with_capacity(encoded.len() + 4 - rem);
            padded.push_str(encoded);
            padded.extend(std::iter::repeat('=').take(4 - rem));
            Cow::Owned(padded)
        }
    }
}

/// Map the input onto the URL-safe alphabet
///
/// `+` and `/` become `-` and `_`; characters outside both alphabets
/// (whitespace, line breaks) are dropped.
fn normalize_alphabet(encoded: &str) -> String {
    encoded
        .chars()
        .filter_map(|c| match c {
            '+' => Some('-'),
            '/' => Some('_'),
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '=' => Some(c),
            _ => None,
        })
        .collect()
}

/// Decode a session string into its raw byte buffer
///
/// Accepts either base64 alphabet and ignores stray characters. The buffer
/// is not length-checked here; layout selection belongs to [`decode`].
pub fn decode_session_string(session_string: &str) -> Result<Vec<u8>> {
    let normalized = normalize_alphabet(session_string);
    let padded = restore_padding(&normalized);
    Ok(SESSION_ENGINE.decode(padded.as_bytes())?)
}

/// Encode a session with the current layout as an unpadded session string
pub fn encode_session_string(state: &SessionState) -> String {
    URL_SAFE_NO_PAD.encode(encode(state))
}

// =============================================================================
// Binary Layouts
// =============================================================================

/// Decode a raw buffer, selecting the layout by exact length
pub fn decode(buffer: &[u8]) -> Decoded {
    match Layout::for_len(buffer.len()) {
        Some(layout) if layout.is_legacy() => Decoded::Legacy(decode_legacy(layout, buffer)),
        Some(_) => Decoded::Current(decode_current(buffer)),
        None => Decoded::InvalidLength {
            actual: buffer.len(),
            expected: CURRENT_SIZE,
        },
    }
}

/// Encode a session with the current layout
///
/// Unset `api_id` / `user_id` are written as 0.
pub fn encode(state: &SessionState) -> Vec<u8> {
    let mut buf = Vec::with_capacity(CURRENT_SIZE);
    buf.put_u8(state.dc_id);
    buf.put_u32(state.api_id.unwrap_or(0));
    buf.put_u8(state.test_mode as u8);
    buf.put_slice(state.auth_key.as_bytes());
    buf.put_u64(state.user_id.unwrap_or(0));
    buf.put_u8(state.is_bot as u8);

    debug_assert_eq!(buf.len(), CURRENT_SIZE);
    buf
}

/// Decode the current layout (caller guarantees the length)
fn decode_current(mut buf: &[u8]) -> SessionState {
    debug_assert_eq!(buf.len(), Layout::Current.size());

    let dc_id = buf.get_u8();
    let api_id = buf.get_u32();
    let test_mode = read_bool(&mut buf);
    let auth_key = read_auth_key(&mut buf);
    let user_id = buf.get_u64();
    let is_bot = read_bool(&mut buf);

    SessionState {
        dc_id,
        api_id: Some(api_id),
        test_mode,
        auth_key,
        user_id: Some(user_id),
        is_bot,
    }
}

/// Decode a historical layout (caller guarantees the length)
fn decode_legacy(layout: Layout, mut buf: &[u8]) -> LegacySession {
    debug_assert_eq!(buf.len(), layout.size());

    let dc_id = buf.get_u8();
    let test_mode = read_bool(&mut buf);
    let auth_key = read_auth_key(&mut buf);
    let user_id = match layout {
        Layout::Legacy32 => u64::from(buf.get_u32()),
        Layout::Legacy64 | Layout::Current => buf.get_u64(),
    };
    let is_bot = read_bool(&mut buf);

    LegacySession {
        layout,
        dc_id,
        test_mode,
        auth_key,
        user_id,
        is_bot,
    }
}

/// Any non-zero byte is true
fn read_bool(buf: &mut &[u8]) -> bool {
    buf.get_u8() != 0
}

fn read_auth_key(buf: &mut &[u8]) -> AuthKey {
    let mut key = [0u8; AUTH_KEY_SIZE];
    buf.copy_to_slice(&mut key);
    AuthKey::new(key)
}
