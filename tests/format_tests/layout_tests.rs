//! Layout Tests
//!
//! Tests verify:
//! - Layout sizes match their field widths
//! - No two layouts share a byte length
//! - Every buffer length maps to exactly one decode outcome

use memsession::format::{
    decode, Decoded, Layout, LAYOUTS, AUTH_KEY_SIZE, CURRENT_SIZE, LEGACY_32_SIZE,
    LEGACY_64_SIZE,
};

// =============================================================================
// Size Tests
// =============================================================================

#[test]
fn test_layout_sizes() {
    assert_eq!(AUTH_KEY_SIZE, 256);
    assert_eq!(CURRENT_SIZE, 271);
    assert_eq!(LEGACY_32_SIZE, 263);
    assert_eq!(LEGACY_64_SIZE, 267);

    assert_eq!(Layout::Current.size(), CURRENT_SIZE);
    assert_eq!(Layout::Legacy32.size(), LEGACY_32_SIZE);
    assert_eq!(Layout::Legacy64.size(), LEGACY_64_SIZE);
}

#[test]
fn test_layout_sizes_are_distinct() {
    for (i, (a, _)) in LAYOUTS.iter().enumerate() {
        for (b, _) in LAYOUTS.iter().skip(i + 1) {
            assert_ne!(a, b, "two layouts share a byte length");
        }
    }
}

#[test]
fn test_table_entries_match_layouts() {
    for (size, layout) in LAYOUTS {
        assert_eq!(size, layout.size());
    }
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_for_len_exact_matches() {
    assert_eq!(Layout::for_len(271), Some(Layout::Current));
    assert_eq!(Layout::for_len(263), Some(Layout::Legacy32));
    assert_eq!(Layout::for_len(267), Some(Layout::Legacy64));
}

#[test]
fn test_for_len_rejects_near_misses() {
    for len in [0, 1, 262, 264, 266, 268, 270, 272, 351] {
        assert_eq!(Layout::for_len(len), None, "length {} should not match", len);
    }
}

#[test]
fn test_is_legacy() {
    assert!(!Layout::Current.is_legacy());
    assert!(Layout::Legacy32.is_legacy());
    assert!(Layout::Legacy64.is_legacy());
}

#[test]
fn test_display_includes_size() {
    assert_eq!(Layout::Legacy32.to_string(), "legacy-32 (263 bytes)");
    assert_eq!(Layout::Current.to_string(), "current (271 bytes)");
}

#[test]
fn test_decode_outcome_determined_by_length() {
    for len in 0..=400 {
        let buffer = vec![0xA5u8; len];
        match (decode(&buffer), Layout::for_len(len)) {
            (Decoded::Current(_), Some(Layout::Current)) => {}
            (Decoded::Legacy(legacy), Some(layout)) => assert_eq!(legacy.layout, layout),
            (Decoded::InvalidLength { actual, expected }, None) => {
                assert_eq!(actual, len);
                assert_eq!(expected, CURRENT_SIZE);
            }
            (other, layout) => panic!("length {}: got {:?} for {:?}", len, other, layout),
        }
    }
}
