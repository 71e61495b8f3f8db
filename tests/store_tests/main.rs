//! Backing store tests
