//! Session string format tests

mod layout_tests;
