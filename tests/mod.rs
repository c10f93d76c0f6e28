//! Integration tests for animewatch
//!
//! Tests are organized by component:
//! - gazes_test: catalog API client tests
//! - session_test: watch pipeline against a mocked catalog
//! - commands_test: watch/search handlers, exit codes and workspace state
//! - cli_test: argument parsing

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
