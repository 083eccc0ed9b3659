// tests/common.rs
//! Shared test utilities: logging setup and fixtures

#![allow(dead_code)]

use record_vault::config::Config;
use record_vault::{Cipher, RecordStore};

#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize test-friendly logging
/// Call once at the start of any test that needs logs
pub fn setup() {
    #[cfg(feature = "logging")]
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env()) // respects RUST_LOG=
        .try_init()
        .ok(); // idempotent, safe to call multiple times

    #[cfg(not(feature = "logging"))]
    { /* no-op */ }
}

/// Store with built-in defaults, independent of any config file on disk
pub fn store(password: &str) -> RecordStore {
    RecordStore::with_config(Cipher::from_text(password).unwrap(), &Config::default())
}
