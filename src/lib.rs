// src/lib.rs
//! record-vault: a password-protected key-value record store in one encrypted file
//!
//! Features:
//! - AES-256-CBC with a fresh random IV per field
//! - SHA-256 password-derived keys held in zeroizing secrets
//! - Two encryption layers: every key/value, then the whole listing
//! - Case-insensitive, insertion-ordered records

pub mod aliases;
pub mod config;
pub mod consts;
pub mod core;
pub mod file_ops;
pub mod vault;

pub mod error;

// Re-export everything users need at the crate root
pub use aliases::{DerivedKey32, PasswordBytes};
pub use config::load as load_config;
pub use crate::core::{
    derive_key, Cipher, Plaintext, Record, RecordStore, Result as CoreResult, StoreState,
};
pub use error::CoreError;
pub use vault::Vault;
