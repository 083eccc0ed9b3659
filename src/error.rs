// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Empty or blank keys/values cannot be encrypted.
    #[error("cannot encrypt an empty or blank field")]
    EmptyField,

    /// Decryption did not yield coherent plaintext: wrong password or a
    /// corrupted/foreign file. Heuristic only, there is no integrity tag.
    #[error("password rejected: {0}")]
    Password(&'static str),

    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// The cipher backend failed its startup self-test.
    #[error("cipher backend unavailable: {0}")]
    CipherUnavailable(&'static str),

    #[error("secure random source failed: {0}")]
    Entropy(String),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
