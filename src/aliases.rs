// src/aliases.rs
//! Re-exports secure-gate's secret wrappers
//!
//! These are the canonical secret types used throughout record-vault.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(DerivedKey32, 32); // SHA-256(password), the AES-256 key

// Dynamic secrets
dynamic_alias!(PasswordBytes, Vec<u8>); // UTF-8 bytes of the caller's password
