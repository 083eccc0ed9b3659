// src/consts.rs
//! Shared constants: cipher parameters and defaults

/// AES block size; also the IV length
pub const BLOCK_SIZE: usize = 16;

/// Length of the per-message initialization vector
pub const IV_LEN: usize = BLOCK_SIZE;

/// AES-256 key length (SHA-256 digest size)
pub const KEY_LEN: usize = 32;

// One prefix byte records the pad length
const _: () = assert!(BLOCK_SIZE <= 256);

/// Extension appended to filenames that have none
pub const DEFAULT_EXTENSION: &str = "sd";

/// Outer-blob decrypt attempts in `RecordStore::load` (one retry)
pub const DEFAULT_DECRYPT_ATTEMPTS: u32 = 2;

/// Share of the password left visible in summaries
pub const DEFAULT_MASK_PERCENT: u8 = 40;

/// Env var naming the TOML config file
pub const CONFIG_ENV_VAR: &str = "RECORD_VAULT_CONFIG";

/// Config file looked up when the env var is unset
pub const DEFAULT_CONFIG_PATH: &str = "record-vault.toml";
