//! Configuration system for record-vault
//!
//! Central, lazy-loaded global config with TOML + env overrides.

pub use app::{from_path, from_toml_str, load, Config, Display, Store};

mod app;
mod defaults;
