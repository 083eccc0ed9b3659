use crate::config::app::{Display, Store};
use crate::consts::{DEFAULT_DECRYPT_ATTEMPTS, DEFAULT_EXTENSION, DEFAULT_MASK_PERCENT};

pub fn default_store() -> Store {
    Store {
        default_extension: default_extension(),
        decrypt_attempts: default_decrypt_attempts(),
    }
}

pub fn default_display() -> Display {
    Display {
        mask_percent: default_mask_percent(),
    }
}

pub fn default_extension() -> String {
    DEFAULT_EXTENSION.into()
}

pub fn default_decrypt_attempts() -> u32 {
    DEFAULT_DECRYPT_ATTEMPTS
}

pub fn default_mask_percent() -> u8 {
    DEFAULT_MASK_PERCENT
}
