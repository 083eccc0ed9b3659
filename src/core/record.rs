use std::fmt;

use crate::consts::IV_LEN;

/// One stored pair; both halves are `IV ‖ ciphertext` fields
#[derive(Clone, PartialEq, Eq)]
pub struct Record {
    key: Vec<u8>,
    value: Vec<u8>,
}

impl Record {
    pub fn new(key: Vec<u8>, value: Vec<u8>) -> Self {
        Record { key, value }
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.key, self.value)
    }
}

/// IV prefix and length only; ciphertext bodies stay out of logs
struct FieldPreview<'a>(&'a [u8]);

impl fmt::Debug for FieldPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let iv = &self.0[..self.0.len().min(IV_LEN)];
        write!(f, "iv={} ({} bytes)", hex::encode(iv), self.0.len())
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("key", &FieldPreview(&self.key))
            .field("value", &FieldPreview(&self.value))
            .finish()
    }
}
