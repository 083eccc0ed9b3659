use sha2::{Digest, Sha256};

use crate::aliases::DerivedKey32;
use crate::consts::KEY_LEN;

/// SHA-256 over the password bytes → AES-256 key
///
/// Deterministic and unsalted: the same password always yields the same key.
pub fn derive_key(password: &[u8]) -> DerivedKey32 {
    let digest: [u8; KEY_LEN] = Sha256::digest(password).into();
    DerivedKey32::new(digest)
}
