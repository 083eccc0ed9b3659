//! Pure cryptographic operations, no I/O
//!
//! All functions work exclusively on in-memory buffers.
//! AES-256-CBC under a SHA-256 password key, length-prefix padding,
//! a fresh IV per message. Confidentiality only: there is no integrity tag.
mod backend;
mod decrypt;
mod encrypt;
mod key;

use std::fmt;

use crate::aliases::{DerivedKey32, PasswordBytes};
use crate::core::text::{encode_text, mask_password};
use crate::core::Result;

pub use backend::ensure_backend;
pub use decrypt::unpad;
pub use encrypt::{generate_iv, pad};
pub use key::derive_key;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Symmetric cipher bound to one password
///
/// Holds the password and its derived key for the lifetime of the owner;
/// both are zeroized on drop.
pub struct Cipher {
    password: PasswordBytes,
    key: DerivedKey32,
}

impl Cipher {
    /// Fails with `CipherUnavailable` if the AES backend self-test fails
    pub fn new(password: &[u8]) -> Result<Self> {
        ensure_backend()?;
        Ok(Cipher {
            key: derive_key(password),
            password: PasswordBytes::new(password.to_vec()),
        })
    }

    pub fn from_text(password: &str) -> Result<Self> {
        Self::new(&encode_text(password))
    }

    /// Password with all but `percent` % of its trailing characters starred
    pub fn masked_password(&self, percent: u8) -> String {
        mask_password(
            &String::from_utf8_lossy(self.password.expose_secret()),
            percent,
        )
    }

    fn key_bytes(&self) -> &[u8; crate::consts::KEY_LEN] {
        self.key.expose_secret()
    }
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher")
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
