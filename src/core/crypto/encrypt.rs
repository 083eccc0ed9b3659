use cbc::cipher::{block_padding::NoPadding, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::TryRngCore;

use super::{Aes256CbcEnc, Cipher};
use crate::consts::{BLOCK_SIZE, IV_LEN};
use crate::core::Result;
use crate::error::CoreError;

/// Fresh IV from the OS CSPRNG; never falls back to a weaker source
pub fn generate_iv() -> Result<[u8; IV_LEN]> {
    let mut iv = [0u8; IV_LEN];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|err| CoreError::Entropy(err.to_string()))?;
    Ok(iv)
}

/// Length-prefix padding: `[p] ‖ plaintext ‖ 0^p`
///
/// `p = (block_size - (len + 1)) mod block_size`, so the output length is a
/// multiple of `block_size`. The prefix is one byte, hence `block_size <= 256`.
pub fn pad(plaintext: &[u8], block_size: usize) -> Vec<u8> {
    assert!(
        (1..=256).contains(&block_size),
        "one byte represents the padding"
    );
    let to_pad = (block_size - (plaintext.len() + 1) % block_size) % block_size;

    let mut padded = Vec::with_capacity(1 + plaintext.len() + to_pad);
    padded.push(to_pad as u8);
    padded.extend_from_slice(plaintext);
    padded.resize(padded.len() + to_pad, 0);
    padded
}

fn is_blank(plaintext: &[u8]) -> bool {
    plaintext.is_empty() || plaintext == b" "
}

impl Cipher {
    /// Encrypt one field → `IV ‖ AES-256-CBC(pad(plaintext))`
    ///
    /// Empty and single-space inputs are rejected with `EmptyField`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        if is_blank(plaintext) {
            return Err(CoreError::EmptyField);
        }

        let iv = generate_iv()?;
        let padded = pad(plaintext, BLOCK_SIZE);
        let body = Aes256CbcEnc::new(self.key_bytes().into(), (&iv).into())
            .encrypt_padded_vec_mut::<NoPadding>(&padded);

        let mut out = Vec::with_capacity(IV_LEN + body.len());
        out.extend_from_slice(&iv);
        out.extend_from_slice(&body);
        Ok(out)
    }
}
