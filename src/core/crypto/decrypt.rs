use cbc::cipher::{block_padding::NoPadding, BlockDecryptMut, KeyIvInit};

use super::{Aes256CbcDec, Cipher};
use crate::consts::{BLOCK_SIZE, IV_LEN};
use crate::core::text::Plaintext;
use crate::core::Result;
use crate::error::CoreError;

/// Strip length-prefix padding
///
/// Reads `p` from the first byte and drops the prefix plus `p` trailing
/// bytes; `p == 0` means only the prefix byte is removed. Returns `None`
/// when the buffer cannot be the output of [`pad`](super::pad), which is
/// what garbage from a wrong key usually looks like.
pub fn unpad(padded: &[u8], block_size: usize) -> Option<&[u8]> {
    let (&to_pad, rest) = padded.split_first()?;
    let to_pad = usize::from(to_pad);
    if to_pad >= block_size || to_pad > rest.len() {
        return None;
    }

    let (body, padding) = rest.split_at(rest.len() - to_pad);
    padding.iter().all(|&b| b == 0).then_some(body)
}

impl Cipher {
    /// Decrypt one field produced by [`Cipher::encrypt`]
    ///
    /// Yields `Plaintext::Text` for valid UTF-8 and `Plaintext::Bytes`
    /// otherwise. An empty or unpaddable result is reported as
    /// `CoreError::Password`; a wrong key is *usually* caught this way, but
    /// not always.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Plaintext> {
        let (iv, body) = ciphertext
            .split_first_chunk::<IV_LEN>()
            .ok_or(CoreError::Password("ciphertext shorter than an IV"))?;

        let padded = Aes256CbcDec::new(self.key_bytes().into(), iv.into())
            .decrypt_padded_vec_mut::<NoPadding>(body)
            .map_err(|_| CoreError::Password("ciphertext is not block aligned"))?;

        let plain = unpad(&padded, BLOCK_SIZE)
            .ok_or(CoreError::Password("decryption produced no plaintext"))?;
        if plain.is_empty() {
            return Err(CoreError::Password("decryption produced no plaintext"));
        }

        Ok(Plaintext::from_bytes(plain.to_vec()))
    }
}
