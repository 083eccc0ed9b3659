//! One-time AES backend capability check

use std::sync::OnceLock;

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes256, Block};
use tracing::{debug, error};

use crate::core::Result;
use crate::error::CoreError;

// FIPS-197 appendix C.3
const KAT_KEY: [u8; 32] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f,
];
const KAT_PLAIN: [u8; 16] = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
];
const KAT_CIPHER: [u8; 16] = [
    0x8e, 0xa2, 0xb7, 0xca, 0x51, 0x67, 0x45, 0xbf, 0xea, 0xfc, 0x49, 0x90, 0x4b, 0x49, 0x60, 0x89,
];

static BACKEND_OK: OnceLock<bool> = OnceLock::new();

fn known_answer_test() -> bool {
    let cipher = Aes256::new(&KAT_KEY.into());
    let mut block = Block::from(KAT_PLAIN);
    cipher.encrypt_block(&mut block);
    if block.as_slice() != KAT_CIPHER {
        return false;
    }
    cipher.decrypt_block(&mut block);
    block.as_slice() == KAT_PLAIN
}

/// Verify the AES-256 implementation once per process
///
/// The result is cached; every `Cipher` constructor calls this.
pub fn ensure_backend() -> Result<()> {
    let ok = *BACKEND_OK.get_or_init(|| {
        let ok = known_answer_test();
        if ok {
            debug!("AES-256 backend self-test passed");
        } else {
            error!("AES-256 backend self-test failed");
        }
        ok
    });

    if ok {
        Ok(())
    } else {
        Err(CoreError::CipherUnavailable("AES-256 known-answer test failed"))
    }
}
