use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::aesm::Block;
use crate::aesm::error::Result;

/// Generates a random 16-byte IV (or CTR nonce/counter block) from the OS RNG.
pub fn random_iv() -> Result<Block> {
    let mut iv = [0u8; 16];
    OsRng.try_fill_bytes(&mut iv)?;
    Ok(iv)
}

#[inline(always)]
pub(crate) fn xor_words(a: &[u8; 4], b: &[u8; 4]) -> [u8; 4] {
    [a[0] ^ b[0], a[1] ^ b[1], a[2] ^ b[2], a[3] ^ b[3]]
}
