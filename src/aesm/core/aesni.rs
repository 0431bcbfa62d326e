//! AES-NI block transforms. The round-key arrays are byte-for-byte the ones produced by the
//! software key schedule; `aesdec` expects the equivalent inverse cipher schedule.

use std::arch::x86_64::*;

use crate::aesm::Block;
use crate::aesm::key_schedule::RoundKeys;

pub(crate) fn is_available() -> bool {
    is_x86_feature_detected!("aes") && is_x86_feature_detected!("sse2")
}

/// Safe entry point. Only reachable through `BlockFns::aesni`, which checks [is_available] first.
pub(crate) fn encrypt_block<const NR: usize>(plaintext: &Block, round_keys: &RoundKeys) -> Block {
    // SAFETY: aes and sse2 support was detected before this function was selected
    unsafe { encrypt_block_inner::<NR>(plaintext, round_keys) }
}

/// Safe entry point. Only reachable through `BlockFns::aesni`, which checks [is_available] first.
pub(crate) fn decrypt_block<const NR: usize>(
    ciphertext: &Block,
    dec_round_keys: &RoundKeys,
) -> Block {
    // SAFETY: aes and sse2 support was detected before this function was selected
    unsafe { decrypt_block_inner::<NR>(ciphertext, dec_round_keys) }
}

#[target_feature(enable = "aes", enable = "sse2")]
unsafe fn encrypt_block_inner<const NR: usize>(plaintext: &Block, round_keys: &RoundKeys) -> Block {
    unsafe {
        let mut state = _mm_xor_si128(load(plaintext), load(&round_keys[0]));
        for round_key in &round_keys[1..NR] {
            state = _mm_aesenc_si128(state, load(round_key));
        }
        state = _mm_aesenclast_si128(state, load(&round_keys[NR]));
        store(state)
    }
}

#[target_feature(enable = "aes", enable = "sse2")]
unsafe fn decrypt_block_inner<const NR: usize>(
    ciphertext: &Block,
    dec_round_keys: &RoundKeys,
) -> Block {
    unsafe {
        let mut state = _mm_xor_si128(load(ciphertext), load(&dec_round_keys[0]));
        for round_key in &dec_round_keys[1..NR] {
            state = _mm_aesdec_si128(state, load(round_key));
        }
        state = _mm_aesdeclast_si128(state, load(&dec_round_keys[NR]));
        store(state)
    }
}

#[inline(always)]
unsafe fn load(block: &Block) -> __m128i {
    unsafe { _mm_loadu_si128(block.as_ptr().cast()) }
}

#[inline(always)]
unsafe fn store(state: __m128i) -> Block {
    let mut out = [0u8; 16];
    unsafe { _mm_storeu_si128(out.as_mut_ptr().cast(), state) };
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aesm::core::{decryption, encryption};
    use crate::aesm::error::Result;
    use crate::aesm::key::Key;
    use crate::aesm::key_schedule::{expand, invert};

    #[test]
    fn matches_software_backend() -> Result<()> {
        if !is_available() {
            return Ok(());
        }

        let key = Key::try_from_slice(&[0x5a; 32])?;
        let enc = expand(&key);
        let dec = invert(&enc, key.size());

        let mut block: Block = core::array::from_fn(|i| (i * 17) as u8);
        for _ in 0..64 {
            let hw = encrypt_block::<14>(&block, &enc);
            let sw = encryption::encrypt_block::<14>(&block, &enc);
            assert_eq!(hw, sw);
            assert_eq!(decrypt_block::<14>(&hw, &dec), block);
            assert_eq!(decryption::decrypt_block::<14>(&hw, &dec), block);
            block = hw;
        }
        Ok(())
    }
}
