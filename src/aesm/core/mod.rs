//! Core AES implementation for encryption and decryption of a 16 byte block. Two backends share
//! the same round-key layout: a portable table-based one and, on x86_64, AES-NI.

pub(crate) mod constants;
mod decryption;
mod encryption;
mod util;

#[cfg(target_arch = "x86_64")]
mod aesni;

pub(crate) use decryption::mix_columns_inv;
#[cfg(test)]
pub(crate) use encryption::mix_columns;

use crate::aesm::Block;
use crate::aesm::key::KeySize;
use crate::aesm::key_schedule::RoundKeys;

/// Single-block transform over a full round-key array.
pub(crate) type BlockFn = fn(&Block, &RoundKeys) -> Block;

/// Encrypt/decrypt pair for one key size on one backend, chosen once per context.
#[derive(Copy, Clone)]
pub(crate) struct BlockFns {
    pub(crate) encrypt: BlockFn,
    pub(crate) decrypt: BlockFn,
}

impl BlockFns {
    pub(crate) fn soft(key_size: KeySize) -> Self {
        match key_size {
            KeySize::Bits128 => Self {
                encrypt: encryption::encrypt_block::<10>,
                decrypt: decryption::decrypt_block::<10>,
            },
            KeySize::Bits192 => Self {
                encrypt: encryption::encrypt_block::<12>,
                decrypt: decryption::decrypt_block::<12>,
            },
            KeySize::Bits256 => Self {
                encrypt: encryption::encrypt_block::<14>,
                decrypt: decryption::decrypt_block::<14>,
            },
        }
    }

    /// AES-NI pair, or `None` when the CPU lacks the instructions.
    #[cfg(target_arch = "x86_64")]
    pub(crate) fn aesni(key_size: KeySize) -> Option<Self> {
        if !aesni::is_available() {
            return None;
        }

        Some(match key_size {
            KeySize::Bits128 => Self {
                encrypt: aesni::encrypt_block::<10>,
                decrypt: aesni::decrypt_block::<10>,
            },
            KeySize::Bits192 => Self {
                encrypt: aesni::encrypt_block::<12>,
                decrypt: aesni::decrypt_block::<12>,
            },
            KeySize::Bits256 => Self {
                encrypt: aesni::encrypt_block::<14>,
                decrypt: aesni::decrypt_block::<14>,
            },
        })
    }

    #[cfg(not(target_arch = "x86_64"))]
    pub(crate) fn aesni(_key_size: KeySize) -> Option<Self> {
        None
    }
}
