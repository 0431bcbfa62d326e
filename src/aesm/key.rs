//! Defines the [`Key`] struct, which holds a valid AES key of 128, 192, or 256 bits, and the
//! [`KeySize`] variant set that determines the round count of the cipher.

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::aesm::error::{Error, Result};

/// The three AES key sizes. Determines the raw key length, the number of rounds, and the number of
/// round keys produced by the key schedule.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum KeySize {
    Bits128,
    Bits192,
    Bits256,
}

impl KeySize {
    /// Length of the raw key in bytes (16, 24, or 32).
    pub const fn key_len(self) -> usize {
        match self {
            KeySize::Bits128 => 16,
            KeySize::Bits192 => 24,
            KeySize::Bits256 => 32,
        }
    }

    /// Number of cipher rounds (10, 12, or 14).
    pub const fn rounds(self) -> usize {
        match self {
            KeySize::Bits128 => 10,
            KeySize::Bits192 => 12,
            KeySize::Bits256 => 14,
        }
    }

    /// Number of round keys in an expanded schedule (11, 13, or 15).
    pub const fn num_round_keys(self) -> usize {
        self.rounds() + 1
    }

    /// Maps a raw key length in bytes to its key size. Returns an InvalidKeySize error for any
    /// length other than 16, 24, or 32.
    pub fn from_key_len(len: usize) -> Result<Self> {
        match len {
            16 => Ok(KeySize::Bits128),
            24 => Ok(KeySize::Bits192),
            32 => Ok(KeySize::Bits256),
            _ => Err(Error::InvalidKeySize { len }),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum KeyBytes {
    K128([u8; 16]),
    K192([u8; 24]),
    K256([u8; 32]),
}

/// Contains a valid AES key. Can be instantiated with a random key, or built from a slice
/// of bytes that is 16, 24, or 32 bytes long.
/// A `Key` is required to build a [Context](crate::Context).
///
/// ## Examples
/// ```
/// # fn main() -> aesm::Result<()> {
/// use aesm::{Key, KeySize};
///
/// let random = Key::random(KeySize::Bits192)?;
/// assert_eq!(random.as_bytes().len(), 24);
///
/// let key_bytes: [u8; 32] = [0xBA, 0x32, 0x82, 0x9A, 0x43, 0x8A, 0x48, 0xED,
///                            0xC2, 0xEA, 0x10, 0x73, 0x26, 0xF8, 0xA9, 0x62,
///                            0xDE, 0x82, 0x06, 0xBA, 0x53, 0xC2, 0xC7, 0x55,
///                            0x2C, 0x72, 0xC5, 0x37, 0xBF, 0xD4, 0xDB, 0x5E];
/// let key = Key::try_from_slice(&key_bytes[..16])?;
/// assert_eq!(key.size(), KeySize::Bits128);
/// assert_eq!(key.as_bytes(), &key_bytes[..16]);
///
/// // anything other than 16, 24, or 32 bytes is rejected
/// assert!(Key::try_from_slice(&key_bytes[..20]).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Key {
    bytes: KeyBytes,
}

impl Key {
    /// Generate a random key of the given size. Returns Error if OsRng fails.
    pub fn random(size: KeySize) -> Result<Self> {
        let bytes = match size {
            KeySize::Bits128 => {
                let mut k = [0u8; 16];
                OsRng.try_fill_bytes(&mut k)?;
                KeyBytes::K128(k)
            }
            KeySize::Bits192 => {
                let mut k = [0u8; 24];
                OsRng.try_fill_bytes(&mut k)?;
                KeyBytes::K192(k)
            }
            KeySize::Bits256 => {
                let mut k = [0u8; 32];
                OsRng.try_fill_bytes(&mut k)?;
                KeyBytes::K256(k)
            }
        };
        Ok(Self { bytes })
    }

    /// Attempts to build a key from a slice of bytes. Will return an InvalidKeySize error
    /// if the input slice is anything other than 16, 24, or 32 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let invalid = || Error::InvalidKeySize { len: bytes.len() };
        let bytes = match KeySize::from_key_len(bytes.len())? {
            KeySize::Bits128 => KeyBytes::K128(bytes.try_into().map_err(|_| invalid())?),
            KeySize::Bits192 => KeyBytes::K192(bytes.try_into().map_err(|_| invalid())?),
            KeySize::Bits256 => KeyBytes::K256(bytes.try_into().map_err(|_| invalid())?),
        };
        Ok(Self { bytes })
    }

    /// Size variant of this key.
    pub fn size(&self) -> KeySize {
        match self.bytes {
            KeyBytes::K128(_) => KeySize::Bits128,
            KeyBytes::K192(_) => KeySize::Bits192,
            KeyBytes::K256(_) => KeySize::Bits256,
        }
    }

    /// Returns a reference to the internal key as an array of bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.bytes {
            KeyBytes::K128(k) => k,
            KeyBytes::K192(k) => k,
            KeyBytes::K256(k) => k,
        }
    }
}

// key material stays out of logs and panic messages
impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key").field("size", &self.size()).finish_non_exhaustive()
    }
}
