//! Modes of operation. Every mode function writes exactly `input.len()` bytes into the front of a
//! caller-owned `output` slice and keeps its chaining state (IV, shift register, feedback register,
//! or counter) local to the call.

pub mod cbc;
pub mod cfb;
pub mod ctr;
pub mod ecb;
pub mod ofb;
mod util;

pub use util::PARALLEL_THRESHOLD;

use crate::aesm::Block;

/// Single-block AES transform consumed by the modes. Implemented by [Context](crate::Context);
/// `Sync` so the data-independent modes can spread blocks across threads.
pub trait BlockCipher: Sync {
    /// Encrypts one 16-byte block.
    fn encrypt_block(&self, block: &Block) -> Block;
    /// Decrypts one 16-byte block.
    fn decrypt_block(&self, block: &Block) -> Block;
}

/// Mode of operation selector.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Mode {
    Ecb,
    Cbc,
    Cfb,
    Ofb,
    Ctr,
}

impl Mode {
    /// Every mode, in the order the benchmark reports them.
    pub const ALL: [Mode; 5] = [Mode::Ecb, Mode::Cbc, Mode::Cfb, Mode::Ofb, Mode::Ctr];

    /// Every mode except ECB takes a 16-byte IV (CTR: initial counter block).
    pub const fn requires_iv(self) -> bool {
        !matches!(self, Mode::Ecb)
    }

    /// ECB and CBC only accept whole blocks and are the modes that use padding.
    pub const fn is_block_aligned(self) -> bool {
        matches!(self, Mode::Ecb | Mode::Cbc)
    }

    /// Upper-case mode name, e.g. `"CBC"`.
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Ecb => "ECB",
            Mode::Cbc => "CBC",
            Mode::Cfb => "CFB",
            Mode::Ofb => "OFB",
            Mode::Ctr => "CTR",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
