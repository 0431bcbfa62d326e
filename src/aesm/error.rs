use rand::rand_core;
use thiserror::Error;

/// AES Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// AES Error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Attempted to build a key or context from a key that is not 128, 192, or 256 bits.
    #[error("invalid key length: {len} bytes (expected 16, 24, or 32)")]
    InvalidKeySize { len: usize },

    /// Input to a block-aligned mode (ECB/CBC) or to padding removal was not a multiple of
    /// 16 bytes.
    #[error("invalid buffer length: {len} bytes ({context})")]
    InvalidBufferLength { len: usize, context: &'static str },

    /// A required argument was missing or malformed, e.g. an IV absent for CBC, supplied for ECB,
    /// or not exactly 16 bytes.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Padding bytes failed validation on removal.
    #[error("invalid padding: {0}")]
    InvalidPadding(&'static str),

    /// The requested block-transform backend is not supported on this CPU.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(&'static str),

    /// OS RNG failed during random key or IV generation.
    #[error("OS RNG failed in random generation")]
    Rng(#[from] rand_core::OsError),
}
