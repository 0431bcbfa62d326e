use crate::aesm::Block;
use crate::aesm::error::{Error, Result};

/// Inputs of at least this many bytes are processed in parallel where the mode allows it.
pub const PARALLEL_THRESHOLD: usize = 4 * 1024;

/// Validates a caller-supplied IV and copies it into a local chaining block.
pub(crate) fn load_iv(iv: &[u8]) -> Result<Block> {
    iv.try_into()
        .map_err(|_| Error::InvalidArgument("IV must be exactly 16 bytes"))
}

/// Returns the part of `output` that a call over `input_len` bytes writes to.
pub(crate) fn output_for(input_len: usize, output: &mut [u8]) -> Result<&mut [u8]> {
    output
        .get_mut(..input_len)
        .ok_or(Error::InvalidArgument("output buffer shorter than input"))
}

pub(crate) fn check_aligned(len: usize, context: &'static str) -> Result<()> {
    if len % 16 != 0 {
        return Err(Error::InvalidBufferLength { len, context });
    }
    Ok(())
}

/// Copies a full 16-byte chunk into a block. Callers only pass `chunks_exact(16)` items.
#[inline(always)]
pub(crate) fn to_block(chunk: &[u8]) -> Block {
    let mut block = [0u8; 16];
    block.copy_from_slice(chunk);
    block
}

#[inline(always)]
pub(crate) fn xor_block(a: &Block, b: &Block) -> Block {
    core::array::from_fn(|i| a[i] ^ b[i])
}

/// `out[i] = input[i] ^ keystream[i]` for the (possibly partial) chunk length.
#[inline(always)]
pub(crate) fn xor_keystream(out: &mut [u8], input: &[u8], keystream: &Block) {
    for ((o, i), k) in out.iter_mut().zip(input).zip(keystream) {
        *o = i ^ k;
    }
}

/// Increments a 128-bit big-endian counter in place, carrying from the rightmost byte.
#[inline(always)]
pub(crate) fn increment_counter(counter: &mut Block) {
    for byte in counter.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}

/// Counter block `offset` increments after `iv`, wrapping modulo 2^128.
#[inline(always)]
pub(crate) fn counter_at(iv: &Block, offset: usize) -> Block {
    u128::from_be_bytes(*iv)
        .wrapping_add(offset as u128)
        .to_be_bytes()
}
