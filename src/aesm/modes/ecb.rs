//! **Electronic codebook**. Each 16-byte block is transformed independently, so patterns in the
//! plaintext survive into the ciphertext. Takes no IV.

use rayon::prelude::*;

use crate::aesm::Block;
use crate::aesm::error::Result;
use crate::aesm::modes::BlockCipher;
use crate::aesm::modes::util::{PARALLEL_THRESHOLD, check_aligned, output_for, to_block};

/// ECB encryption. `input` must be a multiple of 16 bytes (pad it first).
pub fn encrypt<C: BlockCipher>(cipher: &C, input: &[u8], output: &mut [u8]) -> Result<()> {
    check_aligned(input.len(), "ECB input not a multiple of 16 bytes")?;
    let output = output_for(input.len(), output)?;
    each_block(input, output, |block| cipher.encrypt_block(block));
    Ok(())
}

/// ECB decryption. `input` must be a multiple of 16 bytes.
pub fn decrypt<C: BlockCipher>(cipher: &C, input: &[u8], output: &mut [u8]) -> Result<()> {
    check_aligned(input.len(), "ECB input not a multiple of 16 bytes")?;
    let output = output_for(input.len(), output)?;
    each_block(input, output, |block| cipher.decrypt_block(block));
    Ok(())
}

fn each_block<F>(input: &[u8], output: &mut [u8], transform: F)
where
    F: Fn(&Block) -> Block + Sync,
{
    if input.len() >= PARALLEL_THRESHOLD {
        output
            .par_chunks_exact_mut(16)
            .zip(input.par_chunks_exact(16))
            .for_each(|(out, inp)| out.copy_from_slice(&transform(&to_block(inp))));
    } else {
        for (out, inp) in output.chunks_exact_mut(16).zip(input.chunks_exact(16)) {
            out.copy_from_slice(&transform(&to_block(inp)));
        }
    }
}
