//! **Counter mode**. The keystream for block `i` is `E(iv + i)` with the IV read as a 128-bit
//! big-endian integer that wraps modulo 2^128. Encryption and decryption are the same operation.
//! Every block is independent, so large inputs are processed in parallel.

use rayon::prelude::*;

use crate::aesm::error::Result;
use crate::aesm::modes::BlockCipher;
use crate::aesm::modes::util::{
    PARALLEL_THRESHOLD, counter_at, increment_counter, load_iv, output_for, xor_keystream,
};

/// CTR encryption or decryption of any length. `iv` is the full 16-byte initial counter block.
pub fn crypt<C: BlockCipher>(
    cipher: &C,
    iv: &[u8],
    input: &[u8],
    output: &mut [u8],
) -> Result<()> {
    let iv = load_iv(iv)?;
    let output = output_for(input.len(), output)?;

    if input.len() >= PARALLEL_THRESHOLD {
        output
            .par_chunks_mut(16)
            .zip(input.par_chunks(16))
            .enumerate()
            .for_each(|(i, (out, inp))| {
                let keystream = cipher.encrypt_block(&counter_at(&iv, i));
                xor_keystream(out, inp, &keystream);
            });
    } else {
        let mut counter = iv;
        for (out, inp) in output.chunks_mut(16).zip(input.chunks(16)) {
            xor_keystream(out, inp, &cipher.encrypt_block(&counter));
            increment_counter(&mut counter);
        }
    }

    Ok(())
}
