//! **Cipher block chaining**. Each plaintext block is XOR'd with the previous ciphertext block
//! (the IV for block 0) before encryption. Encryption is inherently serial; decryption only
//! depends on the input ciphertext and runs in parallel for large inputs.

use rayon::prelude::*;

use crate::aesm::error::Result;
use crate::aesm::modes::BlockCipher;
use crate::aesm::modes::util::{
    PARALLEL_THRESHOLD, check_aligned, load_iv, output_for, to_block, xor_block,
};

/// CBC encryption. `input` must be a multiple of 16 bytes (pad it first).
pub fn encrypt<C: BlockCipher>(
    cipher: &C,
    iv: &[u8],
    input: &[u8],
    output: &mut [u8],
) -> Result<()> {
    let mut previous = load_iv(iv)?;
    check_aligned(input.len(), "CBC input not a multiple of 16 bytes")?;
    let output = output_for(input.len(), output)?;

    for (out, inp) in output.chunks_exact_mut(16).zip(input.chunks_exact(16)) {
        let ciphertext = cipher.encrypt_block(&xor_block(&to_block(inp), &previous));
        out.copy_from_slice(&ciphertext);
        previous = ciphertext;
    }

    Ok(())
}

/// CBC decryption. `input` must be a multiple of 16 bytes.
///
/// The chain value for block `i` is always input ciphertext block `i - 1`, never the decrypted
/// output.
pub fn decrypt<C: BlockCipher>(
    cipher: &C,
    iv: &[u8],
    input: &[u8],
    output: &mut [u8],
) -> Result<()> {
    let iv = load_iv(iv)?;
    check_aligned(input.len(), "CBC input not a multiple of 16 bytes")?;
    let output = output_for(input.len(), output)?;

    if input.len() >= PARALLEL_THRESHOLD {
        output
            .par_chunks_exact_mut(16)
            .enumerate()
            .for_each(|(i, out)| {
                let start = i * 16;
                let ciphertext = to_block(&input[start..start + 16]);
                let previous = match i {
                    0 => iv,
                    _ => to_block(&input[start - 16..start]),
                };
                out.copy_from_slice(&xor_block(&cipher.decrypt_block(&ciphertext), &previous));
            });
    } else {
        let mut previous = iv;
        for (out, inp) in output.chunks_exact_mut(16).zip(input.chunks_exact(16)) {
            let ciphertext = to_block(inp);
            out.copy_from_slice(&xor_block(&cipher.decrypt_block(&ciphertext), &previous));
            previous = ciphertext;
        }
    }

    Ok(())
}
