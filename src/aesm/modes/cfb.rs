//! **Cipher feedback** with a full 128-bit segment. The keystream for each block is the encrypted
//! shift register, and the register is refilled from the ciphertext. A trailing partial block is
//! allowed.

use rayon::prelude::*;

use crate::aesm::Block;
use crate::aesm::error::Result;
use crate::aesm::modes::BlockCipher;
use crate::aesm::modes::util::{PARALLEL_THRESHOLD, load_iv, output_for, to_block, xor_keystream};

/// CFB encryption of any length.
pub fn encrypt<C: BlockCipher>(
    cipher: &C,
    iv: &[u8],
    input: &[u8],
    output: &mut [u8],
) -> Result<()> {
    let mut register = load_iv(iv)?;
    let output = output_for(input.len(), output)?;

    for (out, inp) in output.chunks_mut(16).zip(input.chunks(16)) {
        let keystream = cipher.encrypt_block(&register);
        xor_keystream(out, inp, &keystream);
        shift_in(&mut register, out);
    }

    Ok(())
}

/// CFB decryption of any length. The shift register is refilled from the input ciphertext, so
/// full blocks can be decrypted in parallel.
pub fn decrypt<C: BlockCipher>(
    cipher: &C,
    iv: &[u8],
    input: &[u8],
    output: &mut [u8],
) -> Result<()> {
    let iv = load_iv(iv)?;
    let output = output_for(input.len(), output)?;

    if input.len() >= PARALLEL_THRESHOLD {
        let full = input.len() - input.len() % 16;
        let (head_out, tail_out) = output.split_at_mut(full);

        head_out
            .par_chunks_exact_mut(16)
            .enumerate()
            .for_each(|(i, out)| {
                let start = i * 16;
                let register = match i {
                    0 => iv,
                    _ => to_block(&input[start - 16..start]),
                };
                xor_keystream(out, &input[start..start + 16], &cipher.encrypt_block(&register));
            });

        if !tail_out.is_empty() {
            let register = match full {
                0 => iv,
                _ => to_block(&input[full - 16..full]),
            };
            xor_keystream(tail_out, &input[full..], &cipher.encrypt_block(&register));
        }
    } else {
        let mut register = iv;
        for (out, inp) in output.chunks_mut(16).zip(input.chunks(16)) {
            let keystream = cipher.encrypt_block(&register);
            xor_keystream(out, inp, &keystream);
            shift_in(&mut register, inp);
        }
    }

    Ok(())
}

/// Drops the first `n` register bytes, moves the remaining `16 - n` to the front and appends the
/// `n` ciphertext bytes. For a full block this replaces the register with the ciphertext.
#[inline(always)]
fn shift_in(register: &mut Block, ciphertext: &[u8]) {
    let n = ciphertext.len();
    register.copy_within(n.., 0);
    register[16 - n..].copy_from_slice(ciphertext);
}
