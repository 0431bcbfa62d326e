//! **Output feedback**. The keystream is the IV encrypted repeatedly, independent of the data, so
//! encryption and decryption are the same operation. A trailing partial block is allowed.

use crate::aesm::error::Result;
use crate::aesm::modes::BlockCipher;
use crate::aesm::modes::util::{load_iv, output_for, xor_keystream};

/// OFB encryption or decryption of any length.
pub fn crypt<C: BlockCipher>(
    cipher: &C,
    iv: &[u8],
    input: &[u8],
    output: &mut [u8],
) -> Result<()> {
    let mut feedback = load_iv(iv)?;
    let output = output_for(input.len(), output)?;

    for (out, inp) in output.chunks_mut(16).zip(input.chunks(16)) {
        feedback = cipher.encrypt_block(&feedback);
        xor_keystream(out, inp, &feedback);
    }

    Ok(())
}
