use super::constants::SBOX;
use super::util::{add_round_key, dbl};
use crate::aesm::Block;
use crate::aesm::key_schedule::RoundKeys;

/// Table-based AES encryption of one 16 byte block with `NR` rounds. Only the first `NR + 1`
/// entries of `round_keys` are read.
#[inline(always)]
pub(crate) fn encrypt_block<const NR: usize>(plaintext: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *plaintext;

    add_round_key(&mut state, &round_keys[0]);

    // all rounds except the last
    for round_key in &round_keys[1..NR] {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_key);
    }

    // last round skips mixcolumns step
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, &round_keys[NR]);

    state
}

/// SubBytes step. Each byte is substituted using the SBOX.
#[inline(always)]
pub(crate) fn sub_bytes(state: &mut Block) {
    for byte in state {
        *byte = SBOX[*byte as usize];
    }
}

/// ShiftRows step. Row `r` rotates left by `r` positions.
#[inline(always)]
pub(crate) fn shift_rows(state: &mut Block) {
    // state is column-major: byte (row, col) lives at col * 4 + row
    let s = *state;
    for row in 1..4 {
        for col in 0..4 {
            state[col * 4 + row] = s[((col + row) & 3) * 4 + row];
        }
    }
}

/// MixColumns step. Each column is multiplied by a constant matrix in GF(2^8).
/// [ d0 ]      [ 2  3  1  1 ]  [ b0 ]
/// | d1 |  =   | 1  2  3  1 |  | b1 |
/// | d2 |      | 1  1  2  3 |  | b2 |
/// [ d3 ]      [ 3  1  1  2 ]  [ b3 ]
#[inline(always)]
pub(crate) fn mix_columns(state: &mut Block) {
    for col in 0..4 {
        let i = col * 4;
        let (a, b, c, d) = (state[i], state[i + 1], state[i + 2], state[i + 3]);
        state[i] = dbl(a ^ b) ^ b ^ c ^ d; /* 2a + 3b + c + d */
        state[i + 1] = dbl(b ^ c) ^ c ^ d ^ a; /* 2b + 3c + d + a */
        state[i + 2] = dbl(c ^ d) ^ d ^ a ^ b; /* 2c + 3d + a + b */
        state[i + 3] = dbl(d ^ a) ^ a ^ b ^ c; /* 2d + 3a + b + c */
    }
}
