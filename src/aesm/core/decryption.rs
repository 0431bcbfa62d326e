use super::constants::SBOX_INV;
use super::util::{add_round_key, dbl};
use crate::aesm::Block;
use crate::aesm::key_schedule::RoundKeys;

/// Table-based AES decryption of one 16 byte block with `NR` rounds, using the equivalent
/// inverse cipher. `dec_round_keys` must come from [invert](crate::aesm::key_schedule::invert),
/// not from a plain reversal of the encryption schedule.
#[inline(always)]
pub(crate) fn decrypt_block<const NR: usize>(
    ciphertext: &Block,
    dec_round_keys: &RoundKeys,
) -> Block {
    let mut state = *ciphertext;

    add_round_key(&mut state, &dec_round_keys[0]);

    for round_key in &dec_round_keys[1..NR] {
        shift_rows_inv(&mut state);
        sub_bytes_inv(&mut state);
        mix_columns_inv(&mut state);
        add_round_key(&mut state, round_key);
    }

    shift_rows_inv(&mut state);
    sub_bytes_inv(&mut state);
    add_round_key(&mut state, &dec_round_keys[NR]);

    state
}

/// Inverse SubBytes step. Each byte is substituted using the inverse SBOX.
#[inline(always)]
pub(crate) fn sub_bytes_inv(state: &mut Block) {
    for byte in state {
        *byte = SBOX_INV[*byte as usize];
    }
}

/// Inverse ShiftRows step. Row `r` rotates right by `r` positions.
/// [
///     01 02 03 04   ---->   01 02 03 04
///     06 07 08 05   ---->   05 06 07 08
///     11 12 09 10   ---->   09 10 11 12
///     16 13 14 15   ---->   13 14 15 16
/// ]
#[inline(always)]
pub(crate) fn shift_rows_inv(state: &mut Block) {
    let s = *state;
    for row in 1..4 {
        for col in 0..4 {
            state[col * 4 + row] = s[((col + 4 - row) & 3) * 4 + row];
        }
    }
}

/// Inverse MixColumns step. Also applied to interior round keys when building the
/// decryption schedule.
/// [ b0 ]      [ 14  11  13  09 ]  [ d0 ]
/// | b1 |  =   | 09  14  11  13 |  | d1 |
/// | b2 |      | 13  09  14  11 |  | d2 |
/// [ b3 ]      [ 11  13  09  14 ]  [ d3 ]
#[inline(always)]
pub(crate) fn mix_columns_inv(state: &mut Block) {
    // optimisation technique from https://crypto.stackexchange.com/a/71206
    for col in 0..4 {
        let i = col * 4;
        let (a, b, c, d) = (state[i], state[i + 1], state[i + 2], state[i + 3]);
        let x = dbl(a ^ b ^ c ^ d); /* 2a + 2b + 2c + 2d */
        let y = dbl(x ^ a ^ c); /* 6a + 4b + 6c + 4d */
        let z = dbl(x ^ b ^ d); /* 4a + 6b + 4c + 6d */
        state[i] = dbl(y ^ a ^ b) ^ b ^ c ^ d; /* 14a + 11b + 13c + 09d */
        state[i + 1] = dbl(z ^ b ^ c) ^ c ^ d ^ a; /* 09a + 14b + 11c + 13d */
        state[i + 2] = dbl(y ^ c ^ d) ^ d ^ a ^ b; /* 13a + 09b + 14c + 11d */
        state[i + 3] = dbl(z ^ d ^ a) ^ a ^ b ^ c; /* 11a + 13b + 09c + 14d */
    }
}

#[cfg(test)]
mod tests {
    use crate::aesm::Block;
    use crate::aesm::core::{decryption, encryption};
    use crate::aesm::error::Result;
    use crate::aesm::key::Key;
    use crate::aesm::key_schedule::{expand, invert};
    use hex_literal::hex;

    fn sample_state() -> Block {
        core::array::from_fn(|i| i as u8)
    }

    #[test]
    fn test_shift_rows() {
        let mut actual = sample_state();
        encryption::shift_rows(&mut actual);
        decryption::shift_rows_inv(&mut actual);
        assert_eq!(
            actual,
            sample_state(),
            "shift rows inverse does not exactly reverse shift rows"
        );
    }

    #[test]
    fn test_sub_bytes() {
        let mut actual = sample_state();
        encryption::sub_bytes(&mut actual);
        decryption::sub_bytes_inv(&mut actual);
        assert_eq!(actual, sample_state(), "sub bytes inverse does not exactly reverse sub bytes");
    }

    #[test]
    fn test_mix_columns() {
        let mut actual = sample_state();
        encryption::mix_columns(&mut actual);
        decryption::mix_columns_inv(&mut actual);
        assert_eq!(
            actual,
            sample_state(),
            "mix columns inverse does not exactly reverse mix columns"
        );
    }

    #[test]
    fn test_decrypt_block_fips197_appendix_c() -> Result<()> {
        let expected = hex!("00112233445566778899aabbccddeeff");

        let key = Key::try_from_slice(&hex!("000102030405060708090a0b0c0d0e0f"))?;
        let dec = invert(&expand(&key), key.size());
        let actual =
            decryption::decrypt_block::<10>(&hex!("69c4e0d86a7b0430d8cdb78070b4c55a"), &dec);
        assert_eq!(actual, expected);

        let key = Key::try_from_slice(&hex!("000102030405060708090a0b0c0d0e0f1011121314151617"))?;
        let dec = invert(&expand(&key), key.size());
        let actual =
            decryption::decrypt_block::<12>(&hex!("dda97ca4864cdfe06eaf70a0ec0d7191"), &dec);
        assert_eq!(actual, expected);

        let key = Key::try_from_slice(&hex!(
            "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f"
        ))?;
        let dec = invert(&expand(&key), key.size());
        let actual =
            decryption::decrypt_block::<14>(&hex!("8ea2b7ca516745bfeafc49904b496089"), &dec);
        assert_eq!(actual, expected);
        Ok(())
    }

    #[test]
    fn reversed_schedule_without_inverse_mix_does_not_decrypt() -> Result<()> {
        let key = Key::try_from_slice(&hex!("000102030405060708090a0b0c0d0e0f"))?;
        let enc = expand(&key);

        // naive reversal of the encryption schedule
        let mut reversed = enc;
        reversed[..11].reverse();

        let ciphertext = hex!("69c4e0d86a7b0430d8cdb78070b4c55a");
        let actual = decryption::decrypt_block::<10>(&ciphertext, &reversed);
        assert_ne!(actual, hex!("00112233445566778899aabbccddeeff"));
        Ok(())
    }
}
