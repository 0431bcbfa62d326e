//! AES key schedule: expansion of a raw key into encryption round keys, and derivation of the
//! equivalent-inverse-cipher round keys used for decryption.

use crate::aesm::Block;
use crate::aesm::core::constants::{RCON, SBOX};
use crate::aesm::core::mix_columns_inv;
use crate::aesm::key::{Key, KeySize};
use crate::aesm::util::xor_words;

/// Round keys for the largest variant (AES-256). Smaller variants use the first
/// `KeySize::num_round_keys()` entries and leave the rest zeroed.
pub(crate) const MAX_ROUND_KEYS: usize = 15;

/// Fixed-size storage for a round-key sequence.
pub(crate) type RoundKeys = [Block; MAX_ROUND_KEYS];

/// AES key schedule. Fills 11, 13, or 15 round keys, corresponding with AES-128, AES-192, and
/// AES-256, respectively. Round key 0 is the first 16 bytes of the raw key.
///
/// Words are generated one at a time and then regrouped into 16-byte round keys, so for AES-192
/// (six-word generation steps) every other round key straddles two steps.
pub(crate) fn expand(key: &Key) -> RoundKeys {
    let key_size = key.size();
    let key = key.as_bytes();

    // Variable names match FIPS-197, NIST specification: https://doi.org/10.6028/NIST.FIPS.197-upd1
    // Nk   The number of 32-bit words comprising the key
    // Nr   The number of rounds. 10, 12, and 14 for AES-128, AES-192, and AES-256, respectively
    // w    The result of the key schedule, an array of words that form round keys
    // Nw   The total number of words generated by the key schedule (including initial key)
    let nk = key.len() / 4;
    let nr = key_size.rounds();
    let nw = (nr + 1) * 4;

    let mut w = [[0u8; 4]; MAX_ROUND_KEYS * 4];

    // first nk words of w are filled with the initial key
    for (i, byte) in key.iter().enumerate() {
        w[i / 4][i % 4] = *byte;
    }

    let mut temp = w[nk - 1];
    for i in nk..nw {
        if i % nk == 0 {
            // rot_word, sub_word, and rcon on temp
            temp = [
                SBOX[temp[1] as usize] ^ RCON[i / nk],
                SBOX[temp[2] as usize],
                SBOX[temp[3] as usize],
                SBOX[temp[0] as usize],
            ];
        } else if nk == 8 && i % nk == 4 {
            // additional substitution without rotation, AES-256 only
            temp = [
                SBOX[temp[0] as usize],
                SBOX[temp[1] as usize],
                SBOX[temp[2] as usize],
                SBOX[temp[3] as usize],
            ];
        }

        // w[i] = temp ⊕ w[i − Nk]
        w[i] = xor_words(&temp, &w[i - nk]);
        temp = w[i];
    }

    // regroup words into round keys, byte order matches the column-major state
    let mut round_keys = [[0u8; 16]; MAX_ROUND_KEYS];
    for (round_key, words) in round_keys.iter_mut().zip(w[..nw].chunks_exact(4)) {
        for (col, word) in words.iter().enumerate() {
            round_key[col * 4..col * 4 + 4].copy_from_slice(word);
        }
    }

    round_keys
}

/// Builds the decryption schedule for the equivalent inverse cipher: the first and last keys are
/// the last and first encryption keys, and every interior key is InvMixColumns of the matching
/// encryption key taken in reverse order.
pub(crate) fn invert(enc_round_keys: &RoundKeys, key_size: KeySize) -> RoundKeys {
    let nr = key_size.rounds();
    let mut dec_round_keys = [[0u8; 16]; MAX_ROUND_KEYS];

    dec_round_keys[0] = enc_round_keys[nr];
    dec_round_keys[nr] = enc_round_keys[0];

    for i in 1..nr {
        let mut round_key = enc_round_keys[nr - i];
        mix_columns_inv(&mut round_key);
        dec_round_keys[i] = round_key;
    }

    dec_round_keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aesm::core::mix_columns;
    use crate::aesm::error::Result;
    use hex_literal::hex;

    #[test]
    fn key_schedule_128() -> Result<()> {
        // sample key from FIPS-197 Appendix A.1
        let key = Key::try_from_slice(&hex!("2b7e151628aed2a6abf7158809cf4f3c"))?;
        let round_keys = expand(&key);

        assert_eq!(round_keys[0], hex!("2b7e151628aed2a6abf7158809cf4f3c"));
        assert_eq!(round_keys[1], hex!("a0fafe1788542cb123a339392a6c7605"));
        assert_eq!(round_keys[10], hex!("d014f9a8c9ee2589e13f0cc8b6630ca6"));
        assert_eq!(round_keys[11], [0u8; 16], "unused slots must stay zeroed");
        Ok(())
    }

    #[test]
    fn key_schedule_192() -> Result<()> {
        // sample key from FIPS-197 Appendix A.2
        let key = Key::try_from_slice(&hex!("8e73b0f7da0e6452c810f32b809079e562f8ead2522c6b7b"))?;
        let round_keys = expand(&key);

        // round key 1 is the key tail followed by the first two generated words
        assert_eq!(round_keys[1], hex!("62f8ead2522c6b7bfe0c91f72402f5a5"));
        assert_eq!(round_keys[12], hex!("e98ba06f448c773c8ecc720401002202"));
        Ok(())
    }

    #[test]
    fn key_schedule_256() -> Result<()> {
        // sample key from FIPS-197 Appendix A.3
        let key = Key::try_from_slice(&hex!(
            "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4"
        ))?;
        let round_keys = expand(&key);

        assert_eq!(round_keys[1], hex!("1f352c073b6108d72d9810a30914dff4"));
        assert_eq!(round_keys[2], hex!("9ba354118e6925afa51a8b5f2067fcde"));
        // odd round key produced by the extra substitution step
        assert_eq!(round_keys[3], hex!("a8b09c1a93d194cdbe49846eb75d5b9a"));
        assert_eq!(round_keys[14], hex!("fe4890d1e6188d0b046df344706c631e"));
        Ok(())
    }

    #[test]
    fn inverted_schedule_structure() -> Result<()> {
        for raw in [&[0x11u8; 16][..], &[0x22u8; 24][..], &[0x33u8; 32][..]] {
            let key = Key::try_from_slice(raw)?;
            let nr = key.size().rounds();
            let enc = expand(&key);
            let dec = invert(&enc, key.size());

            assert_eq!(dec[0], enc[nr]);
            assert_eq!(dec[nr], enc[0]);
            for i in 1..nr {
                let mut restored = dec[i];
                mix_columns(&mut restored);
                assert_eq!(
                    restored,
                    enc[nr - i],
                    "interior key {i} is not InvMixColumns(enc[{}])",
                    nr - i
                );
            }
        }
        Ok(())
    }
}
