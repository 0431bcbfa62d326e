//! Padding schemes for the block-aligned modes (ECB and CBC).

use crate::aesm::error::{Error, Result};

/// How pad bytes are generated on encryption and validated on decryption.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Padding {
    /// Every pad byte holds the pad length.
    #[default]
    Pkcs7,
    /// Every pad byte is `0x00`. Removal strips all trailing zero bytes, so plaintext that
    /// itself ends in `0x00` loses those bytes too.
    Zero,
    /// Pad bytes are `0x00` except the last, which holds the pad length.
    AnsiX923,
}

/// Returns `input` padded to the next multiple of 16 bytes. A block-aligned input still receives a
/// full block of padding, so the output is always 1 to 16 bytes longer than the input.
pub fn add_padding(input: &[u8], padding: Padding) -> Vec<u8> {
    let pad_len = 16 - input.len() % 16;

    let mut out = Vec::with_capacity(input.len() + pad_len);
    out.extend_from_slice(input);
    match padding {
        Padding::Pkcs7 => out.resize(input.len() + pad_len, pad_len as u8),
        Padding::Zero => out.resize(input.len() + pad_len, 0),
        Padding::AnsiX923 => {
            out.resize(input.len() + pad_len - 1, 0);
            out.push(pad_len as u8);
        }
    }
    out
}

/// Validates the padding at the end of `buffer` and returns the unpadded length.
///
/// `buffer` must be non-empty and a multiple of 16 bytes. For PKCS#7 and ANSI X.923 the last byte
/// must be a pad length in `1..=16`; PKCS#7 then requires every pad byte to equal it and ANSI X.923
/// requires every pad byte before the last to be zero.
pub fn remove_padding(buffer: &[u8], padding: Padding) -> Result<usize> {
    let Some(&last) = buffer.last() else {
        return Err(Error::InvalidBufferLength {
            len: 0,
            context: "cannot remove padding from an empty buffer",
        });
    };
    if buffer.len() % 16 != 0 {
        return Err(Error::InvalidBufferLength {
            len: buffer.len(),
            context: "padded buffer not a multiple of 16 bytes",
        });
    }

    if padding == Padding::Zero {
        return Ok(buffer.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1));
    }

    let pad_len = last as usize;
    if pad_len == 0 || pad_len > 16 {
        return Err(Error::InvalidPadding("pad length byte out of range"));
    }

    let start = buffer.len() - pad_len;
    let pad = &buffer[start..buffer.len() - 1];
    let valid = match padding {
        Padding::Pkcs7 => pad.iter().all(|&b| b == last),
        _ => pad.iter().all(|&b| b == 0),
    };

    if !valid {
        return Err(Error::InvalidPadding(match padding {
            Padding::Pkcs7 => "PKCS#7 pad bytes do not match pad length",
            _ => "ANSI X.923 pad bytes are not zero",
        }));
    }

    Ok(start)
}
