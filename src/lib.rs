//! AES-128/192/256 (FIPS-197) with the ECB, CBC, CFB, OFB and CTR modes of operation and
//! PKCS#7, zero and ANSI X.923 padding.
//!
//! Build a [Context] from a key once, then use it for any number of block or buffer operations,
//! from any number of threads.
//!
//! ```
//! # fn main() -> aesm::Result<()> {
//! use aesm::{Context, Key, KeySize, Mode, random_iv};
//!
//! let ctx = Context::new(&Key::random(KeySize::Bits256)?);
//! let iv = random_iv()?;
//!
//! let ciphertext = ctx.encrypt(Mode::Ctr, Some(&iv), b"any length works in CTR")?;
//! let plaintext = ctx.decrypt(Mode::Ctr, Some(&iv), &ciphertext)?;
//! assert_eq!(plaintext, b"any length works in CTR");
//! # Ok(())
//! # }
//! ```

mod aesm;

pub use aesm::{
    Backend, Block, BlockCipher, Context, Error, Key, KeySize, Mode, PARALLEL_THRESHOLD, Padding,
    Result, add_padding, cbc, cfb, ctr, ecb, ofb, random_iv, remove_padding,
};
