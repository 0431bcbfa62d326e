mod context;
mod core;
mod error;
mod key;
mod key_schedule;
mod modes;
mod padding;
mod util;

/// One 16-byte AES block, bytes in input order (column-major state).
pub type Block = [u8; 16];

pub use context::{Backend, Context};
pub use error::{Error, Result};
pub use key::{Key, KeySize};
pub use modes::{BlockCipher, Mode, PARALLEL_THRESHOLD, cbc, cfb, ctr, ecb, ofb};
pub use padding::{Padding, add_padding, remove_padding};
pub use util::random_iv;
