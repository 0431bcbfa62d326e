use crate::aesm::Block;
use crate::aesm::core::BlockFns;
use crate::aesm::error::{Error, Result};
use crate::aesm::key::{Key, KeySize};
use crate::aesm::key_schedule::{self, RoundKeys};
use crate::aesm::modes::{BlockCipher, Mode, cbc, cfb, ctr, ecb, ofb};
use crate::aesm::padding::{Padding, add_padding, remove_padding};

/// Block-transform implementation used by a [Context].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Backend {
    /// AES-NI when the CPU supports it, otherwise the portable implementation.
    #[default]
    Auto,
    /// Portable table-based implementation.
    Soft,
    /// x86_64 AES-NI instructions.
    AesNi,
}

impl Backend {
    /// Whether AES-NI can be used on this machine.
    pub fn aesni_available() -> bool {
        BlockFns::aesni(KeySize::Bits128).is_some()
    }
}

/// Provides single-block and buffer-level encryption and decryption for modes [ECB](crate::ecb),
/// [CBC](crate::cbc), [CFB](crate::cfb), [OFB](crate::ofb) and [CTR](crate::ctr).
///
/// Instantiated with an AES [Key], which is expanded into encryption round keys and the
/// equivalent-inverse-cipher decryption round keys. The backend is resolved once here and never
/// changes. A `Context` is immutable and can be shared across threads; every mode call keeps its
/// chaining state local.
///
/// ## Examples
/// ```
/// # fn main() -> aesm::Result<()> {
/// use aesm::{Context, Mode, Padding};
///
/// let ctx = Context::try_from_slice(&[0x2b; 16])?;
/// let iv = [0x00; 16];
///
/// let ciphertext = ctx.encrypt_padded(Mode::Cbc, Some(&iv), b"attack at dawn", Padding::Pkcs7)?;
/// assert_eq!(ciphertext.len(), 16);
///
/// let plaintext = ctx.decrypt_padded(Mode::Cbc, Some(&iv), &ciphertext, Padding::Pkcs7)?;
/// assert_eq!(plaintext, b"attack at dawn");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Context {
    key_size: KeySize,
    backend: Backend,
    enc_round_keys: RoundKeys,
    dec_round_keys: RoundKeys,
    block_fns: BlockFns,
}

impl Context {
    /// Expands `key` and picks the fastest available backend.
    pub fn new(key: &Key) -> Self {
        let block_fns = BlockFns::aesni(key.size());
        let backend = match block_fns {
            Some(_) => Backend::AesNi,
            None => Backend::Soft,
        };
        let block_fns = block_fns.unwrap_or_else(|| BlockFns::soft(key.size()));
        Self::build(key, backend, block_fns)
    }

    /// Builds a context straight from raw key bytes. Returns an InvalidKeySize error if the slice
    /// is not 16, 24, or 32 bytes long.
    pub fn try_from_slice(key: &[u8]) -> Result<Self> {
        Ok(Self::new(&Key::try_from_slice(key)?))
    }

    /// Builds a context on a specific backend. Requesting [Backend::AesNi] on a CPU without the
    /// AES instructions returns a BackendUnavailable error.
    pub fn with_backend(key: &Key, backend: Backend) -> Result<Self> {
        match backend {
            Backend::Auto => Ok(Self::new(key)),
            Backend::Soft => Ok(Self::build(key, Backend::Soft, BlockFns::soft(key.size()))),
            Backend::AesNi => {
                let block_fns = BlockFns::aesni(key.size()).ok_or(Error::BackendUnavailable(
                    "AES-NI not supported on this CPU",
                ))?;
                Ok(Self::build(key, Backend::AesNi, block_fns))
            }
        }
    }

    fn build(key: &Key, backend: Backend, block_fns: BlockFns) -> Self {
        let enc_round_keys = key_schedule::expand(key);
        let dec_round_keys = key_schedule::invert(&enc_round_keys, key.size());
        Self {
            key_size: key.size(),
            backend,
            enc_round_keys,
            dec_round_keys,
            block_fns,
        }
    }

    /// Key size this context was built from.
    pub fn key_size(&self) -> KeySize {
        self.key_size
    }

    /// Backend actually in use. Never [Backend::Auto].
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Encryption round keys, `key_size().num_round_keys()` of them.
    pub fn enc_round_keys(&self) -> &[Block] {
        &self.enc_round_keys[..self.key_size.num_round_keys()]
    }

    /// Decryption round keys in equivalent-inverse-cipher form: the first and last are the last
    /// and first encryption round keys, the interior ones have InvMixColumns applied.
    pub fn dec_round_keys(&self) -> &[Block] {
        &self.dec_round_keys[..self.key_size.num_round_keys()]
    }

    /// Encrypts one 16-byte block.
    pub fn encrypt_block(&self, plaintext: &Block) -> Block {
        (self.block_fns.encrypt)(plaintext, &self.enc_round_keys)
    }

    /// Decrypts one 16-byte block.
    pub fn decrypt_block(&self, ciphertext: &Block) -> Block {
        (self.block_fns.decrypt)(ciphertext, &self.dec_round_keys)
    }

    /// Encrypts `input` under `mode` into the front of `output`.
    ///
    /// ECB takes no IV; every other mode requires a 16-byte one. ECB and CBC input must be a
    /// multiple of 16 bytes. `output` must be at least as long as `input`.
    pub fn encrypt_into(
        &self,
        mode: Mode,
        iv: Option<&[u8]>,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<()> {
        match mode {
            Mode::Ecb => {
                no_iv(iv)?;
                ecb::encrypt(self, input, output)
            }
            Mode::Cbc => cbc::encrypt(self, require_iv(iv)?, input, output),
            Mode::Cfb => cfb::encrypt(self, require_iv(iv)?, input, output),
            Mode::Ofb => ofb::crypt(self, require_iv(iv)?, input, output),
            Mode::Ctr => ctr::crypt(self, require_iv(iv)?, input, output),
        }
    }

    /// Decrypts `input` under `mode` into the front of `output`. Same argument rules as
    /// [encrypt_into](Context::encrypt_into).
    pub fn decrypt_into(
        &self,
        mode: Mode,
        iv: Option<&[u8]>,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<()> {
        match mode {
            Mode::Ecb => {
                no_iv(iv)?;
                ecb::decrypt(self, input, output)
            }
            Mode::Cbc => cbc::decrypt(self, require_iv(iv)?, input, output),
            Mode::Cfb => cfb::decrypt(self, require_iv(iv)?, input, output),
            Mode::Ofb => ofb::crypt(self, require_iv(iv)?, input, output),
            Mode::Ctr => ctr::crypt(self, require_iv(iv)?, input, output),
        }
    }

    /// Owned-buffer form of [encrypt_into](Context::encrypt_into).
    pub fn encrypt(&self, mode: Mode, iv: Option<&[u8]>, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = vec![0u8; input.len()];
        self.encrypt_into(mode, iv, input, &mut output)?;
        Ok(output)
    }

    /// Owned-buffer form of [decrypt_into](Context::decrypt_into).
    pub fn decrypt(&self, mode: Mode, iv: Option<&[u8]>, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = vec![0u8; input.len()];
        self.decrypt_into(mode, iv, input, &mut output)?;
        Ok(output)
    }

    /// Pads `input` and encrypts it with a block-aligned mode (ECB or CBC).
    pub fn encrypt_padded(
        &self,
        mode: Mode,
        iv: Option<&[u8]>,
        input: &[u8],
        padding: Padding,
    ) -> Result<Vec<u8>> {
        padded_mode(mode)?;
        let mut buffer = add_padding(input, padding);
        let padded = buffer.clone();
        self.encrypt_into(mode, iv, &padded, &mut buffer)?;
        Ok(buffer)
    }

    /// Decrypts `input` with a block-aligned mode (ECB or CBC), then validates and strips padding.
    pub fn decrypt_padded(
        &self,
        mode: Mode,
        iv: Option<&[u8]>,
        input: &[u8],
        padding: Padding,
    ) -> Result<Vec<u8>> {
        padded_mode(mode)?;
        let mut output = self.decrypt(mode, iv, input)?;
        let len = remove_padding(&output, padding)?;
        output.truncate(len);
        Ok(output)
    }
}

impl BlockCipher for Context {
    #[inline(always)]
    fn encrypt_block(&self, block: &Block) -> Block {
        Context::encrypt_block(self, block)
    }

    #[inline(always)]
    fn decrypt_block(&self, block: &Block) -> Block {
        Context::decrypt_block(self, block)
    }
}

// round keys stay out of logs and panic messages
impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("key_size", &self.key_size)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

fn require_iv(iv: Option<&[u8]>) -> Result<&[u8]> {
    iv.ok_or(Error::InvalidArgument("IV required for this mode"))
}

fn no_iv(iv: Option<&[u8]>) -> Result<()> {
    match iv {
        Some(_) => Err(Error::InvalidArgument("ECB does not take an IV")),
        None => Ok(()),
    }
}

fn padded_mode(mode: Mode) -> Result<()> {
    if !mode.is_block_aligned() {
        return Err(Error::InvalidArgument("padding only applies to ECB and CBC"));
    }
    Ok(())
}
