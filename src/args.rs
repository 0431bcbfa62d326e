use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, author, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt input to output (written as Base64)
    Encrypt(EncryptArgs),

    /// Decrypt Base64 input to output
    Decrypt(CommonArgs),

    /// Time encryption and decryption of random data in every mode
    Bench(BenchArgs),
}

#[derive(Args, Debug)]
#[command(arg_required_else_help = true)]
pub struct CommonArgs {
    /// Mode of operation.
    #[arg(short = 'm', long = "mode", value_enum)]
    pub mode: Mode,

    /// Input file path.
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output file path.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Key as a hex string (32, 48 or 64 digits).
    #[arg(short = 'k', long = "key", value_name = "HEX")]
    pub key: Option<String>,

    /// Initialisation vector as a 32-digit hex string. Required for every mode except ECB.
    #[arg(long = "iv", value_name = "HEX")]
    pub iv: Option<String>,

    /// Padding scheme. Only valid with ECB and CBC, which default to PKCS#7.
    #[arg(short = 'p', long = "padding", value_enum)]
    pub padding: Option<Padding>,

    /// Block-transform backend.
    #[arg(long = "backend", value_enum, default_value_t = Backend::Auto)]
    pub backend: Backend,
}

#[derive(Args, Debug)]
#[command(arg_required_else_help = true)]
pub struct EncryptArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Generate a random key and print it as hex instead of reading --key
    #[arg(long = "gen-key", conflicts_with = "key")]
    pub gen_key: bool,

    /// Only valid with --gen-key.
    #[arg(
        long = "key-size",
        value_enum,
        default_value_t = KeySize::Bits256,
        requires = "gen_key"
    )]
    pub key_size: KeySize,
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Size of the random input in MiB.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub data_mb: u64,

    /// Encrypt/decrypt passes per mode.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub iterations: u32,

    /// Key size in bits.
    #[arg(value_enum)]
    pub key_size: KeySize,

    /// Block-transform backend.
    #[arg(long = "backend", value_enum, default_value_t = Backend::Auto)]
    pub backend: Backend,
}

#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum KeySize {
    #[value(name = "128")]
    Bits128,
    #[value(name = "192")]
    Bits192,
    #[value(name = "256")]
    Bits256,
}

#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum Mode {
    #[value(name = "ecb")]
    ModeECB,
    #[value(name = "cbc")]
    ModeCBC,
    #[value(name = "cfb")]
    ModeCFB,
    #[value(name = "ofb")]
    ModeOFB,
    #[value(name = "ctr")]
    ModeCTR,
}

#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum Padding {
    #[value(name = "pkcs7")]
    Pkcs7,
    #[value(name = "zero")]
    Zero,
    #[value(name = "x923")]
    AnsiX923,
}

#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum Backend {
    #[value(name = "auto")]
    Auto,
    #[value(name = "soft")]
    Soft,
    #[value(name = "aesni")]
    AesNi,
}

impl From<KeySize> for aesm::KeySize {
    fn from(size: KeySize) -> Self {
        match size {
            KeySize::Bits128 => aesm::KeySize::Bits128,
            KeySize::Bits192 => aesm::KeySize::Bits192,
            KeySize::Bits256 => aesm::KeySize::Bits256,
        }
    }
}

impl From<Mode> for aesm::Mode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::ModeECB => aesm::Mode::Ecb,
            Mode::ModeCBC => aesm::Mode::Cbc,
            Mode::ModeCFB => aesm::Mode::Cfb,
            Mode::ModeOFB => aesm::Mode::Ofb,
            Mode::ModeCTR => aesm::Mode::Ctr,
        }
    }
}

impl From<Padding> for aesm::Padding {
    fn from(padding: Padding) -> Self {
        match padding {
            Padding::Pkcs7 => aesm::Padding::Pkcs7,
            Padding::Zero => aesm::Padding::Zero,
            Padding::AnsiX923 => aesm::Padding::AnsiX923,
        }
    }
}

impl From<Backend> for aesm::Backend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Auto => aesm::Backend::Auto,
            Backend::Soft => aesm::Backend::Soft,
            Backend::AesNi => aesm::Backend::AesNi,
        }
    }
}
