mod args;
mod bench;

use args::{Cli, Commands, CommonArgs};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use clap::Parser;

use std::fs;
use std::time::Instant;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("--padding is only valid with --mode ecb or cbc")]
    PaddingInvalidMode,

    #[error("--key is required unless --gen-key is given")]
    MissingKey,

    #[error("benchmark size of {0} MiB does not fit in memory")]
    BenchSizeTooLarge(u64),

    #[error("{mode} decryption did not reproduce the input on iteration {iteration}")]
    RoundTripMismatch { mode: aesm::Mode, iteration: u32 },

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("input is not valid Base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Aes(#[from] aesm::Error),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = aes_cli() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn aes_cli() -> Result<(), CliError> {
    let args = Cli::parse();

    match args.command {
        Commands::Encrypt(enc) => {
            let common = enc.common;

            let key = if enc.gen_key {
                let key = aesm::Key::random(enc.key_size.into())?;
                println!("{}", hex::encode(key.as_bytes()));
                key
            } else {
                read_key(&common)?
            };

            let (ctx, mode, iv, padding) = prepare(&common, &key)?;
            let plaintext = fs::read(&common.input)?;

            let start = Instant::now();
            let ciphertext = match padding {
                Some(padding) => ctx.encrypt_padded(mode, iv.as_deref(), &plaintext, padding)?,
                None => ctx.encrypt(mode, iv.as_deref(), &plaintext)?,
            };
            let duration = start.elapsed();

            fs::write(&common.output, STANDARD.encode(&ciphertext))?;
            println!(
                "Encrypted {} bytes in {} ms",
                plaintext.len(),
                duration.as_millis()
            );
            Ok(())
        }
        Commands::Decrypt(common) => {
            let key = read_key(&common)?;
            let (ctx, mode, iv, padding) = prepare(&common, &key)?;

            let encoded = fs::read_to_string(&common.input)?;
            let ciphertext = STANDARD.decode(encoded.trim())?;

            let start = Instant::now();
            let plaintext = match padding {
                Some(padding) => ctx.decrypt_padded(mode, iv.as_deref(), &ciphertext, padding)?,
                None => ctx.decrypt(mode, iv.as_deref(), &ciphertext)?,
            };
            let duration = start.elapsed();

            fs::write(&common.output, &plaintext)?;
            println!(
                "Decrypted {} bytes in {} ms",
                plaintext.len(),
                duration.as_millis()
            );
            Ok(())
        }
        Commands::Bench(bench) => {
            let key_size = bench.key_size.into();
            let (backend, timings) =
                bench::run(bench.data_mb, bench.iterations, key_size, bench.backend.into())?;
            bench::print_report(&timings, bench.data_mb, bench.iterations, key_size, backend);
            Ok(())
        }
    }
}

fn read_key(common: &CommonArgs) -> Result<aesm::Key, CliError> {
    let hex_key = common.key.as_deref().ok_or(CliError::MissingKey)?;
    Ok(aesm::Key::try_from_slice(&hex::decode(hex_key.trim())?)?)
}

/// Builds the context and resolves IV and padding for the chosen mode. ECB and CBC always pad,
/// with PKCS#7 unless told otherwise; the stream modes never do.
fn prepare(
    common: &CommonArgs,
    key: &aesm::Key,
) -> Result<(aesm::Context, aesm::Mode, Option<Vec<u8>>, Option<aesm::Padding>), CliError> {
    let mode: aesm::Mode = common.mode.into();
    let ctx = aesm::Context::with_backend(key, common.backend.into())?;

    let iv = common.iv.as_deref().map(|iv| hex::decode(iv.trim())).transpose()?;

    let padding = match (mode.is_block_aligned(), common.padding) {
        (true, padding) => Some(padding.map_or(aesm::Padding::Pkcs7, Into::into)),
        (false, None) => None,
        (false, Some(_)) => return Err(CliError::PaddingInvalidMode),
    };

    log::info!(
        "{mode} with AES-{} on {:?} backend",
        key.size().key_len() * 8,
        ctx.backend()
    );
    Ok((ctx, mode, iv, padding))
}
