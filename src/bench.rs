//! Throughput harness: random data, key and IV, then every mode timed in both directions.

use std::time::{Duration, Instant};

use aesm::{Context, Key, KeySize, Mode, random_iv};
use rand::Rng;

use crate::CliError;

const MB: usize = 1024 * 1024;

pub struct ModeTiming {
    pub mode: Mode,
    pub encrypt: Duration,
    pub decrypt: Duration,
}

impl ModeTiming {
    fn avg_ms(total: Duration, iterations: u32) -> f64 {
        total.as_secs_f64() * 1000.0 / f64::from(iterations)
    }

    fn mb_per_s(total: Duration, iterations: u32, data_mb: u64) -> f64 {
        let secs = total.as_secs_f64() / f64::from(iterations);
        if secs == 0.0 { f64::INFINITY } else { data_mb as f64 / secs }
    }
}

pub fn run(
    data_mb: u64,
    iterations: u32,
    key_size: KeySize,
    backend: aesm::Backend,
) -> Result<(aesm::Backend, Vec<ModeTiming>), CliError> {
    let len = data_len(data_mb)?;
    log::info!("preparing {len} bytes of random data");

    let mut input = vec![0u8; len];
    rand::rng().fill(&mut input[..]);
    let ctx = Context::with_backend(&Key::random(key_size)?, backend)?;
    let iv = random_iv()?;
    log::debug!("benchmark context: {ctx:?}");

    let mut ciphertext = vec![0u8; len];
    let mut plaintext = vec![0u8; len];
    let mut timings = Vec::with_capacity(Mode::ALL.len());

    for mode in Mode::ALL {
        let iv = mode.requires_iv().then_some(&iv[..]);
        let mut timing = ModeTiming {
            mode,
            encrypt: Duration::ZERO,
            decrypt: Duration::ZERO,
        };

        for i in 0..iterations {
            let start = Instant::now();
            ctx.encrypt_into(mode, iv, &input, &mut ciphertext)?;
            timing.encrypt += start.elapsed();

            let start = Instant::now();
            ctx.decrypt_into(mode, iv, &ciphertext, &mut plaintext)?;
            timing.decrypt += start.elapsed();

            check_round_trip(mode, i + 1, &input, &plaintext)?;
            log::debug!("{mode} {}/{iterations}", i + 1);
        }

        timings.push(timing);
    }

    Ok((ctx.backend(), timings))
}

/// Input size in bytes for `data_mb` MiB, rejecting sizes that do not fit in memory addressing.
fn data_len(data_mb: u64) -> Result<usize, CliError> {
    usize::try_from(data_mb)
        .ok()
        .and_then(|mb| mb.checked_mul(MB))
        .ok_or(CliError::BenchSizeTooLarge(data_mb))
}

fn check_round_trip(
    mode: Mode,
    iteration: u32,
    input: &[u8],
    plaintext: &[u8],
) -> Result<(), CliError> {
    if plaintext != input {
        return Err(CliError::RoundTripMismatch { mode, iteration });
    }
    Ok(())
}

pub fn print_report(
    timings: &[ModeTiming],
    data_mb: u64,
    iterations: u32,
    key_size: KeySize,
    backend: aesm::Backend,
) {
    println!(
        "AES-{} ({backend:?}): {data_mb} MiB x {iterations} iterations",
        key_size.key_len() * 8
    );
    println!(
        "{:<6}{:>14}{:>14}{:>14}{:>14}",
        "mode", "enc avg ms", "enc MB/s", "dec avg ms", "dec MB/s"
    );
    for t in timings {
        println!(
            "{:<6}{:>14.3}{:>14.1}{:>14.3}{:>14.1}",
            t.mode.name(),
            ModeTiming::avg_ms(t.encrypt, iterations),
            ModeTiming::mb_per_s(t.encrypt, iterations, data_mb),
            ModeTiming::avg_ms(t.decrypt, iterations),
            ModeTiming::mb_per_s(t.decrypt, iterations, data_mb),
        );
    }
}
