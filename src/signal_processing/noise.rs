use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::config::NoiseConfig;
use crate::error::{Result, SignalError};
use crate::signal::Signal;

/// Build the noise source for one run. A seed gives a reproducible stream.
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Add Gaussian noise scaled to the signal's own peak-to-peak range
///
/// One independent draw from `N(mean, relative_std * (max - min))` is added
/// to every sample. A constant signal has zero range, so only `mean` is
/// added. `rng` is consumed once per sample.
pub fn apply<R: Rng + ?Sized>(signal: &Signal, config: &NoiseConfig, rng: &mut R) -> Result<Signal> {
    config.validate()?;

    let magnitude = signal.magnitude();
    let noise_std = config.relative_std * magnitude;
    log::debug!(
        "Noise: mean={}, std={:.6} (relative {} of range {:.6})",
        config.mean,
        noise_std,
        config.relative_std,
        magnitude
    );

    let normal = Normal::new(config.mean, noise_std)
        .map_err(|e| SignalError::Config(format!("noise distribution: {}", e)))?;

    let noisy = signal
        .samples()
        .iter()
        .map(|&x| x + normal.sample(rng))
        .collect();

    signal.with_samples(noisy)
}
