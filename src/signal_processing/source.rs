use std::f64::consts::PI;

use crate::config::SamplingConfig;
use crate::error::{Result, SignalError};
use crate::signal::Signal;

/// Evaluate `sin(2π·f·t)` at each time point
///
/// Only the tone frequency of `config` is used here; the time points may be
/// any strictly increasing grid.
pub fn generate(config: &SamplingConfig, time_points: &[f64]) -> Result<Signal> {
    let freq = config.signal_frequency;
    if freq <= 0.0 || !freq.is_finite() {
        return Err(SignalError::Config(format!(
            "signal frequency must be positive, got {}",
            freq
        )));
    }

    let omega = 2.0 * PI * freq;
    let samples = time_points.iter().map(|&t| (omega * t).sin()).collect();

    Signal::new(time_points.to_vec(), samples)
}

/// Sine sampled at the configured rate over the configured duration
pub fn sample(config: &SamplingConfig) -> Result<Signal> {
    config.validate()?;
    generate(config, &config.sample_times())
}

/// Dense reference rendering of the same sine with `points` samples
pub fn continuous(config: &SamplingConfig, points: usize) -> Result<Signal> {
    config.validate()?;
    generate(config, &config.continuous_times(points))
}
