use crate::config::{QuantizationConfig, RangePolicy};
use crate::error::{Result, SignalError};
use crate::signal::Signal;

/// Quantizer output: the reconstructed signal plus the level index chosen
/// for every sample
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedSignal {
    pub signal: Signal,
    pub levels: Vec<i64>,
    /// Samples that fell outside `[min_value, max_value]`
    pub out_of_range: usize,
}

/// Map a sample to its level index on the ladder.
///
/// Ties round half to even. Under `RangePolicy::Extrapolate` the index is
/// not clamped and may fall outside `0..level_count`.
pub fn level_index(x: f64, config: &QuantizationConfig) -> i64 {
    let span = config.max_value - config.min_value;
    let top = (config.level_count() - 1) as f64;
    let level = ((x - config.min_value) / span * top).round_ties_even();

    match config.range_policy {
        RangePolicy::Extrapolate => level as i64,
        RangePolicy::Clamp => level.clamp(0.0, top) as i64,
    }
}

/// Value represented by a level index
pub fn reconstruct(level: i64, config: &QuantizationConfig) -> f64 {
    let span = config.max_value - config.min_value;
    let top = (config.level_count() - 1) as f64;
    config.min_value + level as f64 * span / top
}

/// Quantize every sample of `signal` onto the `2^bit_depth` level ladder.
///
/// NaN and infinite samples have no level and are rejected with
/// `SignalError::NonFiniteSample`.
pub fn quantize(signal: &Signal, config: &QuantizationConfig) -> Result<QuantizedSignal> {
    config.validate()?;

    if let Some(index) = signal.samples().iter().position(|x| !x.is_finite()) {
        return Err(SignalError::NonFiniteSample { index });
    }

    let range = config.min_value..=config.max_value;
    let out_of_range = signal
        .samples()
        .iter()
        .filter(|&&x| !range.contains(&x))
        .count();
    if out_of_range > 0 {
        log::debug!(
            "{} of {} samples outside [{}, {}] ({:?})",
            out_of_range,
            signal.len(),
            config.min_value,
            config.max_value,
            config.range_policy
        );
    }

    let levels: Vec<i64> = signal
        .samples()
        .iter()
        .map(|&x| level_index(x, config))
        .collect();
    let values = levels.iter().map(|&l| reconstruct(l, config)).collect();

    Ok(QuantizedSignal {
        signal: signal.with_samples(values)?,
        levels,
        out_of_range,
    })
}
