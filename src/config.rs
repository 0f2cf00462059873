//! Configuration for a single sampling / quantization run.
//!
//! Every stage receives its parameters explicitly. `PipelineConfig` bundles
//! them and can be loaded from TOML. Omitted tables fall back to the
//! demonstration defaults, except `[noise]`: leaving it out skips the noise
//! stage.
//!
//! ```toml
//! continuous_points = 1000
//!
//! [sampling]
//! signal_frequency = 5.0
//! duration = 2.0
//! sampling_frequency = 8.0
//!
//! [noise]
//! mean = 0.0
//! relative_std = 0.1
//! seed = 42
//!
//! [quantization]
//! bit_depth = 3
//! min_value = -1.0
//! max_value = 1.0
//! range_policy = "extrapolate"
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::constants::{
    DEFAULT_BIT_DEPTH, DEFAULT_CONTINUOUS_POINTS, DEFAULT_DURATION, DEFAULT_MAX_VALUE,
    DEFAULT_MIN_VALUE, DEFAULT_NOISE_MEAN, DEFAULT_NOISE_RELATIVE_STD,
    DEFAULT_SAMPLING_FREQUENCY, DEFAULT_SIGNAL_FREQUENCY, MAX_BIT_DEPTH, MAX_SAMPLE_COUNT,
};
use crate::error::{Result, SignalError};

/// Frequency specification
///
/// Can be given either as a frequency in Hz or as a period.
///
/// # Parsing formats
/// - `5` or `5.0` - frequency in Hz (no suffix)
/// - `5hz` or `5Hz` - frequency in Hz (explicit)
/// - `200ms` - period in milliseconds
/// - `125000us` or `125000μs` - period in microseconds
///
/// # Example
/// ```
/// use sigchain::config::Frequency;
///
/// let freq: Frequency = "125ms".parse().unwrap();
/// assert!((freq.as_hz() - 8.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequency(f64);

impl Frequency {
    pub fn from_hz(hz: f64) -> Self {
        Self(hz)
    }

    pub fn from_period_secs(secs: f64) -> Self {
        Self(1.0 / secs)
    }

    pub fn as_hz(&self) -> f64 {
        self.0
    }

    pub fn period_secs(&self) -> f64 {
        1.0 / self.0
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Hz", self.0)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        let period = if let Some(num) = s.strip_suffix("ms") {
            Some((num, 1e-3))
        } else {
            s.strip_suffix("us")
                .or_else(|| s.strip_suffix("μs"))
                .map(|num| (num, 1e-6))
        };

        if let Some((num, scale)) = period {
            let value: f64 = num
                .trim()
                .parse()
                .map_err(|_| format!("invalid period: {}", s))?;
            if value <= 0.0 || !value.is_finite() {
                return Err("period must be positive".to_string());
            }
            return Ok(Self::from_period_secs(value * scale));
        }

        let num = s
            .strip_suffix("hz")
            .or_else(|| s.strip_suffix("Hz"))
            .or_else(|| s.strip_suffix("HZ"))
            .unwrap_or(s);

        let hz: f64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid frequency: {}", s))?;
        if hz <= 0.0 || !hz.is_finite() {
            return Err("frequency must be positive".to_string());
        }
        Ok(Self::from_hz(hz))
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SignalError::Config(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

/// Tone and sampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Frequency of the generated sine in Hz
    pub signal_frequency: f64,
    /// Length of the observation window in seconds
    pub duration: f64,
    /// Rate at which the sine is sampled in Hz
    pub sampling_frequency: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            signal_frequency: DEFAULT_SIGNAL_FREQUENCY,
            duration: DEFAULT_DURATION,
            sampling_frequency: DEFAULT_SAMPLING_FREQUENCY,
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<()> {
        require_positive("signal_frequency", self.signal_frequency)?;
        require_positive("duration", self.duration)?;
        require_positive("sampling_frequency", self.sampling_frequency)?;

        let count = (self.sampling_frequency * self.duration).floor();
        if count < 1.0 {
            return Err(SignalError::Config(format!(
                "duration {}s holds no sample at {}Hz",
                self.duration, self.sampling_frequency
            )));
        }
        if count > MAX_SAMPLE_COUNT as f64 {
            return Err(SignalError::Config(format!(
                "{}s at {}Hz needs {} samples, limit is {}",
                self.duration, self.sampling_frequency, count, MAX_SAMPLE_COUNT
            )));
        }
        Ok(())
    }

    /// Number of samples taken over the window: `floor(fs * duration)`.
    /// Only meaningful once `validate` has bounded the product.
    pub fn sample_count(&self) -> usize {
        (self.sampling_frequency * self.duration).floor() as usize
    }

    /// Nominal time between samples in seconds
    pub fn sample_interval(&self) -> f64 {
        1.0 / self.sampling_frequency
    }

    /// Sampling instants: `sample_count` uniform points over
    /// `[0, duration)`, endpoint excluded.
    pub fn sample_times(&self) -> Vec<f64> {
        uniform_grid(self.duration, self.sample_count())
    }

    /// Dense grid over the same window, used as the continuous reference.
    pub fn continuous_times(&self, points: usize) -> Vec<f64> {
        uniform_grid(self.duration, points)
    }
}

fn uniform_grid(duration: f64, points: usize) -> Vec<f64> {
    (0..points)
        .map(|i| i as f64 * duration / points as f64)
        .collect()
}

/// Additive Gaussian noise parameters
///
/// The effective standard deviation is `relative_std` times the
/// peak-to-peak range of the signal being perturbed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub mean: f64,
    pub relative_std: f64,
    /// Seed for a reproducible noise stream; `None` uses OS entropy
    pub seed: Option<u64>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            mean: DEFAULT_NOISE_MEAN,
            relative_std: DEFAULT_NOISE_RELATIVE_STD,
            seed: None,
        }
    }
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_relative_std(mut self, relative_std: f64) -> Self {
        self.relative_std = relative_std;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.mean.is_finite() {
            return Err(SignalError::Config(format!(
                "noise mean must be finite, got {}",
                self.mean
            )));
        }
        if self.relative_std < 0.0 || !self.relative_std.is_finite() {
            return Err(SignalError::Config(format!(
                "noise relative_std must be non-negative, got {}",
                self.relative_std
            )));
        }
        Ok(())
    }
}

/// Handling of samples outside `[min_value, max_value]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Keep the unclamped level index; out-of-range samples land beyond
    /// the ends of the ladder
    #[default]
    Extrapolate,
    /// Saturate level indices to `[0, level_count - 1]`
    Clamp,
}

/// Quantizer ladder parameters
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuantizationConfig {
    pub bit_depth: u32,
    pub min_value: f64,
    pub max_value: f64,
    pub range_policy: RangePolicy,
}

impl Default for QuantizationConfig {
    fn default() -> Self {
        Self {
            bit_depth: DEFAULT_BIT_DEPTH,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            range_policy: RangePolicy::Extrapolate,
        }
    }
}

impl QuantizationConfig {
    pub fn new(bit_depth: u32, min_value: f64, max_value: f64) -> Self {
        Self {
            bit_depth,
            min_value,
            max_value,
            range_policy: RangePolicy::Extrapolate,
        }
    }

    pub fn with_range_policy(mut self, range_policy: RangePolicy) -> Self {
        self.range_policy = range_policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.bit_depth < 1 || self.bit_depth > MAX_BIT_DEPTH {
            return Err(SignalError::Config(format!(
                "bit_depth must be in 1..={}, got {}",
                MAX_BIT_DEPTH, self.bit_depth
            )));
        }
        if !self.min_value.is_finite() || !self.max_value.is_finite() {
            return Err(SignalError::Config(
                "quantization range must be finite".to_string(),
            ));
        }
        if self.min_value >= self.max_value {
            return Err(SignalError::Config(format!(
                "min_value ({}) must be below max_value ({})",
                self.min_value, self.max_value
            )));
        }
        Ok(())
    }

    /// Number of discrete levels: `2^bit_depth`
    pub fn level_count(&self) -> u64 {
        1u64 << self.bit_depth
    }

    /// Distance between adjacent levels
    pub fn step(&self) -> f64 {
        (self.max_value - self.min_value) / (self.level_count() - 1) as f64
    }
}

/// Everything needed for one demonstration run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub sampling: SamplingConfig,
    /// Noise stage; `None` skips it. A TOML file without a `[noise]`
    /// table leaves it `None`.
    #[serde(default)]
    pub noise: Option<NoiseConfig>,
    pub quantization: QuantizationConfig,
    /// Points in the dense continuous reference grid
    pub continuous_points: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            noise: Some(NoiseConfig::default()),
            quantization: QuantizationConfig::default(),
            continuous_points: DEFAULT_CONTINUOUS_POINTS,
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SignalError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SignalError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.sampling.validate()?;
        if let Some(ref noise) = self.noise {
            noise.validate()?;
        }
        self.quantization.validate()?;
        if !(2..=MAX_SAMPLE_COUNT).contains(&self.continuous_points) {
            return Err(SignalError::Config(format!(
                "continuous_points must be in 2..={}, got {}",
                MAX_SAMPLE_COUNT, self.continuous_points
            )));
        }
        Ok(())
    }
}
