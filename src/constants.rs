//! Default demonstration parameters and numeric limits.
//!
//! The defaults reproduce the classic teaching setup: a 5 Hz tone
//! deliberately under-sampled at 8 Hz and quantized to 3 bits.

/// Default tone frequency in Hz.
pub const DEFAULT_SIGNAL_FREQUENCY: f64 = 5.0;

/// Default observation window in seconds.
pub const DEFAULT_DURATION: f64 = 2.0;

/// Default sampling frequency in Hz (below Nyquist for the default tone).
pub const DEFAULT_SAMPLING_FREQUENCY: f64 = 8.0;

/// Number of points in the dense grid used as the continuous reference.
pub const DEFAULT_CONTINUOUS_POINTS: usize = 1000;

pub const DEFAULT_BIT_DEPTH: u32 = 3;
pub const DEFAULT_MIN_VALUE: f64 = -1.0;
pub const DEFAULT_MAX_VALUE: f64 = 1.0;

pub const DEFAULT_NOISE_MEAN: f64 = 0.0;

/// Noise standard deviation as a fraction of the signal's peak-to-peak range.
pub const DEFAULT_NOISE_RELATIVE_STD: f64 = 0.1;

/// Largest accepted bit depth. Level indices are stored as `i64`, and
/// beyond this the ladder step approaches `f64` resolution anyway.
pub const MAX_BIT_DEPTH: u32 = 32;

/// Upper bound on the number of points in either grid. Keeps a typo such
/// as `fs = 1e30` from turning into an impossible allocation.
pub const MAX_SAMPLE_COUNT: usize = 10_000_000;
