use serde::Serialize;

/// Outcome of comparing a sampling rate against a tone's Nyquist rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NyquistCheck {
    /// `sampling_frequency >= 2 * signal_frequency`
    pub sufficient: bool,
    /// Minimum sampling rate for the tone: `2 * signal_frequency`
    pub nyquist_frequency: f64,
    /// Frequency the sampled tone appears at after folding into
    /// `[0, sampling_frequency / 2]`
    pub alias_frequency: f64,
}

/// Check whether `sampling_frequency` captures a tone at `signal_frequency`
pub fn nyquist_check(signal_frequency: f64, sampling_frequency: f64) -> NyquistCheck {
    let nyquist_frequency = 2.0 * signal_frequency;
    let sufficient = sampling_frequency >= nyquist_frequency;

    let alias_frequency = if sampling_frequency > 0.0 {
        let folds = (signal_frequency / sampling_frequency).round();
        (signal_frequency - folds * sampling_frequency).abs()
    } else {
        signal_frequency
    };

    if !sufficient {
        log::warn!(
            "Sampling at {} Hz is below the Nyquist rate {} Hz; tone aliases to {:.3} Hz",
            sampling_frequency,
            nyquist_frequency,
            alias_frequency
        );
    }

    NyquistCheck {
        sufficient,
        nyquist_frequency,
        alias_frequency,
    }
}
