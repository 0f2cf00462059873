use std::fmt::Write;

use super::{Formatter, RunSummary, format_db};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, s: &RunSummary) -> String {
        let mut out = String::new();
        let rule = "-".repeat(50);

        let _ = writeln!(out, "Signal Information:");
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "Original signal: sin(2π * {}t)", s.signal_frequency);
        let _ = writeln!(out, "Duration: {} seconds", s.duration);
        let _ = writeln!(out, "Number of samples: {}", s.sample_count);
        let _ = writeln!(out, "Time between samples: {:.3} seconds", s.sample_interval);
        let _ = writeln!(
            out,
            "Quantization: {} bits, {} levels (from {} to {}, step {:.4})",
            s.bit_depth, s.level_count, s.min_value, s.max_value, s.step
        );
        if let (Some(mean), Some(std)) = (s.noise_mean, s.noise_relative_std) {
            let _ = writeln!(out, "Noise: mean {}, σ {} × signal range", mean, std);
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Sampling Rate:");
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(
            out,
            "Nyquist rate: {} Hz, sampling at {} Hz",
            s.nyquist.nyquist_frequency, s.sampling_frequency
        );
        if s.nyquist.sufficient {
            let _ = writeln!(out, "Sampling rate is sufficient to capture the signal");
        } else {
            let _ = writeln!(
                out,
                "Sampling rate is too low: the tone aliases to {:.3} Hz",
                s.nyquist.alias_frequency
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Error Metrics:");
        let _ = writeln!(out, "{}", rule);
        let report = s.noise_error.unwrap_or(s.quantization_error);
        let _ = writeln!(out, "Mean Square Error (MSE): {:.6}", report.mse);
        let _ = writeln!(out, "Root Mean Square Error (RMSE): {:.6}", report.rmse);
        let _ = write!(
            out,
            "Peak Signal-to-Noise Ratio (PSNR): {} dB",
            format_db(report.psnr_db)
        );

        if self.verbose {
            let q = &s.quantization_error;
            let _ = write!(
                out,
                "\nQuantization only: MSE {:.6}, RMSE {:.6}, PSNR {} dB [out of range: {}]",
                q.mse,
                q.rmse,
                format_db(q.psnr_db),
                s.out_of_range
            );
        }

        out
    }
}
