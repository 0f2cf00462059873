mod csv;
mod json;
mod text;

use chrono::Utc;
use serde::Serialize;

use crate::analysis::{ErrorReport, NyquistCheck};
use crate::config::PipelineConfig;
use crate::pipeline::PipelineOutput;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Scalar summary of one run, the unit every formatter renders
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub signal_frequency: f64,
    pub sampling_frequency: f64,
    pub duration: f64,
    pub sample_count: usize,
    pub sample_interval: f64,
    pub bit_depth: u32,
    pub level_count: u64,
    pub min_value: f64,
    pub max_value: f64,
    pub step: f64,
    pub noise_mean: Option<f64>,
    pub noise_relative_std: Option<f64>,
    pub out_of_range: usize,
    pub quantization_error: ErrorReport,
    pub noise_error: Option<ErrorReport>,
    pub nyquist: NyquistCheck,
}

impl RunSummary {
    pub fn new(config: &PipelineConfig, output: &PipelineOutput) -> Self {
        let sampling = &config.sampling;
        let quant = &config.quantization;
        Self {
            signal_frequency: sampling.signal_frequency,
            sampling_frequency: sampling.sampling_frequency,
            duration: sampling.duration,
            sample_count: output.sampled.len(),
            sample_interval: sampling.sample_interval(),
            bit_depth: quant.bit_depth,
            level_count: quant.level_count(),
            min_value: quant.min_value,
            max_value: quant.max_value,
            step: quant.step(),
            noise_mean: config.noise.map(|n| n.mean),
            noise_relative_std: config.noise.map(|n| n.relative_std),
            out_of_range: output.degraded().out_of_range,
            quantization_error: output.quantization_error,
            noise_error: output.noise_error,
            nyquist: output.nyquist,
        }
    }
}

pub trait Formatter {
    fn format(&self, summary: &RunSummary) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Render a dB value, spelling out the non-finite sentinels
pub fn format_db(value: f64) -> String {
    if value.is_nan() {
        "undefined".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{:.2}", value)
    }
}
