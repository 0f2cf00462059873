use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use sigchain::config::{Frequency, PipelineConfig, RangePolicy};
use sigchain::output::{OutputFormat, RunSummary, create_formatter};
use sigchain::pipeline::SignalPipeline;

#[derive(Parser, Debug)]
#[command(name = "sigchain")]
#[command(about = "Sample, perturb and quantize a sine tone, then measure the damage", long_about = None)]
struct Args {
    /// TOML pipeline configuration file (flags below override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tone frequency (e.g., "5", "5hz", "200ms")
    #[arg(long)]
    signal_freq: Option<Frequency>,

    /// Observation window in seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Sampling frequency (e.g., "8", "8hz", "125ms")
    #[arg(short = 'r', long)]
    sampling_freq: Option<Frequency>,

    /// Quantizer bit depth
    #[arg(short, long)]
    bits: Option<u32>,

    /// Lower end of the quantizer range
    #[arg(long, allow_hyphen_values = true)]
    min: Option<f64>,

    /// Upper end of the quantizer range
    #[arg(long, allow_hyphen_values = true)]
    max: Option<f64>,

    /// Noise mean
    #[arg(long, allow_hyphen_values = true)]
    noise_mean: Option<f64>,

    /// Noise standard deviation relative to the signal's peak-to-peak range
    #[arg(long)]
    noise_std: Option<f64>,

    /// Skip the noise stage
    #[arg(long, conflicts_with_all = ["noise_mean", "noise_std"])]
    no_noise: bool,

    /// Seed for reproducible noise
    #[arg(short, long)]
    seed: Option<u64>,

    /// Out-of-range handling: extrapolate, clamp
    #[arg(long, value_enum)]
    range_policy: Option<RangePolicy>,

    /// Output format: text, json, csv
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn build_config(args: &Args) -> Result<PipelineConfig> {
    let config = match args.config {
        Some(ref path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    Ok(apply_overrides(config, args))
}

/// Layer command-line flags over a loaded or default configuration.
///
/// Noise stays off when the configuration has none, unless a noise flag or
/// `--seed` asks for it.
fn apply_overrides(mut config: PipelineConfig, args: &Args) -> PipelineConfig {
    if let Some(freq) = args.signal_freq {
        config.sampling.signal_frequency = freq.as_hz();
    }
    if let Some(duration) = args.duration {
        config.sampling.duration = duration;
    }
    if let Some(freq) = args.sampling_freq {
        config.sampling.sampling_frequency = freq.as_hz();
    }

    if let Some(bits) = args.bits {
        config.quantization.bit_depth = bits;
    }
    if let Some(min) = args.min {
        config.quantization.min_value = min;
    }
    if let Some(max) = args.max {
        config.quantization.max_value = max;
    }
    if let Some(policy) = args.range_policy {
        config.quantization.range_policy = policy;
    }

    let noise_requested =
        args.noise_mean.is_some() || args.noise_std.is_some() || args.seed.is_some();
    if args.no_noise {
        config.noise = None;
    } else if config.noise.is_some() || noise_requested {
        let mut noise = config.noise.unwrap_or_default();
        if let Some(mean) = args.noise_mean {
            noise.mean = mean;
        }
        if let Some(std) = args.noise_std {
            noise.relative_std = std;
        }
        if let Some(seed) = args.seed {
            noise.seed = Some(seed);
        }
        config.noise = Some(noise);
    }

    config
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;
    let tone = Frequency::from_hz(config.sampling.signal_frequency);
    let rate = Frequency::from_hz(config.sampling.sampling_frequency);
    log::info!(
        "Tone {} sampled at {} ({:.6}s between samples), noise {}",
        tone,
        rate,
        rate.period_secs(),
        if config.noise.is_some() { "on" } else { "off" }
    );

    let pipeline = SignalPipeline::new(config).context("Invalid pipeline configuration")?;
    let output = pipeline.run().context("Pipeline run failed")?;

    if let Some(ref noisy) = output.noisy {
        log::info!(
            "Noisy samples: min {:.4}, max {:.4}",
            noisy.min().unwrap_or(0.0),
            noisy.max().unwrap_or(0.0)
        );
    }

    let summary = RunSummary::new(pipeline.config(), &output);
    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    println!("{}", formatter.format(&summary));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigchain::config::NoiseConfig;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "sigchain",
            "--signal-freq",
            "3hz",
            "--sampling-freq",
            "50ms",
            "--bits",
            "5",
            "--min",
            "-2",
            "--seed",
            "11",
        ]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.sampling.signal_frequency, 3.0);
        assert!((config.sampling.sampling_frequency - 20.0).abs() < 1e-9);
        assert_eq!(config.quantization.bit_depth, 5);
        assert_eq!(config.quantization.min_value, -2.0);
        assert_eq!(config.noise.and_then(|n| n.seed), Some(11));
    }

    #[test]
    fn test_no_noise_flag() {
        let args = Args::parse_from(["sigchain", "--no-noise"]);
        let config = build_config(&args).unwrap();
        assert!(config.noise.is_none());
    }

    #[test]
    fn test_default_noise_when_unset() {
        let args = Args::parse_from(["sigchain"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.noise, Some(NoiseConfig::default()));
    }

    #[test]
    fn test_file_without_noise_stays_quiet() {
        let loaded = PipelineConfig::from_toml_str("[quantization]\nbit_depth = 4").unwrap();
        let args = Args::parse_from(["sigchain", "--bits", "6"]);
        let config = apply_overrides(loaded, &args);

        assert!(config.noise.is_none());
        assert_eq!(config.quantization.bit_depth, 6);
    }

    #[test]
    fn test_seed_flag_enables_noise_for_quiet_file() {
        let loaded = PipelineConfig::from_toml_str("").unwrap();
        let args = Args::parse_from(["sigchain", "--seed", "3"]);
        let config = apply_overrides(loaded, &args);

        assert_eq!(config.noise, Some(NoiseConfig::default().with_seed(3)));
    }

    #[test]
    fn test_file_noise_merged_with_flags() {
        let loaded =
            PipelineConfig::from_toml_str("[noise]\nrelative_std = 0.3\nseed = 8").unwrap();
        let args = Args::parse_from(["sigchain", "--noise-mean", "0.5"]);
        let noise = apply_overrides(loaded, &args).noise.unwrap();

        assert_eq!(noise.mean, 0.5);
        assert_eq!(noise.relative_std, 0.3);
        assert_eq!(noise.seed, Some(8));
    }
}
