use anyhow::{Context, Result};
use clap::Parser;
use rolling_stats::Stats;

use sigchain::analysis::error_metrics;
use sigchain::config::{NoiseConfig, PipelineConfig};
use sigchain::pipeline::SignalPipeline;
use sigchain::signal_processing::create_rng;

#[derive(Parser, Debug)]
#[command(name = "noise_analysis")]
#[command(about = "Sweep noise level, bit depth and sampling rate; print end-to-end error as CSV")]
struct Args {
    /// Sweep to run: noise, bits, sampling, all
    #[arg(long, value_enum, default_value = "all")]
    sweep: Sweep,

    /// Noisy trials per sweep point
    #[arg(short, long, default_value_t = 20)]
    trials: u32,

    /// Base seed; trial k of every point uses seed + k
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Increase log verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Sweep {
    Noise,
    Bits,
    Sampling,
    All,
}

struct PointStats {
    mse: Stats<f64>,
    rmse: Stats<f64>,
    psnr: Stats<f64>,
}

/// Run `trials` seeded pipelines and collect the error of the degraded
/// branch against the ideal samples.
fn measure_point(config: &PipelineConfig, trials: u32, base_seed: u64) -> Result<PointStats> {
    let pipeline = SignalPipeline::new(config.clone())?;

    let mut stats = PointStats {
        mse: Stats::new(),
        rmse: Stats::new(),
        psnr: Stats::new(),
    };

    for trial in 0..trials {
        let mut rng = create_rng(Some(base_seed + trial as u64));
        let output = pipeline.run_with_rng(&mut rng)?;
        let report = error_metrics(
            output.sampled.samples(),
            output.degraded().signal.samples(),
        )?;

        stats.mse.update(report.mse);
        stats.rmse.update(report.rmse);
        // A perfect trial has infinite PSNR; leave it out of the average
        if report.psnr_db.is_finite() {
            stats.psnr.update(report.psnr_db);
        }
    }

    Ok(stats)
}

fn print_row(sweep: &str, parameter: f64, stats: &PointStats) {
    let psnr = if stats.psnr.count > 0 {
        format!("{:.2}", stats.psnr.mean)
    } else {
        String::new()
    };
    println!(
        "{},{},{},{:.6},{:.6},{:.6},{}",
        sweep,
        parameter,
        stats.mse.count,
        stats.mse.mean,
        stats.mse.std_dev,
        stats.rmse.mean,
        psnr
    );
}

fn sweep_noise(args: &Args) -> Result<()> {
    for step in 0..=20 {
        let relative_std = step as f64 * 0.025;
        let config = PipelineConfig {
            noise: Some(NoiseConfig::default().with_relative_std(relative_std)),
            ..Default::default()
        };
        let stats = measure_point(&config, args.trials, args.seed)
            .with_context(|| format!("noise sweep at relative std {}", relative_std))?;
        print_row("noise", relative_std, &stats);
    }
    Ok(())
}

fn sweep_bits(args: &Args) -> Result<()> {
    for bits in 1..=12 {
        let mut config = PipelineConfig::default();
        config.quantization.bit_depth = bits;
        let stats = measure_point(&config, args.trials, args.seed)
            .with_context(|| format!("bit depth sweep at {} bits", bits))?;
        print_row("bits", bits as f64, &stats);
    }
    Ok(())
}

fn sweep_sampling(args: &Args) -> Result<()> {
    for rate in (4..=40).step_by(2) {
        let mut config = PipelineConfig::default();
        config.sampling.sampling_frequency = rate as f64;
        let stats = measure_point(&config, args.trials, args.seed)
            .with_context(|| format!("sampling sweep at {} Hz", rate))?;
        print_row("sampling", rate as f64, &stats);
    }
    Ok(())
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

    if args.trials == 0 {
        anyhow::bail!("--trials must be at least 1");
    }

    println!("sweep,parameter,trials,mse_mean,mse_std,rmse_mean,psnr_mean");

    if matches!(args.sweep, Sweep::Noise | Sweep::All) {
        sweep_noise(&args)?;
    }
    if matches!(args.sweep, Sweep::Bits | Sweep::All) {
        sweep_bits(&args)?;
    }
    if matches!(args.sweep, Sweep::Sampling | Sweep::All) {
        sweep_sampling(&args)?;
    }

    Ok(())
}
