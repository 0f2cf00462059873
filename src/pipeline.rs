use rand::Rng;

use crate::analysis::{ErrorReport, NyquistCheck, error_metrics, nyquist_check};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::signal::Signal;
use crate::signal_processing::{QuantizedSignal, create_rng, noise, quantize, source};

/// Every array and report produced by one run, handed read-only to the
/// presentation layer
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub continuous: Signal,
    pub sampled: Signal,
    pub noisy: Option<Signal>,
    pub quantized_clean: QuantizedSignal,
    pub quantized_noisy: Option<QuantizedSignal>,
    /// Sampled signal against its clean quantization
    pub quantization_error: ErrorReport,
    /// Clean quantization against noisy quantization
    pub noise_error: Option<ErrorReport>,
    pub nyquist: NyquistCheck,
}

impl PipelineOutput {
    /// The degraded branch: noisy quantization when noise ran, clean otherwise
    pub fn degraded(&self) -> &QuantizedSignal {
        self.quantized_noisy.as_ref().unwrap_or(&self.quantized_clean)
    }

    /// The headline metrics: noise error when noise ran, quantization error otherwise
    pub fn headline_error(&self) -> &ErrorReport {
        self.noise_error.as_ref().unwrap_or(&self.quantization_error)
    }
}

/// Source -> noise -> quantizer -> analysis for a fixed configuration
pub struct SignalPipeline {
    config: PipelineConfig,
}

impl SignalPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let sampling = &config.sampling;
        let quant = &config.quantization;
        log::debug!(
            "Sampling {} Hz tone at {} Hz for {}s: {} samples, {:.6}s apart",
            sampling.signal_frequency,
            sampling.sampling_frequency,
            sampling.duration,
            sampling.sample_count(),
            sampling.sample_interval()
        );
        log::debug!(
            "Quantizing to {} bits: {} levels on [{}, {}], step {:.6}",
            quant.bit_depth,
            quant.level_count(),
            quant.min_value,
            quant.max_value,
            quant.step()
        );

        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run with a noise source built from the configured seed
    pub fn run(&self) -> Result<PipelineOutput> {
        let seed = self.config.noise.as_ref().and_then(|n| n.seed);
        let mut rng = create_rng(seed);
        self.run_with_rng(&mut rng)
    }

    /// Run drawing noise from `rng`. The caller owns the generator for the
    /// duration of the run.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PipelineOutput> {
        let config = &self.config;

        let continuous = source::continuous(&config.sampling, config.continuous_points)?;
        let sampled = source::sample(&config.sampling)?;

        let noisy = match config.noise {
            Some(ref noise_config) => Some(noise::apply(&sampled, noise_config, rng)?),
            None => None,
        };

        let quantized_clean = quantize(&sampled, &config.quantization)?;
        let quantized_noisy = noisy
            .as_ref()
            .map(|signal| quantize(signal, &config.quantization))
            .transpose()?;

        let quantization_error =
            error_metrics(sampled.samples(), quantized_clean.signal.samples())?;
        let noise_error = quantized_noisy
            .as_ref()
            .map(|q| error_metrics(quantized_clean.signal.samples(), q.signal.samples()))
            .transpose()?;

        let nyquist = nyquist_check(
            config.sampling.signal_frequency,
            config.sampling.sampling_frequency,
        );

        Ok(PipelineOutput {
            continuous,
            sampled,
            noisy,
            quantized_clean,
            quantized_noisy,
            quantization_error,
            noise_error,
            nyquist,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NoiseConfig;

    #[test]
    fn test_default_run_shapes() {
        let pipeline = SignalPipeline::new(PipelineConfig::default()).unwrap();
        let output = pipeline.run_with_rng(&mut create_rng(Some(42))).unwrap();

        assert_eq!(output.continuous.len(), 1000);
        assert_eq!(output.sampled.len(), 16);
        assert_eq!(output.noisy.as_ref().map(Signal::len), Some(16));
        assert_eq!(output.quantized_clean.levels.len(), 16);
        assert!(output.noise_error.is_some());
        assert!(!output.nyquist.sufficient);
    }

    #[test]
    fn test_without_noise() {
        let config = PipelineConfig {
            noise: None,
            ..Default::default()
        };
        let output = SignalPipeline::new(config).unwrap().run().unwrap();

        assert!(output.noisy.is_none());
        assert!(output.quantized_noisy.is_none());
        assert!(output.noise_error.is_none());
        assert_eq!(output.degraded(), &output.quantized_clean);
        assert_eq!(output.headline_error(), &output.quantization_error);
    }

    #[test]
    fn test_seeded_runs_match() {
        let config = PipelineConfig {
            noise: Some(NoiseConfig::default().with_seed(9)),
            ..Default::default()
        };
        let pipeline = SignalPipeline::new(config).unwrap();
        let a = pipeline.run().unwrap();
        let b = pipeline.run().unwrap();

        assert_eq!(a.noisy, b.noisy);
        assert_eq!(a.noise_error, b.noise_error);
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let mut config = PipelineConfig::default();
        config.quantization.bit_depth = 0;
        assert!(SignalPipeline::new(config).is_err());
    }
}
