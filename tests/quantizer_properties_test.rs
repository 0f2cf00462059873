mod test_signals;

use sigchain::config::{NoiseConfig, QuantizationConfig, RangePolicy};
use sigchain::signal_processing::{create_rng, noise, quantize, reconstruct};
use test_signals::{multitone, ramp, signal_from};

fn configs() -> Vec<QuantizationConfig> {
    vec![
        QuantizationConfig::new(1, -1.0, 1.0),
        QuantizationConfig::new(3, -1.0, 1.0),
        QuantizationConfig::new(5, 0.0, 10.0),
        QuantizationConfig::new(8, -0.3, 0.7),
        QuantizationConfig::new(16, -1.0, 1.0),
    ]
}

#[test]
fn test_error_within_half_step_inside_range() {
    for config in configs() {
        let samples = ramp(1001, config.min_value, config.max_value);
        let q = quantize(&signal_from(&samples), &config).unwrap();
        let bound = config.step() / 2.0 + 1e-9;

        for (x, y) in samples.iter().zip(q.signal.samples()) {
            assert!(
                (x - y).abs() <= bound,
                "{} bits: {} quantized to {}",
                config.bit_depth,
                x,
                y
            );
        }
    }
}

#[test]
fn test_idempotent_on_own_output() {
    for config in configs() {
        let once = quantize(&signal_from(&multitone(500)), &config).unwrap();
        let twice = quantize(&once.signal, &config).unwrap();
        assert_eq!(once.levels, twice.levels);
        assert_eq!(once.signal, twice.signal);
    }
}

#[test]
fn test_levels_within_ladder_inside_range() {
    for config in configs() {
        let samples = ramp(257, config.min_value, config.max_value);
        let q = quantize(&signal_from(&samples), &config).unwrap();
        let top = (config.level_count() - 1) as i64;
        assert!(q.levels.iter().all(|&l| (0..=top).contains(&l)));
        assert_eq!(q.levels.first(), Some(&0));
        assert_eq!(q.levels.last(), Some(&top));
    }
}

#[test]
fn test_one_bit_only_hits_range_ends() {
    let config = QuantizationConfig::new(1, -0.5, 2.0);
    let q = quantize(&signal_from(&ramp(100, -0.5, 2.0)), &config).unwrap();
    assert!(
        q.signal
            .samples()
            .iter()
            .all(|&v| v == config.min_value || v == config.max_value)
    );
}

#[test]
fn test_clamp_policy_keeps_noisy_samples_on_ladder() {
    let clean = signal_from(&multitone(400));
    let noise_config = NoiseConfig::default().with_relative_std(0.5);
    let noisy = noise::apply(&clean, &noise_config, &mut create_rng(Some(8))).unwrap();

    let extrapolate = QuantizationConfig::new(3, -0.5, 0.5);
    let clamp = extrapolate.with_range_policy(RangePolicy::Clamp);

    let free = quantize(&noisy, &extrapolate).unwrap();
    let held = quantize(&noisy, &clamp).unwrap();

    assert!(free.out_of_range > 0);
    assert_eq!(free.out_of_range, held.out_of_range);
    assert!(free.levels.iter().any(|&l| !(0..=7).contains(&l)));
    assert!(held.levels.iter().all(|&l| (0..=7).contains(&l)));
    for &v in held.signal.samples() {
        assert!(v >= reconstruct(0, &clamp) - 1e-12 && v <= reconstruct(7, &clamp) + 1e-12);
    }
}
