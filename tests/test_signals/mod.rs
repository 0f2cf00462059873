#![allow(dead_code)]

use sigchain::Signal;

/// Wrap raw samples in a signal on a unit-spaced time axis
pub fn signal_from(samples: &[f64]) -> Signal {
    let time = (0..samples.len()).map(|i| i as f64).collect();
    Signal::new(time, samples.to_vec()).expect("unit time axis is strictly increasing")
}

/// `n` evenly spaced values covering `[lo, hi]` inclusive
pub fn ramp(n: usize, lo: f64, hi: f64) -> Vec<f64> {
    (0..n)
        .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
        .collect()
}

/// Sum of sines at several unrelated frequencies, roughly within [-1, 1]
pub fn multitone(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64 * 0.013;
            0.5 * (t * 3.1).sin() + 0.3 * (t * 11.7).sin() + 0.2 * (t * 0.7).cos()
        })
        .collect()
}
