use crate::error::{Result, SignalError};

/// Sampled signal: values paired with their time stamps
///
/// Time stamps are strictly increasing and there is exactly one sample per
/// time stamp. Both invariants are checked on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    time: Vec<f64>,
    samples: Vec<f64>,
}

impl Signal {
    pub fn new(time: Vec<f64>, samples: Vec<f64>) -> Result<Self> {
        if time.len() != samples.len() {
            return Err(SignalError::ShapeMismatch {
                reference: time.len(),
                degraded: samples.len(),
            });
        }
        if let Some(i) = time.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(SignalError::Config(format!(
                "time stamps must be strictly increasing (index {}: {} then {})",
                i + 1,
                time[i],
                time[i + 1]
            )));
        }
        Ok(Self { time, samples })
    }

    /// New signal on the same time axis. Fails if the sample count differs.
    pub fn with_samples(&self, samples: Vec<f64>) -> Result<Self> {
        if samples.len() != self.time.len() {
            return Err(SignalError::ShapeMismatch {
                reference: self.time.len(),
                degraded: samples.len(),
            });
        }
        Ok(Self {
            time: self.time.clone(),
            samples,
        })
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn min(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::max)
    }

    /// Largest absolute sample value, 0 for an empty signal
    pub fn peak(&self) -> f64 {
        peak(&self.samples)
    }

    /// Peak-to-peak range, 0 for an empty signal
    pub fn magnitude(&self) -> f64 {
        match (self.min(), self.max()) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0.0,
        }
    }
}

pub(crate) fn peak(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0f64, |a, &b| a.max(b.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = Signal::new(vec![0.0, 1.0], vec![0.0]).unwrap_err();
        assert_eq!(
            err,
            SignalError::ShapeMismatch {
                reference: 2,
                degraded: 1
            }
        );
    }

    #[test]
    fn test_new_rejects_non_increasing_time() {
        assert!(Signal::new(vec![0.0, 0.0], vec![1.0, 2.0]).is_err());
        assert!(Signal::new(vec![0.0, 1.0, 0.5], vec![1.0, 2.0, 3.0]).is_err());
        assert!(Signal::new(vec![0.0, f64::NAN], vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn test_statistics() {
        let signal = Signal::new(vec![0.0, 0.1, 0.2], vec![-0.5, 2.0, 1.0]).unwrap();
        assert_eq!(signal.min(), Some(-0.5));
        assert_eq!(signal.max(), Some(2.0));
        assert_eq!(signal.magnitude(), 2.5);
        assert_eq!(signal.peak(), 2.0);

        let negative = Signal::new(vec![0.0, 1.0], vec![-3.0, 1.0]).unwrap();
        assert_eq!(negative.peak(), 3.0);
    }

    #[test]
    fn test_empty_signal() {
        let signal = Signal::new(Vec::new(), Vec::new()).unwrap();
        assert!(signal.is_empty());
        assert_eq!(signal.min(), None);
        assert_eq!(signal.magnitude(), 0.0);
        assert_eq!(signal.peak(), 0.0);
    }

    #[test]
    fn test_with_samples_keeps_time_axis() {
        let signal = Signal::new(vec![0.0, 0.5], vec![1.0, 2.0]).unwrap();
        let other = signal.with_samples(vec![3.0, 4.0]).unwrap();
        assert_eq!(other.time(), signal.time());
        assert_eq!(other.samples(), &[3.0, 4.0]);
        assert!(signal.with_samples(vec![1.0]).is_err());
    }
}
