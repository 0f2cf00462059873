use serde::Serialize;

use crate::error::{Result, SignalError};
use crate::signal::peak;

/// Discrepancy between a reference signal and a degraded copy
///
/// `psnr_db` is measured against the reference's peak absolute value:
/// - `+inf` when the signals are identical,
/// - `NaN` when they are identical and the reference is all zeros (0/0),
/// - `-inf` when the reference is all zeros but the signals differ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorReport {
    pub mse: f64,
    pub rmse: f64,
    pub psnr_db: f64,
}

/// Compute MSE, RMSE and PSNR of `degraded` against `reference`
pub fn error_metrics(reference: &[f64], degraded: &[f64]) -> Result<ErrorReport> {
    if reference.len() != degraded.len() {
        return Err(SignalError::ShapeMismatch {
            reference: reference.len(),
            degraded: degraded.len(),
        });
    }
    if reference.is_empty() {
        return Err(SignalError::InsufficientData {
            needed: 1,
            available: 0,
        });
    }

    let mse = reference
        .iter()
        .zip(degraded)
        .map(|(r, d)| (r - d).powi(2))
        .sum::<f64>()
        / reference.len() as f64;
    let rmse = mse.sqrt();

    let peak = peak(reference);
    let psnr_db = if mse == 0.0 {
        if peak == 0.0 { f64::NAN } else { f64::INFINITY }
    } else {
        10.0 * (peak * peak / mse).log10()
    };

    Ok(ErrorReport { mse, rmse, psnr_db })
}
