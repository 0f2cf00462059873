pub mod metrics;
pub mod nyquist;

pub use metrics::{ErrorReport, error_metrics};
pub use nyquist::{NyquistCheck, nyquist_check};
