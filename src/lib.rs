pub mod analysis;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod signal;
pub mod signal_processing;

pub use config::PipelineConfig;
pub use error::{Result, SignalError};
pub use pipeline::{PipelineOutput, SignalPipeline};
pub use signal::Signal;
