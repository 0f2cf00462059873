pub mod noise;
pub mod quantizer;
pub mod source;

pub use noise::create_rng;
pub use quantizer::{QuantizedSignal, level_index, quantize, reconstruct};
