//! Core types shared by every stage of the pipeline.
//!
//! This module provides:
//! - `AudioFormat` and its parts, describing a PCM layout
//! - `SampleBuffer` plus the quantization helpers that fill it
//! - `Signal` and `Pitched` traits for sample sources

mod buffer;
mod format;
mod signal;

pub use buffer::{SampleBuffer, decode_sample, encode_sample, normalize, quantize};
pub use format::{AudioFormat, ByteOrder, SampleSize, SampleType};
pub use signal::{ConstantSignal, Pitched, Signal};
