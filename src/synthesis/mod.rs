//! Tone synthesis.
//!
//! This module provides:
//! - `SineTone`, a drift-free sine source implementing `Signal`
//! - `synthesize`, which renders a tone into a `SampleBuffer`
//! - `render`, which does the same for any `Signal`
//!
//! Requires the `synth` feature.

pub mod oscillators;
mod synthesizer;

pub(crate) use synthesizer::check_frequency;
pub use oscillators::{Oscillator, SineTone};
pub use synthesizer::{render, synthesize};
