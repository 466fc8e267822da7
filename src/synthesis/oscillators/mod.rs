//! Oscillator implementations for tone synthesis.
//!
//! This module contains the `Oscillator` trait and the sine tone used for
//! both test tones and the ASK carrier.

mod sine;
mod traits;

pub use sine::SineTone;
pub use traits::Oscillator;
