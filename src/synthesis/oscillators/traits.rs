//! Core trait definitions for oscillators.

use crate::core::Pitched;

/// Oscillators are pitched signals that can restart from their first sample.
pub trait Oscillator: Pitched {
    /// Resets the oscillator to its initial state.
    ///
    /// After a reset the oscillator repeats the exact sample sequence it
    /// produced when first created.
    fn reset(&mut self);
}
