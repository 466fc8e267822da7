//! Message encoding: framing, bit timing and amplitude-shift keying.
//!
//! A message travels through three steps:
//! - `frame` turns bytes into a `BitStream` with start and stop bits
//! - `BitTiming` fixes the carrier frequency and bit duration for a format
//! - `AskModulator` keys the carrier with the bit stream
//!
//! Requires the `modem` feature.

mod framer;
mod modulator;
mod timing;

pub use crate::config::FramingMode;
pub use framer::{BitStream, FRAME_BITS, frame, frame_with};
pub use modulator::AskModulator;
pub use timing::BitTiming;
