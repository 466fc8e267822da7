//! asktone - test tones and amplitude-shift-keyed messages for PCM audio
//!
//! The crate renders a sine tone, or a byte message keyed onto a sine carrier,
//! into a raw PCM buffer and serves that buffer as an endlessly repeating
//! byte stream. An audio driver either pulls from the stream
//! ([`CyclicSource::read`]) or has bytes pushed into it on a timer
//! ([`PushPump`]).
//!
//! ```
//! use asktone::{AudioFormat, Generator, GeneratorConfig};
//!
//! let mut generator = Generator::new(AudioFormat::cd_mono(), GeneratorConfig::default()).unwrap();
//! generator.play_tone().unwrap();
//! generator.start();
//!
//! let source = generator.source();
//! let mut out = [0u8; 1024];
//! assert_eq!(source.read(&mut out), 1024);
//! ```
//!
//! Features:
//! - `synth`: tone synthesis
//! - `modem` (default): framing, ASK modulation and [`Generator`]
//! - `macros`: the [`pcm_format!`] literal

pub mod config;
pub mod core;
mod error;
#[cfg(feature = "modem")]
mod generator;
#[cfg(feature = "modem")]
pub mod modem;
pub mod stream;
#[cfg(feature = "synth")]
pub mod synthesis;

// Re-export commonly used types at the crate root
pub use config::{FramingMode, GeneratorConfig, ModemConfig, PushConfig, ToneConfig};
pub use crate::core::{
    AudioFormat, ByteOrder, ConstantSignal, Pitched, SampleBuffer, SampleSize, SampleType,
    Signal, decode_sample, encode_sample, normalize, quantize,
};
pub use error::{Error, Result};
pub use stream::{AudioSink, CyclicSource, PushBuffer, PushPump, push_tick};

#[cfg(feature = "synth")]
pub use synthesis::{Oscillator, SineTone, render, synthesize};

#[cfg(feature = "modem")]
pub use generator::Generator;
#[cfg(feature = "modem")]
pub use modem::{AskModulator, BitStream, BitTiming, FRAME_BITS, frame, frame_with};

#[cfg(feature = "macros")]
pub use asktone_macros::pcm_format;
