//! Amplitude-shift keying of a framed bit stream onto a sine carrier.

use super::framer::{BitStream, frame_with};
use super::timing::BitTiming;
use crate::config::ModemConfig;
use crate::core::{AudioFormat, SampleBuffer};
use crate::synthesis::synthesize;
use crate::{Error, Result};

/// Encodes bit streams as an amplitude-keyed carrier.
///
/// The carrier is synthesized once for the whole message and then cut into
/// equal per-bit segments; each segment is scaled by the mark amplitude for
/// `true` bits and the space amplitude for `false` bits. Space bits are
/// attenuated rather than silenced so an envelope detector still sees the
/// carrier.
///
/// # Examples
///
/// ```
/// use asktone::{AskModulator, AudioFormat, ModemConfig};
///
/// let modulator = AskModulator::new(ModemConfig::default());
/// let buffer = modulator.modulate_bytes(b"A", &AudioFormat::cd_mono()).unwrap();
/// assert!(!buffer.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AskModulator {
    config: ModemConfig,
}

impl AskModulator {
    /// Creates a modulator with the given modem configuration.
    pub fn new(config: ModemConfig) -> Self {
        Self { config }
    }

    /// The modem configuration.
    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// Derives the bit timing this modulator uses for `format`.
    pub fn timing(&self, format: &AudioFormat) -> Result<BitTiming> {
        BitTiming::derive(&self.config, format)
    }

    /// Frames `message` with the configured framing mode and modulates it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMessage`] for an empty message, otherwise the
    /// same errors as [`modulate`](Self::modulate).
    pub fn modulate_bytes(&self, message: &[u8], format: &AudioFormat) -> Result<SampleBuffer> {
        if message.is_empty() {
            return Err(Error::EmptyMessage);
        }
        self.modulate(&frame_with(message, self.config.framing), format)
    }

    /// Modulates a bit stream into one sample buffer.
    ///
    /// The buffer is `bits.len()` bit times long. Each bit gets
    /// `total_frames / bits.len()` frames; the few frames left over by the
    /// integer division stay at carrier amplitude after the last bit.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptyMessage`] if `bits` is empty
    /// * [`Error::InvalidFormat`] / [`Error::InvalidParameter`] from the timing derivation
    /// * [`Error::InvalidParameter`] if a bit would be shorter than one frame
    pub fn modulate(&self, bits: &BitStream, format: &AudioFormat) -> Result<SampleBuffer> {
        if bits.is_empty() {
            return Err(Error::EmptyMessage);
        }
        let timing = self.timing(format)?;
        self.modulate_with_timing(bits, format, &timing)
    }

    /// Modulates using an already derived timing.
    ///
    /// The timing's carrier frequency drives the synthesizer and its bit
    /// duration drives the segmenting.
    ///
    /// # Errors
    ///
    /// As [`modulate`](Self::modulate), plus [`Error::InvalidParameter`] if
    /// `timing` was derived for a different sample rate than `format`.
    pub fn modulate_with_timing(
        &self,
        bits: &BitStream,
        format: &AudioFormat,
        timing: &BitTiming,
    ) -> Result<SampleBuffer> {
        if bits.is_empty() {
            return Err(Error::EmptyMessage);
        }
        if timing.sample_rate_hz != format.sample_rate_hz {
            return Err(Error::invalid_parameter(
                "timing",
                format!(
                    "derived for {} Hz, format runs at {} Hz",
                    timing.sample_rate_hz, format.sample_rate_hz
                ),
            ));
        }

        let duration_us = timing.duration_us(bits.len());
        let mut carrier = synthesize(format, duration_us, timing.carrier_hz as f64)?;

        let frames_per_bit = carrier.frame_count() / bits.len();
        if frames_per_bit == 0 {
            return Err(Error::invalid_parameter(
                "periods_per_bit",
                format!(
                    "a bit lasts {:.3} ms, shorter than one frame at {} Hz",
                    timing.bit_time_ms(),
                    format.sample_rate_hz
                ),
            ));
        }

        for (index, bit) in bits.iter().enumerate() {
            let amplitude = if bit {
                self.config.mark_amplitude
            } else {
                self.config.space_amplitude
            };
            let start = index * frames_per_bit;
            carrier.scale_frames(start..start + frames_per_bit, amplitude);
        }

        log::trace!(
            "modulated {} bits: {} frames per bit, {} frames total",
            bits.len(),
            frames_per_bit,
            carrier.frame_count()
        );
        Ok(carrier)
    }
}
