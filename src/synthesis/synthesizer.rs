//! Renders tones into PCM sample buffers.

use super::oscillators::SineTone;
use crate::core::{AudioFormat, SampleBuffer, Signal};
use crate::{Error, Result};

/// Synthesizes `duration_us` microseconds of a sine tone in `format`.
///
/// The buffer holds `format.frames_for_duration(duration_us)` frames, each
/// carrying the same quantized value on every channel. Durations shorter
/// than one frame produce an empty buffer.
///
/// # Errors
///
/// * [`Error::InvalidFormat`] if the format has no sample rate or no channels
/// * [`Error::InvalidParameter`] if `frequency_hz` is not a positive finite number
///
/// # Examples
///
/// ```
/// use asktone::{AudioFormat, synthesize};
///
/// let format = AudioFormat::cd_mono();
/// let buffer = synthesize(&format, 1_000_000, 1000.0).unwrap();
/// assert_eq!(buffer.frame_count(), 44100);
/// assert_eq!(buffer.sample(0, 0), Some(0));
/// ```
pub fn synthesize(format: &AudioFormat, duration_us: u64, frequency_hz: f64) -> Result<SampleBuffer> {
    format.validate()?;
    check_frequency(frequency_hz)?;

    let frames = format.frames_for_duration(duration_us);
    let mut tone = SineTone::new(frequency_hz, format.sample_rate_hz);
    Ok(render(&mut tone, format, frames))
}

/// Renders `frames` frames of any signal into a new buffer.
pub fn render<S: Signal>(signal: &mut S, format: &AudioFormat, frames: usize) -> SampleBuffer {
    let mut buffer = SampleBuffer::with_capacity(*format, frames);
    for _ in 0..frames {
        buffer.push_frame(signal.next_sample());
    }
    log::trace!(
        "rendered {} frames ({} bytes) at {} Hz",
        frames,
        buffer.len(),
        format.sample_rate_hz
    );
    buffer
}

pub(crate) fn check_frequency(frequency_hz: f64) -> Result<()> {
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return Err(Error::invalid_parameter(
            "frequency_hz",
            format!("must be a positive number of Hz, got {}", frequency_hz),
        ));
    }
    Ok(())
}
