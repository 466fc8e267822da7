//! PCM quantization and the owned sample buffer.

use std::ops::Range;

use super::format::{AudioFormat, ByteOrder, SampleSize, SampleType};
use crate::{Error, Result};

/// Quantizes a normalized value (-1.0 to 1.0) to the raw integer for `format`.
///
/// Unsigned formats map -1.0..1.0 onto the full unsigned range. Conversion
/// truncates toward zero and saturates at the range limits.
///
/// # Examples
///
/// ```
/// use asktone::{AudioFormat, quantize};
///
/// let format = AudioFormat::cd_mono();
/// assert_eq!(quantize(1.0, &format), 32767);
/// assert_eq!(quantize(-1.0, &format), -32767);
/// ```
pub fn quantize(value: f64, format: &AudioFormat) -> i32 {
    match (format.sample_size, format.sample_type) {
        (SampleSize::Bits8, SampleType::Unsigned) => ((1.0 + value) / 2.0 * 255.0) as u8 as i32,
        (SampleSize::Bits8, SampleType::Signed) => (value * 127.0) as i8 as i32,
        (SampleSize::Bits16, SampleType::Unsigned) => {
            ((1.0 + value) / 2.0 * 65535.0) as u16 as i32
        }
        (SampleSize::Bits16, SampleType::Signed) => (value * 32767.0) as i16 as i32,
    }
}

/// Maps a raw sample back to the normalized -1.0 to 1.0 range.
pub fn normalize(raw: i32, format: &AudioFormat) -> f64 {
    match (format.sample_size, format.sample_type) {
        (SampleSize::Bits8, SampleType::Unsigned) => raw as f64 / 255.0 * 2.0 - 1.0,
        (SampleSize::Bits8, SampleType::Signed) => raw as f64 / 127.0,
        (SampleSize::Bits16, SampleType::Unsigned) => raw as f64 / 65535.0 * 2.0 - 1.0,
        (SampleSize::Bits16, SampleType::Signed) => raw as f64 / 32767.0,
    }
}

/// Writes one raw sample into `out`, which must hold `format.bytes_per_sample()` bytes.
pub fn encode_sample(raw: i32, format: &AudioFormat, out: &mut [u8]) {
    match format.sample_size {
        SampleSize::Bits8 => out[0] = raw as u8,
        SampleSize::Bits16 => {
            let bytes = match format.byte_order {
                ByteOrder::Little => (raw as u16).to_le_bytes(),
                ByteOrder::Big => (raw as u16).to_be_bytes(),
            };
            out[..2].copy_from_slice(&bytes);
        }
    }
}

/// Reads one raw sample from the start of `bytes`.
pub fn decode_sample(bytes: &[u8], format: &AudioFormat) -> i32 {
    match (format.sample_size, format.sample_type) {
        (SampleSize::Bits8, SampleType::Unsigned) => bytes[0] as i32,
        (SampleSize::Bits8, SampleType::Signed) => bytes[0] as i8 as i32,
        (SampleSize::Bits16, sample_type) => {
            let pair = [bytes[0], bytes[1]];
            let word = match format.byte_order {
                ByteOrder::Little => u16::from_le_bytes(pair),
                ByteOrder::Big => u16::from_be_bytes(pair),
            };
            match sample_type {
                SampleType::Unsigned => word as i32,
                SampleType::Signed => word as i16 as i32,
            }
        }
    }
}

/// Scales a raw sample by `factor`.
///
/// Signed samples are multiplied directly and truncated. Unsigned samples are
/// scaled around their midpoint and requantized.
fn scale_raw(raw: i32, factor: f64, format: &AudioFormat) -> i32 {
    match (format.sample_size, format.sample_type) {
        (SampleSize::Bits8, SampleType::Signed) => (raw as f64 * factor) as i8 as i32,
        (SampleSize::Bits16, SampleType::Signed) => (raw as f64 * factor) as i16 as i32,
        (_, SampleType::Unsigned) => quantize(normalize(raw, format) * factor, format),
    }
}

/// Encoded PCM audio together with the format it was encoded in.
///
/// The byte length is always a whole number of frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    format: AudioFormat,
    data: Vec<u8>,
}

impl SampleBuffer {
    /// Creates an empty buffer.
    pub fn new(format: AudioFormat) -> Self {
        Self {
            format,
            data: Vec::new(),
        }
    }

    /// Creates an empty buffer with room for `frames` frames.
    pub fn with_capacity(format: AudioFormat, frames: usize) -> Self {
        Self {
            format,
            data: Vec::with_capacity(frames * format.bytes_per_frame()),
        }
    }

    /// Wraps already encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the format is invalid or `data` is
    /// not a whole number of frames.
    pub fn from_bytes(format: AudioFormat, data: Vec<u8>) -> Result<Self> {
        format.validate()?;
        if data.len() % format.bytes_per_frame() != 0 {
            return Err(Error::invalid_format(format!(
                "{} bytes is not a whole number of {}-byte frames",
                data.len(),
                format.bytes_per_frame()
            )));
        }
        Ok(Self { format, data })
    }

    /// Quantizes `value` and appends it to every channel of a new frame.
    pub fn push_frame(&mut self, value: f64) {
        let raw = quantize(value, &self.format);
        let width = self.format.bytes_per_sample();
        let mut sample = [0u8; 2];
        encode_sample(raw, &self.format, &mut sample);
        for _ in 0..self.format.channel_count {
            self.data.extend_from_slice(&sample[..width]);
        }
    }

    /// The format the samples are encoded in.
    pub fn format(&self) -> &AudioFormat {
        &self.format
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of interleaved frames.
    pub fn frame_count(&self) -> usize {
        match self.format.bytes_per_frame() {
            0 => 0,
            frame => self.data.len() / frame,
        }
    }

    /// Raw encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer, returning the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, frame: usize, channel: u16) -> Option<usize> {
        if frame >= self.frame_count() || channel >= self.format.channel_count {
            return None;
        }
        Some(frame * self.format.bytes_per_frame() + channel as usize * self.format.bytes_per_sample())
    }

    /// Raw integer value of one sample, or `None` when out of bounds.
    pub fn sample(&self, frame: usize, channel: u16) -> Option<i32> {
        self.offset(frame, channel)
            .map(|at| decode_sample(&self.data[at..], &self.format))
    }

    /// Normalized value (-1.0 to 1.0) of one sample, or `None` when out of bounds.
    pub fn normalized(&self, frame: usize, channel: u16) -> Option<f64> {
        self.sample(frame, channel)
            .map(|raw| normalize(raw, &self.format))
    }

    /// Scales every sample of the frames in `frames` by `factor`, in place.
    ///
    /// The range is clamped to the buffer.
    pub fn scale_frames(&mut self, frames: Range<usize>, factor: f64) {
        let format = self.format;
        let width = format.bytes_per_sample();
        let frame_bytes = format.bytes_per_frame();
        let end = frames.end.min(self.frame_count());
        let start = frames.start.min(end);

        for sample in self.data[start * frame_bytes..end * frame_bytes].chunks_exact_mut(width) {
            let raw = decode_sample(sample, &format);
            encode_sample(scale_raw(raw, factor, &format), &format, sample);
        }
    }

    /// Largest absolute normalized value within `frames`.
    pub fn peak(&self, frames: Range<usize>) -> f64 {
        let end = frames.end.min(self.frame_count());
        let start = frames.start.min(end);
        (start..end)
            .flat_map(|frame| (0..self.format.channel_count).map(move |ch| (frame, ch)))
            .filter_map(|(frame, ch)| self.normalized(frame, ch))
            .fold(0.0, |peak: f64, v| peak.max(v.abs()))
    }
}

impl AsRef<[u8]> for SampleBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(size: SampleSize, kind: SampleType, order: ByteOrder) -> AudioFormat {
        AudioFormat::new(8000, size, kind, order, 1)
    }

    #[test]
    fn test_quantize_extremes() {
        let s16 = format(SampleSize::Bits16, SampleType::Signed, ByteOrder::Little);
        assert_eq!(quantize(1.0, &s16), 32767);
        assert_eq!(quantize(0.0, &s16), 0);

        let u16 = format(SampleSize::Bits16, SampleType::Unsigned, ByteOrder::Little);
        assert_eq!(quantize(1.0, &u16), 65535);
        assert_eq!(quantize(-1.0, &u16), 0);

        let s8 = format(SampleSize::Bits8, SampleType::Signed, ByteOrder::Little);
        assert_eq!(quantize(-1.0, &s8), -127);

        let u8 = format(SampleSize::Bits8, SampleType::Unsigned, ByteOrder::Little);
        assert_eq!(quantize(0.0, &u8), 127);
        assert_eq!(quantize(1.0, &u8), 255);
    }

    #[test]
    fn test_quantize_truncates_toward_zero() {
        let s16 = format(SampleSize::Bits16, SampleType::Signed, ByteOrder::Little);
        // 0.5 * 32767 = 16383.5
        assert_eq!(quantize(0.5, &s16), 16383);
        assert_eq!(quantize(-0.5, &s16), -16383);
    }

    #[test]
    fn test_byte_order() {
        let le = format(SampleSize::Bits16, SampleType::Signed, ByteOrder::Little);
        let be = format(SampleSize::Bits16, SampleType::Signed, ByteOrder::Big);
        let mut out = [0u8; 2];

        encode_sample(0x1234, &le, &mut out);
        assert_eq!(out, [0x34, 0x12]);
        encode_sample(0x1234, &be, &mut out);
        assert_eq!(out, [0x12, 0x34]);

        encode_sample(-2, &be, &mut out);
        assert_eq!(decode_sample(&out, &be), -2);
    }

    #[test]
    fn test_push_frame_fills_every_channel() {
        let stereo = AudioFormat::cd_mono().with_channels(2);
        let mut buffer = SampleBuffer::new(stereo);
        buffer.push_frame(1.0);
        buffer.push_frame(-1.0);

        assert_eq!(buffer.len(), 8);
        assert_eq!(buffer.frame_count(), 2);
        assert_eq!(buffer.sample(0, 0), Some(32767));
        assert_eq!(buffer.sample(0, 1), Some(32767));
        assert_eq!(buffer.sample(1, 1), Some(-32767));
        assert_eq!(buffer.sample(2, 0), None);
        assert_eq!(buffer.sample(0, 2), None);
    }

    #[test]
    fn test_scale_signed_is_direct() {
        let s16 = format(SampleSize::Bits16, SampleType::Signed, ByteOrder::Little);
        let mut buffer = SampleBuffer::new(s16);
        buffer.push_frame(1.0);
        buffer.push_frame(-1.0);
        buffer.scale_frames(0..2, 0.1);

        // 32767 * 0.1 = 3276.7, truncated
        assert_eq!(buffer.sample(0, 0), Some(3276));
        assert_eq!(buffer.sample(1, 0), Some(-3276));
    }

    #[test]
    fn test_scale_unsigned_keeps_midpoint() {
        let u8 = format(SampleSize::Bits8, SampleType::Unsigned, ByteOrder::Little);
        let mut buffer = SampleBuffer::new(u8);
        buffer.push_frame(1.0);
        buffer.push_frame(-1.0);
        buffer.scale_frames(0..2, 0.0);

        assert_eq!(buffer.sample(0, 0), Some(127));
        assert_eq!(buffer.sample(1, 0), Some(127));
    }

    #[test]
    fn test_scale_range_is_clamped() {
        let mut buffer = SampleBuffer::new(AudioFormat::cd_mono());
        buffer.push_frame(1.0);
        buffer.scale_frames(0..10, 0.5);
        assert_eq!(buffer.sample(0, 0), Some(16383));
    }

    #[test]
    fn test_from_bytes_checks_alignment() {
        let stereo = AudioFormat::cd_mono().with_channels(2);
        assert!(SampleBuffer::from_bytes(stereo, vec![0; 8]).is_ok());
        assert!(matches!(
            SampleBuffer::from_bytes(stereo, vec![0; 6]),
            Err(Error::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_peak() {
        let mut buffer = SampleBuffer::new(AudioFormat::cd_mono());
        for v in [0.1, -0.8, 0.3, 1.0] {
            buffer.push_frame(v);
        }
        assert!((buffer.peak(0..3) - 0.8).abs() < 1e-3);
        assert!((buffer.peak(0..4) - 1.0).abs() < 1e-9);
        assert_eq!(buffer.peak(4..8), 0.0);
    }
}
