//! PCM audio format description.

use crate::{Error, Result};

/// Width of one encoded sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleSize {
    /// One byte per sample
    Bits8,
    /// Two bytes per sample
    Bits16,
}

impl SampleSize {
    /// Converts a bit count into a sample size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for anything other than 8 or 16.
    ///
    /// # Examples
    ///
    /// ```
    /// use asktone::SampleSize;
    ///
    /// assert_eq!(SampleSize::from_bits(16).unwrap(), SampleSize::Bits16);
    /// assert!(SampleSize::from_bits(24).is_err());
    /// ```
    pub fn from_bits(bits: u16) -> Result<Self> {
        match bits {
            8 => Ok(SampleSize::Bits8),
            16 => Ok(SampleSize::Bits16),
            other => Err(Error::invalid_format(format!(
                "unsupported sample size {} bits (use 8 or 16)",
                other
            ))),
        }
    }

    /// Number of bits per sample.
    pub fn bits(self) -> u16 {
        match self {
            SampleSize::Bits8 => 8,
            SampleSize::Bits16 => 16,
        }
    }

    /// Number of bytes per sample.
    pub fn bytes(self) -> usize {
        self.bits() as usize / 8
    }
}

/// Signedness of the encoded integer samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    /// Silence is the midpoint of the range
    Unsigned,
    /// Silence is zero
    Signed,
}

/// Byte order of multi-byte samples. Ignored for 8-bit samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Little,
    Big,
}

/// Describes how PCM samples are laid out in a byte buffer.
///
/// A format is fixed for the lifetime of one generated buffer. Frames are
/// interleaved: one sample per channel at each time index.
///
/// # Examples
///
/// ```
/// use asktone::AudioFormat;
///
/// let format = AudioFormat::cd_mono();
/// assert_eq!(format.bytes_per_frame(), 2);
/// assert_eq!(format.frames_for_duration(1_000_000), 44100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioFormat {
    /// Frames per second
    pub sample_rate_hz: u32,
    /// Width of each sample
    pub sample_size: SampleSize,
    /// Signed or unsigned samples
    pub sample_type: SampleType,
    /// Byte order of 16-bit samples
    pub byte_order: ByteOrder,
    /// Interleaved channels per frame
    pub channel_count: u16,
}

impl AudioFormat {
    /// Creates a new format.
    ///
    /// The format is not validated here; synthesis calls [`validate`](Self::validate)
    /// before producing any samples.
    pub fn new(
        sample_rate_hz: u32,
        sample_size: SampleSize,
        sample_type: SampleType,
        byte_order: ByteOrder,
        channel_count: u16,
    ) -> Self {
        Self {
            sample_rate_hz,
            sample_size,
            sample_type,
            byte_order,
            channel_count,
        }
    }

    /// 44.1 kHz, signed 16-bit little-endian, mono.
    pub fn cd_mono() -> Self {
        Self::new(
            44100,
            SampleSize::Bits16,
            SampleType::Signed,
            ByteOrder::Little,
            1,
        )
    }

    /// Returns a copy of this format with a different sample rate.
    pub fn with_sample_rate(mut self, sample_rate_hz: u32) -> Self {
        self.sample_rate_hz = sample_rate_hz;
        self
    }

    /// Returns a copy of this format with a different channel count.
    pub fn with_channels(mut self, channel_count: u16) -> Self {
        self.channel_count = channel_count;
        self
    }

    /// Checks that samples can be generated for this format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the sample rate or channel count is zero.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate_hz == 0 {
            return Err(Error::invalid_format("sample rate must be positive"));
        }
        if self.channel_count == 0 {
            return Err(Error::invalid_format("channel count must be at least 1"));
        }
        Ok(())
    }

    /// Bytes per single-channel sample.
    pub fn bytes_per_sample(&self) -> usize {
        self.sample_size.bytes()
    }

    /// Bytes per interleaved frame.
    pub fn bytes_per_frame(&self) -> usize {
        self.bytes_per_sample() * self.channel_count as usize
    }

    /// Number of whole frames covering `duration_us` microseconds.
    ///
    /// Truncates, so very short durations may round down to zero frames.
    pub fn frames_for_duration(&self, duration_us: u64) -> usize {
        (self.sample_rate_hz as u128 * duration_us as u128 / 1_000_000) as usize
    }

    /// Number of bytes covering `duration_us` microseconds, always frame-aligned.
    pub fn bytes_for_duration(&self, duration_us: u64) -> usize {
        self.frames_for_duration(duration_us) * self.bytes_per_frame()
    }

    /// Playback time of `bytes` bytes in microseconds.
    pub fn duration_for_bytes(&self, bytes: usize) -> u64 {
        let frame = self.bytes_per_frame() as u128;
        if frame == 0 || self.sample_rate_hz == 0 {
            return 0;
        }
        (bytes as u128 / frame * 1_000_000 / self.sample_rate_hz as u128) as u64
    }

    /// Time between two consecutive frames in microseconds.
    pub fn sample_period_us(&self) -> f64 {
        1_000_000.0 / self.sample_rate_hz as f64
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::cd_mono()
    }
}
