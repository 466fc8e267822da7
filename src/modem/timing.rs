//! Bit-rate derivation.
//!
//! The carrier frequency and the bit duration are derived together, once,
//! and the resulting [`BitTiming`] is handed to both the carrier synthesis and
//! the per-bit segmenting so the two always agree.

use crate::config::ModemConfig;
use crate::core::AudioFormat;
use crate::{Error, Result};

/// Carrier and bit timing for one format and modem configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitTiming {
    /// Carrier frequency in Hz
    pub carrier_hz: u32,
    /// Carrier cycles per bit
    pub periods_per_bit: u32,
    /// Sample rate the timing was derived for
    pub sample_rate_hz: u32,
}

impl BitTiming {
    /// Derives the timing for `format` under `config`.
    ///
    /// The carrier runs at `sample_rate_hz / carrier_divisor` Hz (integer
    /// division, so 44100 Hz with the default divisor gives 5512 Hz).
    ///
    /// # Errors
    ///
    /// Returns an error if the format or the configuration is invalid, or if
    /// the divisor leaves no carrier at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use asktone::{AudioFormat, BitTiming, ModemConfig};
    ///
    /// let timing = BitTiming::derive(&ModemConfig::default(), &AudioFormat::cd_mono()).unwrap();
    /// assert_eq!(timing.carrier_hz, 5512);
    /// assert!((timing.bit_time_ms() - 18.142).abs() < 0.001);
    /// ```
    pub fn derive(config: &ModemConfig, format: &AudioFormat) -> Result<Self> {
        format.validate()?;
        config.validate()?;

        let carrier_hz = format.sample_rate_hz / config.carrier_divisor;
        if carrier_hz == 0 {
            return Err(Error::invalid_parameter(
                "carrier_divisor",
                format!(
                    "{} leaves no carrier at {} Hz",
                    config.carrier_divisor, format.sample_rate_hz
                ),
            ));
        }

        Ok(Self {
            carrier_hz,
            periods_per_bit: config.periods_per_bit,
            sample_rate_hz: format.sample_rate_hz,
        })
    }

    /// Duration of one bit in milliseconds.
    pub fn bit_time_ms(&self) -> f64 {
        self.periods_per_bit as f64 / self.carrier_hz as f64 * 1000.0
    }

    /// Duration of `bits` bits in whole microseconds (truncated).
    pub fn duration_us(&self, bits: usize) -> u64 {
        (bits as f64 * self.bit_time_ms() * 1000.0) as u64
    }

    /// Nominal, fractional number of frames per bit.
    pub fn frames_per_bit(&self) -> f64 {
        self.sample_rate_hz as f64 * self.bit_time_ms() / 1000.0
    }

    /// Bits per second.
    pub fn baud(&self) -> f64 {
        1000.0 / self.bit_time_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = BitTiming::derive(&ModemConfig::default(), &AudioFormat::cd_mono()).unwrap();
        assert_eq!(timing.carrier_hz, 5512);
        // 100 cycles / 5512 Hz
        assert!((timing.bit_time_ms() - 18.1422).abs() < 1e-4);
        assert!((timing.baud() - 55.12).abs() < 1e-9);
        assert_eq!(timing.duration_us(10), 181422);
    }

    #[test]
    fn test_frames_per_bit() {
        let format = AudioFormat::cd_mono().with_sample_rate(8000);
        let config = ModemConfig::default().with_periods_per_bit(10);
        let timing = BitTiming::derive(&config, &format).unwrap();
        // 1000 Hz carrier, 10 cycles = 10 ms = 80 frames
        assert_eq!(timing.carrier_hz, 1000);
        assert!((timing.frames_per_bit() - 80.0).abs() < 1e-9);
        assert_eq!(timing.duration_us(3), 30_000);
    }

    #[test]
    fn test_divisor_too_large() {
        let format = AudioFormat::cd_mono().with_sample_rate(8);
        let result = BitTiming::derive(&ModemConfig::default().with_carrier_divisor(16), &format);
        assert!(matches!(result, Err(Error::InvalidParameter { name: "carrier_divisor", .. })));
    }

    #[test]
    fn test_invalid_format_is_reported() {
        let format = AudioFormat::cd_mono().with_channels(0);
        let result = BitTiming::derive(&ModemConfig::default(), &format);
        assert!(matches!(result, Err(Error::InvalidFormat { .. })));
    }
}
