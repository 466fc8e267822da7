//! Tuning parameters for tones, the modem and push-mode playback.
//!
//! Every value that shapes the output lives here rather than in process-wide
//! constants, so independent generators can run with different settings.

use std::time::Duration;

use crate::{Error, Result};

/// How consecutive bytes of a message are laid out in the bit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramingMode {
    /// Frames follow each other directly: stop bit, then the next start bit.
    ///
    /// The receiver derives its bit clock once from the first start bit, so
    /// timing drifts over long messages. Keep messages to a few bytes.
    #[default]
    Continuous,
    /// Inserts `idle_bits` low bits between bytes.
    ///
    /// Every start bit after the first then follows a falling edge, which a
    /// receiver can use to re-lock its bit clock once per byte.
    Resync { idle_bits: u8 },
}

/// Parameters of a continuous test tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneConfig {
    /// Tone frequency in Hz
    pub frequency_hz: f64,
    /// Length of the cyclic buffer in microseconds
    pub duration_us: u64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 1000.0,
            duration_us: 1_000_000,
        }
    }
}

impl ToneConfig {
    /// Sets the tone frequency.
    pub fn with_frequency(mut self, frequency_hz: f64) -> Self {
        self.frequency_hz = frequency_hz;
        self
    }

    /// Sets the buffer duration.
    pub fn with_duration_us(mut self, duration_us: u64) -> Self {
        self.duration_us = duration_us;
        self
    }
}

/// Parameters of the amplitude-shift-keyed modem.
///
/// # Examples
///
/// ```
/// use asktone::{FramingMode, ModemConfig};
///
/// let config = ModemConfig::default()
///     .with_periods_per_bit(50)
///     .with_framing(FramingMode::Resync { idle_bits: 2 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModemConfig {
    /// Carrier frequency is the sample rate divided by this
    pub carrier_divisor: u32,
    /// Carrier cycles per bit
    pub periods_per_bit: u32,
    /// Amplitude factor for `true` bits
    pub mark_amplitude: f64,
    /// Amplitude factor for `false` bits
    pub space_amplitude: f64,
    /// Byte layout in the bit stream
    pub framing: FramingMode,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            carrier_divisor: 8,
            periods_per_bit: 100,
            mark_amplitude: 1.0,
            space_amplitude: 0.1,
            framing: FramingMode::Continuous,
        }
    }
}

impl ModemConfig {
    /// Sets the carrier divisor.
    pub fn with_carrier_divisor(mut self, carrier_divisor: u32) -> Self {
        self.carrier_divisor = carrier_divisor;
        self
    }

    /// Sets the number of carrier cycles per bit.
    pub fn with_periods_per_bit(mut self, periods_per_bit: u32) -> Self {
        self.periods_per_bit = periods_per_bit;
        self
    }

    /// Sets the mark and space amplitude factors.
    pub fn with_amplitudes(mut self, mark: f64, space: f64) -> Self {
        self.mark_amplitude = mark;
        self.space_amplitude = space;
        self
    }

    /// Sets the framing mode.
    pub fn with_framing(mut self, framing: FramingMode) -> Self {
        self.framing = framing;
        self
    }

    /// Checks that the configuration can produce a signal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a zero divisor, zero periods per
    /// bit, an amplitude outside 0.0..=1.0, or a space amplitude above the
    /// mark amplitude.
    pub fn validate(&self) -> Result<()> {
        if self.carrier_divisor == 0 {
            return Err(Error::invalid_parameter("carrier_divisor", "must be at least 1"));
        }
        if self.periods_per_bit == 0 {
            return Err(Error::invalid_parameter("periods_per_bit", "must be at least 1"));
        }
        for (name, value) in [
            ("mark_amplitude", self.mark_amplitude),
            ("space_amplitude", self.space_amplitude),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::invalid_parameter(
                    name,
                    format!("must be within 0.0..=1.0, got {}", value),
                ));
            }
        }
        if self.mark_amplitude < self.space_amplitude {
            return Err(Error::invalid_parameter(
                "mark_amplitude",
                format!(
                    "must not be below the space amplitude, got {} < {}",
                    self.mark_amplitude, self.space_amplitude
                ),
            ));
        }
        Ok(())
    }
}

/// Settings for the push-mode pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushConfig {
    /// Time between two pushes
    pub interval: Duration,
    /// Size of the scratch buffer used to shuttle bytes to the sink
    pub scratch_size: usize,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(20),
            scratch_size: 32768,
        }
    }
}

impl PushConfig {
    /// Sets the push interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the scratch buffer size.
    pub fn with_scratch_size(mut self, scratch_size: usize) -> Self {
        self.scratch_size = scratch_size;
        self
    }
}

/// Complete configuration of a [`Generator`](crate::Generator).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeneratorConfig {
    /// Test tone parameters
    pub tone: ToneConfig,
    /// Modem parameters
    pub modem: ModemConfig,
}

impl GeneratorConfig {
    /// Replaces the tone parameters.
    pub fn with_tone(mut self, tone: ToneConfig) -> Self {
        self.tone = tone;
        self
    }

    /// Replaces the modem parameters.
    pub fn with_modem(mut self, modem: ModemConfig) -> Self {
        self.modem = modem;
        self
    }
}
