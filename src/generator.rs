//! The tone generator: one format, one configuration, one cyclic stream.

use crate::config::GeneratorConfig;
use crate::core::{AudioFormat, SampleBuffer};
use crate::modem::{AskModulator, BitTiming};
use crate::stream::CyclicSource;
use crate::synthesis::{check_frequency, synthesize};
use crate::Result;

/// Produces test tones and ASK messages into a [`CyclicSource`].
///
/// Every operation builds its buffer first and only then swaps it into the
/// stream, so a failed generation leaves the current content playing.
///
/// # Examples
///
/// ```
/// use asktone::{AudioFormat, Generator, GeneratorConfig};
///
/// let mut generator = Generator::new(AudioFormat::cd_mono(), GeneratorConfig::default()).unwrap();
/// let source = generator.source();
///
/// generator.send_byte(b'A').unwrap();
/// generator.start();
///
/// let mut period = [0u8; 4096];
/// assert_eq!(source.read(&mut period), 4096);
/// ```
#[derive(Clone)]
pub struct Generator {
    format: AudioFormat,
    config: GeneratorConfig,
    modulator: AskModulator,
    source: CyclicSource,
}

impl Generator {
    /// Creates a generator with an empty, closed stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the format or the modem configuration is invalid.
    pub fn new(format: AudioFormat, config: GeneratorConfig) -> Result<Self> {
        format.validate()?;
        config.modem.validate()?;
        check_frequency(config.tone.frequency_hz)?;

        Ok(Self {
            format,
            config,
            modulator: AskModulator::new(config.modem),
            source: CyclicSource::new(),
        })
    }

    /// Plays the configured test tone.
    pub fn play_tone(&mut self) -> Result<()> {
        let tone = self.config.tone;
        self.play_tone_with(tone.frequency_hz, tone.duration_us)
    }

    /// Plays a tone of `frequency_hz`, repeating every `duration_us`.
    pub fn play_tone_with(&mut self, frequency_hz: f64, duration_us: u64) -> Result<()> {
        let buffer = synthesize(&self.format, duration_us, frequency_hz)?;
        log::info!(
            "tone: {} Hz, {} bytes per cycle of the stream",
            frequency_hz,
            buffer.len()
        );
        self.install(buffer);
        Ok(())
    }

    /// Encodes `message` and loops it on the stream.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyMessage`](crate::Error::EmptyMessage) for an empty
    /// message, or any error from the modulator.
    pub fn send_message(&mut self, message: &[u8]) -> Result<()> {
        let buffer = self.modulator.modulate_bytes(message, &self.format)?;
        log::debug!("tx: {}", hex(message));
        self.install(buffer);
        Ok(())
    }

    /// Encodes a single byte.
    pub fn send_byte(&mut self, byte: u8) -> Result<()> {
        self.send_message(&[byte])
    }

    /// Opens the stream from its first byte.
    pub fn start(&self) {
        self.source.start();
    }

    /// Closes the stream.
    pub fn stop(&self) {
        self.source.stop();
    }

    /// Another handle to the stream, for the playback driver.
    pub fn source(&self) -> CyclicSource {
        self.source.clone()
    }

    /// Switches future buffers to `format`.
    ///
    /// Whatever is on the stream keeps playing until the next `play_tone` or
    /// `send_message`.
    pub fn set_format(&mut self, format: AudioFormat) -> Result<()> {
        format.validate()?;
        log::info!(
            "format: {} Hz, {}-bit {:?} {:?}, {} channel(s)",
            format.sample_rate_hz,
            format.sample_size.bits(),
            format.sample_type,
            format.byte_order,
            format.channel_count
        );
        self.format = format;
        Ok(())
    }

    /// Format used for the next generated buffer.
    pub fn format(&self) -> &AudioFormat {
        &self.format
    }

    /// The tone and modem configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Carrier and bit timing for the current format.
    pub fn bit_timing(&self) -> Result<BitTiming> {
        self.modulator.timing(&self.format)
    }

    fn install(&self, buffer: SampleBuffer) {
        self.source.replace(buffer);
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
