//! Common utilities for the audio demos.

use anyhow::Result;
use asktone::{AudioFormat, CyclicSource};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SizedSample, StreamConfig, SupportedStreamConfig};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::stdout;
use std::panic;
use std::time::Duration;

/// The default output device and its preferred configuration.
pub struct Output {
    pub device: cpal::Device,
    pub config: SupportedStreamConfig,
}

impl Output {
    pub fn open() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow::anyhow!("No output device available"))?;
        let config = device.default_output_config()?;
        log::info!(
            "output: {} Hz, {} channel(s), {}",
            config.sample_rate().0,
            config.channels(),
            config.sample_format()
        );
        Ok(Self { device, config })
    }

    /// Signed 16-bit little-endian at the device's rate and channel count.
    ///
    /// Buffers rendered in this format map one to one onto device frames.
    pub fn pcm_format(&self) -> AudioFormat {
        AudioFormat::cd_mono()
            .with_sample_rate(self.config.sample_rate().0)
            .with_channels(self.config.channels())
    }

    /// Starts a stream whose callback pulls bytes from `source`.
    #[allow(dead_code)]
    pub fn pull_from(&self, source: CyclicSource) -> Result<cpal::Stream> {
        self.play_bytes(move |bytes| source.read(bytes))
    }

    /// Starts a stream fed by `fill`, which receives a byte buffer of s16le
    /// samples and returns how many bytes it wrote. Unfilled samples play
    /// as silence.
    pub fn play_bytes<F>(&self, fill: F) -> Result<cpal::Stream>
    where
        F: FnMut(&mut [u8]) -> usize + Send + 'static,
    {
        let config: StreamConfig = self.config.config();
        match self.config.sample_format() {
            SampleFormat::F32 => build_stream::<f32, F>(&self.device, &config, fill),
            SampleFormat::I16 => build_stream::<i16, F>(&self.device, &config, fill),
            SampleFormat::U16 => build_stream::<u16, F>(&self.device, &config, fill),
            sample_format => Err(anyhow::anyhow!(
                "Unsupported sample format: {}",
                sample_format
            )),
        }
    }
}

fn build_stream<T, F>(device: &cpal::Device, config: &StreamConfig, mut fill: F) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<i16>,
    F: FnMut(&mut [u8]) -> usize + Send + 'static,
{
    let mut bytes: Vec<u8> = Vec::new();

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            bytes.resize(data.len() * 2, 0);
            let filled = fill(&mut bytes) / 2;
            for (i, sample) in data.iter_mut().enumerate() {
                let raw = if i < filled {
                    i16::from_le_bytes([bytes[2 * i], bytes[2 * i + 1]])
                } else {
                    0
                };
                *sample = T::from_sample(raw);
            }
        },
        |err| log::error!("Audio stream error: {}", err),
        None,
    )?;

    stream.play()?;
    Ok(stream)
}

/// Key handling result that controls the event loop
#[allow(dead_code)]
pub enum KeyAction {
    /// Continue the event loop
    Continue,
    /// Exit the event loop
    Exit,
}

/// Runs a terminal UI until the key handler asks to exit.
///
/// Handles raw mode, the alternate screen and a panic hook that restores
/// the terminal. `draw` runs once up front and again after every key press.
#[allow(dead_code)]
pub fn run_interactive<S, D, K>(mut state: S, draw: D, mut key_handler: K) -> Result<()>
where
    D: Fn(&S) -> Result<()>,
    K: FnMut(&mut S, &KeyEvent) -> Result<KeyAction>,
{
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(crossterm::cursor::Hide)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    let result = (|| -> Result<()> {
        draw(&state)?;
        loop {
            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key_event) = event::read()?
                && key_event.kind == KeyEventKind::Press
            {
                match key_handler(&mut state, &key_event)? {
                    KeyAction::Continue => draw(&state)?,
                    KeyAction::Exit => return Ok(()),
                }
            }
        }
    })();

    cleanup_terminal();
    result
}

/// Cleans up terminal state (cursor, alternate screen, raw mode).
#[allow(dead_code)]
fn cleanup_terminal() {
    let _ = stdout().execute(crossterm::cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}
