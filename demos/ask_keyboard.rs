//! Interactive ASK keyboard.
//!
//! Every printable ASCII key is sent as a one-byte message, which then loops
//! until the next key. ENTER switches to the test tone, SPACE suspends and
//! resumes playback where it left off, ESC quits.

mod common;

use anyhow::Result;
use asktone::{Generator, GeneratorConfig, frame, pcm_format};
use common::{KeyAction, run_interactive};
use crossterm::{
    ExecutableCommand,
    event::{KeyCode, KeyEvent},
};
use std::io::{Write, stdout};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

enum Playing {
    Nothing,
    Tone,
    Byte(u8),
}

struct State {
    generator: Generator,
    playing: Playing,
    /// Read by the audio callback; the stream cursor stays put while set
    suspended: Arc<AtomicBool>,
}

impl State {
    fn handle_key(&mut self, key: &KeyEvent) -> Result<KeyAction> {
        match key.code {
            KeyCode::Esc => return Ok(KeyAction::Exit),
            KeyCode::Enter => {
                self.generator.play_tone()?;
                self.playing = Playing::Tone;
            }
            KeyCode::Char(' ') => {
                self.suspended.fetch_xor(true, Ordering::AcqRel);
            }
            KeyCode::Char(c) if c.is_ascii_graphic() => {
                self.generator.send_byte(c as u8)?;
                self.playing = Playing::Byte(c as u8);
            }
            _ => {}
        }
        Ok(KeyAction::Continue)
    }
}

fn draw_ui(state: &State) -> Result<()> {
    let mut stdout = stdout();
    stdout.execute(crossterm::terminal::Clear(
        crossterm::terminal::ClearType::All,
    ))?;
    stdout.execute(crossterm::cursor::MoveTo(0, 0))?;

    let timing = state.generator.bit_timing()?;
    write!(stdout, "ASK keyboard\r\n\r\n")?;
    write!(
        stdout,
        "Carrier {} Hz, {:.2} ms per bit\r\n\r\n",
        timing.carrier_hz,
        timing.bit_time_ms()
    )?;
    match state.playing {
        Playing::Nothing => write!(stdout, "Type a character to send it\r\n")?,
        Playing::Tone => write!(stdout, "Test tone\r\n")?,
        Playing::Byte(byte) => write!(
            stdout,
            "Sending '{}' (0x{:02x}) as {}\r\n",
            byte as char,
            byte,
            frame(&[byte])
        )?,
    }
    if state.suspended.load(Ordering::Acquire) {
        write!(stdout, "\r\n[suspended]\r\n")?;
    }
    write!(
        stdout,
        "\r\nENTER: tone   SPACE: suspend/resume   ESC: quit\r\n"
    )?;
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let output = common::Output::open()?;
    let format = pcm_format!("s16le")
        .with_sample_rate(output.config.sample_rate().0)
        .with_channels(output.config.channels());

    let generator = Generator::new(format, GeneratorConfig::default())?;
    generator.start();

    let suspended = Arc::new(AtomicBool::new(false));
    let _stream = {
        let source = generator.source();
        let suspended = suspended.clone();
        output.play_bytes(move |bytes| {
            if suspended.load(Ordering::Acquire) {
                0
            } else {
                source.read(bytes)
            }
        })?
    };

    let state = State {
        generator,
        playing: Playing::Nothing,
        suspended,
    };
    run_interactive(state, draw_ui, State::handle_key)?;
    Ok(())
}
