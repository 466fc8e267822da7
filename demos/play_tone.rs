//! Plays a continuous test tone in pull mode.
//!
//! The audio callback reads straight from a `CyclicSource` holding one second
//! of the tone. Pass a frequency in Hz as the first argument (default 1000).

mod common;

use asktone::{CyclicSource, ToneConfig, synthesize};
use std::thread;
use std::time::Duration;

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let tone = ToneConfig::default();
    let frequency = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => tone.frequency_hz,
    };

    let output = common::Output::open()?;
    let buffer = synthesize(&output.pcm_format(), tone.duration_us, frequency)?;
    let source = CyclicSource::from_buffer(buffer);
    source.start();

    let _stream = output.pull_from(source.clone())?;
    println!("Playing {} Hz for 5 seconds...", frequency);
    thread::sleep(Duration::from_secs(5));

    source.stop();
    Ok(())
}
