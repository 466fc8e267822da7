//! Sends a message in push mode.
//!
//! A `PushPump` moves the looping ASK signal into a ring buffer every 20 ms
//! and the audio callback drains the ring. Pass the message as the first
//! argument (default "A").

mod common;

use asktone::{AudioSink, FramingMode, Generator, GeneratorConfig, ModemConfig, PushConfig, PushPump};
use ringbuf::traits::{Consumer, Observer, Producer, Split};
use ringbuf::{HeapProd, HeapRb};
use std::thread;
use std::time::Duration;

/// About 200 ms of 16-bit stereo at 44.1 kHz
const RING_BYTES: usize = 35_280;
const PERIOD_BYTES: usize = 4096;

/// Producer side of the ring, seen as a push-mode sink.
struct RingSink {
    producer: HeapProd<u8>,
}

impl AudioSink for RingSink {
    fn period_size(&self) -> usize {
        PERIOD_BYTES
    }

    fn bytes_free(&self) -> usize {
        self.producer.vacant_len()
    }

    fn write(&mut self, data: &[u8]) -> usize {
        self.producer.push_slice(data)
    }
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let message = std::env::args().nth(1).unwrap_or_else(|| "A".to_string());

    let output = common::Output::open()?;
    // Longer messages need a clock edge per byte to stay decodable
    let modem = ModemConfig::default().with_framing(FramingMode::Resync { idle_bits: 2 });
    let mut generator =
        Generator::new(output.pcm_format(), GeneratorConfig::default().with_modem(modem))?;
    generator.send_message(message.as_bytes())?;

    let timing = generator.bit_timing()?;
    println!(
        "Sending {:?}: carrier {} Hz, {:.2} ms per bit ({:.1} baud)",
        message,
        timing.carrier_hz,
        timing.bit_time_ms(),
        timing.baud()
    );

    let (producer, mut consumer) = HeapRb::<u8>::new(RING_BYTES).split();
    let _stream = output.play_bytes(move |bytes| consumer.pop_slice(bytes))?;

    generator.start();
    let pump = PushPump::spawn(generator.source(), RingSink { producer }, PushConfig::default())?;

    thread::sleep(Duration::from_secs(5));

    pump.stop();
    generator.stop();
    Ok(())
}
