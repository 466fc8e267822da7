#![cfg(feature = "modem")]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use asktone::{
    AudioFormat, AudioSink, ByteOrder, CyclicSource, FramingMode, Generator, GeneratorConfig,
    ModemConfig, PushBuffer, SampleBuffer, SampleSize, SampleType, frame, push_tick,
};

/// Reads one full cycle of the stream and splits it into per-bit peaks.
fn bit_peaks(source: &CyclicSource, bit_count: usize) -> Vec<f64> {
    let mut bytes = vec![0u8; source.bytes_available()];
    assert_eq!(source.read(&mut bytes), bytes.len());

    let samples: Vec<f64> = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f64 / 32767.0)
        .collect();
    let per_bit = samples.len() / bit_count;
    (0..bit_count)
        .map(|bit| {
            samples[bit * per_bit..(bit + 1) * per_bit]
                .iter()
                .fold(0.0, |peak: f64, s| peak.max(s.abs()))
        })
        .collect()
}

#[test]
fn test_envelope_follows_framed_byte() {
    let mut generator = Generator::new(AudioFormat::cd_mono(), GeneratorConfig::default()).unwrap();
    generator.send_byte(0x41).unwrap();
    generator.start();

    let bits = frame(&[0x41]);
    let peaks = bit_peaks(&generator.source(), bits.len());
    for (bit, peak) in bits.iter().zip(peaks) {
        if bit {
            assert!(peak > 0.9, "mark peak {peak}");
        } else {
            assert!(peak < 0.11, "space peak {peak}");
        }
    }
}

#[test]
fn test_resync_framing_adds_idle_bits() {
    let modem = ModemConfig::default().with_framing(FramingMode::Resync { idle_bits: 3 });
    let config = GeneratorConfig::default().with_modem(modem);
    let mut generator = Generator::new(AudioFormat::cd_mono(), config).unwrap();
    generator.send_message(b"AB").unwrap();
    generator.start();

    // 10 + 3 + 10 bits
    let peaks = bit_peaks(&generator.source(), 23);
    for idle in &peaks[10..13] {
        assert!(*idle < 0.11);
    }
    assert!(peaks[13] > 0.9, "start bit of the second byte");
}

#[test]
fn test_bit_time_at_cd_rate() {
    let generator = Generator::new(AudioFormat::cd_mono(), GeneratorConfig::default()).unwrap();
    let timing = generator.bit_timing().unwrap();
    assert_eq!(timing.carrier_hz, 5512);
    assert!((timing.bit_time_ms() - 18.142).abs() < 0.001);
}

struct CountingSink {
    period: usize,
    free: usize,
    written: usize,
}

impl AudioSink for CountingSink {
    fn period_size(&self) -> usize {
        self.period
    }

    fn bytes_free(&self) -> usize {
        self.free
    }

    fn write(&mut self, data: &[u8]) -> usize {
        let n = data.len().min(self.free);
        self.free -= n;
        self.written += n;
        n
    }
}

#[test]
fn test_push_tick_drains_generator_stream() {
    let mut generator = Generator::new(AudioFormat::cd_mono(), GeneratorConfig::default()).unwrap();
    generator.play_tone().unwrap();
    let source = generator.source();
    let mut sink = CountingSink {
        period: 4096,
        free: 10_000,
        written: 0,
    };
    let mut buffer = PushBuffer::new(32768);

    // Nothing while the stream is closed
    assert_eq!(push_tick(&source, &mut sink, &mut buffer), 0);

    generator.start();
    assert_eq!(push_tick(&source, &mut sink, &mut buffer), 8192);
    assert_eq!(sink.written, 8192);
    assert_eq!(source.position(), 8192);
}

#[test]
fn test_replace_while_reading_never_mixes_buffers() {
    let format = AudioFormat::new(
        8000,
        SampleSize::Bits8,
        SampleType::Unsigned,
        ByteOrder::Little,
        1,
    );
    let ones = SampleBuffer::from_bytes(format, vec![1; 1000]).unwrap();
    let twos = SampleBuffer::from_bytes(format, vec![2; 777]).unwrap();

    let source = CyclicSource::from_buffer(ones.clone());
    source.start();

    let done = Arc::new(AtomicBool::new(false));
    let reader = {
        let source = source.clone();
        let done = done.clone();
        thread::spawn(move || {
            let mut out = [0u8; 64];
            let mut reads = 0;
            while !done.load(Ordering::Acquire) {
                assert_eq!(source.read(&mut out), out.len());
                assert!(out.iter().all(|b| *b == out[0]), "mixed read: {out:?}");
                reads += 1;
            }
            reads
        })
    };

    for i in 0..200 {
        let next = if i % 2 == 0 { twos.clone() } else { ones.clone() };
        source.replace(next);
    }
    done.store(true, Ordering::Release);
    reader.join().unwrap();
}
