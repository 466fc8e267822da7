//! Sine tone with drift-free phase.

use super::Oscillator;
use crate::core::{Pitched, Signal};
use std::f64::consts::PI;

/// A sine wave source whose phase is derived from the sample index.
///
/// Instead of accumulating a phase increment, every sample computes
/// `sin(2π · f · (i mod rate) / rate)`. Floating-point error cannot build up,
/// so the waveform is exactly periodic no matter how long it runs.
pub struct SineTone {
    /// Frequency in Hz
    frequency: f64,
    /// Sample rate in Hz
    sample_rate: u32,
    /// Index of the next sample
    index: u64,
}

impl SineTone {
    /// Creates a new sine tone.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Frequency of the sine wave in Hz
    /// * `sample_rate` - Sample rate in Hz, must be positive
    ///
    /// # Examples
    ///
    /// ```
    /// use asktone::{Signal, SineTone};
    ///
    /// let mut tone = SineTone::new(1000.0, 48000);
    /// assert_eq!(tone.next_sample(), 0.0);
    /// ```
    pub fn new(frequency: f64, sample_rate: u32) -> Self {
        Self {
            frequency,
            sample_rate,
            index: 0,
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Index of the next sample to be generated.
    pub fn position(&self) -> u64 {
        self.index
    }

    /// Length of one exact repetition of the waveform in samples.
    ///
    /// Only defined for whole-number frequencies: the period is
    /// `rate / gcd(frequency, rate)` samples.
    pub fn period_samples(&self) -> Option<u64> {
        if self.frequency.fract() != 0.0 || self.frequency <= 0.0 || self.sample_rate == 0 {
            return None;
        }
        let rate = self.sample_rate as u64;
        Some(rate / gcd(self.frequency as u64, rate))
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl Signal for SineTone {
    fn next_sample(&mut self) -> f64 {
        let rate = self.sample_rate.max(1) as u64;
        let phase = 2.0 * PI * self.frequency * (self.index % rate) as f64 / rate as f64;
        self.index += 1;
        phase.sin()
    }
}

impl Pitched for SineTone {
    fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl Oscillator for SineTone {
    fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_creation() {
        let tone = SineTone::new(440.0, 44100);
        assert_eq!(tone.frequency(), 440.0);
        assert_eq!(tone.sample_rate(), 44100);
    }

    #[test]
    fn test_starts_at_zero() {
        let mut tone = SineTone::new(1000.0, 44100);
        assert_eq!(tone.next_sample(), 0.0);
    }

    #[test]
    fn test_quarter_periods() {
        // 48 samples per cycle at 1 kHz / 48 kHz
        let mut tone = SineTone::new(1000.0, 48000);
        let mut buffer = vec![0.0; 48];
        tone.process(&mut buffer);
        assert!((buffer[12] - 1.0).abs() < 1e-12);
        assert!((buffer[36] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sample_range() {
        let mut tone = SineTone::new(440.0, 44100);
        for _ in 0..44100 {
            let sample = tone.next_sample();
            assert!((-1.0..=1.0).contains(&sample));
        }
    }

    #[test]
    fn test_no_drift_after_many_seconds() {
        let mut tone = SineTone::new(1000.0, 8000);
        let first: Vec<f64> = (0..8).map(|_| tone.next_sample()).collect();
        for _ in 0..(8000 * 60 - 8) {
            tone.next_sample();
        }
        // One minute later the same samples come out, bit for bit
        let later: Vec<f64> = (0..8).map(|_| tone.next_sample()).collect();
        assert_eq!(first, later);
    }

    #[test]
    fn test_period_samples() {
        assert_eq!(SineTone::new(1000.0, 44100).period_samples(), Some(441));
        assert_eq!(SineTone::new(1000.0, 48000).period_samples(), Some(48));
        assert_eq!(SineTone::new(440.5, 48000).period_samples(), None);
    }

    #[test]
    fn test_reset() {
        let mut tone = SineTone::new(440.0, 44100);
        let first = tone.next_sample();
        for _ in 0..100 {
            tone.next_sample();
        }
        tone.reset();
        assert_eq!(tone.position(), 0);
        assert_eq!(tone.next_sample(), first);
    }

    #[test]
    fn test_frequency_change() {
        let mut tone = SineTone::new(440.0, 44100);
        tone.set_frequency(880.0);
        assert_eq!(tone.frequency(), 880.0);
    }
}
