//! Start/stop bit framing of message bytes.

use std::fmt;

use crate::config::FramingMode;

/// Bits per framed byte: start bit, eight data bits, stop bit.
pub const FRAME_BITS: usize = 10;

/// Framed message bits, in transmission order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitStream {
    bits: Vec<bool>,
}

impl BitStream {
    /// Creates an empty bit stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one bit.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true if there are no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits as a slice.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Iterates over the bits in transmission order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }
}

impl From<Vec<bool>> for BitStream {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitStream {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

/// Renders the stream as `1`s and `0`s.
impl fmt::Display for BitStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Frames a message with one start bit and one stop bit per byte.
///
/// Each byte becomes `true`, its eight data bits least-significant first,
/// then `true`. There is no parity and no resynchronization between bytes;
/// see [`frame_with`] for the opt-in alternative.
///
/// # Examples
///
/// ```
/// use asktone::frame;
///
/// let bits = frame(b"A");
/// assert_eq!(bits.to_string(), "1100000101");
/// ```
pub fn frame(message: &[u8]) -> BitStream {
    frame_with(message, FramingMode::Continuous)
}

/// Frames a message using the given byte layout.
///
/// With [`FramingMode::Resync`], `idle_bits` low bits separate consecutive
/// bytes. A single-byte message frames identically in every mode.
pub fn frame_with(message: &[u8], mode: FramingMode) -> BitStream {
    let idle_bits = match mode {
        FramingMode::Continuous => 0,
        FramingMode::Resync { idle_bits } => idle_bits as usize,
    };
    let capacity = message.len() * FRAME_BITS + message.len().saturating_sub(1) * idle_bits;
    let mut bits = Vec::with_capacity(capacity);

    for (index, &byte) in message.iter().enumerate() {
        if index > 0 {
            bits.extend(std::iter::repeat_n(false, idle_bits));
        }
        // start
        bits.push(true);
        bits.extend((0..8).map(|bit| (byte >> bit) & 0x01 == 1));
        // stop
        bits.push(true);
    }

    BitStream { bits }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_frame_letter_a() {
        let bits = frame(&[0x41]);
        let expected = [
            true, true, false, false, false, false, false, true, false, true,
        ];
        assert_eq!(bits.as_slice(), &expected);
    }

    #[test]
    fn test_frame_extremes() {
        assert_eq!(frame(&[0x00]).to_string(), "1000000001");
        assert_eq!(frame(&[0xFF]).to_string(), "1111111111");
        assert_eq!(frame(&[0x80]).to_string(), "1000000011");
    }

    #[test]
    fn test_every_byte_round_trips_lsb_first() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..256 {
            let byte: u8 = rng.gen_range(0..=255);
            let bits = frame(&[byte]);
            assert_eq!(bits.len(), FRAME_BITS);
            assert!(bits.as_slice()[0]);
            assert!(bits.as_slice()[9]);
            let decoded = bits.as_slice()[1..9]
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &b)| acc | ((b as u8) << i));
            assert_eq!(decoded, byte);
        }
    }

    #[test]
    fn test_multi_byte_is_concatenated() {
        let bits = frame(b"AB");
        assert_eq!(bits.len(), 20);
        assert_eq!(bits.to_string(), "11000001011010000101");
    }

    #[test]
    fn test_empty_message() {
        assert!(frame(&[]).is_empty());
    }

    #[test]
    fn test_resync_inserts_idle_bits_between_bytes() {
        let bits = frame_with(b"AB", FramingMode::Resync { idle_bits: 3 });
        assert_eq!(bits.len(), 23);
        assert_eq!(bits.to_string(), "11000001010001010000101");
    }

    #[test]
    fn test_resync_single_byte_matches_default() {
        let mode = FramingMode::Resync { idle_bits: 4 };
        assert_eq!(frame_with(&[0x5A], mode), frame(&[0x5A]));
    }

    #[test]
    fn test_collect_and_display() {
        let bits: BitStream = [true, false, true].into_iter().collect();
        assert_eq!(bits.to_string(), "101");
        assert_eq!(bits.iter().filter(|b| *b).count(), 2);
    }
}
