#![cfg(feature = "modem")]

use asktone::{FRAME_BITS, FramingMode, frame, frame_with};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_message(rng: &mut StdRng) -> Vec<u8> {
    let len = rng.gen_range(1..=16);
    (0..len).map(|_| rng.gen_range(0..=255)).collect()
}

fn unframe(group: &[bool]) -> u8 {
    group[1..9]
        .iter()
        .enumerate()
        .fold(0u8, |byte, (i, bit)| byte | ((*bit as u8) << i))
}

#[test]
fn test_random_messages_frame_and_unframe() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let message = random_message(&mut rng);
        let bits = frame(&message);
        assert_eq!(bits.len(), message.len() * FRAME_BITS);

        for (group, byte) in bits.as_slice().chunks(FRAME_BITS).zip(&message) {
            assert!(group[0], "start bit");
            assert!(group[9], "stop bit");
            assert_eq!(unframe(group), *byte);
        }
    }
}

#[test]
fn test_resync_groups_are_separated_by_idle_bits() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..100 {
        let message = random_message(&mut rng);
        let idle = rng.gen_range(0..4u8);
        let bits = frame_with(&message, FramingMode::Resync { idle_bits: idle });
        let stride = FRAME_BITS + idle as usize;
        assert_eq!(bits.len(), message.len() * stride - idle as usize);

        for (index, byte) in message.iter().enumerate() {
            let start = index * stride;
            let group = &bits.as_slice()[start..start + FRAME_BITS];
            assert!(group[0] && group[9]);
            assert_eq!(unframe(group), *byte);
            if index + 1 < message.len() {
                let gap = &bits.as_slice()[start + FRAME_BITS..start + stride];
                assert!(gap.iter().all(|bit| !bit));
            }
        }
    }
}

#[test]
fn test_single_byte_ignores_framing_mode() {
    let resync = frame_with(&[0xA5], FramingMode::Resync { idle_bits: 5 });
    assert_eq!(resync, frame(&[0xA5]));
}
