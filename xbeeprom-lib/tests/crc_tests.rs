//! Known-answer and chaining tests for the additive checksum.

use xbeeprom_lib::crc::{CrcState, quick_crc};
use xbeeprom_lib::error::EepromError;

#[test]
fn zero_buffer_known_answer() {
    let (value, _) = quick_crc(&[0u8; 20], CrcState::default()).unwrap();
    assert_eq!(value, 0xFFFF_FFFF);
}

#[test]
fn ramp_buffer_known_answer() {
    let data: [u8; 20] = std::array::from_fn(|i| i as u8);
    let (value, _) = quick_crc(&data, CrcState::default()).unwrap();
    assert_eq!(value, 0xC8CD_D2D7);
}

#[test]
fn chained_state_matches_whole_buffer() {
    let data: [u8; 20] = std::array::from_fn(|i| i as u8);

    let (whole, _) = quick_crc(&data, CrcState::default()).unwrap();
    let (_, state) = quick_crc(&data[..8], CrcState::default()).unwrap();
    let (chained, _) = quick_crc(&data[8..], state).unwrap();

    assert_eq!(whole, chained);
    assert_eq!(chained, 0xC8CD_D2D7);
}

#[test]
fn carry_propagates_into_high_word() {
    // Two 0xFFFFFFFF words overflow the low accumulator exactly once.
    let (value, _) = quick_crc(&[0xFF; 8], CrcState::default()).unwrap();
    assert_eq!(value, 0x0000_0000);
}

#[test]
fn empty_input_is_valid() {
    let (value, state) = quick_crc(&[], CrcState::default()).unwrap();
    assert_eq!(value, 0xFFFF_FFFF);
    assert_eq!(state, CrcState::default());
}

#[test]
fn unaligned_length_is_rejected() {
    for len in [1usize, 2, 3, 7, 255] {
        let data = vec![0u8; len];
        let err = quick_crc(&data, CrcState::default()).unwrap_err();
        assert!(matches!(err, EepromError::MalformedInput(_)), "len {len}");
    }
}
