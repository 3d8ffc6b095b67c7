//! Additive checksum covering the EEPROM's two user-data areas.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::EepromError;

/// Carry state threaded between [`quick_crc`] calls.
///
/// Passing the state returned by one call into the next checksums a list of
/// logically concatenated fields without materializing the concatenation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrcState {
    high: u32,
    low: u32,
}

/// Checksum `data` as little-endian 32-bit words folded through a
/// carry-propagating 64-bit accumulator.
///
/// `data` must be a multiple of 4 bytes long. Returns the checksum value for
/// everything processed so far and the state to chain into the next call.
pub fn quick_crc(data: &[u8], state: CrcState) -> Result<(u32, CrcState), EepromError> {
    if data.len() % 4 != 0 {
        return Err(EepromError::MalformedInput(format!(
            "checksum input length {} is not a multiple of 4",
            data.len()
        )));
    }

    let CrcState { mut high, mut low } = state;
    for chunk in data.chunks_exact(4) {
        let word = LittleEndian::read_u32(chunk) as u64;
        let sum = ((high as u64) << 32) | low as u64;
        high = (sum.wrapping_add(word) >> 32) as u32;
        low = low.wrapping_add(word as u32);
    }

    Ok((!high.wrapping_add(low), CrcState { high, low }))
}
