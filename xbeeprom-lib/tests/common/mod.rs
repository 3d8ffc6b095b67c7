//! Common test utilities and shared fixtures.

// Allow unused imports and dead code since this is a shared module
// used across multiple test files - not all items are used in every test file
#[allow(unused_imports)]
pub use xbeeprom_lib::Eeprom;
#[allow(unused_imports)]
pub use xbeeprom_lib::error::EepromError;
#[allow(unused_imports)]
pub use xbeeprom_lib::record::{EEPROM_SIZE, EepromData, Record};
#[allow(unused_imports)]
pub use xbeeprom_lib::settings::{AudioMode, VideoStandard, XbeRegion};
#[allow(unused_imports)]
pub use xbeeprom_lib::sha1::XboxVersion;

use zerocopy::FromZeros;
use zerocopy::byteorder::little_endian::U32;

/// A plaintext record with recognizable values in every checksummed field.
#[allow(dead_code)]
pub fn sample_plaintext() -> EepromData {
    let mut data = EepromData::new_zeroed();
    data.confounder = [0xA5, 0x5A, 0x01, 0x23, 0x45, 0x67, 0x89, 0xAB];
    data.hdd_key = std::array::from_fn(|i| 0x10 + i as u8);
    data.xbe_region = U32::new(u32::from(XbeRegion::NorthAmerica));
    data.serial_number = *b"174600412303";
    data.mac_address = [0x00, 0x50, 0xF2, 0x12, 0x34, 0x56];
    data.online_key = std::array::from_fn(|i| 0xC0 ^ i as u8);
    data.video_standard = U32::new(u32::from(VideoStandard::NtscM));
    data.timezone_bias = U32::new(300);
    data.language_id = U32::new(1);
    data.dvd_zone = U32::new(1);
    data
}

/// Seal [`sample_plaintext`] for `version` and return the 256 bytes.
#[allow(dead_code)]
pub fn sealed_sample(version: XboxVersion) -> [u8; EEPROM_SIZE] {
    let mut record = Record::from_plaintext(sample_plaintext());
    record.encrypt(version).expect("sealing the sample record")
}
