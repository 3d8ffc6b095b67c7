use std::io;

use num_enum::TryFromPrimitiveError;
use thiserror::Error;

use crate::sha1::XboxVersion;

/// The primary error type for the `xbeeprom-lib` library.
#[derive(Error, Debug)]
pub enum EepromError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("no hash tables defined for hardware version {0:#04x}")]
    InvalidVersion(u8),

    #[error("failed to decrypt EEPROM: no hardware revision reproduces the stored digest")]
    DecryptionFailed,

    #[error("message too long: SHA-1 bit counter overflowed")]
    MessageTooLong,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<TryFromPrimitiveError<XboxVersion>> for EepromError {
    fn from(err: TryFromPrimitiveError<XboxVersion>) -> Self {
        EepromError::InvalidVersion(err.number)
    }
}
