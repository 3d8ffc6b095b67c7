//! Decrypt, inspect, and re-seal Xbox EEPROM dumps.
//!
//! The console stores its configuration in a 256-byte EEPROM whose
//! confidential fields (confounder, HDD key, region code) are RC4-encrypted
//! under a key derived from a keyed SHA-1 digest. The digest itself is keyed
//! per hardware revision through precomputed intermediate hash states, so no
//! runtime secret is needed to verify or re-derive it.

pub mod crc;
pub mod eeprom;
pub mod error;
pub mod rc4;
pub mod record;
pub mod settings;
pub mod sha1;

// Re-export the codec for easy access
pub use eeprom::Eeprom;
