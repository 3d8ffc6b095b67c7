//! Decoded views of the EEPROM's human-readable settings fields.
//!
//! Everything here operates on already-decrypted bytes; nothing in this
//! module touches cryptography.

use modular_bitfield::prelude::*;
use num_enum::{FromPrimitive, IntoPrimitive};
use strum_macros::Display;

/// Speaker configuration derived from the audio flags word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AudioMode {
    #[strum(to_string = "surround")]
    Surround,
    #[strum(to_string = "stereo")]
    Stereo,
    #[strum(to_string = "mono")]
    Mono,
}

/// Bit assignments within the audio flags word at 0x98.
#[bitfield(bytes = 4)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSettings {
    pub mono: bool,
    pub surround: bool,
    #[skip]
    unused: B14,
    pub ac3: bool,
    pub dts: bool,
    #[skip]
    unused2: B14,
}

/// Bit assignments within the video flags word at 0x94.
#[bitfield(bytes = 4)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoSettings {
    #[skip]
    unused: B16,
    pub widescreen: bool,
    pub resolution_720p: bool,
    pub resolution_1080i: bool,
    pub resolution_480p: bool,
    pub letterbox: bool,
    #[skip]
    unused2: B2,
    pub refresh_60hz: bool,
    #[skip]
    unused3: B8,
}

/// Broadcast standard stored at 0x58.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, FromPrimitive)]
#[repr(u32)]
pub enum VideoStandard {
    #[strum(to_string = "invalid")]
    Invalid = 0x0000_0000,
    #[strum(to_string = "NTSC-M")]
    NtscM = 0x0040_0100,
    #[strum(to_string = "PAL-I")]
    PalI = 0x0080_0300,

    #[strum(to_string = "unknown")]
    #[num_enum(catch_all)]
    Unknown(u32),
}

/// Game region code, RC4-encrypted at rest at 0x2C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, FromPrimitive)]
#[repr(u32)]
pub enum XbeRegion {
    #[strum(to_string = "invalid")]
    Invalid = 0x00,
    #[strum(to_string = "North America")]
    NorthAmerica = 0x01,
    #[strum(to_string = "Japan")]
    Japan = 0x02,
    #[strum(to_string = "Europe/Australia")]
    EuroAustralia = 0x04,

    #[strum(to_string = "unknown")]
    #[num_enum(catch_all)]
    Unknown(u32),
}

/// DVD playback kit zone stored at 0xBC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, FromPrimitive)]
#[repr(u32)]
pub enum DvdZone {
    #[strum(to_string = "none")]
    None = 0x00,
    #[strum(to_string = "zone 1")]
    Zone1 = 0x01,
    #[strum(to_string = "zone 2")]
    Zone2 = 0x02,
    #[strum(to_string = "zone 3")]
    Zone3 = 0x03,
    #[strum(to_string = "zone 4")]
    Zone4 = 0x04,
    #[strum(to_string = "zone 5")]
    Zone5 = 0x05,
    #[strum(to_string = "zone 6")]
    Zone6 = 0x06,

    #[strum(to_string = "unknown")]
    #[num_enum(catch_all)]
    Unknown(u32),
}
