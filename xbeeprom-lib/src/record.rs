//! The 256-byte EEPROM record layout and its decrypt/encrypt state machine.

use tracing::{debug, trace};
use zerocopy::byteorder::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::crc::{CrcState, quick_crc};
use crate::error::EepromError;
use crate::rc4::Rc4;
use crate::sha1::{XboxVersion, xbox_hmac_sha1};

/// Total size of an EEPROM dump. Any other length is malformed input.
pub const EEPROM_SIZE: usize = 0x100;

/// Raw EEPROM contents, exactly as persisted: little-endian, packed, no
/// implicit padding. Offsets follow the layout recovered by the Xbox Linux
/// project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct EepromData {
    pub hmac_digest: [u8; 20],        // 0x00 keyed-hash digest over the plaintext secrets
    pub confounder: [u8; 8],          // 0x14 RC4-encrypted confounder
    pub hdd_key: [u8; 16],            // 0x1C RC4-encrypted HDD key
    pub xbe_region: U32,              // 0x2C RC4-encrypted region code
    pub checksum_a: U32,              // 0x30 checksum over 0x34..0x60
    pub serial_number: [u8; 12],      // 0x34 console serial number
    pub mac_address: [u8; 6],         // 0x40 Ethernet MAC address
    pub reserved1: [u8; 2],           // 0x46
    pub online_key: [u8; 16],         // 0x48 Xbox Live key
    pub video_standard: U32,          // 0x58 0x00400100 NTSC-M, 0x00800300 PAL-I
    pub reserved2: [u8; 4],           // 0x5C
    pub checksum_b: U32,              // 0x60 checksum over 0x64..0xC0
    pub timezone_bias: U32,           // 0x64 minutes west of UTC
    pub timezone_std_name: U32,       // 0x68
    pub timezone_dlt_name: U32,       // 0x6C
    pub reserved3: [u8; 8],           // 0x70
    pub timezone_std_date: U32,       // 0x78 month-day-dayofweek-hour
    pub timezone_dlt_date: U32,       // 0x7C
    pub reserved4: [u8; 8],           // 0x80
    pub timezone_std_bias: U32,       // 0x88
    pub timezone_dlt_bias: U32,       // 0x8C
    pub language_id: U32,             // 0x90
    pub video_flags: U32,             // 0x94 see settings::VideoSettings
    pub audio_flags: U32,             // 0x98 see settings::AudioSettings
    pub parental_control_games: U32,  // 0x9C 0 = max rating
    pub parental_control_pwd: U32,    // 0xA0
    pub parental_control_movies: U32, // 0xA4 0 = max rating
    pub live_ip_address: U32,         // 0xA8
    pub live_dns: U32,                // 0xAC
    pub live_gateway: U32,            // 0xB0
    pub live_subnet_mask: U32,        // 0xB4
    pub live_other: U32,              // 0xB8
    pub dvd_zone: U32,                // 0xBC DVD playback kit zone
    pub reserved5: [u8; 64],          // 0xC0 unclassified trailing data
}

const _: () = assert!(std::mem::size_of::<EepromData>() == EEPROM_SIZE);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CipherState {
    Encrypted,
    Decrypted,
}

/// An EEPROM record plus its cipher state.
///
/// Constructed either from an encrypted dump or from plaintext data; the
/// state machine only moves through [`decrypt`](Record::decrypt) and
/// [`encrypt`](Record::encrypt).
#[derive(Debug, Clone)]
pub struct Record {
    data: EepromData,
    state: CipherState,
}

impl Record {
    /// Overlay an encrypted 256-byte dump.
    pub fn from_encrypted_bytes(bytes: &[u8]) -> Result<Self, EepromError> {
        let data = EepromData::read_from_bytes(bytes).map_err(|_| {
            EepromError::MalformedInput(format!(
                "EEPROM dump must be exactly {EEPROM_SIZE} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self {
            data,
            state: CipherState::Encrypted,
        })
    }

    /// Wrap already-decrypted record data.
    pub fn from_plaintext(data: EepromData) -> Self {
        Self {
            data,
            state: CipherState::Decrypted,
        }
    }

    pub fn is_encrypted(&self) -> bool {
        self.state == CipherState::Encrypted
    }

    pub fn data(&self) -> &EepromData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut EepromData {
        &mut self.data
    }

    /// Decrypt in place, auto-detecting the hardware revision.
    ///
    /// Candidate revisions are tried in ascending order. For each one the
    /// RC4 key is derived from the stored digest, the three confidential
    /// fields are deciphered as one continuous keystream, and the candidate
    /// is accepted when the keyed hash over the resulting plaintext
    /// reproduces the stored digest.
    pub fn decrypt(&mut self) -> Result<XboxVersion, EepromError> {
        if self.state == CipherState::Decrypted {
            return Err(EepromError::MalformedInput(
                "record is already decrypted".to_string(),
            ));
        }

        let stored_digest = self.data.hmac_digest;
        for version in XboxVersion::DETECTABLE {
            trace!(%version, "probing hardware revision");

            let rc4_key = xbox_hmac_sha1(version, &[&stored_digest])?;
            let mut cipher = Rc4::new(&rc4_key)?;

            let mut confounder = self.data.confounder;
            let mut hdd_key = self.data.hdd_key;
            let mut region = self.data.xbe_region.get().to_le_bytes();
            cipher.apply(&mut confounder);
            cipher.apply(&mut hdd_key);
            cipher.apply(&mut region);

            let confirm = xbox_hmac_sha1(version, &[&confounder, &hdd_key, &region])?;
            if confirm == stored_digest {
                debug!(%version, "hardware revision detected");
                self.data.confounder = confounder;
                self.data.hdd_key = hdd_key;
                self.data.xbe_region = U32::new(u32::from_le_bytes(region));
                self.state = CipherState::Decrypted;
                return Ok(version);
            }
        }

        Err(EepromError::DecryptionFailed)
    }

    /// Re-seal the record for `version` and return the serialized bytes.
    ///
    /// Calling this on an already-encrypted record is an idempotent no-op
    /// returning the current bytes.
    pub fn encrypt(&mut self, version: XboxVersion) -> Result<[u8; EEPROM_SIZE], EepromError> {
        if self.state == CipherState::Encrypted {
            return Ok(self.to_bytes());
        }

        let mut confounder = self.data.confounder;
        let mut hdd_key = self.data.hdd_key;
        let mut region = self.data.xbe_region.get().to_le_bytes();

        let digest = xbox_hmac_sha1(version, &[&confounder, &hdd_key, &region])?;
        self.data.hmac_digest = digest;

        // The cipher key is derived from the digest alone, unlike the
        // three-field input used during detection.
        let rc4_key = xbox_hmac_sha1(version, &[&digest])?;
        let mut cipher = Rc4::new(&rc4_key)?;
        cipher.apply(&mut confounder);
        cipher.apply(&mut hdd_key);
        cipher.apply(&mut region);
        self.data.confounder = confounder;
        self.data.hdd_key = hdd_key;
        self.data.xbe_region = U32::new(u32::from_le_bytes(region));

        self.update_checksums()?;

        debug!(%version, "EEPROM re-sealed");
        self.state = CipherState::Encrypted;
        Ok(self.to_bytes())
    }

    /// Serialize the record as stored.
    pub fn to_bytes(&self) -> [u8; EEPROM_SIZE] {
        let mut out = [0u8; EEPROM_SIZE];
        out.copy_from_slice(self.data.as_bytes());
        out
    }

    /// Recompute both checksums, chaining state across the fields each one
    /// covers. The MAC address and its 2 reserved bytes form one 8-byte unit
    /// so every chained slice stays 4-byte aligned.
    fn update_checksums(&mut self) -> Result<(), EepromError> {
        let d = self.data;

        let (_, state) = quick_crc(&d.serial_number, CrcState::default())?;
        let (_, state) = quick_crc(&d.as_bytes()[0x40..0x48], state)?;
        let (_, state) = quick_crc(&d.online_key, state)?;
        let (_, state) = quick_crc(d.video_standard.as_bytes(), state)?;
        let (checksum_a, _) = quick_crc(&d.reserved2, state)?;
        self.data.checksum_a = U32::new(checksum_a);

        let (_, state) = quick_crc(d.timezone_bias.as_bytes(), CrcState::default())?;
        let (_, state) = quick_crc(d.timezone_std_name.as_bytes(), state)?;
        let (_, state) = quick_crc(d.timezone_dlt_name.as_bytes(), state)?;
        let (_, state) = quick_crc(&d.reserved3, state)?;
        let (_, state) = quick_crc(d.timezone_std_date.as_bytes(), state)?;
        let (_, state) = quick_crc(d.timezone_dlt_date.as_bytes(), state)?;
        let (_, state) = quick_crc(&d.reserved4, state)?;
        let (_, state) = quick_crc(d.timezone_std_bias.as_bytes(), state)?;
        let (_, state) = quick_crc(d.timezone_dlt_bias.as_bytes(), state)?;
        let (_, state) = quick_crc(d.language_id.as_bytes(), state)?;
        let (_, state) = quick_crc(d.video_flags.as_bytes(), state)?;
        let (_, state) = quick_crc(d.audio_flags.as_bytes(), state)?;
        let (_, state) = quick_crc(d.parental_control_games.as_bytes(), state)?;
        let (_, state) = quick_crc(d.parental_control_pwd.as_bytes(), state)?;
        let (_, state) = quick_crc(d.parental_control_movies.as_bytes(), state)?;
        let (_, state) = quick_crc(d.live_ip_address.as_bytes(), state)?;
        let (_, state) = quick_crc(d.live_dns.as_bytes(), state)?;
        let (_, state) = quick_crc(d.live_gateway.as_bytes(), state)?;
        let (_, state) = quick_crc(d.live_subnet_mask.as_bytes(), state)?;
        let (_, state) = quick_crc(d.live_other.as_bytes(), state)?;
        let (checksum_b, _) = quick_crc(d.dvd_zone.as_bytes(), state)?;
        self.data.checksum_b = U32::new(checksum_b);

        Ok(())
    }
}
