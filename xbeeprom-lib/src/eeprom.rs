//! High-level EEPROM codec: load, auto-detect the revision, edit settings,
//! re-seal.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::EepromError;
use crate::record::{EEPROM_SIZE, EepromData, Record};
use crate::settings::{
    AudioMode, AudioSettings, DvdZone, VideoSettings, VideoStandard, XbeRegion,
};
use crate::sha1::XboxVersion;

/// A decrypted EEPROM plus the hardware revision it was sealed for.
///
/// The record carries no plaintext revision marker, so the revision detected
/// while decrypting is retained here and reused when re-sealing.
pub struct Eeprom {
    record: Record,
    version: XboxVersion,
}

impl Eeprom {
    /// Overlay an encrypted 256-byte dump and decrypt it immediately.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EepromError> {
        let mut record = Record::from_encrypted_bytes(bytes)?;
        let version = record.decrypt()?;
        info!(%version, "EEPROM decrypted");
        Ok(Self { record, version })
    }

    /// Load and decrypt an EEPROM dump from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EepromError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// The hardware revision detected at load time.
    pub fn version(&self) -> XboxVersion {
        self.version
    }

    pub fn data(&self) -> &EepromData {
        self.record.data()
    }

    /// Re-seal the record with the revision detected at load time and return
    /// the serialized 256 bytes.
    pub fn encrypt(&mut self) -> Result<[u8; EEPROM_SIZE], EepromError> {
        self.record.encrypt(self.version)
    }

    pub fn audio_mode(&self) -> AudioMode {
        let audio = self.audio_settings();
        if audio.surround() {
            AudioMode::Surround
        } else if audio.mono() {
            AudioMode::Mono
        } else {
            AudioMode::Stereo
        }
    }

    pub fn set_audio_mode(&mut self, mode: AudioMode) {
        self.update_audio(|audio| match mode {
            AudioMode::Surround => {
                audio.set_surround(true);
                audio.set_mono(false);
            }
            AudioMode::Mono => {
                audio.set_surround(false);
                audio.set_mono(true);
            }
            AudioMode::Stereo => {
                audio.set_surround(false);
                audio.set_mono(false);
            }
        });
    }

    /// Dolby Digital (AC3) passthrough flag.
    pub fn dolby_digital(&self) -> bool {
        self.audio_settings().ac3()
    }

    pub fn set_dolby_digital(&mut self, enabled: bool) {
        self.update_audio(|audio| audio.set_ac3(enabled));
    }

    /// DTS passthrough flag.
    pub fn dts(&self) -> bool {
        self.audio_settings().dts()
    }

    pub fn set_dts(&mut self, enabled: bool) {
        self.update_audio(|audio| audio.set_dts(enabled));
    }

    pub fn video_settings(&self) -> VideoSettings {
        VideoSettings::from_bytes(self.data().video_flags.get().to_le_bytes())
    }

    pub fn video_standard(&self) -> VideoStandard {
        VideoStandard::from(self.data().video_standard.get())
    }

    pub fn region(&self) -> XbeRegion {
        XbeRegion::from(self.data().xbe_region.get())
    }

    pub fn dvd_zone(&self) -> DvdZone {
        DvdZone::from(self.data().dvd_zone.get())
    }

    pub fn serial_number(&self) -> &[u8; 12] {
        &self.data().serial_number
    }

    pub fn mac_address(&self) -> &[u8; 6] {
        &self.data().mac_address
    }

    pub fn hdd_key(&self) -> &[u8; 16] {
        &self.data().hdd_key
    }

    pub fn online_key(&self) -> &[u8; 16] {
        &self.data().online_key
    }

    fn audio_settings(&self) -> AudioSettings {
        AudioSettings::from_bytes(self.data().audio_flags.get().to_le_bytes())
    }

    fn update_audio(&mut self, edit: impl FnOnce(&mut AudioSettings)) {
        let mut audio = self.audio_settings();
        edit(&mut audio);
        let word = u32::from_le_bytes(audio.into_bytes());
        self.record.data_mut().audio_flags.set(word);
    }
}

impl fmt::Display for Eeprom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.data();
        let audio = self.audio_settings();
        let video = self.video_settings();

        writeln!(f, "Hardware revision:  {}", self.version)?;
        writeln!(f, "HMAC digest:        {}", hex::encode(d.hmac_digest))?;
        writeln!(f, "Confounder:         {}", hex::encode(d.confounder))?;
        writeln!(f, "HDD key:            {}", hex::encode(d.hdd_key))?;
        writeln!(f, "Region:             {}", self.region())?;
        writeln!(f, "Serial number:      {}", hex::encode(d.serial_number))?;
        writeln!(f, "MAC address:        {}", hex::encode(d.mac_address))?;
        writeln!(f, "Online key:         {}", hex::encode(d.online_key))?;
        writeln!(f, "Video standard:     {}", self.video_standard())?;
        writeln!(f, "Language ID:        {}", d.language_id.get())?;
        writeln!(
            f,
            "Video flags:        widescreen={} letterbox={} 480p={} 720p={} 1080i={} 60hz={}",
            video.widescreen(),
            video.letterbox(),
            video.resolution_480p(),
            video.resolution_720p(),
            video.resolution_1080i(),
            video.refresh_60hz(),
        )?;
        writeln!(
            f,
            "Audio:              {} ac3={} dts={}",
            self.audio_mode(),
            audio.ac3(),
            audio.dts(),
        )?;
        writeln!(
            f,
            "Parental control:   games={} movies={} pwd={:#x}",
            d.parental_control_games.get(),
            d.parental_control_movies.get(),
            d.parental_control_pwd.get(),
        )?;
        writeln!(
            f,
            "Xbox Live:          ip={:#010x} dns={:#010x} gateway={:#010x} mask={:#010x}",
            d.live_ip_address.get(),
            d.live_dns.get(),
            d.live_gateway.get(),
            d.live_subnet_mask.get(),
        )?;
        write!(f, "DVD zone:           {}", self.dvd_zone())
    }
}
