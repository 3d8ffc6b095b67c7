//! Bit-placement tests for the audio/video settings accessors.

mod common;

use common::*;
use xbeeprom_lib::settings::VideoSettings;

fn sample_eeprom() -> Eeprom {
    Eeprom::from_bytes(&sealed_sample(XboxVersion::V1_0)).unwrap()
}

#[test]
fn audio_mode_bit_placement() {
    let mut eeprom = sample_eeprom();
    assert_eq!(eeprom.audio_mode(), AudioMode::Stereo);

    eeprom.set_audio_mode(AudioMode::Surround);
    assert_eq!(eeprom.audio_mode(), AudioMode::Surround);
    assert_eq!(eeprom.data().audio_flags.get(), 0x0000_0002);

    eeprom.set_audio_mode(AudioMode::Mono);
    assert_eq!(eeprom.audio_mode(), AudioMode::Mono);
    assert_eq!(eeprom.data().audio_flags.get(), 0x0000_0001);

    eeprom.set_audio_mode(AudioMode::Stereo);
    assert_eq!(eeprom.audio_mode(), AudioMode::Stereo);
    assert_eq!(eeprom.data().audio_flags.get(), 0x0000_0000);
}

#[test]
fn dolby_and_dts_bit_placement() {
    let mut eeprom = sample_eeprom();
    assert!(!eeprom.dolby_digital());
    assert!(!eeprom.dts());

    eeprom.set_dolby_digital(true);
    assert!(eeprom.dolby_digital());
    assert_eq!(eeprom.data().audio_flags.get(), 0x0001_0000);

    eeprom.set_dts(true);
    assert!(eeprom.dts());
    assert_eq!(eeprom.data().audio_flags.get(), 0x0003_0000);

    eeprom.set_dolby_digital(false);
    assert_eq!(eeprom.data().audio_flags.get(), 0x0002_0000);
}

#[test]
fn flag_edits_do_not_disturb_other_bits() {
    let mut eeprom = sample_eeprom();
    eeprom.set_audio_mode(AudioMode::Surround);
    eeprom.set_dts(true);

    assert_eq!(eeprom.audio_mode(), AudioMode::Surround);
    assert!(eeprom.dts());
    assert!(!eeprom.dolby_digital());
}

#[test]
fn video_flag_bit_placement() {
    let widescreen = VideoSettings::from_bytes(0x0001_0000u32.to_le_bytes());
    assert!(widescreen.widescreen());
    assert!(!widescreen.letterbox());

    let letterbox_60hz = VideoSettings::from_bytes(0x0090_0000u32.to_le_bytes());
    assert!(letterbox_60hz.letterbox());
    assert!(letterbox_60hz.refresh_60hz());
    assert!(!letterbox_60hz.widescreen());
}

#[test]
fn decoded_enums_match_sample_fields() {
    let eeprom = sample_eeprom();
    assert_eq!(eeprom.region(), XbeRegion::NorthAmerica);
    assert_eq!(eeprom.video_standard(), VideoStandard::NtscM);
    assert_eq!(eeprom.serial_number(), b"174600412303");
}
