use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use xbeeprom_lib::Eeprom;
use xbeeprom_lib::settings::AudioMode;

#[derive(Parser, Debug)]
#[command(about = "Decrypt, inspect, and re-seal Xbox EEPROM dumps")]
struct Cli {
    /// The EEPROM dump to operate on.
    eeprom_file: PathBuf,

    /// Where to write the re-encrypted dump.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Speaker configuration to set before re-sealing.
    #[arg(long, value_enum)]
    audio_mode: Option<AudioModeArg>,

    /// Enable or disable the Dolby Digital (AC3) flag.
    #[arg(long)]
    dolby: Option<bool>,

    /// Enable or disable the DTS flag.
    #[arg(long)]
    dts: Option<bool>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AudioModeArg {
    Mono,
    Stereo,
    Surround,
}

impl From<AudioModeArg> for AudioMode {
    fn from(arg: AudioModeArg) -> Self {
        match arg {
            AudioModeArg::Mono => AudioMode::Mono,
            AudioModeArg::Stereo => AudioMode::Stereo,
            AudioModeArg::Surround => AudioMode::Surround,
        }
    }
}

fn setup_logging(verbosity: &Verbosity<InfoLevel>) {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity.tracing_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.verbose);

    let mut eeprom = Eeprom::from_file(&cli.eeprom_file)
        .with_context(|| format!("failed to load EEPROM dump {:?}", cli.eeprom_file))?;

    println!("{eeprom}");

    if let Some(mode) = cli.audio_mode {
        eeprom.set_audio_mode(mode.into());
        info!("Audio mode set to {}", eeprom.audio_mode());
    }
    if let Some(enabled) = cli.dolby {
        eeprom.set_dolby_digital(enabled);
        info!("Dolby Digital flag set to {enabled}");
    }
    if let Some(enabled) = cli.dts {
        eeprom.set_dts(enabled);
        info!("DTS flag set to {enabled}");
    }

    if let Some(output) = cli.output {
        let sealed = eeprom.encrypt()?;
        fs::write(&output, sealed)
            .with_context(|| format!("failed to write {:?}", output))?;
        info!("Wrote re-encrypted EEPROM to {}", output.display());
    }

    Ok(())
}
