use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::variant::Variant;
use crate::voice::DEFAULT_VOICE_PROGRAM;

#[derive(Parser, Debug, Clone)]
#[command(name = "haunted-chess", about = "Chess against a random, haunted opponent")]
pub struct Cli {
    /// Which haunting to play against.
    #[arg(long, value_enum, env = "HAUNTED_VARIANT", default_value_t = Variant::Classic)]
    pub variant: Variant,
    /// Game length in seconds. Skips the on-screen prompt.
    #[arg(long)]
    pub duration: Option<u64>,
    /// Directory holding `pieces/` and `sounds/`.
    #[arg(long, env = "HAUNTED_ASSETS_DIR", default_value = ".")]
    pub assets_dir: PathBuf,
    /// Seed for every random roll.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Speech program, called as `<program> -s <rate> <line>`.
    #[arg(long, default_value = DEFAULT_VOICE_PROGRAM)]
    pub voice_program: String,
    /// No sound and no speech.
    #[arg(long)]
    pub mute: bool,
}

impl Cli {
    pub fn duration(&self) -> Option<Duration> {
        self.duration.map(Duration::from_secs)
    }
}
