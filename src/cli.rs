//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::params::{RecordingConfig, SoundConfig, Viewport};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "orbitloops")]
#[command(about = "Planets hum louder as particles fall into orbit", long_about = None)]
pub struct Args {
    /// YAML configuration file (built-in defaults when omitted)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Random seed for planet and particle placement
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Viewport width (px)
    #[arg(long, value_name = "PX", default_value_t = 1280.0)]
    pub width: f32,

    /// Viewport height (px)
    #[arg(long, value_name = "PX", default_value_t = 720.0)]
    pub height: f32,

    /// Ticks to simulate in headless and live modes
    #[arg(long, default_value_t = 600)]
    pub ticks: u64,

    /// Bounce the drones to a WAV file (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// WAV output path for --record
    #[arg(long, value_name = "PATH", default_value = "orbitloops.wav")]
    pub output: PathBuf,

    /// Play the drones on the default audio device in real time
    #[arg(long)]
    pub live: bool,

    /// Log stats every N ticks (0 disables)
    #[arg(long, value_name = "N", default_value_t = 60)]
    pub stats_every: u64,
}

impl Args {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Create recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> Option<RecordingConfig> {
        self.record.map(|duration| RecordingConfig {
            output_path: self.output.clone(),
            ..RecordingConfig::new(duration)
        })
    }

    pub fn sound_config(&self) -> SoundConfig {
        SoundConfig::default()
    }

    /// True when this tick should be logged
    pub fn should_log(&self, tick: u64) -> bool {
        self.stats_every > 0 && tick % self.stats_every == 0
    }
}
