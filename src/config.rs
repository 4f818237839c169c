use crate::error::{ClipsplitError, Result};
use crate::media::SilenceDetectConfig;
use crate::segment::ClipPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Silence detection threshold in dB.
    pub noise_threshold_db: f64,
    /// Minimum silence duration in seconds before a boundary is reported.
    pub min_silence_secs: f64,
    /// Minimum talking duration for an interval to become a clip, in ms.
    pub min_clip_duration_ms: f64,
    /// Padding before each clip, in seconds.
    pub start_buffer_secs: f64,
    /// Padding after each clip, in seconds.
    pub end_buffer_secs: f64,
    /// Directory clips are written to.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            noise_threshold_db: -40.0,
            min_silence_secs: 2.0,
            min_clip_duration_ms: 50.0,
            start_buffer_secs: 1.5,
            end_buffer_secs: 1.5,
            output_dir: PathBuf::from("./output/clips"),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                if let Ok(file_config) = toml::from_str::<Config>(&contents) {
                    config = file_config;
                }
            }
        }

        // Override with environment variables
        if let Ok(threshold) = std::env::var("CLIPSPLIT_NOISE_THRESHOLD_DB") {
            if let Ok(t) = threshold.parse() {
                config.noise_threshold_db = t;
            }
        }
        if let Ok(duration) = std::env::var("CLIPSPLIT_MIN_SILENCE_SECS") {
            if let Ok(d) = duration.parse() {
                config.min_silence_secs = d;
            }
        }
        if let Ok(min_clip) = std::env::var("CLIPSPLIT_MIN_CLIP_MS") {
            if let Ok(m) = min_clip.parse() {
                config.min_clip_duration_ms = m;
            }
        }
        if let Ok(buffer) = std::env::var("CLIPSPLIT_START_BUFFER_SECS") {
            if let Ok(b) = buffer.parse() {
                config.start_buffer_secs = b;
            }
        }
        if let Ok(buffer) = std::env::var("CLIPSPLIT_END_BUFFER_SECS") {
            if let Ok(b) = buffer.parse() {
                config.end_buffer_secs = b;
            }
        }
        if let Ok(dir) = std::env::var("CLIPSPLIT_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_silence_secs <= 0.0 {
            return Err(ClipsplitError::Config(
                "Minimum silence duration must be greater than 0".to_string(),
            ));
        }

        if self.min_clip_duration_ms < 0.0 {
            return Err(ClipsplitError::Config(
                "Minimum clip duration cannot be negative".to_string(),
            ));
        }

        if self.start_buffer_secs < 0.0 || self.end_buffer_secs < 0.0 {
            return Err(ClipsplitError::Config(
                "Buffers cannot be negative".to_string(),
            ));
        }

        Ok(())
    }

    pub fn detect_config(&self) -> SilenceDetectConfig {
        SilenceDetectConfig {
            noise_threshold_db: self.noise_threshold_db,
            min_silence_secs: self.min_silence_secs,
        }
    }

    pub fn clip_policy(&self) -> ClipPolicy {
        ClipPolicy {
            min_clip_duration_ms: self.min_clip_duration_ms,
            start_buffer_secs: self.start_buffer_secs,
            end_buffer_secs: self.end_buffer_secs,
        }
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("clipsplit").join("config.toml"))
    }
}
