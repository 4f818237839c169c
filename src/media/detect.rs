use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::error::{ClipsplitError, Result};

/// Settings for the FFmpeg silencedetect pass.
#[derive(Debug, Clone)]
pub struct SilenceDetectConfig {
    /// Noise tolerance in dB; audio below this level counts as silence.
    pub noise_threshold_db: f64,

    /// Minimum silence duration in seconds before a boundary is reported.
    pub min_silence_secs: f64,
}

impl Default for SilenceDetectConfig {
    fn default() -> Self {
        Self {
            noise_threshold_db: -40.0,
            min_silence_secs: 2.0,
        }
    }
}

/// Check if FFmpeg is installed and accessible.
pub fn check_ffmpeg() -> Result<()> {
    let output = Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map_err(|e| {
            ClipsplitError::SilenceDetection(format!(
                "FFmpeg not found. Please install FFmpeg and ensure it's in your PATH. Error: {e}"
            ))
        })?;

    if !output.status.success() {
        return Err(ClipsplitError::SilenceDetection(
            "FFmpeg check failed".to_string(),
        ));
    }

    debug!("FFmpeg is available");
    Ok(())
}

/// Run FFmpeg's silencedetect filter over the input and return its log.
///
/// The filter reports boundaries on stderr while the decoded media is
/// discarded through the null muxer. The raw stderr text is returned for
/// the log parser; nothing is interpreted here.
pub async fn detect_silence(input: &Path, config: &SilenceDetectConfig) -> Result<String> {
    check_ffmpeg()?;

    if !input.exists() {
        return Err(ClipsplitError::FileNotFound(input.display().to_string()));
    }

    let filter = format!(
        "silencedetect=noise={}dB:d={}",
        config.noise_threshold_db, config.min_silence_secs
    );

    info!(
        "Detecting silence in {} (threshold {}dB, min {}s)",
        input.display(),
        config.noise_threshold_db,
        config.min_silence_secs
    );

    let output = Command::new("ffmpeg")
        .args(["-hide_banner", "-i"])
        .arg(input)
        .args(["-af", &filter, "-f", "null", "-"])
        .output()
        .map_err(|e| ClipsplitError::SilenceDetection(format!("Failed to run FFmpeg: {e}")))?;

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(ClipsplitError::SilenceDetection(format!(
            "FFmpeg silencedetect failed: {}",
            stderr.lines().last().unwrap_or("unknown error")
        )));
    }

    Ok(stderr)
}
