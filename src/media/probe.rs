use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{ClipsplitError, Result};

/// Check if FFprobe is installed and accessible.
pub fn check_ffprobe() -> Result<()> {
    let output = Command::new("ffprobe")
        .arg("-version")
        .output()
        .map_err(|e| {
            ClipsplitError::MediaProbe(format!(
                "FFprobe not found. Please install FFmpeg (includes FFprobe). Error: {e}"
            ))
        })?;

    if !output.status.success() {
        return Err(ClipsplitError::MediaProbe(
            "FFprobe check failed".to_string(),
        ));
    }

    debug!("FFprobe is available");
    Ok(())
}

/// Get the media duration in seconds using FFprobe.
pub fn get_media_duration(input: &Path) -> Result<f64> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(input)
        .output()
        .map_err(|e| ClipsplitError::MediaProbe(format!("Failed to run FFprobe: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ClipsplitError::MediaProbe(format!(
            "FFprobe failed: {stderr}"
        )));
    }

    let duration_str = String::from_utf8_lossy(&output.stdout);
    let duration_secs: f64 = duration_str.trim().parse().map_err(|e| {
        ClipsplitError::MediaProbe(format!(
            "Failed to parse duration '{}': {e}",
            duration_str.trim()
        ))
    })?;

    if duration_secs <= 0.0 {
        return Err(ClipsplitError::MediaProbe(format!(
            "Media has non-positive duration: {duration_secs}"
        )));
    }

    debug!("Media duration: {:.2}s", duration_secs);
    Ok(duration_secs)
}
