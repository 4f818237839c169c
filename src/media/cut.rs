use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{ClipsplitError, Result};
use crate::segment::TimeInterval;

/// A clip written to disk from one planned interval.
#[derive(Debug, Clone)]
pub struct ClipFile {
    /// 1-based position in the clip plan. Stable even when earlier spans
    /// were skipped, so numbering can have gaps.
    pub index: usize,
    pub path: PathBuf,
    pub interval: TimeInterval,
}

/// Cut a single clip between interval bounds using stream copy.
pub async fn cut_clip(input: &Path, output: &Path, interval: &TimeInterval) -> Result<()> {
    let start = format!("{:.3}", interval.start);
    let end = format!("{:.3}", interval.end);

    debug!("Cutting {} -> {}", interval, output.display());

    let status = Command::new("ffmpeg")
        .args(["-y", "-i"])
        .arg(input)
        .args(["-ss", &start, "-to", &end, "-c", "copy"])
        .arg(output)
        .status()
        .map_err(|e| ClipsplitError::ClipExtraction(format!("Failed to run FFmpeg: {e}")))?;

    if !status.success() {
        return Err(ClipsplitError::ClipExtraction(format!(
            "FFmpeg failed cutting {} from {}",
            output.display(),
            interval
        )));
    }

    Ok(())
}

/// Cut every planned interval into `clip_<n>.mp4` files, in plan order.
///
/// Numbering follows the plan position; zero-length spans are skipped but
/// still consume their index, leaving a gap. A failed cut aborts the
/// remaining batch, and the cancellation flag is honored between cuts.
pub async fn cut_clips<F>(
    input: &Path,
    plan: &[TimeInterval],
    output_dir: &Path,
    cancelled: &Arc<AtomicBool>,
    mut progress: F,
) -> Result<Vec<ClipFile>>
where
    F: FnMut(usize, usize),
{
    if !input.exists() {
        return Err(ClipsplitError::FileNotFound(input.display().to_string()));
    }

    std::fs::create_dir_all(output_dir).map_err(|e| {
        ClipsplitError::ClipExtraction(format!("Failed to create output directory: {e}"))
    })?;

    let mut clips = Vec::new();

    for (i, interval) in plan.iter().enumerate() {
        let index = i + 1;

        if cancelled.load(Ordering::Relaxed) {
            return Err(ClipsplitError::ClipExtraction(
                "Cut batch cancelled".to_string(),
            ));
        }

        // A zero-length span is skipped but still consumes its index, so
        // numbering can have gaps.
        if interval.start == interval.end {
            debug!("Skipping zero-length clip_{index}");
            progress(index, plan.len());
            continue;
        }

        let path = output_dir.join(format!("clip_{index}.mp4"));
        cut_clip(input, &path, interval).await?;

        info!("Saved clip_{} [{}]", index, interval);

        clips.push(ClipFile {
            index,
            path,
            interval: *interval,
        });
        progress(index, plan.len());
    }

    info!("Wrote {} clips to {}", clips.len(), output_dir.display());
    Ok(clips)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cut_clips_input_not_found() {
        let cancelled = Arc::new(AtomicBool::new(false));
        let plan = vec![TimeInterval {
            start: 0.0,
            end: 1.0,
        }];

        let result = cut_clips(
            Path::new("/nonexistent/file.mp4"),
            &plan,
            Path::new("/tmp/clips"),
            &cancelled,
            |_, _| {},
        )
        .await;

        assert!(matches!(result, Err(ClipsplitError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_cut_clips_empty_plan() {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("input.mp4");
        std::fs::write(&input, b"").unwrap();
        let cancelled = Arc::new(AtomicBool::new(false));

        let clips = cut_clips(&input, &[], temp.path(), &cancelled, |_, _| {})
            .await
            .unwrap();
        assert!(clips.is_empty());
    }

    #[tokio::test]
    async fn test_cut_clips_cancelled_before_first_cut() {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("input.mp4");
        std::fs::write(&input, b"").unwrap();
        let cancelled = Arc::new(AtomicBool::new(true));
        let plan = vec![TimeInterval {
            start: 0.0,
            end: 1.0,
        }];

        let result = cut_clips(&input, &plan, temp.path(), &cancelled, |_, _| {}).await;
        assert!(matches!(result, Err(ClipsplitError::ClipExtraction(_))));
    }

    #[tokio::test]
    async fn test_cut_clips_skips_zero_length_span_with_numbering_gap() {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("input.mp4");
        std::fs::write(&input, b"").unwrap();
        let cancelled = Arc::new(AtomicBool::new(false));

        // Only the degenerate span is reached; it is skipped without
        // touching FFmpeg, so the call succeeds even with a fake input.
        let plan = vec![TimeInterval {
            start: 2.0,
            end: 2.0,
        }];
        let mut seen = Vec::new();

        let clips = cut_clips(&input, &plan, temp.path(), &cancelled, |i, total| {
            seen.push((i, total));
        })
        .await
        .unwrap();

        assert!(clips.is_empty());
        assert_eq!(seen, vec![(1, 1)]);
    }
}
