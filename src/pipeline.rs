use crate::error::{ClipsplitError, Result};
use crate::media::{cut_clips, detect_silence, get_media_duration, ClipFile};
use crate::segment::{
    apply_policy, derive_talking_intervals, parse_silence_log, plan_clips, TimeInterval,
};
use crate::Config;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Options for a split run.
#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    /// Show progress bars.
    pub show_progress: bool,
}

/// Statistics from a split run.
#[derive(Debug, Clone)]
pub struct SplitStats {
    /// Total time taken for the entire pipeline.
    pub total_time: Duration,
    /// Time taken for the silencedetect pass.
    pub detection_time: Duration,
    /// Time taken cutting clips.
    pub cutting_time: Duration,
    /// Media duration in seconds.
    pub media_duration: f64,
    /// Raw talking intervals before policy filtering.
    pub raw_intervals: usize,
    /// Clips written to disk.
    pub clips_written: usize,
    /// Detector log markers whose timestamp failed to parse.
    pub skipped_log_tokens: usize,
}

/// Result of a split run.
#[derive(Debug)]
pub struct SplitResult {
    /// Directory the clips were written to.
    pub output_dir: PathBuf,
    /// Clips written, in plan order.
    pub clips: Vec<ClipFile>,
    /// The policy-adjusted clip plan.
    pub plan: Vec<TimeInterval>,
    /// Run statistics.
    pub stats: SplitStats,
}

/// Probe the media and compute the clip plan without cutting anything.
///
/// Returns the media duration and the policy-adjusted plan. This is the
/// dry-run path behind `--plan`.
pub async fn preview_plan(input: &Path, config: &Config) -> Result<(f64, Vec<TimeInterval>)> {
    if !input.exists() {
        return Err(ClipsplitError::FileNotFound(input.display().to_string()));
    }

    let media_duration = get_media_duration(input)?;
    let log_text = detect_silence(input, &config.detect_config()).await?;
    let plan = plan_clips(&log_text, media_duration, &config.clip_policy())?;

    Ok((media_duration, plan))
}

/// Render a clip plan as pretty-printed JSON.
pub fn plan_to_json(plan: &[TimeInterval]) -> Result<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}

/// Split a media file into per-talking-segment clips.
pub async fn split_media(
    input: &Path,
    config: &Config,
    options: SplitOptions,
) -> Result<SplitResult> {
    let cancelled = Arc::new(AtomicBool::new(false));
    split_media_with_cancel(input, config, options, cancelled).await
}

/// Split with cancellation support. The flag is checked between stages and
/// between individual cuts.
pub async fn split_media_with_cancel(
    input: &Path,
    config: &Config,
    options: SplitOptions,
    cancelled: Arc<AtomicBool>,
) -> Result<SplitResult> {
    let start_time = Instant::now();

    if !input.exists() {
        return Err(ClipsplitError::FileNotFound(input.display().to_string()));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Stage 1: Silence Detection
    // ═══════════════════════════════════════════════════════════════════════
    info!("Stage 1/3: Detecting silence in {:?}", input);
    let detection_start = Instant::now();

    let detection_pb = options.show_progress.then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message("Running silencedetect...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let media_duration = get_media_duration(input)?;
    debug!("Media duration: {:.2}s", media_duration);

    let log_text = detect_silence(input, &config.detect_config()).await?;

    if let Some(pb) = detection_pb {
        pb.finish_with_message(format!(
            "✓ Silence detection complete ({:.1}s of media)",
            media_duration
        ));
    }

    let detection_time = detection_start.elapsed();
    info!(
        "Silence detection complete in {:.2}s",
        detection_time.as_secs_f64()
    );

    if cancelled.load(Ordering::Relaxed) {
        return Err(ClipsplitError::ClipExtraction("Pipeline cancelled".to_string()));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Stage 2: Clip Planning
    // ═══════════════════════════════════════════════════════════════════════
    info!("Stage 2/3: Planning clips");

    let log = parse_silence_log(&log_text);
    let raw = derive_talking_intervals(&log, media_duration)?;
    let plan = apply_policy(&raw, &config.clip_policy());

    info!(
        "Planned {} clips from {} talking intervals",
        plan.len(),
        raw.len()
    );

    if cancelled.load(Ordering::Relaxed) {
        return Err(ClipsplitError::ClipExtraction("Pipeline cancelled".to_string()));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Stage 3: Clip Extraction
    // ═══════════════════════════════════════════════════════════════════════
    info!("Stage 3/3: Cutting {} clips", plan.len());
    let cutting_start = Instant::now();

    let cutting_pb = options.show_progress.then(|| {
        let pb = ProgressBar::new(plan.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.green} {pos}/{len} {msg}")
                .unwrap(),
        );
        pb.set_message("Cutting clips...");
        pb
    });

    let clips = cut_clips(input, &plan, &config.output_dir, &cancelled, |done, _total| {
        if let Some(pb) = &cutting_pb {
            pb.set_position(done as u64);
        }
    })
    .await?;

    if let Some(pb) = cutting_pb {
        pb.finish_with_message(format!("✓ Wrote {} clips", clips.len()));
    }

    let cutting_time = cutting_start.elapsed();

    let stats = SplitStats {
        total_time: start_time.elapsed(),
        detection_time,
        cutting_time,
        media_duration,
        raw_intervals: raw.len(),
        clips_written: clips.len(),
        skipped_log_tokens: log.skipped_tokens,
    };

    Ok(SplitResult {
        output_dir: config.output_dir.clone(),
        clips,
        plan,
        stats,
    })
}

/// Print a summary of the split results.
pub fn print_summary(result: &SplitResult) {
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("                      Clip Splitting Complete                   ");
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("  Output:     {}", result.output_dir.display());
    println!("  Clips:      {}", result.stats.clips_written);
    println!(
        "  Media:      {:.2}s ({} talking intervals)",
        result.stats.media_duration, result.stats.raw_intervals
    );
    if result.stats.skipped_log_tokens > 0 {
        println!(
            "  Skipped:    {} malformed detector log tokens",
            result.stats.skipped_log_tokens
        );
    }
    println!();
    println!("  Timing:");
    println!(
        "    Detect:      {:.2}s",
        result.stats.detection_time.as_secs_f64()
    );
    println!(
        "    Cut:         {:.2}s ({} clips)",
        result.stats.cutting_time.as_secs_f64(),
        result.stats.clips_written
    );
    println!(
        "    Total:       {:.2}s",
        result.stats.total_time.as_secs_f64()
    );
    println!();
    println!("═══════════════════════════════════════════════════════════════");
}
