use anyhow::{Context, Result};
use clap::Parser;
use clipsplit::config::Config;
use clipsplit::pipeline::{
    plan_to_json, preview_plan, print_summary, split_media_with_cancel, SplitOptions,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "clipsplit")]
#[command(version, about = "Silence-based video clip splitting")]
#[command(long_about = "Split a video into per-talking-segment clips by detecting silence with FFmpeg.")]
struct Cli {
    /// Input video/audio file
    input: PathBuf,

    /// Output directory for clips (defaults to ./output/clips)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Silence detection threshold in dB (e.g., -40)
    #[arg(short = 't', long, allow_negative_numbers = true)]
    threshold: Option<f64>,

    /// Minimum silence duration in seconds
    #[arg(short = 'd', long)]
    silence_duration: Option<f64>,

    /// Minimum talking duration for a clip, in milliseconds
    #[arg(long)]
    min_clip_ms: Option<f64>,

    /// Padding before each clip, in seconds
    #[arg(long)]
    start_buffer: Option<f64>,

    /// Padding after each clip, in seconds
    #[arg(long)]
    end_buffer: Option<f64>,

    /// Print the clip plan as JSON and exit without cutting
    #[arg(long)]
    plan: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ref dir) = cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(threshold) = cli.threshold {
        config.noise_threshold_db = threshold;
    }
    if let Some(duration) = cli.silence_duration {
        config.min_silence_secs = duration;
    }
    if let Some(min_clip) = cli.min_clip_ms {
        config.min_clip_duration_ms = min_clip;
    }
    if let Some(buffer) = cli.start_buffer {
        config.start_buffer_secs = buffer;
    }
    if let Some(buffer) = cli.end_buffer {
        config.end_buffer_secs = buffer;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Validate input file exists
    if !cli.input.exists() {
        anyhow::bail!("Input file not found: {}", cli.input.display());
    }

    // Load configuration and apply CLI overrides
    let mut config = Config::load().context("Failed to load configuration")?;
    apply_cli_overrides(&mut config, &cli);
    config.validate().context("Configuration validation failed")?;

    info!("Input:      {}", cli.input.display());
    info!("Output:     {}", config.output_dir.display());
    info!(
        "Detection:  {}dB / {}s minimum silence",
        config.noise_threshold_db, config.min_silence_secs
    );
    info!(
        "Policy:     {}ms minimum clip, {}s/{}s buffers",
        config.min_clip_duration_ms, config.start_buffer_secs, config.end_buffer_secs
    );

    if cli.plan {
        let (media_duration, plan) = preview_plan(&cli.input, &config)
            .await
            .context("Failed to compute clip plan")?;

        info!("Media duration: {:.2}s, {} planned clips", media_duration, plan.len());
        println!("{}", plan_to_json(&plan)?);
        return Ok(());
    }

    // Ctrl+C sets the cancellation flag; the cut batch stops at the next
    // clip boundary.
    let cancelled = Arc::new(AtomicBool::new(false));
    let cancel_flag = cancelled.clone();
    ctrlc::set_handler(move || {
        cancel_flag.store(true, Ordering::Relaxed);
    })
    .context("Failed to install Ctrl+C handler")?;

    let options = SplitOptions {
        show_progress: true,
    };

    let result = split_media_with_cancel(&cli.input, &config, options, cancelled)
        .await
        .context("Failed to split media")?;

    print_summary(&result);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_apply_cli_overrides() {
        let mut config = Config::default();
        let cli = Cli::parse_from([
            "clipsplit",
            "input.mp4",
            "--threshold",
            "-35",
            "--silence-duration",
            "0.35",
            "--min-clip-ms",
            "100",
            "--start-buffer",
            "0.5",
            "--end-buffer",
            "2.0",
            "--output-dir",
            "/tmp/clips",
        ]);

        apply_cli_overrides(&mut config, &cli);

        assert_eq!(config.noise_threshold_db, -35.0);
        assert_eq!(config.min_silence_secs, 0.35);
        assert_eq!(config.min_clip_duration_ms, 100.0);
        assert_eq!(config.start_buffer_secs, 0.5);
        assert_eq!(config.end_buffer_secs, 2.0);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/clips"));
    }

    #[test]
    fn test_cli_defaults_leave_config_untouched() {
        let mut config = Config::default();
        let expected = Config::default();
        let cli = Cli::parse_from(["clipsplit", "input.mp4"]);

        apply_cli_overrides(&mut config, &cli);

        assert_eq!(config.noise_threshold_db, expected.noise_threshold_db);
        assert_eq!(config.output_dir, expected.output_dir);
    }
}
