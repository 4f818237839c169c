use tracing::debug;

use super::TimeInterval;

/// Policy applied to raw talking intervals before clip extraction.
#[derive(Debug, Clone)]
pub struct ClipPolicy {
    /// Minimum pre-padding talking duration for an interval to survive, in
    /// milliseconds.
    pub min_clip_duration_ms: f64,

    /// Padding added before each interval, in seconds. The padded start is
    /// clamped at zero.
    pub start_buffer_secs: f64,

    /// Padding added after each interval, in seconds. The padded end is not
    /// clamped against the media duration; FFmpeg stops at end of stream on
    /// its own.
    pub end_buffer_secs: f64,
}

impl Default for ClipPolicy {
    fn default() -> Self {
        Self {
            min_clip_duration_ms: 50.0,
            start_buffer_secs: 1.5,
            end_buffer_secs: 1.5,
        }
    }
}

/// Filter and pad raw talking intervals into the clip plan.
///
/// The keep/drop decision uses the pre-padding duration. Dropping is policy
/// rejection, not an error; an empty result is valid. Padded neighbours may
/// overlap and are deliberately not merged, so clip numbering stays stable
/// for downstream consumers.
pub fn apply_policy(raw: &[TimeInterval], policy: &ClipPolicy) -> Vec<TimeInterval> {
    let mut kept = Vec::new();

    for interval in raw {
        let duration_ms = interval.duration_ms();
        let buffered_start = (interval.start - policy.start_buffer_secs).max(0.0);
        let buffered_end = interval.end + policy.end_buffer_secs;

        if duration_ms > policy.min_clip_duration_ms && buffered_start < buffered_end {
            kept.push(TimeInterval {
                start: buffered_start,
                end: buffered_end,
            });
        } else {
            debug!(
                "Dropping interval {} ({:.0}ms talking time)",
                interval, duration_ms
            );
        }
    }

    debug!("Kept {}/{} intervals after policy", kept.len(), raw.len());

    kept
}
