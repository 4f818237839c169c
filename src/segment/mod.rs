pub mod derive;
pub mod parse;
pub mod policy;

pub use derive::{derive_talking_intervals, IndexPairing, PairingStrategy};
pub use parse::{parse_silence_log, SilenceLog};
pub use policy::{apply_policy, ClipPolicy};

use serde::Serialize;

use crate::error::Result;

/// A time span in the source media, in seconds.
///
/// Spans derived from silence gaps are "raw" talking intervals; after the
/// minimum-duration filter and padding they become the clip plan handed to
/// the cut step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeInterval {
    pub start: f64,
    pub end: f64,
}

impl TimeInterval {
    pub fn duration_secs(&self) -> f64 {
        self.end - self.start
    }

    pub fn duration_ms(&self) -> f64 {
        (self.end - self.start) * 1000.0
    }
}

impl std::fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}s..{:.2}s", self.start, self.end)
    }
}

/// Turn a silence detector log into the final clip plan.
///
/// Pure function of its inputs: parses the log, derives raw talking
/// intervals against `media_duration`, and applies `policy`. Fails with
/// `NoTalkingContent` when no raw interval can be derived; an empty plan
/// after policy filtering is not an error.
pub fn plan_clips(
    log_text: &str,
    media_duration: f64,
    policy: &ClipPolicy,
) -> Result<Vec<TimeInterval>> {
    let log = parse_silence_log(log_text);
    let raw = derive_talking_intervals(&log, media_duration)?;
    Ok(apply_policy(&raw, policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_duration() {
        let interval = TimeInterval {
            start: 1.5,
            end: 4.0,
        };
        assert!((interval.duration_secs() - 2.5).abs() < 1e-9);
        assert!((interval.duration_ms() - 2500.0).abs() < 1e-6);
    }

    #[test]
    fn test_interval_display_two_decimals() {
        let interval = TimeInterval {
            start: 0.5,
            end: 6.505,
        };
        assert_eq!(interval.to_string(), "0.50s..6.50s");
    }

    #[test]
    fn test_plan_clips_end_to_end() {
        let log = "silence_start: 10.0\nsilence_end: 14.0 | silence_duration: 4.0\n";
        let policy = ClipPolicy::default();
        let plan = plan_clips(log, 30.0, &policy).unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].start, 0.0);
        assert!((plan[0].end - 11.5).abs() < 1e-9);
        assert!((plan[1].start - 12.5).abs() < 1e-9);
        assert!((plan[1].end - 31.5).abs() < 1e-9);
    }

    #[test]
    fn test_plan_clips_is_deterministic() {
        let log = "silence_start: 2.0\nsilence_end: 4.0\nsilence_start: 6.0\n";
        let policy = ClipPolicy::default();

        let first = plan_clips(log, 10.0, &policy).unwrap();
        let second = plan_clips(log, 10.0, &policy).unwrap();
        assert_eq!(first, second);
    }
}
