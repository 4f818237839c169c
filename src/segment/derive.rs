use tracing::debug;

use crate::error::{ClipsplitError, Result};

use super::{SilenceLog, TimeInterval};

/// Strategy for turning silence boundaries into talking intervals.
///
/// The production strategy is [`IndexPairing`]; the seam exists so a
/// stricter matcher (stack-based, or timestamp-sorted) can be swapped in
/// without touching callers.
pub trait PairingStrategy {
    fn talking_intervals(&self, log: &SilenceLog, media_duration: f64)
        -> Result<Vec<TimeInterval>>;
}

/// Pairs the i-th `silence_start` with the i-th `silence_end`.
///
/// Assumes the detector reports strictly alternating start/end events in
/// chronological order. When ends run out before starts the cursor stops
/// advancing and later candidates start from the stale silence end, which
/// can produce overlapping intervals. Known fragility, kept as documented
/// behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexPairing;

impl PairingStrategy for IndexPairing {
    fn talking_intervals(
        &self,
        log: &SilenceLog,
        media_duration: f64,
    ) -> Result<Vec<TimeInterval>> {
        let mut intervals = Vec::new();
        let mut last_silence_end = 0.0_f64;

        for (i, &silence_start) in log.starts.iter().enumerate() {
            // Zero- and negative-width candidates are dropped, not clamped.
            if silence_start > last_silence_end {
                intervals.push(TimeInterval {
                    start: last_silence_end,
                    end: silence_start,
                });
            }

            if let Some(&silence_end) = log.ends.get(i) {
                last_silence_end = silence_end;
            }
        }

        if last_silence_end < media_duration {
            intervals.push(TimeInterval {
                start: last_silence_end,
                end: media_duration,
            });
        }

        debug!(
            "Derived {} talking intervals from {} silences",
            intervals.len(),
            log.starts.len()
        );

        if intervals.is_empty() {
            return Err(ClipsplitError::NoTalkingContent(format!(
                "media appears to be continuous silence ({} silence starts over {:.2}s)",
                log.starts.len(),
                media_duration
            )));
        }

        Ok(intervals)
    }
}

/// Derive raw talking intervals with the default index-paired strategy.
pub fn derive_talking_intervals(
    log: &SilenceLog,
    media_duration: f64,
) -> Result<Vec<TimeInterval>> {
    IndexPairing.talking_intervals(log, media_duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(starts: Vec<f64>, ends: Vec<f64>) -> SilenceLog {
        SilenceLog {
            starts,
            ends,
            skipped_tokens: 0,
        }
    }

    fn interval(start: f64, end: f64) -> TimeInterval {
        TimeInterval { start, end }
    }

    #[test]
    fn test_no_silence_yields_whole_media() {
        let intervals = derive_talking_intervals(&log(vec![], vec![]), 10.0).unwrap();
        assert_eq!(intervals, vec![interval(0.0, 10.0)]);
    }

    #[test]
    fn test_empty_log_zero_duration_fails() {
        let result = derive_talking_intervals(&log(vec![], vec![]), 0.0);
        assert!(matches!(result, Err(ClipsplitError::NoTalkingContent(_))));
    }

    #[test]
    fn test_single_silence_in_the_middle() {
        let intervals = derive_talking_intervals(&log(vec![2.0], vec![4.0]), 10.0).unwrap();
        assert_eq!(intervals, vec![interval(0.0, 2.0), interval(4.0, 10.0)]);
    }

    #[test]
    fn test_silence_covering_whole_media_fails() {
        let result = derive_talking_intervals(&log(vec![0.0], vec![10.0]), 10.0);
        assert!(matches!(result, Err(ClipsplitError::NoTalkingContent(_))));
    }

    #[test]
    fn test_leading_silence() {
        let intervals = derive_talking_intervals(&log(vec![0.0], vec![3.0]), 10.0).unwrap();
        assert_eq!(intervals, vec![interval(3.0, 10.0)]);
    }

    #[test]
    fn test_trailing_silence() {
        let intervals = derive_talking_intervals(&log(vec![7.0], vec![10.0]), 10.0).unwrap();
        assert_eq!(intervals, vec![interval(0.0, 7.0)]);
    }

    #[test]
    fn test_adjacent_silences_drop_zero_width_candidate() {
        // Second silence starts exactly where the first one ended.
        let intervals =
            derive_talking_intervals(&log(vec![2.0, 4.0], vec![4.0, 6.0]), 10.0).unwrap();
        assert_eq!(intervals, vec![interval(0.0, 2.0), interval(6.0, 10.0)]);
    }

    #[test]
    fn test_overlapping_silences_drop_negative_width_candidate() {
        let intervals =
            derive_talking_intervals(&log(vec![2.0, 3.0], vec![5.0, 7.0]), 10.0).unwrap();
        assert_eq!(intervals, vec![interval(0.0, 2.0), interval(7.0, 10.0)]);
    }

    #[test]
    fn test_unpaired_end_keeps_stale_cursor() {
        // Two starts, one end: the second candidate and the tail both reuse
        // the cursor from the first silence end. Index pairing is positional,
        // not chronological, and this exact output is relied upon.
        let intervals =
            derive_talking_intervals(&log(vec![2.0, 6.0], vec![4.0]), 10.0).unwrap();
        assert_eq!(
            intervals,
            vec![interval(0.0, 2.0), interval(4.0, 6.0), interval(4.0, 10.0)]
        );
    }

    #[test]
    fn test_extra_ends_never_advance_cursor() {
        let intervals =
            derive_talking_intervals(&log(vec![2.0], vec![4.0, 8.0]), 10.0).unwrap();
        assert_eq!(intervals, vec![interval(0.0, 2.0), interval(4.0, 10.0)]);
    }

    #[test]
    fn test_cursor_at_exact_media_end_emits_no_tail() {
        let intervals = derive_talking_intervals(&log(vec![6.0], vec![10.0]), 10.0).unwrap();
        assert_eq!(intervals, vec![interval(0.0, 6.0)]);
    }
}
