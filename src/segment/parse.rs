use regex::Regex;
use tracing::debug;

/// Silence boundary timestamps scraped from a detector log, in
/// line-appearance order. No sorting is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SilenceLog {
    /// Timestamps of `silence_start:` markers, seconds.
    pub starts: Vec<f64>,
    /// Timestamps of `silence_end:` markers, seconds.
    pub ends: Vec<f64>,
    /// Markers whose following token failed to parse as a number.
    pub skipped_tokens: usize,
}

impl SilenceLog {
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty() && self.ends.is_empty()
    }
}

/// Scrape `silence_start:` / `silence_end:` boundary events out of FFmpeg
/// silencedetect output.
///
/// The timestamp is the first whitespace-delimited token after the marker,
/// confined to the marker's line. Lines without a marker and markers whose
/// token does not parse as a number are skipped, never an error.
pub fn parse_silence_log(text: &str) -> SilenceLog {
    let marker_re = Regex::new(r"silence_(start|end):\s*(\S+)").expect("Invalid regex");

    let mut log = SilenceLog::default();

    for line in text.lines() {
        for cap in marker_re.captures_iter(line) {
            let timestamp: f64 = match cap[2].parse() {
                Ok(ts) => ts,
                Err(_) => {
                    debug!("Skipping unparseable silence timestamp: {}", &cap[0]);
                    log.skipped_tokens += 1;
                    continue;
                }
            };

            match &cap[1] {
                "start" => log.starts.push(timestamp),
                _ => log.ends.push(timestamp),
            }
        }
    }

    debug!(
        "Parsed silence log: {} starts, {} ends, {} skipped",
        log.starts.len(),
        log.ends.len(),
        log.skipped_tokens
    );

    log
}
