//! File stamps and run timing

use chrono::{DateTime, Local};
use std::time::Instant;
use tracing::info;

/// Format used for file stamps, e.g. `2024-04-03-14-05-09-123456`
const STAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S-%6f";

/// Current local time as a file-name-safe stamp
pub fn file_stamp() -> String {
    stamp_for(&Local::now())
}

/// File-name-safe stamp for a given instant
pub fn stamp_for(time: &DateTime<Local>) -> String {
    time.format(STAMP_FORMAT).to_string()
}

/// Measures how long a named run takes and logs it when finished
#[derive(Debug)]
pub struct Stopwatch {
    label: String,
    started: Instant,
}

impl Stopwatch {
    /// Start timing a run
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            started: Instant::now(),
        }
    }

    /// Minutes elapsed since the stopwatch was started
    pub fn elapsed_minutes(&self) -> f64 {
        self.started.elapsed().as_secs_f64() / 60.0
    }

    /// Stop timing and log the elapsed time, returning it in minutes
    pub fn finish(self) -> f64 {
        let minutes = self.elapsed_minutes();
        info!("{} executed in {minutes:.3} minutes.", self.label);
        minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stamp_for_known_time() {
        let time = Local
            .with_ymd_and_hms(2024, 4, 3, 14, 5, 9)
            .single()
            .expect("unambiguous local time");
        assert_eq!(stamp_for(&time), "2024-04-03-14-05-09-000000");
    }

    #[test]
    fn test_file_stamp_is_file_name_safe() {
        let stamp = file_stamp();
        assert!(!stamp.contains(':'));
        assert!(!stamp.contains('.'));
        assert!(!stamp.contains(' '));
        assert_eq!(stamp.split('-').count(), 7);
    }

    #[test]
    fn test_stopwatch_elapsed_is_non_negative() {
        let stopwatch = Stopwatch::start("unit");
        assert!(stopwatch.elapsed_minutes() >= 0.0);
        assert!(stopwatch.finish() >= 0.0);
    }
}
