use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Named constants
// ---------------------------------------------------------------------------

/// Raw records shown per page.
pub const PAGE_SIZE: usize = 5;

/// Durations at or above this many seconds are reported in hours.
pub const HOUR_THRESHOLD_SECS: f64 = 3600.0;

pub const DEFAULT_DATA_DIR: &str = ".";

/// Months offered by the interactive prompt. The published trip logs cover
/// the first half of the year only.
pub const PROMPT_MONTHS: [&str; 6] = ["January", "February", "March", "April", "May", "June"];

// ---------------------------------------------------------------------------
// Runtime settings
// ---------------------------------------------------------------------------

/// What the loader does with a row whose start time cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampPolicy {
    /// Abort the whole load with `MalformedTimestamp`.
    #[default]
    Strict,
    /// Drop the row, log a warning and count it in `Dataset::skipped_rows`.
    Skip,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub page_size: usize,
    pub hour_threshold_secs: f64,
    pub timestamp_policy: TimestampPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            page_size: PAGE_SIZE,
            hour_threshold_secs: HOUR_THRESHOLD_SECS,
            timestamp_policy: TimestampPolicy::default(),
        }
    }
}
