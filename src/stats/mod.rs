//! Aggregation engine: statistic groups over an [`ActiveView`].
//!
//! ```text
//!   ActiveView
//!       │
//!       ├── time      most frequent month / weekday / hour
//!       ├── station   most frequent start, end, start→end pair
//!       ├── duration  total and mean trip time
//!       └── users     user-type counts, gender and birth-year breakdowns
//! ```
//!
//! Every group is independent and tolerates an empty view. Absent columns
//! come back as [`Stat::Unavailable`], empty views as [`Stat::NoData`].
//!
//! [`ActiveView`]: crate::data::filter::ActiveView

pub mod duration;
pub mod mode;
pub mod station;
pub mod time;
pub mod users;

pub use duration::{duration_stats, DurationStats};
pub use mode::{mode, Mode};
pub use station::{station_stats, StationStats, Trip};
pub use time::{time_stats, TimeStats};
pub use users::{demographic_stats, user_type_stats, BirthYearStats, Breakdown, DemographicStats};

/// Outcome of one statistic.
#[derive(Debug, Clone, PartialEq)]
pub enum Stat<T> {
    Available(T),
    /// The view has no rows to compute over.
    NoData,
    /// The dataset lacks the column this statistic needs.
    Unavailable,
}

impl<T> Stat<T> {
    /// `None` becomes [`Stat::NoData`].
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Stat::NoData, Stat::Available)
    }

    pub fn available(&self) -> Option<&T> {
        match self {
            Stat::Available(v) => Some(v),
            _ => None,
        }
    }
}
