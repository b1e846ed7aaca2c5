use chrono::{Month, Weekday};

use super::{mode, Mode, Stat};
use crate::data::filter::{ActiveView, FilterSpec};

/// Most frequent times of travel.
///
/// `month` and `day` are `None` when the selection already pins that
/// dimension, since the mode would just echo the filter back.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    pub month: Option<Stat<Mode<Month>>>,
    pub day: Option<Stat<Mode<Weekday>>>,
    /// Hour of day, 0–23.
    pub hour: Stat<Mode<u32>>,
}

pub fn time_stats(view: &ActiveView<'_>, spec: &FilterSpec) -> TimeStats {
    let month = spec
        .month
        .is_none()
        .then(|| Stat::from_option(mode(view.iter().map(|r| r.month()))));
    let day = spec
        .day
        .is_none()
        .then(|| Stat::from_option(mode(view.iter().map(|r| r.day_of_week()))));
    let hour = Stat::from_option(mode(view.iter().map(|r| r.hour())));

    TimeStats { month, day, hour }
}
