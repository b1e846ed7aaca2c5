use crate::data::filter::ActiveView;

/// Total and mean trip duration, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    pub trips: usize,
    pub total_secs: f64,
    /// `None` for an empty view.
    pub mean_secs: Option<f64>,
}

pub fn duration_stats(view: &ActiveView<'_>) -> DurationStats {
    let trips = view.len();
    let total_secs: f64 = view.iter().map(|r| r.trip_duration).sum();
    let mean_secs = (trips > 0).then(|| total_secs / trips as f64);

    DurationStats {
        trips,
        total_secs,
        mean_secs,
    }
}
