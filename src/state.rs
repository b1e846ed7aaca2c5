use chrono::{Month, Weekday};

use crate::config::Settings;
use crate::data::filter::{apply, ActiveView, FilterSpec};
use crate::data::loader::load_city;
use crate::data::model::{City, Dataset};
use crate::error::LoadError;
use crate::format::percentage;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// One analysis session: a loaded city and the selection applied to it.
/// Restarting drops the session and loads afresh.
#[derive(Debug)]
pub struct Session {
    pub dataset: Dataset,
    pub spec: FilterSpec,
}

impl Session {
    /// Load `spec.city` from the configured data directory.
    pub fn load(spec: FilterSpec, settings: &Settings) -> Result<Self, LoadError> {
        let dataset = load_city(spec.city, settings)?;
        Ok(Session { dataset, spec })
    }

    pub fn new(dataset: Dataset, spec: FilterSpec) -> Self {
        Session { dataset, spec }
    }

    /// The dataset filtered by the session's selection.
    pub fn view(&self) -> ActiveView<'_> {
        apply(&self.dataset, &self.spec)
    }

    pub fn summary(&self, view: &ActiveView<'_>) -> QuerySummary {
        QuerySummary {
            city: self.spec.city,
            month: self.spec.month,
            day: self.spec.day,
            trips: view.len(),
            original_size: self.dataset.original_size,
            skipped_rows: self.dataset.skipped_rows,
        }
    }
}

/// What the user asked for and how much of the city it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySummary {
    pub city: City,
    pub month: Option<Month>,
    pub day: Option<Weekday>,
    pub trips: usize,
    pub original_size: usize,
    /// Source rows the loader dropped for an unreadable start time.
    pub skipped_rows: usize,
}

impl QuerySummary {
    /// Filtered trips as a share of the whole city, e.g. `"12.5%"`.
    pub fn share(&self) -> Option<String> {
        percentage(self.trips, self.original_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{OptionalColumns, TripRecord};
    use chrono::NaiveDate;

    #[test]
    fn summary_counts_against_original_size() {
        let records = (1..=8)
            .map(|d| {
                let t = NaiveDate::from_ymd_opt(2017, 1, d)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap();
                TripRecord::new(t, 60.0, "A", "B")
            })
            .collect();
        let mut ds = Dataset::from_records(records, OptionalColumns::default());
        // two rows dropped at load still count toward the city's total
        ds.original_size = 10;
        ds.skipped_rows = 2;

        let session = Session::new(ds, FilterSpec::new(City::Chicago).with_day(Weekday::Sun));
        let view = session.view();
        let summary = session.summary(&view);

        // Jan 1 and Jan 8 2017 were Sundays.
        assert_eq!(summary.trips, 2);
        assert_eq!(summary.original_size, 10);
        assert_eq!(summary.skipped_rows, 2);
        assert_eq!(summary.share().as_deref(), Some("20.0%"));
    }
}
