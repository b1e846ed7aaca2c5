use std::fmt;

use chrono::{Month, Weekday};

use super::model::{parse_month, parse_weekday, City, Dataset, TripRecord};
use crate::error::SelectionError;

// ---------------------------------------------------------------------------
// FilterSpec – one session's selection
// ---------------------------------------------------------------------------

/// `None` on a dimension means "no filter". Month and day combine with AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub city: City,
    pub month: Option<Month>,
    pub day: Option<Weekday>,
}

impl FilterSpec {
    pub fn new(city: City) -> Self {
        FilterSpec {
            city,
            month: None,
            day: None,
        }
    }

    /// Build from prompt-style names, where `"all"` (any case) lifts the
    /// filter on that dimension.
    pub fn from_names(city: &str, month: &str, day: &str) -> Result<Self, SelectionError> {
        let is_all = |s: &str| s.trim().eq_ignore_ascii_case("all");
        Ok(FilterSpec {
            city: city.parse()?,
            month: if is_all(month) { None } else { Some(parse_month(month)?) },
            day: if is_all(day) { None } else { Some(parse_weekday(day)?) },
        })
    }

    pub fn with_month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    pub fn with_day(mut self, day: Weekday) -> Self {
        self.day = Some(day);
        self
    }

    /// Whether a single record passes both predicates.
    pub fn matches(&self, record: &TripRecord) -> bool {
        self.month.map_or(true, |m| record.month() == m)
            && self.day.map_or(true, |d| record.day_of_week() == d)
    }
}

// ---------------------------------------------------------------------------
// ActiveView – read-only filtered window onto a Dataset
// ---------------------------------------------------------------------------

/// Row indices into a [`Dataset`] that passed a [`FilterSpec`], in
/// dataset order. The dataset itself is never touched.
#[derive(Clone)]
pub struct ActiveView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> ActiveView<'a> {
    /// A view over every row.
    pub fn all(dataset: &'a Dataset) -> Self {
        ActiveView {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Positions of the visible rows within the dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The `i`-th visible record.
    pub fn get(&self, i: usize) -> Option<&'a TripRecord> {
        self.indices.get(i).map(|&idx| &self.dataset.records[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TripRecord> + '_ {
        let records = &self.dataset.records;
        self.indices.iter().map(move |&idx| &records[idx])
    }

    /// Narrow this view further.
    pub fn refine(&self, spec: &FilterSpec) -> ActiveView<'a> {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&idx| spec.matches(&self.dataset.records[idx]))
            .collect();
        ActiveView {
            dataset: self.dataset,
            indices,
        }
    }
}

impl PartialEq for ActiveView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dataset, other.dataset) && self.indices == other.indices
    }
}

impl fmt::Debug for ActiveView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveView")
            .field("rows", &self.indices.len())
            .field("of", &self.dataset.len())
            .finish()
    }
}

/// Return indices of records that pass `spec`.
pub fn filtered_indices(dataset: &Dataset, spec: &FilterSpec) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| spec.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Filter `dataset` by `spec`. Zero matches is an empty view, not an error.
pub fn apply<'a>(dataset: &'a Dataset, spec: &FilterSpec) -> ActiveView<'a> {
    let indices = filtered_indices(dataset, spec);
    log::debug!(
        "filter {:?}/{:?} kept {} of {} rows",
        spec.month,
        spec.day,
        indices.len(),
        dataset.len()
    );
    ActiveView { dataset, indices }
}
