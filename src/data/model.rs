use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};

use crate::error::SelectionError;

// ---------------------------------------------------------------------------
// City – the three published trip logs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// File name without extension, e.g. `new_york_city`.
    pub fn file_stem(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new_york_city",
            City::Washington => "washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = SelectionError;

    /// Accepts the display name or the file stem, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        City::ALL
            .into_iter()
            .find(|c| {
                c.name().eq_ignore_ascii_case(wanted) || c.file_stem().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| SelectionError::UnknownCity(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Month / weekday names
// ---------------------------------------------------------------------------

/// Full English name, e.g. `Wednesday`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a month by name (`march`, `Mar`) or number (`3`).
pub fn parse_month(s: &str) -> Result<Month, SelectionError> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u8>() {
        return Month::try_from(n).map_err(|_| SelectionError::UnknownMonth(s.to_string()));
    }
    s.parse::<Month>()
        .map_err(|_| SelectionError::UnknownMonth(s.to_string()))
}

/// Parse a day of week by name, ignoring case.
pub fn parse_weekday(s: &str) -> Result<Weekday, SelectionError> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| SelectionError::UnknownDay(s.to_string()))
}

// ---------------------------------------------------------------------------
// TripRecord – one row of a trip log
// ---------------------------------------------------------------------------

/// A single trip. Optional fields are `None` both when the column is
/// missing from the source and when the cell is empty; [`Capabilities`]
/// tells the two apart.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    /// Seconds.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    month: Month,
    day_of_week: Weekday,
}

impl TripRecord {
    /// Build a record, deriving month and weekday from `start_time`.
    pub fn new(
        start_time: NaiveDateTime,
        trip_duration: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        let month = Month::try_from(start_time.month() as u8).unwrap_or(Month::January);
        TripRecord {
            start_time,
            end_time: None,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month,
            day_of_week: start_time.weekday(),
        }
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn day_of_week(&self) -> Weekday {
        self.day_of_week
    }

    /// Hour of day (0–23) of the start time.
    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }
}

// ---------------------------------------------------------------------------
// Capabilities – which optional columns a source carries
// ---------------------------------------------------------------------------

/// Per-dataset structural flags, computed once at load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub has_end_time: bool,
    pub has_gender: bool,
    pub has_birth_year: bool,
    /// At least one record is of user type `Dependent`.
    pub has_dependent_type: bool,
}

/// Optional columns found in a source header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionalColumns {
    pub end_time: bool,
    pub gender: bool,
    pub birth_year: bool,
}

impl OptionalColumns {
    pub const ALL: OptionalColumns = OptionalColumns {
        end_time: true,
        gender: true,
        birth_year: true,
    };
}

// ---------------------------------------------------------------------------
// Dataset – a fully loaded trip log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Dataset {
    /// File the records were read from, if any.
    pub source: Option<PathBuf>,
    pub records: Vec<TripRecord>,
    /// Data rows in the source, including any the loader skipped.
    pub original_size: usize,
    /// Rows dropped under [`TimestampPolicy::Skip`](crate::config::TimestampPolicy::Skip).
    pub skipped_rows: usize,
    pub capabilities: Capabilities,
}

impl Dataset {
    /// Build a dataset and its capability flags from parsed records.
    pub fn from_records(records: Vec<TripRecord>, columns: OptionalColumns) -> Self {
        let has_dependent_type = records
            .iter()
            .any(|r| r.user_type.as_deref() == Some("Dependent"));
        let capabilities = Capabilities {
            has_end_time: columns.end_time,
            has_gender: columns.gender,
            has_birth_year: columns.birth_year,
            has_dependent_type,
        };
        Dataset {
            source: None,
            original_size: records.len(),
            skipped_rows: 0,
            records,
            capabilities,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
