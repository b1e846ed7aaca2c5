use std::fmt;

use super::{mode, Mode, Stat};
use crate::data::filter::ActiveView;

/// A start → end station pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trip {
    pub start: String,
    pub end: String,
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub start_station: Mode<String>,
    pub end_station: Mode<String>,
    pub trip: Mode<Trip>,
}

/// Most popular stations and trip. [`Stat::NoData`] on an empty view.
pub fn station_stats(view: &ActiveView<'_>) -> Stat<StationStats> {
    let start = mode(view.iter().map(|r| r.start_station.as_str()));
    let end = mode(view.iter().map(|r| r.end_station.as_str()));
    let trip = mode(
        view.iter()
            .map(|r| (r.start_station.as_str(), r.end_station.as_str())),
    );

    match (start, end, trip) {
        (Some(start), Some(end), Some(trip)) => Stat::Available(StationStats {
            start_station: start.map(str::to_string),
            end_station: end.map(str::to_string),
            trip: trip.map(|(s, e)| Trip {
                start: s.to_string(),
                end: e.to_string(),
            }),
        }),
        _ => Stat::NoData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, OptionalColumns, TripRecord};
    use chrono::NaiveDate;

    fn dataset(pairs: &[(&str, &str)]) -> Dataset {
        let t = NaiveDate::from_ymd_opt(2017, 4, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let records = pairs
            .iter()
            .map(|(s, e)| TripRecord::new(t, 60.0, *s, *e))
            .collect();
        Dataset::from_records(records, OptionalColumns::default())
    }

    #[test]
    fn most_popular_stations_and_trip() {
        let ds = dataset(&[
            ("Canal St", "Clark St"),
            ("Canal St", "Lake St"),
            ("Wells St", "Lake St"),
            ("Canal St", "Lake St"),
        ]);
        let stats = station_stats(&ActiveView::all(&ds));
        let stats = stats.available().unwrap();

        assert_eq!(stats.start_station.value, "Canal St");
        assert_eq!(stats.start_station.count, 3);
        assert_eq!(stats.end_station.value, "Lake St");
        assert_eq!(stats.trip.value.to_string(), "Canal St to Lake St");
        assert_eq!(stats.trip.count, 2);
    }

    #[test]
    fn ties_resolve_to_first_encountered_station() {
        let ds = dataset(&[
            ("Wells St", "X"),
            ("Canal St", "Y"),
            ("Canal St", "X"),
            ("Wells St", "Y"),
        ]);
        for _ in 0..20 {
            let stats = station_stats(&ActiveView::all(&ds));
            let stats = stats.available().unwrap();
            assert_eq!(stats.start_station.value, "Wells St");
            assert_eq!(stats.end_station.value, "X");
            assert_eq!(stats.trip.value.start, "Wells St");
            assert_eq!(stats.trip.value.end, "X");
        }
    }

    #[test]
    fn empty_view_has_no_data() {
        let ds = dataset(&[]);
        assert_eq!(station_stats(&ActiveView::all(&ds)), Stat::NoData);
    }
}
