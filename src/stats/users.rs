use super::{mode, Mode, Stat};
use crate::data::filter::ActiveView;

/// User types always listed, even at zero.
pub const KNOWN_USER_TYPES: [&str; 3] = ["Subscriber", "Customer", "Dependent"];

/// Genders always listed, even at zero.
pub const KNOWN_GENDERS: [&str; 2] = ["Male", "Female"];

// ---------------------------------------------------------------------------
// Breakdown – counts per category
// ---------------------------------------------------------------------------

/// Category counts plus rows where the value is missing.
///
/// Known categories come first in their fixed order; any other value seen
/// follows in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    pub counts: Vec<(String, usize)>,
    pub missing: usize,
}

impl Breakdown {
    fn tally<'r>(values: impl Iterator<Item = Option<&'r str>>, known: &[&str]) -> Self {
        let mut counts: Vec<(String, usize)> = known.iter().map(|k| (k.to_string(), 0)).collect();
        let mut missing = 0;

        for v in values {
            match v {
                None => missing += 1,
                Some(v) => match counts.iter_mut().find(|(k, _)| k == v) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((v.to_string(), 1)),
                },
            }
        }

        Breakdown { counts, missing }
    }

    /// Count for `category`; zero if it never occurred.
    pub fn count(&self, category: &str) -> usize {
        self.counts
            .iter()
            .find(|(k, _)| k == category)
            .map_or(0, |(_, n)| *n)
    }
}

/// Counts per user type. An empty view yields all-zero counts.
pub fn user_type_stats(view: &ActiveView<'_>) -> Breakdown {
    Breakdown::tally(view.iter().map(|r| r.user_type.as_deref()), &KNOWN_USER_TYPES)
}

// ---------------------------------------------------------------------------
// Demographics – gender and birth year
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BirthYearStats {
    /// `None` when every row in the view lacks a birth year.
    pub earliest: Option<i32>,
    pub latest: Option<i32>,
    pub most_common: Option<Mode<i32>>,
    pub missing: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemographicStats {
    pub gender: Stat<Breakdown>,
    pub birth_year: Stat<BirthYearStats>,
}

/// Gender and birth-year breakdowns. Columns the dataset lacks come back
/// as [`Stat::Unavailable`] regardless of the view.
pub fn demographic_stats(view: &ActiveView<'_>) -> DemographicStats {
    let caps = view.dataset().capabilities;

    let gender = if !caps.has_gender {
        Stat::Unavailable
    } else if view.is_empty() {
        Stat::NoData
    } else {
        Stat::Available(Breakdown::tally(
            view.iter().map(|r| r.gender.as_deref()),
            &KNOWN_GENDERS,
        ))
    };

    let birth_year = if !caps.has_birth_year {
        Stat::Unavailable
    } else if view.is_empty() {
        Stat::NoData
    } else {
        let years = || view.iter().filter_map(|r| r.birth_year);
        Stat::Available(BirthYearStats {
            earliest: years().min(),
            latest: years().max(),
            most_common: mode(years()),
            missing: view.iter().filter(|r| r.birth_year.is_none()).count(),
        })
    };

    DemographicStats { gender, birth_year }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, OptionalColumns, TripRecord};
    use chrono::NaiveDate;

    fn rider(user_type: Option<&str>, gender: Option<&str>, year: Option<i32>) -> TripRecord {
        let t = NaiveDate::from_ymd_opt(2017, 2, 14)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut r = TripRecord::new(t, 60.0, "A", "B");
        r.user_type = user_type.map(str::to_string);
        r.gender = gender.map(str::to_string);
        r.birth_year = year;
        r
    }

    fn riders() -> Vec<TripRecord> {
        vec![
            rider(Some("Subscriber"), Some("Male"), Some(1985)),
            rider(Some("Customer"), None, None),
            rider(Some("Subscriber"), Some("Female"), Some(1990)),
            rider(None, Some("Male"), Some(1985)),
            rider(Some("Subscriber"), Some("Male"), Some(1949)),
        ]
    }

    #[test]
    fn user_types_report_zero_dependents() {
        let ds = Dataset::from_records(riders(), OptionalColumns::ALL);
        let stats = user_type_stats(&ActiveView::all(&ds));

        assert_eq!(stats.count("Subscriber"), 3);
        assert_eq!(stats.count("Customer"), 1);
        assert_eq!(stats.count("Dependent"), 0);
        assert_eq!(stats.missing, 1);
        assert_eq!(
            stats.counts.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            KNOWN_USER_TYPES
        );
    }

    #[test]
    fn unexpected_user_types_are_counted_after_known_ones() {
        let mut rs = riders();
        rs.push(rider(Some("Staff"), None, None));
        let ds = Dataset::from_records(rs, OptionalColumns::ALL);
        let stats = user_type_stats(&ActiveView::all(&ds));
        assert_eq!(stats.counts.last(), Some(&("Staff".to_string(), 1)));
        assert_eq!(stats.counts.len(), 4);
    }

    #[test]
    fn demographics_when_columns_present() {
        let ds = Dataset::from_records(riders(), OptionalColumns::ALL);
        let stats = demographic_stats(&ActiveView::all(&ds));

        let gender = stats.gender.available().unwrap();
        assert_eq!(gender.count("Male"), 3);
        assert_eq!(gender.count("Female"), 1);
        assert_eq!(gender.missing, 1);

        let years = stats.birth_year.available().unwrap();
        assert_eq!(years.earliest, Some(1949));
        assert_eq!(years.latest, Some(1990));
        assert_eq!(years.most_common, Some(Mode { value: 1985, count: 2 }));
        assert_eq!(years.missing, 1);
    }

    #[test]
    fn demographics_unavailable_without_columns() {
        let ds = Dataset::from_records(riders(), OptionalColumns::default());
        let stats = demographic_stats(&ActiveView::all(&ds));
        assert_eq!(stats.gender, Stat::Unavailable);
        assert_eq!(stats.birth_year, Stat::Unavailable);
    }

    #[test]
    fn empty_view_is_no_data_not_unavailable() {
        let ds = Dataset::from_records(Vec::new(), OptionalColumns::ALL);
        let view = ActiveView::all(&ds);
        let stats = demographic_stats(&view);
        assert_eq!(stats.gender, Stat::NoData);
        assert_eq!(stats.birth_year, Stat::NoData);

        let users = user_type_stats(&view);
        assert_eq!(users.count("Dependent"), 0);
        assert_eq!(users.missing, 0);
    }

    #[test]
    fn all_birth_years_missing() {
        let ds = Dataset::from_records(
            vec![rider(Some("Customer"), None, None)],
            OptionalColumns::ALL,
        );
        let stats = demographic_stats(&ActiveView::all(&ds));
        let years = stats.birth_year.available().unwrap();
        assert_eq!(years.earliest, None);
        assert_eq!(years.most_common, None);
        assert_eq!(years.missing, 1);
    }
}
