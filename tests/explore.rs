use std::fs;
use std::io::Cursor;
use std::path::Path;

use bikeshare::app::{run_batch, run_interactive, write_report};
use bikeshare::config::{Settings, TimestampPolicy};
use bikeshare::data::filter::{apply, FilterSpec};
use bikeshare::data::model::City;
use bikeshare::error::LoadError;
use bikeshare::format::scaled_duration;
use bikeshare::pager::Pager;
use bikeshare::state::Session;
use bikeshare::stats::{
    demographic_stats, duration_stats, station_stats, time_stats, user_type_stats, Mode, Stat,
};
use bikeshare::ui::prompt::Prompter;
use chrono::{Month, Weekday};
use tempfile::TempDir;

const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
0,2017-01-02 08:05:00,2017-01-02 08:15:00,600,A,B,Subscriber,Male,1980.0
1,2017-01-03 08:10:00,2017-01-03 08:30:00,1200,A,C,Subscriber,Female,1985.0
2,2017-02-06 17:00:00,2017-02-06 17:05:00,300,B,A,Customer,,
3,2017-03-06 17:30:00,2017-03-06 17:45:00,900,A,B,Subscriber,Male,1980.0
4,2017-03-07 09:00:00,2017-03-07 09:07:30,450,C,A,Customer,Female,1990.0
5,2017-03-13 17:45:00,2017-03-13 17:56:40,700,A,B,Subscriber,Male,1975.0
6,2017-04-10 08:20:00,2017-04-10 08:33:20,800,B,C,,Male,1980.0
7,2017-05-01 12:00:00,2017-05-01 12:16:40,1000,C,B,Subscriber,,
8,2017-05-02 17:10:00,2017-05-02 17:20:50,650,A,B,Subscriber,Female,1992.0
9,2017-06-05 08:00:00,2017-06-05 08:50:00,3000,B,A,Customer,Male,1980.0
10,2017-06-06 17:00:00,2017-06-06 17:03:20,200,A,C,Subscriber,Female,1988.0
11,2017-03-20 17:05:00,2017-03-20 17:11:40,400,A,B,Subscriber,Male,1970.0
";

const WASHINGTON: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
2017-03-30 17:30:00,2017-03-30 17:54:00,1445.0,14th & Belmont St NW,15th & K St NW,Customer
";

fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("chicago.csv"), CHICAGO).unwrap();
    fs::write(dir.path().join("washington.csv"), WASHINGTON).unwrap();
    dir
}

fn settings(dir: &Path) -> Settings {
    Settings {
        data_dir: dir.to_path_buf(),
        ..Settings::default()
    }
}

#[test]
fn chicago_unfiltered_statistics() {
    let dir = data_dir();
    let spec = FilterSpec::new(City::Chicago);
    let session = Session::load(spec, &settings(dir.path())).unwrap();
    let view = session.view();
    assert_eq!(view.len(), 12);
    assert_eq!(session.dataset.original_size, 12);

    let times = time_stats(&view, &spec);
    assert_eq!(times.month, Some(Stat::Available(Mode { value: Month::March, count: 4 })));
    assert_eq!(times.day, Some(Stat::Available(Mode { value: Weekday::Mon, count: 8 })));
    assert_eq!(times.hour, Stat::Available(Mode { value: 17, count: 6 }));

    let stations = station_stats(&view);
    let stations = stations.available().unwrap();
    assert_eq!(stations.start_station, Mode { value: "A".to_string(), count: 7 });
    assert_eq!(stations.end_station, Mode { value: "B".to_string(), count: 6 });
    assert_eq!(stations.trip.value.to_string(), "A to B");
    assert_eq!(stations.trip.count, 5);

    let durations = duration_stats(&view);
    assert_eq!(durations.total_secs, 10_200.0);
    assert_eq!(scaled_duration(durations.total_secs), "2.8 hours");
    assert_eq!(scaled_duration(durations.mean_secs.unwrap()), "14.2 minutes");

    let users = user_type_stats(&view);
    assert_eq!(users.count("Subscriber"), 8);
    assert_eq!(users.count("Customer"), 3);
    assert_eq!(users.count("Dependent"), 0);
    assert_eq!(users.missing, 1);

    let demo = demographic_stats(&view);
    let gender = demo.gender.available().unwrap();
    assert_eq!((gender.count("Male"), gender.count("Female"), gender.missing), (6, 4, 2));
    let years = demo.birth_year.available().unwrap();
    assert_eq!(years.earliest, Some(1970));
    assert_eq!(years.latest, Some(1992));
    assert_eq!(years.most_common, Some(Mode { value: 1980, count: 4 }));
    assert_eq!(years.missing, 2);
}

#[test]
fn chicago_march_mondays() {
    let dir = data_dir();
    let spec = FilterSpec::from_names("Chicago", "March", "Monday").unwrap();
    let session = Session::load(spec, &settings(dir.path())).unwrap();
    let view = session.view();

    assert_eq!(view.len(), 3);
    assert_eq!(session.summary(&view).share().as_deref(), Some("25.0%"));

    let times = time_stats(&view, &spec);
    assert_eq!(times.month, None);
    assert_eq!(times.day, None);
    assert_eq!(times.hour, Stat::Available(Mode { value: 17, count: 3 }));

    // Filtering the filtered rows again changes nothing.
    assert_eq!(view.refine(&spec), view);
    assert_eq!(apply(&session.dataset, &spec), view);
}

#[test]
fn washington_lacks_demographics() {
    let dir = data_dir();
    let session = Session::load(FilterSpec::new(City::Washington), &settings(dir.path())).unwrap();
    let caps = session.dataset.capabilities;
    assert!(!caps.has_gender && !caps.has_birth_year);

    let demo = demographic_stats(&session.view());
    assert_eq!(demo.gender, Stat::Unavailable);
    assert_eq!(demo.birth_year, Stat::Unavailable);

    let mut out = Vec::new();
    write_report(&mut out, &session, &settings(dir.path())).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Gender information unavailable"));
    assert!(text.contains("Birth year information unavailable"));
    assert!(text.contains("Dependent: 0"));
    assert!(text.contains("records no Dependent riders"));
    assert!(!text.contains("Male:"));
    assert!(!text.contains("No Gender Specified"));
}

#[test]
fn empty_selection_reports_no_data() {
    let dir = data_dir();
    let spec = FilterSpec::new(City::Washington).with_month(Month::January);
    let session = Session::load(spec, &settings(dir.path())).unwrap();
    let view = session.view();
    assert!(view.is_empty());
    assert_eq!(station_stats(&view), Stat::NoData);
    assert_eq!(duration_stats(&view).mean_secs, None);

    let mut out = Vec::new();
    write_report(&mut out, &session, &settings(dir.path())).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("represents 0.0% of the 3 trips"));
    assert!(text.contains("The mean travel time is: undefined"));
}

#[test]
fn missing_city_is_source_not_found() {
    let dir = data_dir();
    let err = Session::load(FilterSpec::new(City::NewYorkCity), &settings(dir.path())).unwrap_err();
    assert!(matches!(err, LoadError::SourceNotFound { .. }));
}

#[test]
fn skip_policy_drops_bad_rows_but_keeps_original_size() {
    let dir = data_dir();
    let bad = format!("{CHICAGO}12,not a time,,60,A,B,Subscriber,Male,1980.0\n");
    fs::write(dir.path().join("chicago.csv"), bad).unwrap();

    let strict = Session::load(FilterSpec::new(City::Chicago), &settings(dir.path()));
    assert!(matches!(strict, Err(LoadError::MalformedTimestamp { row: 12, .. })));

    let lenient = Settings {
        timestamp_policy: TimestampPolicy::Skip,
        ..settings(dir.path())
    };
    let session = Session::load(FilterSpec::new(City::Chicago), &lenient).unwrap();
    assert_eq!(session.dataset.len(), 12);
    assert_eq!(session.dataset.original_size, 13);
    assert_eq!(session.dataset.skipped_rows, 1);

    let mut out = Vec::new();
    run_batch(&mut out, FilterSpec::new(City::Chicago), &lenient, 0).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("represents 92.3% of the 13 trips"));
    assert!(text.contains("1 row with an unreadable start time was skipped."));
}

#[test]
fn pager_walks_twelve_rows() {
    let dir = data_dir();
    let session = Session::load(FilterSpec::new(City::Chicago), &settings(dir.path())).unwrap();
    let view = session.view();
    let mut pager = Pager::new(&view);

    let windows: Vec<_> = (0..3)
        .map(|_| {
            let p = pager.next_page();
            (p.records.len(), p.remaining)
        })
        .collect();
    assert_eq!(windows, vec![(5, 7), (5, 2), (2, 0)]);
    assert_eq!(pager.cursor(), 12);
    assert!(pager.next_page().is_empty());
}

#[test]
fn interactive_session_with_raw_pages_and_restart() {
    let dir = data_dir();
    let input = "chicago\nall\nall\nyes\nyes\nyes\nyes\nwashington\nall\nmonday\nno\nno\n";
    let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());

    run_interactive(&mut prompter, &settings(dir.path())).unwrap();
    let text = String::from_utf8(prompter.output().clone()).unwrap();

    assert!(text.contains("You have chosen to view data for Chicago"));
    assert!(text.contains("Most Frequent Start Month: March (4 trips)"));
    assert!(text.contains("The most common trip taken is: A to B (5 trips)"));
    assert!(text.contains("Rows remaining to be seen: 7"));
    assert!(text.contains("Rows remaining to be seen: 0"));
    assert!(text.contains("[12]"));
    assert!(!text.contains("[13]"));

    // Second session: Washington on Mondays has no trips.
    assert!(text.contains("You have chosen to view data for Washington"));
    assert!(text.contains("No raw data to show"));
}

#[test]
fn interactive_reports_load_failure_and_continues() {
    let dir = data_dir();
    let input = "new york city\nall\nall\nno\n";
    let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());

    run_interactive(&mut prompter, &settings(dir.path())).unwrap();
    let text = String::from_utf8(prompter.output().clone()).unwrap();
    assert!(text.contains("Error: loading New York City"));
    assert!(text.contains("Would you like to restart?"));
}

#[test]
fn batch_mode_prints_requested_pages() {
    let dir = data_dir();
    let spec = FilterSpec::from_names("chicago", "all", "tuesday").unwrap();
    let mut out = Vec::new();
    run_batch(&mut out, spec, &settings(dir.path()), 2).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("showing data for Tuesdays in all months"));
    assert!(text.contains("Analysis prefiltered to: Tuesdays"));
    assert!(text.contains("Rows seen: 4"));
    assert!(!text.contains("Rows seen: 5"));
}
