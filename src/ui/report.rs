use std::io::{self, Write};
use std::time::Duration;

use crate::data::model::{weekday_name, Capabilities, TripRecord};
use crate::format::{clock_hour, grouped_count, scaled_duration_with};
use crate::pager::Page;
use crate::state::QuerySummary;
use crate::stats::{Breakdown, DemographicStats, DurationStats, Mode, Stat, StationStats, TimeStats};

const RULE_WIDTH: usize = 40;
const NO_DATA: &str = "no data (no trips match this selection)";

// ---------------------------------------------------------------------------
// Query summary
// ---------------------------------------------------------------------------

pub fn write_summary<W: Write>(out: &mut W, summary: &QuerySummary) -> io::Result<()> {
    let days = match summary.day {
        Some(d) => format!("{}s", weekday_name(d)),
        None => "all days of the week".to_string(),
    };
    let months = match summary.month {
        Some(m) => format!("in the month of {}", m.name()),
        None => "in all months".to_string(),
    };

    match summary.share() {
        Some(share) => writeln!(
            out,
            "You have chosen to view data for {city}, showing data for {days} {months}, \
             which represents {share} of the {total} trips in the total {city} dataset.",
            city = summary.city,
            total = grouped_count(summary.original_size),
        )?,
        None => writeln!(
            out,
            "You have chosen to view data for {city}, but the {city} dataset contains no trips.",
            city = summary.city,
        )?,
    }

    match summary.skipped_rows {
        0 => Ok(()),
        1 => writeln!(out, "1 row with an unreadable start time was skipped."),
        n => writeln!(
            out,
            "{} rows with an unreadable start time were skipped.",
            grouped_count(n)
        ),
    }
}

/// Section heading printed before a statistic group is computed.
pub fn write_heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\nCalculating {title}...\n")
}

pub fn write_elapsed<W: Write>(out: &mut W, elapsed: Duration) -> io::Result<()> {
    writeln!(out, "\nThis took {:.4} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

fn with_count<T: std::fmt::Display>(m: &Mode<T>) -> String {
    format!("{} ({} trips)", m.value, grouped_count(m.count))
}

fn stat_line<T, F>(stat: &Stat<T>, render: F) -> String
where
    F: FnOnce(&T) -> String,
{
    match stat {
        Stat::Available(v) => render(v),
        Stat::NoData => NO_DATA.to_string(),
        Stat::Unavailable => "unavailable".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Statistic groups
// ---------------------------------------------------------------------------

pub fn write_time_stats<W: Write>(
    out: &mut W,
    stats: &TimeStats,
    summary: &QuerySummary,
) -> io::Result<()> {
    let mut prefilters = Vec::new();
    if let Some(d) = summary.day {
        prefilters.push(format!("{}s", weekday_name(d)));
    }
    if let Some(m) = summary.month {
        prefilters.push(m.name().to_string());
    }
    if !prefilters.is_empty() {
        writeln!(out, "Analysis prefiltered to: {}", prefilters.join(", "))?;
    }

    if let Some(month) = &stats.month {
        let line = stat_line(month, |m| with_count(&m.map(|v| v.name())));
        writeln!(out, "Most Frequent Start Month: {line}")?;
    }
    if let Some(day) = &stats.day {
        let line = stat_line(day, |m| with_count(&m.map(weekday_name)));
        writeln!(out, "Most Frequent Start Day: {line}")?;
    }
    let line = stat_line(&stats.hour, |m| with_count(&m.map(clock_hour)));
    writeln!(out, "Most Frequent Start Hour: {line}")
}

pub fn write_station_stats<W: Write>(out: &mut W, stats: &Stat<StationStats>) -> io::Result<()> {
    let Stat::Available(s) = stats else {
        return writeln!(out, "Most popular stations: {}", stat_line(stats, |_| String::new()));
    };
    writeln!(out, "The most commonly used start station is: {}", with_count(&s.start_station))?;
    writeln!(out, "The most commonly used end station is: {}", with_count(&s.end_station))?;
    writeln!(out, "The most common trip taken is: {}", with_count(&s.trip))
}

pub fn write_duration_stats<W: Write>(
    out: &mut W,
    stats: &DurationStats,
    hour_threshold_secs: f64,
) -> io::Result<()> {
    writeln!(
        out,
        "The total travel time is: {}",
        scaled_duration_with(stats.total_secs, hour_threshold_secs)
    )?;
    match stats.mean_secs {
        Some(mean) => writeln!(
            out,
            "The mean travel time is: {}",
            scaled_duration_with(mean, hour_threshold_secs)
        ),
        None => writeln!(out, "The mean travel time is: undefined, {NO_DATA}"),
    }
}

fn write_breakdown<W: Write>(out: &mut W, b: &Breakdown, missing_label: &str) -> io::Result<()> {
    for (category, n) in &b.counts {
        writeln!(out, "{category}: {}", grouped_count(*n))?;
    }
    writeln!(out, "{missing_label}: {}", grouped_count(b.missing))
}

pub fn write_user_stats<W: Write>(
    out: &mut W,
    user_types: &Breakdown,
    demographics: &DemographicStats,
    caps: &Capabilities,
) -> io::Result<()> {
    write_breakdown(out, user_types, "No User Type Specified")?;
    if !caps.has_dependent_type {
        writeln!(out, "(this city's log records no Dependent riders)")?;
    }
    writeln!(out)?;

    match &demographics.gender {
        Stat::Available(g) => write_breakdown(out, g, "No Gender Specified")?,
        Stat::NoData => writeln!(out, "Gender: {NO_DATA}")?,
        Stat::Unavailable => writeln!(out, "Gender information unavailable for this city")?,
    }
    writeln!(out)?;

    match &demographics.birth_year {
        Stat::Available(y) => {
            let year =
                |v: Option<i32>| v.map_or_else(|| "none recorded".to_string(), |n| n.to_string());
            writeln!(out, "Earliest birth year: {}", year(y.earliest))?;
            writeln!(out, "Most recent birth year: {}", year(y.latest))?;
            let common = y
                .most_common
                .as_ref()
                .map_or_else(|| "none recorded".to_string(), with_count);
            writeln!(out, "Most common birth year: {common}")?;
            writeln!(out, "No birth year specified: {}", grouped_count(y.missing))
        }
        Stat::NoData => writeln!(out, "Birth year: {NO_DATA}"),
        Stat::Unavailable => writeln!(out, "Birth year information unavailable for this city"),
    }
}

// ---------------------------------------------------------------------------
// Raw records
// ---------------------------------------------------------------------------

fn write_record<W: Write>(
    out: &mut W,
    row: usize,
    r: &TripRecord,
    caps: &Capabilities,
) -> io::Result<()> {
    let missing = || "(missing)".to_string();
    let mut fields: Vec<(&str, String)> = vec![("Start Time", r.start_time.to_string())];
    if caps.has_end_time {
        fields.push(("End Time", r.end_time.map_or_else(missing, |t| t.to_string())));
    }
    fields.push(("Trip Duration", r.trip_duration.to_string()));
    fields.push(("Start Station", r.start_station.clone()));
    fields.push(("End Station", r.end_station.clone()));
    fields.push(("User Type", r.user_type.clone().unwrap_or_else(missing)));
    if caps.has_gender {
        fields.push(("Gender", r.gender.clone().unwrap_or_else(missing)));
    }
    if caps.has_birth_year {
        fields.push(("Birth Year", r.birth_year.map_or_else(missing, |y| y.to_string())));
    }
    fields.push(("Month", r.month().name().to_string()));
    fields.push(("Day of Week", weekday_name(r.day_of_week()).to_string()));

    writeln!(out, "[{}]", row + 1)?;
    for (name, value) in fields {
        writeln!(out, "{name:<14}{value}")?;
    }
    writeln!(out)
}

pub fn write_page<W: Write>(out: &mut W, page: &Page<'_>, caps: &Capabilities) -> io::Result<()> {
    for (i, record) in page.records.iter().enumerate() {
        write_record(out, page.start + i, record, caps)?;
    }
    writeln!(out, "Total rows in selection: {}", grouped_count(page.total))?;
    writeln!(out, "Rows seen: {}", grouped_count(page.seen))?;
    writeln!(out, "Rows remaining to be seen: {}", grouped_count(page.remaining))
}
