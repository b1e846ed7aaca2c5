use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::data::filter::FilterSpec;
use crate::pager::Pager;
use crate::state::Session;
use crate::stats::{demographic_stats, duration_stats, station_stats, time_stats, user_type_stats};
use crate::ui::prompt::Prompter;
use crate::ui::report;

// ---------------------------------------------------------------------------
// Report – summary plus the four timed statistic sections
// ---------------------------------------------------------------------------

pub fn write_report<W: Write>(
    out: &mut W,
    session: &Session,
    settings: &Settings,
) -> io::Result<()> {
    let view = session.view();
    let summary = session.summary(&view);
    report::write_summary(out, &summary)?;

    report::write_heading(out, "The Most Frequent Times of Travel")?;
    let started = Instant::now();
    let times = time_stats(&view, &session.spec);
    report::write_time_stats(out, &times, &summary)?;
    report::write_elapsed(out, started.elapsed())?;

    report::write_heading(out, "The Most Popular Stations and Trip")?;
    let started = Instant::now();
    let stations = station_stats(&view);
    report::write_station_stats(out, &stations)?;
    report::write_elapsed(out, started.elapsed())?;

    report::write_heading(out, "Trip Duration")?;
    let started = Instant::now();
    let durations = duration_stats(&view);
    report::write_duration_stats(out, &durations, settings.hour_threshold_secs)?;
    report::write_elapsed(out, started.elapsed())?;

    report::write_heading(out, "User Stats")?;
    let started = Instant::now();
    let users = user_type_stats(&view);
    let demographics = demographic_stats(&view);
    report::write_user_stats(out, &users, &demographics, &session.dataset.capabilities)?;
    report::write_elapsed(out, started.elapsed())
}

// ---------------------------------------------------------------------------
// Interactive mode
// ---------------------------------------------------------------------------

/// Prompt → load → report → raw pages, until the user declines a restart.
/// A failed load ends that session only.
pub fn run_interactive<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    settings: &Settings,
) -> Result<()> {
    loop {
        let spec = prompter.ask_selection()?;

        match Session::load(spec, settings) {
            Ok(session) => {
                write_report(prompter.output(), &session, settings)?;
                browse_raw(prompter, &session, settings)?;
            }
            Err(e) => {
                let err = anyhow::Error::new(e).context(format!("loading {}", spec.city));
                log::error!("{err:#}");
                writeln!(prompter.output(), "Error: {err:#}")?;
            }
        }

        if !prompter.confirm("Would you like to restart?")? {
            return Ok(());
        }
    }
}

fn browse_raw<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    session: &Session,
    settings: &Settings,
) -> io::Result<()> {
    let view = session.view();
    if view.is_empty() {
        return writeln!(prompter.output(), "\nNo raw data to show for this selection.");
    }

    let mut pager = Pager::with_page_size(&view, settings.page_size);
    let mut question = "Would you like to see the raw data?";
    while !pager.is_exhausted() && prompter.confirm(question)? {
        let page = pager.next_page();
        report::write_page(prompter.output(), &page, &session.dataset.capabilities)?;
        question = "Would you like to see more raw data?";
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Batch mode
// ---------------------------------------------------------------------------

/// Report once for `spec` and print up to `raw_pages` pages of records.
pub fn run_batch<W: Write>(
    out: &mut W,
    spec: FilterSpec,
    settings: &Settings,
    raw_pages: usize,
) -> Result<()> {
    let session = Session::load(spec, settings).with_context(|| format!("loading {}", spec.city))?;
    write_report(out, &session, settings)?;

    let view = session.view();
    for page in Pager::with_page_size(&view, settings.page_size).take(raw_pages) {
        writeln!(out)?;
        report::write_page(out, &page, &session.dataset.capabilities)?;
    }
    Ok(())
}
