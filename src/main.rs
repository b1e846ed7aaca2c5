use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use bikeshare::app::{run_batch, run_interactive};
use bikeshare::config::{
    Settings, TimestampPolicy, DEFAULT_DATA_DIR, HOUR_THRESHOLD_SECS, PAGE_SIZE,
};
use bikeshare::data::filter::FilterSpec;
use bikeshare::ui::prompt::Prompter;

#[derive(Parser)]
#[command(name = "bikeshare")]
#[command(about = "Explore US bike-share trip data")]
#[command(version)]
struct Cli {
    /// Directory holding chicago, new_york_city and washington trip logs
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Report once for this city instead of prompting
    #[arg(long)]
    city: Option<String>,

    /// Month to filter by in batch mode (name, number or "all")
    #[arg(long, requires = "city")]
    month: Option<String>,

    /// Day of week to filter by in batch mode (name or "all")
    #[arg(long, requires = "city")]
    day: Option<String>,

    /// Pages of raw records to print in batch mode
    #[arg(long, default_value_t = 0)]
    raw_pages: usize,

    /// Raw records per page
    #[arg(long, default_value_t = PAGE_SIZE)]
    page_size: usize,

    /// Drop rows with unparseable start times instead of failing the load
    #[arg(long)]
    skip_malformed: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            data_dir: self.data_dir.clone(),
            page_size: self.page_size,
            hour_threshold_secs: HOUR_THRESHOLD_SECS,
            timestamp_policy: if self.skip_malformed {
                TimestampPolicy::Skip
            } else {
                TimestampPolicy::Strict
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = cli.settings();

    match &cli.city {
        Some(city) => {
            let spec = FilterSpec::from_names(
                city,
                cli.month.as_deref().unwrap_or("all"),
                cli.day.as_deref().unwrap_or("all"),
            )?;
            run_batch(&mut io::stdout().lock(), spec, &settings, cli.raw_pages)
        }
        None => {
            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
            run_interactive(&mut prompter, &settings)
        }
    }
}
