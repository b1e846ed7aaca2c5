use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write synthetic trip logs for all three cities.
#[derive(Parser)]
#[command(name = "generate_sample")]
struct Cli {
    /// Output directory
    #[arg(default_value = ".")]
    out_dir: PathBuf,

    /// Trips per city
    #[arg(long, default_value_t = 5000)]
    rows: usize,
}

const STATIONS: [&str; 8] = [
    "Streeter Dr & Grand Ave",
    "Lake Shore Dr & Monroe St",
    "Clinton St & Washington Blvd",
    "Canal St & Adams St",
    "Michigan Ave & Oak St",
    "Theater on the Lake",
    "Millennium Park",
    "Wells St & Concord Ln",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    /// Skewed pick: low indices come up more often.
    fn skewed(&mut self, n: usize) -> usize {
        let u = self.next_f64();
        ((u * u) * n as f64) as usize % n
    }
}

// ---------------------------------------------------------------------------
// Synthetic trips
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct FullRow {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: &'static str,
    #[serde(rename = "End Station")]
    end_station: &'static str,
    #[serde(rename = "User Type")]
    user_type: Option<&'static str>,
    #[serde(rename = "Gender")]
    gender: Option<&'static str>,
    #[serde(rename = "Birth Year")]
    birth_year: Option<f64>,
}

/// Washington's log carries no demographics.
#[derive(Serialize)]
struct BasicRow {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: &'static str,
    #[serde(rename = "End Station")]
    end_station: &'static str,
    #[serde(rename = "User Type")]
    user_type: Option<&'static str>,
}

fn timestamp(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn generate(rng: &mut SimpleRng, rows: usize) -> Vec<FullRow> {
    // 2017-01-01 .. 2017-06-30
    let base = NaiveDate::from_ymd_opt(2017, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    let commute_hours = [8, 17, 7, 18, 12, 9, 16, 22];

    (0..rows)
        .map(|_| {
            let day = rng.below(181) as i64;
            let hour = commute_hours[rng.skewed(commute_hours.len())];
            let minute = rng.below(60) as i64;
            let start =
                base + Duration::days(day) + Duration::hours(hour) + Duration::minutes(minute);
            let secs = 60.0 + (rng.next_f64() * rng.next_f64() * 3000.0).round();
            let end = start + Duration::seconds(secs as i64);

            let user_type = match rng.below(100) {
                0..=74 => Some("Subscriber"),
                75..=97 => Some("Customer"),
                98 => Some("Dependent"),
                _ => None,
            };
            let gender = match rng.below(10) {
                0..=5 => Some("Male"),
                6..=8 => Some("Female"),
                _ => None,
            };
            let birth_year = (rng.below(10) != 0).then(|| 1950.0 + rng.skewed(50) as f64);

            FullRow {
                start_time: timestamp(start),
                end_time: timestamp(end),
                trip_duration: secs,
                start_station: STATIONS[rng.skewed(STATIONS.len())],
                end_station: STATIONS[rng.skewed(STATIONS.len())],
                user_type,
                gender,
                birth_year,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[FullRow]) -> Result<()> {
    let utf8 = |name: &str, nullable| Field::new(name, DataType::Utf8, nullable);
    let schema = Arc::new(Schema::new(vec![
        utf8("Start Time", false),
        utf8("End Time", false),
        Field::new("Trip Duration", DataType::Float64, false),
        utf8("Start Station", false),
        utf8("End Station", false),
        utf8("User Type", true),
        utf8("Gender", true),
        Field::new("Birth Year", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.start_time.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.end_time.as_str()))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.trip_duration))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.start_station))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.end_station))),
            Arc::new(rows.iter().map(|r| r.user_type).collect::<StringArray>()),
            Arc::new(rows.iter().map(|r| r.gender).collect::<StringArray>()),
            Arc::new(rows.iter().map(|r| r.birth_year).collect::<Float64Array>()),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    std::fs::create_dir_all(&cli.out_dir)?;
    let mut rng = SimpleRng::new(42);

    let chicago = generate(&mut rng, cli.rows);
    write_parquet(&cli.out_dir.join("chicago.parquet"), &chicago)?;

    let nyc = generate(&mut rng, cli.rows);
    write_csv(&cli.out_dir.join("new_york_city.csv"), &nyc)?;

    let washington: Vec<BasicRow> = generate(&mut rng, cli.rows)
        .into_iter()
        .map(|r| BasicRow {
            start_time: r.start_time,
            end_time: r.end_time,
            trip_duration: r.trip_duration,
            start_station: r.start_station,
            end_station: r.end_station,
            user_type: r.user_type,
        })
        .collect();
    write_csv(&cli.out_dir.join("washington.csv"), &washington)?;

    println!(
        "Wrote {} trips per city to {}",
        cli.rows,
        cli.out_dir.display()
    );
    Ok(())
}
