use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use arrow::array::Array;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use chrono::{DateTime, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{City, Dataset, OptionalColumns, TripRecord};
use crate::config::{Settings, TimestampPolicy};
use crate::error::LoadError;

type Result<T> = std::result::Result<T, LoadError>;

/// Extensions tried, in order, when resolving a city's source file.
const SOURCE_EXTENSIONS: [&str; 3] = ["csv", "parquet", "json"];

/// Accepted start/end time layouts. `%.f` also matches a missing fraction.
const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Locate and load the trip log for `city` from `settings.data_dir`.
pub fn load_city(city: City, settings: &Settings) -> Result<Dataset> {
    let path = resolve_source(city, &settings.data_dir)?;
    load_file(&path, settings.timestamp_policy)
}

/// First existing `<stem>.{csv,parquet,json}` in `dir`.
pub fn resolve_source(city: City, dir: &Path) -> Result<PathBuf> {
    SOURCE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{ext}", city.file_stem())))
        .find(|p| p.is_file())
        .ok_or_else(|| LoadError::SourceNotFound {
            city: city.name().to_string(),
            dir: dir.to_path_buf(),
            stem: city.file_stem().to_string(),
        })
}

/// Load a trip log from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one trip per line
/// * `.parquet` – one column per field, as written by `df.to_parquet()`
/// * `.json`    – `[{ "Start Time": "...", ... }, ...]` (`orient='records'`)
pub fn load_file(path: &Path, policy: TimestampPolicy) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let mut dataset = match ext.as_str() {
        "csv" => load_csv(path, policy)?,
        "parquet" | "pq" => load_parquet(path, policy)?,
        "json" => load_json(path, policy)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };
    dataset.source = Some(path.to_path_buf());

    log::info!(
        "loaded {} trips from {} ({} skipped, {:?})",
        dataset.len(),
        path.display(),
        dataset.skipped_rows,
        dataset.capabilities
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Column mapping shared by all formats
// ---------------------------------------------------------------------------

/// `"Start Time"` and `start_time` name the same column.
fn normalize_header(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace([' ', '-'], "_")
}

/// Position of each known field among the source's columns.
#[derive(Debug, Clone)]
struct ColumnMap {
    start_time: usize,
    end_time: Option<usize>,
    trip_duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl ColumnMap {
    fn from_headers<S: AsRef<str>>(path: &Path, headers: &[S]) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(|h| normalize_header(h.as_ref())).collect();
        let find = |name: &str| names.iter().position(|n| n == name);
        let require = |name: &'static str| {
            find(name).ok_or_else(|| LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: name,
            })
        };

        Ok(ColumnMap {
            start_time: require("start_time")?,
            end_time: find("end_time"),
            trip_duration: require("trip_duration")?,
            start_station: require("start_station")?,
            end_station: require("end_station")?,
            user_type: require("user_type")?,
            gender: find("gender"),
            birth_year: find("birth_year"),
        })
    }

    fn optional(&self) -> OptionalColumns {
        OptionalColumns {
            end_time: self.end_time.is_some(),
            gender: self.gender.is_some(),
            birth_year: self.birth_year.is_some(),
        }
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

// ---------------------------------------------------------------------------
// RecordSink – turns raw cells into TripRecords
// ---------------------------------------------------------------------------

/// Accumulates rows from any format. Empty cells arrive as `None`.
struct RecordSink {
    columns: ColumnMap,
    policy: TimestampPolicy,
    records: Vec<TripRecord>,
    rows_seen: usize,
    skipped: usize,
}

impl RecordSink {
    fn new(columns: ColumnMap, policy: TimestampPolicy) -> Self {
        RecordSink {
            columns,
            policy,
            records: Vec::new(),
            rows_seen: 0,
            skipped: 0,
        }
    }

    fn push<F>(&mut self, cell: F) -> Result<()>
    where
        F: Fn(usize) -> Option<String>,
    {
        let row = self.rows_seen;
        self.rows_seen += 1;
        let cols = &self.columns;

        let raw_start = cell(cols.start_time).unwrap_or_default();
        let Some(start_time) = parse_timestamp(&raw_start) else {
            return match self.policy {
                TimestampPolicy::Strict => Err(LoadError::MalformedTimestamp {
                    row,
                    value: raw_start,
                }),
                TimestampPolicy::Skip => {
                    log::warn!("row {row}: skipping unparseable start time '{raw_start}'");
                    self.skipped += 1;
                    Ok(())
                }
            };
        };

        let raw_duration = cell(cols.trip_duration).unwrap_or_default();
        let trip_duration = raw_duration
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d >= 0.0)
            .ok_or_else(|| LoadError::MalformedField {
                row,
                column: "trip_duration",
                value: raw_duration.clone(),
            })?;

        let mut record = TripRecord::new(
            start_time,
            trip_duration,
            cell(cols.start_station).unwrap_or_default(),
            cell(cols.end_station).unwrap_or_default(),
        );

        if let Some(raw) = cols.end_time.and_then(&cell) {
            record.end_time = Some(parse_timestamp(&raw).ok_or(LoadError::MalformedField {
                row,
                column: "end_time",
                value: raw.clone(),
            })?);
        }
        record.user_type = cell(cols.user_type);
        record.gender = cols.gender.and_then(&cell);
        if let Some(raw) = cols.birth_year.and_then(&cell) {
            // pandas writes integer columns with gaps as floats: "1984.0"
            let year = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|y| y.is_finite())
                .ok_or(LoadError::MalformedField {
                    row,
                    column: "birth_year",
                    value: raw.clone(),
                })?;
            record.birth_year = Some(year.round() as i32);
        }

        self.records.push(record);
        Ok(())
    }

    fn finish(self) -> Dataset {
        let mut dataset = Dataset::from_records(self.records, self.columns.optional());
        dataset.original_size = self.rows_seen;
        dataset.skipped_rows = self.skipped;
        dataset
    }
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names; a leading unnamed index column (as left by
/// `df.to_csv()`) is ignored.
fn load_csv(path: &Path, policy: TimestampPolicy) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(BufReader::new(open(path)?));
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut sink = RecordSink::new(ColumnMap::from_headers(path, &headers)?, policy);

    for result in reader.records() {
        let record = result?;
        sink.push(|i| record.get(i).and_then(non_empty))?;
    }

    Ok(sink.finish())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Start Time": "2017-01-01 09:07:57", "Trip Duration": 1039, ... },
///   ...
/// ]
/// ```
///
/// A column counts as present when any record carries its key. Datetime
/// columns may also hold epoch milliseconds, the pandas default.
fn load_json(path: &Path, policy: TimestampPolicy) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_reader(BufReader::new(open(path)?))?;
    let rows = root.as_array().ok_or_else(|| LoadError::NotRecordArray {
        path: path.to_path_buf(),
    })?;
    if rows.is_empty() {
        return Ok(Dataset::from_records(Vec::new(), OptionalColumns::default()));
    }

    let keys: Vec<String> = rows
        .iter()
        .filter_map(|r| r.as_object())
        .flat_map(|o| o.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let columns = ColumnMap::from_headers(path, &keys)?;
    let time_columns = [Some(columns.start_time), columns.end_time];
    let mut sink = RecordSink::new(columns, policy);

    for row in rows {
        let obj = row.as_object();
        sink.push(|i| {
            let val = obj.and_then(|o| o.get(&keys[i]))?;
            json_cell(val, time_columns.contains(&Some(i)))
        })?;
    }

    Ok(sink.finish())
}

fn json_cell(val: &JsonValue, is_time: bool) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => non_empty(s),
        JsonValue::Number(n) if is_time => match n.as_i64() {
            Some(ms) => DateTime::from_timestamp_millis(ms)
                .map(|t| t.naive_utc().format("%Y-%m-%d %H:%M:%S%.f").to_string()),
            None => Some(n.to_string()),
        },
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet trip log. Cells of any Arrow type are rendered to text
/// and go through the same parsing as CSV, so timestamp columns and
/// string columns holding timestamps both work.
fn load_parquet(path: &Path, policy: TimestampPolicy) -> Result<Dataset> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let mut sink = RecordSink::new(ColumnMap::from_headers(path, &headers)?, policy);
    let reader = builder.build()?;
    let options = FormatOptions::default();

    for batch_result in reader {
        let batch = batch_result?;
        let formatters = batch
            .columns()
            .iter()
            .map(|col| ArrayFormatter::try_new(col.as_ref(), &options))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for row in 0..batch.num_rows() {
            sink.push(|i| {
                let col = batch.column(i);
                if col.is_null(row) {
                    return None;
                }
                non_empty(&formatters[i].value(row).to_string())
            })?;
        }
    }

    Ok(sink.finish())
}
