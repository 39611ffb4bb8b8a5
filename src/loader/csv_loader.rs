//! Loads a [`PressureSeries`] from CSV exports such as Home Assistant sensor history files.

use crate::loader::error::LoaderError;
use crate::types::into_utc_trait::IntoUtcDateTime;
use crate::types::observation::Observation;
use crate::types::pressure_series::PressureSeries;
use bon::Builder;
use chrono::NaiveDateTime;
use log::{info, trace};
use polars::prelude::*;
use std::path::Path;
use tokio::task;

/// Timestamp template of Home Assistant history exports, e.g. `2024-11-19T11:33:32.706Z`.
pub const HOME_ASSISTANT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Describes where the timestamp and pressure live in a CSV file.
///
/// Column positions are zero based. The timestamp format uses chrono's
/// [`strftime`](chrono::format::strftime) syntax and is parsed as a naive UTC datetime.
///
/// # Examples
///
/// ```
/// use zambretti::CsvLayout;
///
/// // A two-column export: "state,last_changed"
/// let layout = CsvLayout::builder()
///     .pressure_column(0)
///     .timestamp_column(1)
///     .build();
/// assert_eq!(layout.skip_header_rows, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct CsvLayout {
    /// Position of the timestamp column.
    pub timestamp_column: usize,
    /// Position of the pressure column.
    pub pressure_column: usize,
    /// Number of leading rows to skip before the data starts. Defaults to 1.
    #[builder(default = 1)]
    pub skip_header_rows: usize,
    /// chrono template for the timestamp column. Defaults to [`HOME_ASSISTANT_TIMESTAMP_FORMAT`].
    #[builder(into, default = HOME_ASSISTANT_TIMESTAMP_FORMAT.to_string())]
    pub timestamp_format: String,
}

impl CsvLayout {
    /// The layout of a Home Assistant sensor history download:
    /// `entity_id,state,last_changed` with a single header row.
    pub fn home_assistant() -> Self {
        CsvLayout {
            timestamp_column: 2,
            pressure_column: 1,
            skip_header_rows: 1,
            timestamp_format: HOME_ASSISTANT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

/// Reads pressure history from CSV files into a [`PressureSeries`].
///
/// Rows whose pressure cell is not a number (an empty cell, `unavailable`, `unknown`, ...)
/// are sensor drop-outs and are skipped. A timestamp that does not match the layout's
/// template is treated as a malformed file and returned as an error.
#[derive(Debug, Clone)]
pub struct SeriesLoader {
    layout: CsvLayout,
}

impl SeriesLoader {
    pub fn new(layout: CsvLayout) -> Self {
        Self { layout }
    }

    /// A loader for Home Assistant history exports, see [`CsvLayout::home_assistant`].
    pub fn home_assistant() -> Self {
        Self::new(CsvLayout::home_assistant())
    }

    pub fn layout(&self) -> &CsvLayout {
        &self.layout
    }

    /// Reads the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// * [`LoaderError::FileRead`] if the file cannot be opened.
    /// * [`LoaderError::CsvRead`] if the file is not valid CSV.
    /// * [`LoaderError::ColumnOutOfRange`] if a configured column does not exist.
    /// * [`LoaderError::MissingTimestamp`] / [`LoaderError::TimestampParse`] for a row whose
    ///   timestamp is empty or does not match the template.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<PressureSeries, LoaderError> {
        let path = path.as_ref();
        std::fs::metadata(path).map_err(|e| LoaderError::FileRead(path.to_path_buf(), e))?;

        let frame = match CsvReadOptions::default()
            .with_has_header(false)
            .with_skip_rows(self.layout.skip_header_rows)
            // Read every column as a string, pressure cells may hold sentinels.
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
        {
            Ok(frame) => frame,
            Err(PolarsError::NoData(_)) => DataFrame::empty(),
            Err(e) => {
                return Err(LoaderError::CsvRead {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };
        if frame.height() == 0 {
            info!("No pressure rows in {:?}", path);
            return Ok(PressureSeries::default());
        }

        let string_column = |index: usize| {
            frame
                .select_at_idx(index)
                .ok_or_else(|| LoaderError::ColumnOutOfRange {
                    path: path.to_path_buf(),
                    column: index,
                    width: frame.width(),
                })?
                .str()
                .map_err(|e| LoaderError::ColumnOperation {
                    path: path.to_path_buf(),
                    source: e,
                })
        };
        let timestamps = string_column(self.layout.timestamp_column)?;
        let pressures = string_column(self.layout.pressure_column)?;

        let mut observations = Vec::with_capacity(frame.height());
        let mut skipped = 0;
        for (index, (timestamp, pressure)) in timestamps.into_iter().zip(pressures).enumerate() {
            // 1-based line number in the file.
            let row = self.layout.skip_header_rows + index + 1;
            let timestamp = self.parse_timestamp(timestamp, row, path)?;

            match pressure.and_then(parse_pressure) {
                Some(pressure) => observations.push(Observation::new(timestamp, pressure)),
                None => {
                    trace!("Skipping row {} with pressure {:?}", row, pressure);
                    skipped += 1;
                }
            }
        }

        info!(
            "Loaded {} pressure readings from {:?} ({} rows skipped)",
            observations.len(),
            path,
            skipped
        );
        Ok(PressureSeries::new(observations))
    }

    /// Reads the CSV file at `path` on tokio's blocking thread pool.
    ///
    /// The returned series is fully materialized; see [`Self::load`] for the errors.
    pub async fn load_async(&self, path: impl AsRef<Path>) -> Result<PressureSeries, LoaderError> {
        let loader = self.clone();
        let path = path.as_ref().to_path_buf();
        task::spawn_blocking(move || loader.load(&path)).await?
    }

    fn parse_timestamp(
        &self,
        value: Option<&str>,
        row: usize,
        path: &Path,
    ) -> Result<NaiveDateTime, LoaderError> {
        let value = value.ok_or_else(|| LoaderError::MissingTimestamp {
            path: path.to_path_buf(),
            row,
        })?;
        NaiveDateTime::parse_from_str(value.trim(), &self.layout.timestamp_format).map_err(|e| {
            LoaderError::TimestampParse {
                row,
                value: value.to_string(),
                template: self.layout.timestamp_format.clone(),
                source: e,
            }
        })
    }
}

fn parse_pressure(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|pressure| pressure.is_finite())
}

impl PressureSeries {
    /// Loads a series from a CSV file laid out as described by `layout`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use zambretti::{CsvLayout, PressureSeries};
    ///
    /// # fn main() -> Result<(), zambretti::LoaderError> {
    /// let layout = CsvLayout::builder()
    ///     .pressure_column(0)
    ///     .timestamp_column(1)
    ///     .timestamp_format("%Y-%m-%d %H:%M:%S")
    ///     .build();
    /// let series = PressureSeries::from_csv_file("history.csv", &layout)?;
    /// println!("{} readings", series.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_csv_file(
        path: impl AsRef<Path>,
        layout: &CsvLayout,
    ) -> Result<PressureSeries, LoaderError> {
        SeriesLoader::new(layout.clone()).load(path)
    }

    /// Loads a series from a Home Assistant sensor history CSV download.
    pub fn from_home_assistant_csv(path: impl AsRef<Path>) -> Result<PressureSeries, LoaderError> {
        SeriesLoader::home_assistant().load(path)
    }
}
