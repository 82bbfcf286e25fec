//! CSV loading for schedule and coordinate files.
//!
//! Files are read whole at startup. A missing required column fails the
//! load; a row that cannot be decoded is handed on as an empty record so
//! the index build counts and skips it like any other malformed row.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::geo::GeoRow;
use crate::schedule::ScheduleRecord;

/// Columns a schedule file must have. `h3_polygon` is optional.
pub const SCHEDULE_COLUMNS: [&str; 4] = ["h3_cell", "departure_date", "trip_id", "transport_mode"];

/// Columns a coordinate file must have.
pub const GEO_COLUMNS: [&str; 3] = ["cell_id", "x", "y"];

/// Error loading a dataset file.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(&'static str),
}

/// Load schedule records from a CSV file.
pub fn load_schedule(path: impl AsRef<Path>) -> Result<Vec<ScheduleRecord>, DatasetError> {
    let path = path.as_ref();
    let records = read_schedule(open(path)?)?;
    info!(path = %path.display(), rows = records.len(), "Loaded schedule");
    Ok(records)
}

/// Load coordinate rows from a CSV file.
pub fn load_geo(path: impl AsRef<Path>) -> Result<Vec<GeoRow>, DatasetError> {
    let path = path.as_ref();
    let rows = read_geo(open(path)?)?;
    info!(path = %path.display(), rows = rows.len(), "Loaded coordinates");
    Ok(rows)
}

/// Read schedule records from any CSV source.
pub fn read_schedule<R: Read>(reader: R) -> Result<Vec<ScheduleRecord>, DatasetError> {
    read_rows(reader, &SCHEDULE_COLUMNS)
}

/// Read coordinate rows from any CSV source.
pub fn read_geo<R: Read>(reader: R) -> Result<Vec<GeoRow>, DatasetError> {
    read_rows(reader, &GEO_COLUMNS)
}

fn open(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn read_rows<R, T>(reader: R, required: &[&'static str]) -> Result<Vec<T>, DatasetError>
where
    R: Read,
    T: DeserializeOwned + Default,
{
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if let Some(missing) = required.iter().find(|col| !headers.iter().any(|h| h == **col)) {
        return Err(DatasetError::MissingColumn(*missing));
    }

    let mut rows = Vec::new();
    for (line, result) in rdr.deserialize::<T>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                debug!(line = line + 2, error = %e, "Undecodable row");
                rows.push(T::default());
            }
        }
    }
    Ok(rows)
}
