//! Dataset wrappers and the absorbing directory loader.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::TrackDataError;
use crate::records::{GradientRecord, SpeedLimitRecord, StopOffsetRecord};
use crate::xml::{parse_gradients, parse_speed_limits, parse_stop_offsets};

/// File name of the gradient table within a track-data directory.
pub const GRADIENT_FILE: &str = "Gradient.xml";
/// File name of the speed-limit table.
pub const SPEED_LIMIT_FILE: &str = "SpeedLimit.xml";
/// File name of the stop-position-offset table.
pub const STOP_OFFSET_FILE: &str = "StopPositionOffset.xml";

/// How a dataset came to hold its records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetStatus {
    /// The backing file parsed cleanly.
    Loaded,
    /// The backing file was absent or malformed; the dataset is empty and
    /// every query falls back to its system default.
    #[default]
    Degraded,
}

/// An immutable record collection plus its load status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset<T> {
    records: Vec<T>,
    status: DatasetStatus,
}

impl<T> Dataset<T> {
    /// Wraps records parsed from a clean file.
    pub fn loaded(records: Vec<T>) -> Self {
        Self {
            records,
            status: DatasetStatus::Loaded,
        }
    }

    /// An empty dataset standing in for an unreadable file.
    pub fn degraded() -> Self {
        Self {
            records: Vec::new(),
            status: DatasetStatus::Degraded,
        }
    }

    /// The records, in file order.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Whether the backing file loaded cleanly.
    pub fn status(&self) -> DatasetStatus {
        self.status
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T> Default for Dataset<T> {
    fn default() -> Self {
        Self::degraded()
    }
}

/// The three track-geometry collections the controller queries.
///
/// Loaded once at session start and read-only afterwards, so a single
/// instance can serve every tick without synchronization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackData {
    /// Surveyed gradient samples per station approach.
    pub gradients: Dataset<GradientRecord>,
    /// Speed-restricted sections between stop positions.
    pub speed_limits: Dataset<SpeedLimitRecord>,
    /// Per-car-count stop-position corrections.
    pub stop_offsets: Dataset<StopOffsetRecord>,
}

impl TrackData {
    /// Fully degraded, empty track data; every query takes its fallback.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the three tables from `dir`, absorbing any failure into an
    /// empty, degraded dataset for the affected file.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            gradients: load_gradients(dir.join(GRADIENT_FILE)),
            speed_limits: load_speed_limits(dir.join(SPEED_LIMIT_FILE)),
            stop_offsets: load_stop_offsets(dir.join(STOP_OFFSET_FILE)),
        }
    }
}

/// Loads one gradient table, absorbing any failure into a degraded dataset.
pub fn load_gradients(path: impl Into<PathBuf>) -> Dataset<GradientRecord> {
    load_dataset(path.into(), parse_gradients)
}

/// Loads one speed-limit table, absorbing any failure into a degraded
/// dataset.
pub fn load_speed_limits(path: impl Into<PathBuf>) -> Dataset<SpeedLimitRecord> {
    load_dataset(path.into(), parse_speed_limits)
}

/// Loads one stop-offset table, absorbing any failure into a degraded
/// dataset.
pub fn load_stop_offsets(path: impl Into<PathBuf>) -> Dataset<StopOffsetRecord> {
    load_dataset(path.into(), parse_stop_offsets)
}

type Parser<T> = fn(&str) -> Result<Vec<T>, TrackDataError>;

fn load_dataset<T>(path: PathBuf, parse: Parser<T>) -> Dataset<T> {
    match read_and_parse(&path, parse) {
        Ok(records) => {
            info!(
                path = %path.display(),
                record_count = records.len(),
                "Loaded track data file"
            );
            Dataset::loaded(records)
        }
        Err(error) => {
            warn!(
                path = %path.display(),
                error = %error,
                "Track data file unusable, continuing with an empty dataset"
            );
            Dataset::degraded()
        }
    }
}

fn read_and_parse<T>(path: &Path, parse: Parser<T>) -> Result<Vec<T>, TrackDataError> {
    let raw = fs::read_to_string(path).map_err(|source| TrackDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&raw)
}
