//! Typed track-data records.
//!
//! Distances are metres measured the way the survey files record them:
//! remaining distance to the relevant stop position. Every record carries
//! the travel direction it applies to; lookups never mix directions.

use opentasc_telemetry::Direction;
use serde::{Deserialize, Serialize};

/// One surveyed gradient sample on a station approach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientRecord {
    /// Travel direction the sample applies to.
    pub direction: Direction,
    /// Station whose approach was surveyed.
    pub station_name: String,
    /// Distance from the stop position at which the sample applies (m).
    pub distance: f32,
    /// Gradient in per mille; positive climbs toward the stop.
    pub gradient: f32,
}

/// One speed-restricted section between two stop positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedLimitRecord {
    /// Travel direction the restriction applies to.
    pub direction: Direction,
    /// Where the restriction begins, as remaining distance (m).
    pub start_position: f32,
    /// Where the restriction ends, as remaining distance (m).
    pub end_position: f32,
    /// Restricted speed (km/h).
    pub limit: f32,
    /// Stop-position name of the station behind the section.
    pub back_stop_position: String,
    /// Stop-position name of the station ahead of the section.
    pub next_stop_position: String,
}

/// Per-car-count stop-position corrections for one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopOffsetRecord {
    /// Travel direction the corrections apply to.
    pub direction: Direction,
    /// Station the corrections belong to.
    pub station_name: String,
    /// Corrections in metres, indexed by car count minus one (1..=6 cars).
    pub offsets: [f32; 6],
}

impl StopOffsetRecord {
    /// The correction for a consist of `car_count` cars, if the table
    /// covers that length.
    pub fn offset_for_cars(&self, car_count: usize) -> Option<f32> {
        let index = car_count.checked_sub(1)?;
        self.offsets.get(index).copied()
    }
}
