//! Binding speed-limit resolution.
//!
//! The table contributes a candidate only when a section strictly bounds
//! the current position; the lower of table and system candidate wins, and
//! every lookup failure falls back to the system value.

use opentasc_telemetry::{Direction, TrainSnapshot};
use serde::{Deserialize, Serialize};

use crate::dataset::TrackData;
use crate::records::SpeedLimitRecord;

/// Table candidate when no section matches; above any system limit on this
/// network, so the minimum rule discards it.
const NO_RECORD_LIMIT: f32 = 120.0;

/// The system-reported limit candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemLimit {
    /// Candidate limit speed (km/h).
    pub speed: f32,
    /// Remaining distance to where it takes effect (m); 0 when already
    /// inside.
    pub distance: f32,
}

impl SystemLimit {
    /// Picks the live next-limit when one is reported (non-negative), else
    /// the limit currently in force at distance zero.
    pub fn from_snapshot(snapshot: &TrainSnapshot) -> Self {
        if snapshot.next_speed_limit < 0.0 {
            Self {
                speed: snapshot.speed_limit,
                distance: 0.0,
            }
        } else {
            Self {
                speed: snapshot.next_speed_limit,
                distance: snapshot.next_speed_limit_distance,
            }
        }
    }
}

/// Outcome of the table-vs-system resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLimit {
    /// The binding limit speed (km/h).
    pub speed: f32,
    /// Remaining distance to the binding limit (m).
    pub distance: f32,
}

impl From<SystemLimit> for ResolvedLimit {
    fn from(system: SystemLimit) -> Self {
        Self {
            speed: system.speed,
            distance: system.distance,
        }
    }
}

impl TrackData {
    /// Resolves the binding limit ahead of the train.
    ///
    /// A table section applies when its direction matches, one of its stop
    /// position names lines up with the adjacent stations, and the
    /// offset-corrected section strictly bounds the current distance
    /// (`start > distance >= end`). The first such section wins, and only
    /// if its limit is lower than the system candidate; otherwise, and on
    /// any lookup failure, the system candidate is returned unchanged.
    pub fn resolve_limit(
        &self,
        direction: Option<Direction>,
        back_stop_position: Option<&str>,
        next_stop_position: Option<&str>,
        distance: f32,
        offset: f32,
        system: SystemLimit,
    ) -> ResolvedLimit {
        let Some(direction) = direction else {
            return system.into();
        };
        let (Some(back_name), Some(next_name)) = (back_stop_position, next_stop_position) else {
            return system.into();
        };

        let dist = distance.max(0.0);
        let (table_speed, table_distance) =
            match self.binding_record(direction, back_name, next_name, dist, offset) {
                Some(record) => (record.limit, (record.end_position - offset).max(0.0)),
                None => (NO_RECORD_LIMIT, 0.0),
            };

        if table_speed < system.speed {
            ResolvedLimit {
                speed: table_speed,
                distance: (dist - table_distance).max(0.0),
            }
        } else {
            system.into()
        }
    }

    fn binding_record(
        &self,
        direction: Direction,
        back_name: &str,
        next_name: &str,
        dist: f32,
        offset: f32,
    ) -> Option<&SpeedLimitRecord> {
        self.speed_limits.records().iter().find(|record| {
            record.direction == direction
                && (record.back_stop_position == back_name
                    || record.next_stop_position == next_name)
                && (record.start_position - offset) > dist
                && dist >= (record.end_position - offset)
        })
    }
}
