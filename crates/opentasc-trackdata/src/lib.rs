//! Track-geometry datasets and lookups for OpenTASC.
//!
//! # Overview
//!
//! Three XML tables describe the line: surveyed gradients per station
//! approach, speed-restricted sections between stop positions, and
//! per-car-count stop-position corrections. This crate parses them once at
//! session start into immutable [`Dataset`]s inside a [`TrackData`] and
//! answers the controller's per-tick queries: average gradient over a
//! window, the binding speed limit, and the stop-position offset.
//!
//! Loading never fails the session. A missing or malformed file degrades
//! its dataset to empty ([`DatasetStatus::Degraded`]) and every query on it
//! falls back to the system-supplied default.
//!
//! # Example
//!
//! ```
//! use opentasc_telemetry::Direction;
//! use opentasc_trackdata::{Dataset, TrackData, xml};
//!
//! let raw = "<GradientData>
//!     <Record>
//!         <Direction>上り</Direction>
//!         <StationName>浜園</StationName>
//!         <Distance>80</Distance>
//!         <Gradient>-2.0</Gradient>
//!     </Record>
//! </GradientData>";
//!
//! let track = TrackData {
//!     gradients: Dataset::loaded(xml::parse_gradients(raw)?),
//!     ..TrackData::empty()
//! };
//! let average = track.average_gradient_absolute(Some(Direction::Up), "浜園", 100.0, 0.0, 0.0);
//! assert!((average + 2.0).abs() < 1e-6);
//! # Ok::<(), opentasc_trackdata::TrackDataError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod dataset;
pub mod error;
pub mod gradient;
pub mod limits;
pub mod offsets;
pub mod records;
pub mod xml;

pub use dataset::{
    Dataset, DatasetStatus, GRADIENT_FILE, SPEED_LIMIT_FILE, STOP_OFFSET_FILE, TrackData,
    load_gradients, load_speed_limits, load_stop_offsets,
};
pub use error::TrackDataError;
pub use limits::{ResolvedLimit, SystemLimit};
pub use records::{GradientRecord, SpeedLimitRecord, StopOffsetRecord};
