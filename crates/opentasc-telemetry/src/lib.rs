//! Train-state snapshot types and ingestion-boundary classification for OpenTASC.
//!
//! This crate defines the read-only per-tick input record ([`TrainSnapshot`])
//! that the telemetry source hands to the TASC controller, together with the
//! closed enumerations the rest of the workspace keys on: travel
//! [`Direction`], stop classification ([`StopKind`]) and signal
//! classification ([`SignalClass`]).
//!
//! # Overview
//!
//! The upstream simulator reports direction, stop types and signal names as
//! free-form Japanese labels. Those labels are classified exactly once, at
//! this boundary, so downstream code never re-parses strings on the tick
//! path:
//!
//! - direction comes from the digit parity of the diagram (schedule) name;
//! - stop kinds come from label containment, operational stops first;
//! - a signal is a departure signal when its name contains 出発.
//!
//! # Example
//!
//! ```
//! use opentasc_telemetry::{Direction, StationEntry, StopKind, TrainSnapshot};
//!
//! let snapshot = TrainSnapshot::builder()
//!     .speed(42.5)
//!     .diagram_name("5032A")
//!     .next_station("浜園", 380.0, StopKind::Passenger)
//!     .stations(vec![StationEntry::new("浜園", StopKind::Passenger)])
//!     .car_models(&["4000"])
//!     .build();
//!
//! assert!(snapshot.is_valid());
//! assert_eq!(snapshot.direction(), Some(Direction::Up));
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod classify;
pub mod snapshot;

pub use classify::{Direction, SignalClass, StopKind};
pub use snapshot::{CarEntry, StationEntry, TrainSnapshot, TrainSnapshotBuilder};
