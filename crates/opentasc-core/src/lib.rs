//! Stop-control core for OpenTASC.
//!
//! Per-tick TASC computation: braking envelopes toward the next stop,
//! speed-limit patterns ahead of restrictions, phase classification and
//! per-notch display curves.
//!
//! # Overview
//!
//! - [`TascController`] owns loaded track geometry and maps one
//!   [`opentasc_telemetry::TrainSnapshot`] per tick to the next
//!   [`TascState`].
//! - [`TascState`] is the complete `Copy` output of a tick: pattern
//!   ceilings, binding limit, gradient average, phase and flags.
//! - [`TascPhase`] names where the control cycle stands; its `Display`
//!   form is the cab-indicator label.
//! - Per-notch envelope curves for rendering come from
//!   [`TascController::notch_curves`], with the classified vehicle and the
//!   current gradient already folded in.
//!
//! # Example
//!
//! ```
//! use opentasc_core::prelude::*;
//!
//! let controller = TascController::without_track_data();
//! let snapshot = TrainSnapshot::builder()
//!     .speed(55.0)
//!     .next_station("浜園", 250.0, StopKind::Passenger)
//!     .stations(vec![StationEntry::new("浜園", StopKind::Passenger)])
//!     .car_models(&["4000"])
//!     .build();
//!
//! let state = controller.update(TascState::default(), &snapshot, SignalClass::None);
//! assert_eq!(state.phase, TascPhase::Stopping);
//! assert!(state.pattern_speed < state.limit_pattern_speed);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod controller;
pub mod phase;
pub mod prelude;
pub mod state;

pub use controller::TascController;
pub use phase::TascPhase;
pub use state::TascState;

pub use opentasc_patterns::{NotchCurve, highlighted_notch};
