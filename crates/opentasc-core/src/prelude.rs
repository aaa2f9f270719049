//! Prelude for the stop-control core.
//!
//! Re-exports everything a display layer or telemetry adapter needs to run
//! and render a full control tick.
//!
//! # Example
//!
//! ```
//! use opentasc_core::prelude::*;
//!
//! let controller = TascController::without_track_data();
//! let state = TascState::default();
//! assert_eq!(state.phase, TascPhase::Stopped);
//! assert!(controller.track().gradients.is_empty());
//! ```

pub use crate::controller::TascController;
pub use crate::phase::TascPhase;
pub use crate::state::TascState;
pub use opentasc_patterns::{NotchCurve, PatternMode, highlighted_notch, notch_curves};
pub use opentasc_telemetry::{
    CarEntry, Direction, SignalClass, StationEntry, StopKind, TrainSnapshot,
};
pub use opentasc_trackdata::TrackData;
pub use opentasc_vehicles::{TrainModel, VehicleProfile};
