//! Per-tick controller state.

use opentasc_patterns::PatternMode;
use opentasc_patterns::constants::NO_PATTERN_SPEED;
use opentasc_vehicles::TrainModel;
use serde::{Deserialize, Serialize};

use crate::phase::TascPhase;

/// Complete output of one control tick.
///
/// The controller consumes the previous tick's state by value and returns
/// a fresh one; the struct is `Copy` and carries no references, so a
/// display layer can hold on to any tick it likes. The cab knobs (the two
/// enable flags and the pattern mode) are carried through unchanged and
/// only ever altered by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TascState {
    // === Cab knobs (carried, never written by the controller) ===
    /// Whether the stop-control function is active.
    pub enabled: bool,
    /// Whether the speed-limit pattern may engage.
    pub speed_control_enabled: bool,
    /// Deceleration-offset mode selected in the cab.
    pub mode: PatternMode,

    // === Classification ===
    /// Current control phase.
    pub phase: TascPhase,
    /// Vehicle model classified from the lead car.
    pub model: TrainModel,
    /// Whether the stop pattern is armed this tick.
    pub operating: bool,
    /// Whether the train is running above the enforced pattern speed.
    pub braking: bool,
    /// Whether the train is stopped within the stop range at a station.
    pub stopped_at_station: bool,

    // === Pattern ceilings (km/h) ===
    /// Enforced stopping-pattern ceiling; rests at the 120 km/h sentinel.
    pub pattern_speed: f32,
    /// Enforced speed-limit-pattern ceiling; rests at the 120 km/h sentinel.
    pub limit_pattern_speed: f32,
    /// Stopping-pattern candidate, zero while the stop pattern is idle.
    pub stopping_pattern_speed: f32,
    /// Stopping-reduction candidate, zero while the stop pattern is idle.
    pub reduction_pattern_speed: f32,

    // === Derived quantities ===
    /// Gradient-corrected deceleration of the winning stopping candidate
    /// (km/h/s), zero while the stop pattern is idle.
    pub deceleration: f32,
    /// Average gradient over the active window (per mille).
    pub gradient_average: f32,
    /// Stop-position offset applied this tick (m).
    pub stop_position_offset: f32,

    // === Speed-limit resolution ===
    /// Binding limit speed after table-vs-live resolution (km/h).
    pub binding_limit_speed: f32,
    /// Remaining distance to the binding limit (m).
    pub binding_limit_distance: f32,
    /// Target speed the limit pattern currently aims at (km/h).
    pub target_limit_speed: f32,
    /// Margin-adjusted distance to the limit target (m).
    pub target_limit_distance: f32,
}

impl TascState {
    /// Lowest ceiling currently enforced across both patterns.
    pub fn enforced_speed(&self) -> f32 {
        self.pattern_speed.min(self.limit_pattern_speed)
    }

    /// Returns this state with the control function toggled.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns this state with the speed-limit pattern toggled.
    pub fn with_speed_control(mut self, enabled: bool) -> Self {
        self.speed_control_enabled = enabled;
        self
    }

    /// Returns this state with the pattern mode replaced.
    pub fn with_mode(mut self, mode: PatternMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for TascState {
    /// Power-on state: both functions enabled, resting as stopped at a
    /// station with both ceilings at the sentinel and every derived
    /// quantity zeroed.
    fn default() -> Self {
        Self {
            enabled: true,
            speed_control_enabled: true,
            mode: PatternMode::Normal,
            phase: TascPhase::Stopped,
            model: TrainModel::None,
            operating: false,
            braking: false,
            stopped_at_station: true,
            pattern_speed: NO_PATTERN_SPEED,
            limit_pattern_speed: NO_PATTERN_SPEED,
            stopping_pattern_speed: 0.0,
            reduction_pattern_speed: 0.0,
            deceleration: 0.0,
            gradient_average: 0.0,
            stop_position_offset: 0.0,
            binding_limit_speed: 0.0,
            binding_limit_distance: 0.0,
            target_limit_speed: 0.0,
            target_limit_distance: 0.0,
        }
    }
}
