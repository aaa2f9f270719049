//! Per-notch deceleration curves for the display layer.

use opentasc_vehicles::VehicleProfile;
use serde::Serialize;

use crate::formula::{gradient_corrected, stopping_reduction_pattern};

/// One brake notch rendered as a speed-vs-distance curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotchCurve {
    /// 1-based notch number.
    pub notch_number: usize,
    /// Legend label: `B{n}`, or a pipe-pressure step on SMEE vehicles.
    pub label: String,
    /// Gradient-corrected deceleration this notch commands (km/h/s).
    pub deceleration: f32,
    /// Free-running time of the vehicle (s).
    pub free_running_time: f32,
}

impl NotchCurve {
    /// Ceiling speed of this notch at `distance` metres from the target.
    ///
    /// The gradient correction was folded into the stored deceleration when
    /// the curve was built, so none is applied here.
    pub fn speed_at(&self, distance: f32) -> f32 {
        stopping_reduction_pattern(distance, self.deceleration, self.free_running_time, 0.0)
    }
}

/// Builds one curve per notch of `profile`, folding `gradient_average`
/// into each notch's deceleration once.
pub fn notch_curves(profile: &VehicleProfile, gradient_average: f32) -> Vec<NotchCurve> {
    let pressure_step = profile.max_pressure / profile.notch_count() as f32;
    profile
        .notch_fractions
        .iter()
        .enumerate()
        .map(|(index, fraction)| {
            let notch_number = index + 1;
            let label = if profile.smee_brake {
                format!("B-{:.0}kPa", pressure_step * notch_number as f32)
            } else {
                format!("B{notch_number}")
            };
            NotchCurve {
                notch_number,
                label,
                deceleration: gradient_corrected(
                    fraction * profile.max_deceleration,
                    gradient_average,
                ),
                free_running_time: profile.free_running_time,
            }
        })
        .collect()
}

/// The 1-based notch number the display highlights for the current brake
/// handle position; 0 means no highlight.
///
/// Two-handle cabs report the brake handle directly, so the lowest
/// highlightable position is notch 1; single-handle cabs fold power and
/// brake into one axis and sit one position higher.
pub fn highlighted_notch(two_handle: bool, brake_notch: i32) -> usize {
    let notch = if two_handle {
        brake_notch.max(1)
    } else {
        brake_notch.saturating_sub(1).max(0)
    };
    usize::try_from(notch).unwrap_or(0)
}
