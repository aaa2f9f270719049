//! The three braking-envelope formulas.
//!
//! Constant-deceleration kinematics in viewer units: speed in km/h,
//! deceleration in km/h/s, distance in metres. The factor 7.2 is the unit
//! bridge (v² = 2·a·d picks up 2 × 3.6 when v is km/h and a is km/h/s).
//! Every formula clamps its distance to zero, treats a degenerate
//! (negative-discriminant) curve as a floor value and never returns a
//! negative or NaN speed.

use crate::constants::{
    GRADIENT_COEFFICIENT, GRADIENT_WINDOW_BUCKETS_M, NUMERIC_ZERO, PATTERN_DISTANCE_OFFSET_M,
};

/// Whether `value` is numerically zero for control purposes.
pub fn is_numerically_zero(value: f32) -> bool {
    value.abs() < NUMERIC_ZERO
}

/// Applies the average-gradient correction to a base deceleration.
///
/// A numerically flat average leaves the deceleration untouched; an uphill
/// (positive) average steepens it, a downhill average flattens it.
pub fn gradient_corrected(deceleration: f32, gradient_average: f32) -> f32 {
    if is_numerically_zero(gradient_average) {
        deceleration
    } else {
        deceleration + gradient_average / GRADIENT_COEFFICIENT
    }
}

/// Stopping-pattern ceiling speed at `distance` metres from the stop mark.
///
/// The fixed pattern offset is subtracted from the distance first, so this
/// curve bottoms out short of the mark.
pub fn stopping_pattern(
    distance: f32,
    deceleration: f32,
    free_running_time: f32,
    gradient_average: f32,
) -> f32 {
    let dist = (distance - PATTERN_DISTANCE_OFFSET_M).max(0.0);
    braking_curve(dist, deceleration, free_running_time, gradient_average)
}

/// Stopping-reduction ceiling speed; the same curve as the stopping
/// pattern but aimed at the mark itself rather than short of it.
pub fn stopping_reduction_pattern(
    distance: f32,
    deceleration: f32,
    free_running_time: f32,
    gradient_average: f32,
) -> f32 {
    braking_curve(distance.max(0.0), deceleration, free_running_time, gradient_average)
}

fn braking_curve(
    dist: f32,
    deceleration: f32,
    free_running_time: f32,
    gradient_average: f32,
) -> f32 {
    let dec = gradient_corrected(deceleration, gradient_average);
    let reaction = 2.0 * dec * free_running_time;
    let speed = (-reaction + (reaction * reaction + 4.0 * 7.2 * dec * dist).sqrt()) / 2.0;
    if speed.is_nan() { 0.0 } else { speed.max(0.0) }
}

/// Speed-limit pattern: the ceiling that guides the train down to
/// `limit_speed` by `distance` metres ahead.
///
/// Never falls below `limit_speed`; a degenerate curve collapses onto it.
pub fn limit_pattern(
    limit_speed: f32,
    distance: f32,
    deceleration: f32,
    free_running_time: f32,
    gradient_average: f32,
) -> f32 {
    let dist = (distance - PATTERN_DISTANCE_OFFSET_M).max(0.0);
    let dec = gradient_corrected(deceleration, gradient_average);
    let time = free_running_time;
    let speed = -time * dec
        + (time * time * dec * dec + limit_speed * limit_speed + 7.2 * dec * dist).sqrt();
    if speed.is_nan() || speed < limit_speed {
        limit_speed.max(0.0)
    } else {
        speed.max(0.0)
    }
}

/// Fixed gradient-averaging end distance for a given remaining distance:
/// the first bucket strictly above it, saturating at the farthest bucket.
pub fn fixed_gradient_window(distance: f32) -> f32 {
    GRADIENT_WINDOW_BUCKETS_M
        .into_iter()
        .find(|bucket| distance < *bucket)
        .unwrap_or(1000.0)
}
