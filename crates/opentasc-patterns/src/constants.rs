//! Kinematic constants shared by the pattern formulas and the controller.

/// Base deceleration of the stopping pattern (km/h/s).
pub const STOPPING_DECELERATION: f32 = 3.0;

/// Base deceleration of the stopping-reduction pattern (km/h/s).
pub const REDUCTION_DECELERATION: f32 = 2.0;

/// Base deceleration of the speed-limit pattern (km/h/s).
pub const LIMIT_DECELERATION: f32 = 2.5;

/// Distance subtracted before the stopping and limit formulas so the curve
/// bottoms out short of the mark (m).
pub const PATTERN_DISTANCE_OFFSET_M: f32 = 2.0;

/// Half-width of the window around the stop position that counts as
/// stopped on the mark (m).
pub const STOP_RANGE_M: f32 = 3.0;

/// Divisor converting an average gradient (per mille) into a deceleration
/// correction (km/h/s).
pub const GRADIENT_COEFFICIENT: f32 = 35.0;

/// Remaining distance below which the stopping pattern arms (m).
pub const STANDBY_BRAKING_DISTANCE_M: f32 = 1000.0;

/// Sentinel pattern speed meaning "no restriction" (km/h); above any
/// operational speed on this network.
pub const NO_PATTERN_SPEED: f32 = 120.0;

/// Deceleration offset applied in high-speed pattern mode (km/h/s).
pub const HIGH_MODE_OFFSET: f32 = 0.4;

/// Deceleration offset applied in low-speed pattern mode (km/h/s).
pub const LOW_MODE_OFFSET: f32 = -0.5;

/// Margin short of a zero-speed (R0) target at a non-departure signal (m).
pub const STOP_SIGNAL_MARGIN_M: f32 = 15.0;

/// Margin short of any non-zero speed-limit target (m).
pub const LIMIT_TARGET_MARGIN_M: f32 = 10.0;

/// Fixed end distances for gradient averaging while approaching a stop (m);
/// the first bucket strictly above the remaining distance is used.
pub const GRADIENT_WINDOW_BUCKETS_M: [f32; 10] =
    [50.0, 100.0, 150.0, 200.0, 250.0, 300.0, 400.0, 500.0, 600.0, 1000.0];

/// Span of the relative gradient window used when no live limit is
/// reported (m).
pub const RELATIVE_GRADIENT_SPAN_M: f32 = 1000.0;

/// Magnitudes below this are treated as numerically zero.
pub const NUMERIC_ZERO: f32 = 1e-4;
