//! The per-tick stop-control computation.
//!
//! [`TascController`] owns the loaded track geometry and nothing else.
//! Each call to [`TascController::update`] maps the previous tick's
//! [`TascState`] and a fresh [`TrainSnapshot`] to the next state; the
//! controller itself is never mutated, so one instance can serve every
//! tick of a session without synchronization.
//!
//! A tick walks a fixed sequence: classify the vehicle, bail out into the
//! released state while the function is switched off, look up the
//! stop-position offset, decide stopped-at-station, resolve the binding
//! speed limit, average the gradient over the active window, evaluate the
//! speed-limit pattern, evaluate the stopping patterns, then classify the
//! phase from what the patterns decided.

use opentasc_patterns::constants::{
    LIMIT_DECELERATION, LIMIT_TARGET_MARGIN_M, NO_PATTERN_SPEED, REDUCTION_DECELERATION,
    RELATIVE_GRADIENT_SPAN_M, STANDBY_BRAKING_DISTANCE_M, STOPPING_DECELERATION, STOP_RANGE_M,
    STOP_SIGNAL_MARGIN_M,
};
use opentasc_patterns::{
    NotchCurve, fixed_gradient_window, gradient_corrected, is_numerically_zero, limit_pattern,
    notch_curves, stopping_pattern, stopping_reduction_pattern,
};
use opentasc_telemetry::{SignalClass, StopKind, TrainSnapshot};
use opentasc_trackdata::{SystemLimit, TrackData};
use opentasc_vehicles::TrainModel;

use crate::phase::TascPhase;
use crate::state::TascState;

/// The stop-control computation core.
///
/// Construct it once over loaded [`TrackData`] and feed it one snapshot
/// per tick. Every query the controller makes is a read, so sharing a
/// controller behind an `Arc` is sound.
#[derive(Debug, Default)]
pub struct TascController {
    track: TrackData,
}

impl TascController {
    /// Creates a controller over already-loaded track geometry.
    pub fn new(track: TrackData) -> Self {
        Self { track }
    }

    /// Creates a controller with no track geometry at all; every dataset
    /// query takes its neutral fallback.
    pub fn without_track_data() -> Self {
        Self {
            track: TrackData::empty(),
        }
    }

    /// The track geometry this controller steers by.
    pub fn track(&self) -> &TrackData {
        &self.track
    }

    /// Advances the control state by one tick.
    ///
    /// `previous` supplies the carried cab knobs (enable flags, pattern
    /// mode) and the last outputs; the returned state is complete, a
    /// display layer needs nothing else. An invalid snapshot (empty
    /// consist or station list, station index out of range) returns
    /// `previous` untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use opentasc_core::{TascController, TascPhase, TascState};
    /// use opentasc_telemetry::{SignalClass, StationEntry, StopKind, TrainSnapshot};
    ///
    /// let controller = TascController::without_track_data();
    /// let snapshot = TrainSnapshot::builder()
    ///     .speed(60.0)
    ///     .next_station("浜園", 100.0, StopKind::Passenger)
    ///     .stations(vec![StationEntry::new("浜園", StopKind::Passenger)])
    ///     .car_models(&["5320"])
    ///     .build();
    ///
    /// let state = controller.update(TascState::default(), &snapshot, SignalClass::None);
    /// assert_eq!(state.phase, TascPhase::Stopping);
    /// assert!(state.pattern_speed < 50.0);
    /// assert!(state.braking);
    /// ```
    pub fn update(
        &self,
        previous: TascState,
        snapshot: &TrainSnapshot,
        signal: SignalClass,
    ) -> TascState {
        if !snapshot.is_valid() {
            return previous;
        }

        let speed = snapshot.speed;
        let remaining = snapshot.next_station_distance;
        let distance = remaining.max(0.0);
        let direction = snapshot.direction();

        let mut next = previous;
        next.model = TrainModel::classify(snapshot.lead_car_model().unwrap_or(""));

        if !next.enabled {
            return Self::released(next);
        }

        let profile = next.model.profile();

        next.stop_position_offset = self.track.stop_position_offset(
            direction,
            &snapshot.next_station_name,
            snapshot.car_count(),
            snapshot.next_stop_kind,
        );
        let offset = next.stop_position_offset;
        let mode_offset = next.mode.deceleration_offset();

        next.stopped_at_station = Self::stopped_at_station(snapshot, remaining, speed);

        // Table lookup first, then a live bound wins whenever it is at
        // least as strict as what the table produced.
        let resolved = self.track.resolve_limit(
            direction,
            snapshot
                .previous_station()
                .map(|station| station.stop_position_name.as_str()),
            snapshot
                .current_station()
                .map(|station| station.stop_position_name.as_str()),
            distance,
            offset,
            SystemLimit::from_snapshot(snapshot),
        );
        if snapshot.next_speed_limit >= 0.0 && snapshot.next_speed_limit <= resolved.speed {
            next.binding_limit_speed = snapshot.next_speed_limit;
            next.binding_limit_distance = snapshot.next_speed_limit_distance;
        } else {
            next.binding_limit_speed = resolved.speed;
            next.binding_limit_distance = resolved.distance;
        }

        next.gradient_average = self.gradient_window_average(
            next.enabled,
            snapshot,
            distance,
            next.binding_limit_distance,
            offset,
        );

        let limit_engaged =
            next.speed_control_enabled && next.binding_limit_speed < snapshot.speed_limit;
        if !next.speed_control_enabled {
            next.target_limit_speed = snapshot.speed_limit;
            next.target_limit_distance = 0.0;
            next.limit_pattern_speed = NO_PATTERN_SPEED;
        } else if limit_engaged {
            next.target_limit_speed = next.binding_limit_speed;
            next.target_limit_distance = Self::limit_target_distance(
                next.binding_limit_distance,
                next.target_limit_speed,
                signal,
            );
            let curve = limit_pattern(
                next.target_limit_speed,
                next.target_limit_distance,
                LIMIT_DECELERATION + mode_offset,
                profile.free_running_time,
                next.gradient_average,
            );
            // Lowest of system limit, curve and target wins.
            next.limit_pattern_speed = if curve > snapshot.speed_limit {
                snapshot.speed_limit
            } else if curve > next.target_limit_speed {
                curve
            } else {
                next.target_limit_speed
            };
        } else {
            next.target_limit_speed = snapshot.speed_limit;
            next.target_limit_distance = 0.0;
            next.limit_pattern_speed = snapshot.speed_limit;
        }

        let armed = snapshot.next_stop_kind.requires_stop()
            && remaining < STANDBY_BRAKING_DISTANCE_M;
        if armed {
            let stopping_deceleration = STOPPING_DECELERATION + mode_offset;
            let reduction_deceleration =
                REDUCTION_DECELERATION + next.mode.reduction_deceleration_offset();
            next.stopping_pattern_speed = stopping_pattern(
                distance,
                stopping_deceleration,
                profile.free_running_time,
                next.gradient_average,
            );
            next.reduction_pattern_speed = stopping_reduction_pattern(
                distance,
                reduction_deceleration,
                profile.free_running_time,
                next.gradient_average,
            );
            if next.stopping_pattern_speed > next.reduction_pattern_speed {
                next.pattern_speed = next.stopping_pattern_speed;
                next.deceleration =
                    gradient_corrected(stopping_deceleration, next.gradient_average);
            } else {
                next.pattern_speed = next.reduction_pattern_speed;
                next.deceleration =
                    gradient_corrected(reduction_deceleration, next.gradient_average);
            }
        } else {
            next.pattern_speed = NO_PATTERN_SPEED;
            next.deceleration = 0.0;
            next.stopping_pattern_speed = 0.0;
            next.reduction_pattern_speed = 0.0;
        }

        next.operating = armed;
        next.phase = if next.stopped_at_station {
            TascPhase::Stopped
        } else if armed {
            if next.stopping_pattern_speed > next.reduction_pattern_speed {
                TascPhase::Stopping
            } else {
                TascPhase::StoppingReduced
            }
        } else if limit_engaged {
            TascPhase::SpeedLimit
        } else {
            TascPhase::Standby
        };
        next.braking = speed > next.enforced_speed();

        next
    }

    /// Deceleration-envelope curves for the classified model, with the
    /// current gradient average already folded in.
    pub fn notch_curves(&self, state: &TascState) -> Vec<NotchCurve> {
        notch_curves(state.model.profile(), state.gradient_average)
    }

    /// Everything zeroed or released; only the cab knobs, the classified
    /// model and the stop-position offset survive a disabled tick.
    fn released(mut state: TascState) -> TascState {
        state.pattern_speed = NO_PATTERN_SPEED;
        state.limit_pattern_speed = NO_PATTERN_SPEED;
        state.stopping_pattern_speed = 0.0;
        state.reduction_pattern_speed = 0.0;
        state.deceleration = 0.0;
        state.gradient_average = 0.0;
        state.binding_limit_speed = 0.0;
        state.binding_limit_distance = 0.0;
        state.target_limit_speed = 0.0;
        state.target_limit_distance = 0.0;
        state.phase = TascPhase::Released;
        state.operating = false;
        state.braking = false;
        state.stopped_at_station = false;
        state
    }

    /// Stopped-at-station: inside the stop range with the speed
    /// numerically zero, and for passenger stops the doors must already be
    /// open. Passages and unknown stop kinds never qualify.
    fn stopped_at_station(snapshot: &TrainSnapshot, remaining: f32, speed: f32) -> bool {
        let Some(station) = snapshot.current_station() else {
            return false;
        };
        if remaining.abs() > STOP_RANGE_M || !is_numerically_zero(speed) {
            return false;
        }
        match station.stop_kind {
            StopKind::Passenger => !snapshot.all_doors_closed,
            StopKind::Operational => true,
            StopKind::Passage | StopKind::None => false,
        }
    }

    /// Average gradient over the window the controller steers by.
    ///
    /// Enabled control averages over the absolute window from the stop
    /// mark out to the fixed bucket distance. Without enabled control the
    /// window is the stretch covered by a live limit bound when one
    /// exists, else a fixed relative span behind the current position.
    fn gradient_window_average(
        &self,
        enabled: bool,
        snapshot: &TrainSnapshot,
        distance: f32,
        binding_limit_distance: f32,
        offset: f32,
    ) -> f32 {
        let direction = snapshot.direction();
        let station = snapshot.next_station_name.as_str();
        if enabled {
            self.track.average_gradient_absolute(
                direction,
                station,
                fixed_gradient_window(distance),
                0.0,
                offset,
            )
        } else if snapshot.next_speed_limit >= 0.0 {
            self.track.average_gradient_absolute(
                direction,
                station,
                distance,
                distance - binding_limit_distance,
                offset,
            )
        } else {
            self.track.average_gradient_relative(
                direction,
                station,
                distance,
                RELATIVE_GRADIENT_SPAN_M,
                offset,
            )
        }
    }

    /// Margin-adjusted aiming distance for the limit target.
    ///
    /// A zero-speed target aims short of the R0 marker unless a departure
    /// signal guards it, which is planted at the mark itself; any other
    /// target aims a flat margin before the restriction and may go
    /// negative once the train is on top of it.
    fn limit_target_distance(
        binding_distance: f32,
        target_speed: f32,
        signal: SignalClass,
    ) -> f32 {
        let base = binding_distance.max(0.0);
        if is_numerically_zero(target_speed) {
            if signal.is_departure() {
                base
            } else {
                (base - STOP_SIGNAL_MARGIN_M).max(0.0)
            }
        } else {
            base - LIMIT_TARGET_MARGIN_M
        }
    }
}
