//! Property-Based Tests for the Control Tick
//!
//! Runs the full tick over wide input ranges and checks the invariants a
//! display layer relies on: outputs stay finite, ceilings never go
//! negative, the enforced speed is the lower ceiling, flags agree with the
//! numbers and a disabled tick always lands in the released state.

use opentasc_core::{TascController, TascPhase, TascState};
use opentasc_patterns::PatternMode;
use opentasc_telemetry::{Direction, SignalClass, StationEntry, StopKind, TrainSnapshot};
use opentasc_trackdata::{Dataset, GradientRecord, SpeedLimitRecord, StopOffsetRecord, TrackData};

/// Up-direction approach with one station behind, matching the track
/// fixture below.
fn snapshot(
    speed: f32,
    remaining: f32,
    live_limit: f32,
    live_distance: f32,
    speed_limit: f32,
    stop_kind: StopKind,
    doors_closed: bool,
) -> TrainSnapshot {
    TrainSnapshot::builder()
        .speed(speed)
        .diagram_name("5032A")
        .next_station("浜園", remaining, stop_kind)
        .stations(vec![
            StationEntry::new("海山", StopKind::Passage).with_stop_position("海山1"),
            StationEntry::new("浜園", stop_kind).with_stop_position("浜園2"),
        ])
        .now_station_index(1)
        .car_models(&["5320", "5320"])
        .next_speed_limit(live_limit, live_distance)
        .speed_limit(speed_limit)
        .all_doors_closed(doors_closed)
        .build()
}

/// One gradient sample, one restricted section and one offset row on the
/// approach the snapshots drive.
fn hilly_track(gradient: f32) -> TrackData {
    TrackData {
        gradients: Dataset::loaded(vec![GradientRecord {
            direction: Direction::Up,
            station_name: "浜園".to_owned(),
            distance: 120.0,
            gradient,
        }]),
        speed_limits: Dataset::loaded(vec![SpeedLimitRecord {
            direction: Direction::Up,
            start_position: 900.0,
            end_position: 200.0,
            limit: 45.0,
            back_stop_position: "海山1".to_owned(),
            next_stop_position: "浜園2".to_owned(),
        }]),
        stop_offsets: Dataset::loaded(vec![StopOffsetRecord {
            direction: Direction::Up,
            station_name: "浜園".to_owned(),
            offsets: [0.5, 1.0, 1.5, 2.0, 2.5, 3.0],
        }]),
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn stop_kinds() -> impl Strategy<Value = StopKind> {
        prop_oneof![
            Just(StopKind::Passenger),
            Just(StopKind::Operational),
            Just(StopKind::Passage),
            Just(StopKind::None),
        ]
    }

    fn signals() -> impl Strategy<Value = SignalClass> {
        prop_oneof![
            Just(SignalClass::Departure),
            Just(SignalClass::Wayside),
            Just(SignalClass::None),
        ]
    }

    fn modes() -> impl Strategy<Value = PatternMode> {
        prop_oneof![
            Just(PatternMode::Normal),
            Just(PatternMode::High),
            Just(PatternMode::Low),
        ]
    }

    proptest! {
        #[test]
        fn outputs_stay_finite_and_consistent(
            speed in 0.0f32..140.0,
            remaining in -20.0f32..2000.0,
            live_limit in -5.0f32..130.0,
            live_distance in 0.0f32..1500.0,
            speed_limit in 10.0f32..120.0,
            gradient in -35.0f32..35.0,
            stop_kind in stop_kinds(),
            signal in signals(),
            mode in modes(),
            doors_closed in any::<bool>(),
        ) {
            let controller = TascController::new(hilly_track(gradient));
            let snap = snapshot(
                speed, remaining, live_limit, live_distance, speed_limit, stop_kind, doors_closed,
            );
            let state = controller.update(TascState::default().with_mode(mode), &snap, signal);

            for value in [
                state.pattern_speed,
                state.limit_pattern_speed,
                state.stopping_pattern_speed,
                state.reduction_pattern_speed,
                state.deceleration,
                state.gradient_average,
                state.stop_position_offset,
                state.binding_limit_speed,
                state.binding_limit_distance,
                state.target_limit_speed,
                state.target_limit_distance,
            ] {
                prop_assert!(value.is_finite());
            }
            prop_assert!(state.pattern_speed >= 0.0);
            prop_assert!(state.limit_pattern_speed >= 0.0);
            prop_assert!(state.stopping_pattern_speed >= 0.0);
            prop_assert!(state.reduction_pattern_speed >= 0.0);
            prop_assert!(state.binding_limit_speed >= 0.0);
            prop_assert!(state.enforced_speed() <= state.pattern_speed);
            prop_assert!(state.enforced_speed() <= state.limit_pattern_speed);
            prop_assert_eq!(state.braking, speed > state.enforced_speed());
        }

        #[test]
        fn update_is_deterministic(
            speed in 0.0f32..140.0,
            remaining in -20.0f32..2000.0,
            live_limit in -5.0f32..130.0,
            live_distance in 0.0f32..1500.0,
            speed_limit in 10.0f32..120.0,
            gradient in -35.0f32..35.0,
            stop_kind in stop_kinds(),
            signal in signals(),
            mode in modes(),
        ) {
            let controller = TascController::new(hilly_track(gradient));
            let snap = snapshot(
                speed, remaining, live_limit, live_distance, speed_limit, stop_kind, true,
            );
            let previous = TascState::default().with_mode(mode);
            let first = controller.update(previous, &snap, signal);
            let second = controller.update(previous, &snap, signal);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn disabled_ticks_always_release(
            speed in 0.0f32..140.0,
            remaining in -20.0f32..2000.0,
            live_limit in -5.0f32..130.0,
            speed_limit in 10.0f32..120.0,
            stop_kind in stop_kinds(),
            signal in signals(),
        ) {
            let controller = TascController::new(hilly_track(5.0));
            let snap = snapshot(speed, remaining, live_limit, 300.0, speed_limit, stop_kind, true);
            let state =
                controller.update(TascState::default().with_enabled(false), &snap, signal);

            prop_assert_eq!(state.phase, TascPhase::Released);
            prop_assert!((state.pattern_speed - 120.0).abs() < 1e-6);
            prop_assert!((state.limit_pattern_speed - 120.0).abs() < 1e-6);
            prop_assert!(state.deceleration.abs() < 1e-6);
            prop_assert!(!state.operating);
            prop_assert!(!state.braking);
            prop_assert!(!state.stopped_at_station);
        }

        #[test]
        fn passages_never_arm_the_stop_pattern(
            speed in 0.0f32..140.0,
            remaining in -20.0f32..900.0,
            gradient in -35.0f32..35.0,
            signal in signals(),
        ) {
            let controller = TascController::new(hilly_track(gradient));
            for kind in [StopKind::Passage, StopKind::None] {
                let snap = snapshot(speed, remaining, -1.0, 0.0, 120.0, kind, true);
                let state = controller.update(TascState::default(), &snap, signal);
                prop_assert!(!state.operating);
                prop_assert!((state.pattern_speed - 120.0).abs() < 1e-6);
                prop_assert!(state.stopping_pattern_speed.abs() < 1e-6);
            }
        }

        #[test]
        fn stopped_flag_forces_the_stopped_phase(
            speed in 0.0f32..140.0,
            remaining in -20.0f32..2000.0,
            live_limit in -5.0f32..130.0,
            speed_limit in 10.0f32..120.0,
            stop_kind in stop_kinds(),
            signal in signals(),
            doors_closed in any::<bool>(),
        ) {
            let controller = TascController::new(hilly_track(0.0));
            let snap = snapshot(
                speed, remaining, live_limit, 200.0, speed_limit, stop_kind, doors_closed,
            );
            let state = controller.update(TascState::default(), &snap, signal);
            if state.stopped_at_station {
                prop_assert_eq!(state.phase, TascPhase::Stopped);
            }
        }

        #[test]
        fn operational_stop_inside_range_is_stopped(
            remaining in -2.9f32..2.9,
            gradient in -35.0f32..35.0,
        ) {
            let controller = TascController::new(hilly_track(gradient));
            let snap = snapshot(0.0, remaining, -1.0, 0.0, 120.0, StopKind::Operational, true);
            let state = controller.update(TascState::default(), &snap, SignalClass::None);
            prop_assert!(state.stopped_at_station);
            prop_assert_eq!(state.phase, TascPhase::Stopped);
        }
    }
}
