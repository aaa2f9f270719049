//! Stop-position offset lookup.

use opentasc_telemetry::{Direction, StopKind};

use crate::dataset::TrackData;

impl TrackData {
    /// The stop-position correction in metres for the given approach.
    ///
    /// Applies only when the upcoming stop kind actually requires stopping;
    /// passages, unknown directions, unmatched stations and consist lengths
    /// outside the table all yield 0.0.
    pub fn stop_position_offset(
        &self,
        direction: Option<Direction>,
        station_name: &str,
        car_count: usize,
        stop_kind: StopKind,
    ) -> f32 {
        if !stop_kind.requires_stop() {
            return 0.0;
        }
        let Some(direction) = direction else {
            return 0.0;
        };
        self.stop_offsets
            .records()
            .iter()
            .find(|record| record.direction == direction && record.station_name == station_name)
            .and_then(|record| record.offset_for_cars(car_count))
            .unwrap_or(0.0)
    }
}
