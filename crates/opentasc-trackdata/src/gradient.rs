//! Average-gradient queries over the loaded gradient table.

use opentasc_telemetry::Direction;

use crate::dataset::TrackData;

impl TrackData {
    /// Mean gradient between the current position and an absolute distance
    /// mark on the same station approach, in per mille.
    ///
    /// The current-position bound is clamped to zero and the two bounds are
    /// order-normalized, so the caller may pass them either way round.
    /// Returns exactly 0.0 when nothing matches or no direction is known.
    pub fn average_gradient_absolute(
        &self,
        direction: Option<Direction>,
        station_name: &str,
        distance: f32,
        target_distance: f32,
        offset: f32,
    ) -> f32 {
        self.average_gradient_between(
            direction,
            station_name,
            distance.max(0.0),
            target_distance,
            offset,
        )
    }

    /// Mean gradient over the `span` metres of approach behind the current
    /// position, both bounds clamped to zero.
    pub fn average_gradient_relative(
        &self,
        direction: Option<Direction>,
        station_name: &str,
        distance: f32,
        span: f32,
        offset: f32,
    ) -> f32 {
        let far_bound = (distance - span).max(0.0);
        self.average_gradient_between(
            direction,
            station_name,
            distance.max(0.0),
            far_bound,
            offset,
        )
    }

    fn average_gradient_between(
        &self,
        direction: Option<Direction>,
        station_name: &str,
        bound_a: f32,
        bound_b: f32,
        offset: f32,
    ) -> f32 {
        let Some(direction) = direction else {
            return 0.0;
        };
        let (low, high) = if bound_a <= bound_b {
            (bound_a, bound_b)
        } else {
            (bound_b, bound_a)
        };

        let mut sum = 0.0f32;
        let mut count = 0usize;
        for record in self.gradients.records() {
            if record.direction != direction || record.station_name != station_name {
                continue;
            }
            let position = record.distance - offset;
            if position >= low && position <= high {
                sum += record.gradient;
                count += 1;
            }
        }
        if count == 0 { 0.0 } else { sum / count as f32 }
    }
}
