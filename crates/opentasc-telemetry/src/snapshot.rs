//! The read-only per-tick train state consumed by the controller.

use crate::classify::{Direction, StopKind};
use serde::{Deserialize, Serialize};

/// One car of the consist, as reported by the simulator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarEntry {
    /// Vehicle model identifier, e.g. `"4000"` or `"3020"`.
    pub model: String,
}

impl CarEntry {
    /// Creates a car entry for the given model identifier.
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into() }
    }
}

/// One station of the active diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationEntry {
    /// Station name, the key for gradient and stop-offset records.
    pub name: String,
    /// What the train is scheduled to do here.
    pub stop_kind: StopKind,
    /// Stop-position name, the key for speed-limit records.
    #[serde(default)]
    pub stop_position_name: String,
}

impl StationEntry {
    /// Creates a station entry with an empty stop-position name.
    pub fn new(name: impl Into<String>, stop_kind: StopKind) -> Self {
        Self {
            name: name.into(),
            stop_kind,
            stop_position_name: String::new(),
        }
    }

    /// Sets the stop-position name used to join speed-limit records.
    pub fn with_stop_position(mut self, stop_position_name: impl Into<String>) -> Self {
        self.stop_position_name = stop_position_name.into();
        self
    }
}

/// Snapshot of the train state for one tick.
///
/// Produced by the telemetry collaborator and never mutated by the core.
/// Distances count down toward the next stop and may go negative on an
/// overrun; a negative [`next_speed_limit`](Self::next_speed_limit) means no
/// live limit is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSnapshot {
    // === Motion ===
    /// Current speed in km/h.
    pub speed: f32,

    /// Brake handle notch currently selected (0 = released).
    #[serde(default)]
    pub brake_notch: i32,

    // === Next stop ===
    /// Remaining distance to the next station's stop position in metres.
    pub next_station_distance: f32,

    /// What the train is scheduled to do at the next station.
    pub next_stop_kind: StopKind,

    /// Name of the next station.
    pub next_station_name: String,

    // === Speed limits ===
    /// Next speed limit in km/h; negative when none is reported.
    #[serde(default = "no_limit")]
    pub next_speed_limit: f32,

    /// Distance to the next speed limit in metres.
    #[serde(default)]
    pub next_speed_limit_distance: f32,

    /// Speed limit currently in force, km/h.
    pub speed_limit: f32,

    // === Diagram ===
    /// Index of the current station within [`stations`](Self::stations).
    #[serde(default)]
    pub now_station_index: usize,

    /// The stations of the active diagram, in travel order.
    pub stations: Vec<StationEntry>,

    /// The cars of the consist, lead car first.
    pub cars: Vec<CarEntry>,

    /// Diagram (schedule) name; its digit parity encodes the direction.
    pub diagram_name: String,

    /// Whether every door of the consist is closed.
    #[serde(default)]
    pub all_doors_closed: bool,
}

fn no_limit() -> f32 {
    -1.0
}

impl Default for TrainSnapshot {
    fn default() -> Self {
        Self {
            speed: 0.0,
            brake_notch: 0,
            next_station_distance: 0.0,
            next_stop_kind: StopKind::None,
            next_station_name: String::new(),
            next_speed_limit: -1.0,
            next_speed_limit_distance: 0.0,
            speed_limit: 120.0,
            now_station_index: 0,
            stations: Vec::new(),
            cars: Vec::new(),
            diagram_name: String::new(),
            all_doors_closed: true,
        }
    }
}

impl TrainSnapshot {
    /// Creates a builder with default (empty) state.
    pub fn builder() -> TrainSnapshotBuilder {
        TrainSnapshotBuilder::new()
    }

    /// Whether this snapshot carries enough data to compute on.
    ///
    /// The controller skips the tick otherwise: an empty station list, an
    /// empty consist or an out-of-range station index would make every
    /// lookup meaningless.
    pub fn is_valid(&self) -> bool {
        !self.stations.is_empty()
            && !self.cars.is_empty()
            && self.now_station_index < self.stations.len()
    }

    /// Travel direction derived from the diagram name, if any.
    pub fn direction(&self) -> Option<Direction> {
        Direction::from_diagram(&self.diagram_name)
    }

    /// Model identifier of the lead car, if the consist is non-empty.
    pub fn lead_car_model(&self) -> Option<&str> {
        self.cars.first().map(|car| car.model.as_str())
    }

    /// Number of cars in the consist.
    pub fn car_count(&self) -> usize {
        self.cars.len()
    }

    /// The current station entry, if the index is in range.
    pub fn current_station(&self) -> Option<&StationEntry> {
        self.stations.get(self.now_station_index)
    }

    /// The station before the current one, clamped to the first station at
    /// the start of a route.
    pub fn previous_station(&self) -> Option<&StationEntry> {
        self.stations.get(self.now_station_index.saturating_sub(1))
    }
}

/// Builder for [`TrainSnapshot`], used by adapters and tests.
#[derive(Debug, Clone, Default)]
pub struct TrainSnapshotBuilder {
    inner: TrainSnapshot,
}

impl TrainSnapshotBuilder {
    /// Creates a builder with default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current speed in km/h.
    pub fn speed(mut self, value: f32) -> Self {
        self.inner.speed = value;
        self
    }

    /// Sets the selected brake notch.
    pub fn brake_notch(mut self, value: i32) -> Self {
        self.inner.brake_notch = value;
        self
    }

    /// Sets the next station name, remaining distance and stop kind.
    pub fn next_station(
        mut self,
        name: impl Into<String>,
        distance: f32,
        stop_kind: StopKind,
    ) -> Self {
        self.inner.next_station_name = name.into();
        self.inner.next_station_distance = distance;
        self.inner.next_stop_kind = stop_kind;
        self
    }

    /// Sets the remaining distance to the next station in metres.
    pub fn next_station_distance(mut self, value: f32) -> Self {
        self.inner.next_station_distance = value;
        self
    }

    /// Sets the live next speed limit and its distance.
    pub fn next_speed_limit(mut self, limit: f32, distance: f32) -> Self {
        self.inner.next_speed_limit = limit;
        self.inner.next_speed_limit_distance = distance;
        self
    }

    /// Sets the speed limit currently in force.
    pub fn speed_limit(mut self, value: f32) -> Self {
        self.inner.speed_limit = value;
        self
    }

    /// Sets the current station index.
    pub fn now_station_index(mut self, value: usize) -> Self {
        self.inner.now_station_index = value;
        self
    }

    /// Sets the station list.
    pub fn stations(mut self, stations: Vec<StationEntry>) -> Self {
        self.inner.stations = stations;
        self
    }

    /// Sets the consist from a list of model identifiers, lead car first.
    pub fn car_models(mut self, models: &[&str]) -> Self {
        self.inner.cars = models.iter().map(|model| CarEntry::new(*model)).collect();
        self
    }

    /// Sets the consist directly.
    pub fn cars(mut self, cars: Vec<CarEntry>) -> Self {
        self.inner.cars = cars;
        self
    }

    /// Sets the diagram (schedule) name.
    pub fn diagram_name(mut self, value: impl Into<String>) -> Self {
        self.inner.diagram_name = value.into();
        self
    }

    /// Sets the all-doors-closed flag.
    pub fn all_doors_closed(mut self, value: bool) -> Self {
        self.inner.all_doors_closed = value;
        self
    }

    /// Finishes the snapshot.
    pub fn build(self) -> TrainSnapshot {
        self.inner
    }
}
