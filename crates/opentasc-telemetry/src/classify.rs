//! Closed classifications for the free-form labels the simulator reports.
//!
//! Direction, stop kind and signal class are each derived from upstream
//! strings exactly once per tick; everything past this module works on the
//! enums alone.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction label used by the up track in the track-data files.
pub const UP_LABEL: &str = "上り";

/// Direction label used by the down track in the track-data files.
pub const DOWN_LABEL: &str = "下り";

const PASSENGER_STOP_LABEL: &str = "停車";
const OPERATIONAL_STOP_LABEL: &str = "運転停車";
const PASSAGE_LABEL: &str = "通過";
const DEPARTURE_SIGNAL_LABEL: &str = "出発";

/// Travel direction, derived solely from the diagram-name digit parity.
///
/// An even diagram number runs up (上り), an odd one runs down (下り). The
/// track-data records carry the same two labels, so a parsed direction can
/// be matched against records directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// 上り — toward the line's origin.
    Up,
    /// 下り — away from the line's origin.
    Down,
}

impl Direction {
    /// Derives the direction from a diagram (schedule) name such as
    /// `"5032A"`.
    ///
    /// All digits in the name are concatenated and parsed; parity decides
    /// the direction. Returns `None` when the name carries no digits or the
    /// digit run does not fit an integer — direction-keyed lookups then
    /// take their miss fallbacks.
    pub fn from_diagram(diagram_name: &str) -> Option<Self> {
        let digits: String = diagram_name.chars().filter(char::is_ascii_digit).collect();
        let number: u64 = digits.parse().ok()?;
        if number.is_multiple_of(2) {
            Some(Self::Up)
        } else {
            Some(Self::Down)
        }
    }

    /// Parses one of the two direction labels carried by track-data files.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            UP_LABEL => Some(Self::Up),
            DOWN_LABEL => Some(Self::Down),
            _ => None,
        }
    }

    /// The Japanese label for this direction, as written in the data files.
    pub fn label(self) -> &'static str {
        match self {
            Self::Up => UP_LABEL,
            Self::Down => DOWN_LABEL,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of stop scheduled at a station.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopKind {
    /// 停車 — scheduled passenger stop; doors open.
    Passenger,
    /// 運転停車 — operational stop; the train halts but doors stay shut.
    Operational,
    /// 通過 — the train passes without stopping.
    Passage,
    /// No stop information reported.
    #[default]
    None,
}

impl StopKind {
    /// Classifies a raw stop-type label.
    ///
    /// The operational label contains the passenger label, so it is tested
    /// first; anything unrecognized maps to [`StopKind::None`].
    pub fn classify(label: &str) -> Self {
        if label.contains(OPERATIONAL_STOP_LABEL) {
            Self::Operational
        } else if label.contains(PASSENGER_STOP_LABEL) {
            Self::Passenger
        } else if label.contains(PASSAGE_LABEL) {
            Self::Passage
        } else {
            Self::None
        }
    }

    /// Whether this kind requires the train to come to a stop.
    ///
    /// Mirrors the upstream 停車-containment rule: both passenger and
    /// operational stops qualify.
    pub fn requires_stop(self) -> bool {
        matches!(self, Self::Passenger | Self::Operational)
    }
}

impl fmt::Display for StopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Passenger => PASSENGER_STOP_LABEL,
            Self::Operational => OPERATIONAL_STOP_LABEL,
            Self::Passage => PASSAGE_LABEL,
            Self::None => "--",
        };
        f.write_str(label)
    }
}

/// Classification of the first signal ahead of the train.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalClass {
    /// A departure signal (name contains 出発).
    Departure,
    /// Any other reported signal.
    Wayside,
    /// No signal reported (empty name or the literal `"None"`).
    #[default]
    None,
}

impl SignalClass {
    /// Classifies a raw signal name as reported by the simulator.
    pub fn classify(name: &str) -> Self {
        if name.is_empty() || name == "None" {
            Self::None
        } else if name.contains(DEPARTURE_SIGNAL_LABEL) {
            Self::Departure
        } else {
            Self::Wayside
        }
    }

    /// Whether the signal is a departure signal.
    ///
    /// Only departure signals change the limit-pattern target margin; a
    /// missing signal behaves like a wayside one.
    pub fn is_departure(self) -> bool {
        matches!(self, Self::Departure)
    }
}
