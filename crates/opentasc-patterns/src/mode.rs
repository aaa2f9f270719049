//! Pattern-mode selection and its deceleration bias.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{HIGH_MODE_OFFSET, LOW_MODE_OFFSET};

/// Operating mode biasing the pattern decelerations.
///
/// High mode steepens the envelopes for a later, harder brake application;
/// low mode flattens them for an earlier, gentler one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternMode {
    /// Base decelerations, no bias.
    #[default]
    Normal,
    /// Steeper patterns, +0.4 km/h/s.
    High,
    /// Flatter patterns, -0.5 km/h/s.
    Low,
}

impl PatternMode {
    /// Offset added to the stopping and limit pattern decelerations.
    pub fn deceleration_offset(self) -> f32 {
        match self {
            Self::Normal => 0.0,
            Self::High => HIGH_MODE_OFFSET,
            Self::Low => LOW_MODE_OFFSET,
        }
    }

    /// Offset added to the stopping-reduction deceleration. Only high mode
    /// biases the reduction pattern; low mode leaves it at its base value.
    pub fn reduction_deceleration_offset(self) -> f32 {
        match self {
            Self::High => HIGH_MODE_OFFSET,
            Self::Normal | Self::Low => 0.0,
        }
    }
}

impl fmt::Display for PatternMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Normal => "平常",
            Self::High => "高速",
            Self::Low => "低速",
        };
        f.write_str(label)
    }
}
