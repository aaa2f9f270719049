//! Control phases of the stop-control cycle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the controller currently stands in its stop-control cycle.
///
/// Exactly one phase holds per tick. The classifier ranks them: a train
/// stopped inside the stop range is [`TascPhase::Stopped`] no matter what
/// patterns are armed, an armed stop pattern outranks an engaged limit
/// pattern, and an idle controller rests in [`TascPhase::Standby`].
/// [`TascPhase::Released`] is only ever produced while the control
/// function is switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TascPhase {
    /// Armed and watching, but no pattern constrains the train yet.
    Standby,
    /// The stopping pattern is the enforced ceiling.
    Stopping,
    /// The stopping-reduction pattern is the enforced ceiling.
    StoppingReduced,
    /// The speed-limit pattern is engaged ahead of a restriction.
    SpeedLimit,
    /// Coasting restraint. Kept for cab-indicator parity; the classifier
    /// never currently produces it.
    Coasting,
    /// Stopped within the stop range at a station.
    #[default]
    Stopped,
    /// Control function disabled.
    Released,
}

impl TascPhase {
    /// Cab-indicator label for this phase.
    pub fn label(self) -> &'static str {
        match self {
            Self::Standby => "制御待機",
            Self::Stopping => "停車制御",
            Self::StoppingReduced => "停車制御(低減)",
            Self::SpeedLimit => "速度制御",
            Self::Coasting => "抑速制御",
            Self::Stopped => "停車",
            Self::Released => "解除",
        }
    }

    /// Whether this phase enforces a braking ceiling below the sentinel.
    pub fn is_constraining(self) -> bool {
        matches!(
            self,
            Self::Stopping | Self::StoppingReduced | Self::SpeedLimit | Self::Coasting
        )
    }
}

impl fmt::Display for TascPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_distinct() {
        let phases = [
            TascPhase::Standby,
            TascPhase::Stopping,
            TascPhase::StoppingReduced,
            TascPhase::SpeedLimit,
            TascPhase::Coasting,
            TascPhase::Stopped,
            TascPhase::Released,
        ];
        for (i, a) in phases.iter().enumerate() {
            for b in phases.iter().skip(i + 1) {
                assert_ne!(a.label(), b.label());
            }
        }
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(TascPhase::Stopping.to_string(), "停車制御");
        assert_eq!(TascPhase::Released.to_string(), "解除");
    }

    #[test]
    fn default_phase_is_stopped() {
        assert_eq!(TascPhase::default(), TascPhase::Stopped);
    }

    #[test]
    fn constraining_phases() {
        assert!(TascPhase::Stopping.is_constraining());
        assert!(TascPhase::StoppingReduced.is_constraining());
        assert!(TascPhase::SpeedLimit.is_constraining());
        assert!(!TascPhase::Standby.is_constraining());
        assert!(!TascPhase::Stopped.is_constraining());
        assert!(!TascPhase::Released.is_constraining());
    }
}
