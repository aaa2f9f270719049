//! Vehicle model classification and kinematic brake profiles for OpenTASC.
//!
//! The TASC computation needs a handful of per-model constants: maximum
//! service deceleration, the fraction of it each brake notch commands, the
//! free-running (reaction) time and the maximum straight-air-pipe pressure,
//! plus two cab flags (two-handle master controller, SMEE brake). Models
//! form a closed set; an unrecognized identifier deliberately falls back to
//! the baseline 5320 profile instead of failing, because a train with an
//! unknown model still has to be braked somehow.
//!
//! # Example
//!
//! ```
//! use opentasc_vehicles::TrainModel;
//!
//! let model = TrainModel::classify("3020");
//! assert_eq!(model, TrainModel::Series3020);
//!
//! let profile = model.profile();
//! assert!(profile.smee_brake);
//! assert_eq!(profile.notch_count(), 8);
//!
//! // Unknown identifiers map to the baseline model, not an error.
//! assert_eq!(TrainModel::classify("9999"), TrainModel::Series5320);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use serde::{Deserialize, Serialize};

/// Six-notch deceleration fractions shared by the baseline fleet.
const BASELINE_NOTCH_FRACTIONS: [f32; 6] = [0.18, 0.33, 0.49, 0.61, 0.75, 0.89];

/// Seven-notch table of the 4000 series and its refurbished cars.
const SEVEN_NOTCH_FRACTIONS: [f32; 7] = [0.11, 0.23, 0.36, 0.50, 0.64, 0.77, 0.91];

/// Eight-notch table of the SMEE-braked 3000/3020 series.
const EIGHT_NOTCH_FRACTIONS: [f32; 8] = [0.11, 0.22, 0.33, 0.45, 0.56, 0.67, 0.78, 0.89];

/// Kinematic constants of one vehicle family.
///
/// Profiles are static data; lookups hand out `&'static` references and
/// never allocate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleProfile {
    /// Maximum service deceleration in km/h/s.
    pub max_deceleration: f32,
    /// Fraction of the maximum deceleration each notch commands, ordered
    /// from the lightest notch.
    pub notch_fractions: &'static [f32],
    /// Free-running (reaction) time in seconds before brakes bite.
    pub free_running_time: f32,
    /// Maximum straight-air-pipe pressure in kPa.
    pub max_pressure: f32,
    /// Whether the cab has separate power and brake handles.
    pub two_handle: bool,
    /// Whether the vehicle uses the electro-pneumatic SMEE brake; such
    /// vehicles label their notches by pipe pressure.
    pub smee_brake: bool,
}

impl VehicleProfile {
    /// Number of brake notches this vehicle supports.
    pub fn notch_count(&self) -> usize {
        self.notch_fractions.len()
    }

    /// Deceleration commanded by the 0-based notch index, in km/h/s,
    /// without gradient correction. `None` when the index is out of range.
    pub fn notch_deceleration(&self, notch_index: usize) -> Option<f32> {
        self.notch_fractions
            .get(notch_index)
            .map(|fraction| fraction * self.max_deceleration)
    }
}

const BASELINE_PROFILE: VehicleProfile = VehicleProfile {
    max_deceleration: 4.6,
    notch_fractions: &BASELINE_NOTCH_FRACTIONS,
    free_running_time: 0.5,
    max_pressure: 400.0,
    two_handle: false,
    smee_brake: false,
};

const TWO_HANDLE_PROFILE: VehicleProfile = VehicleProfile {
    notch_fractions: &SEVEN_NOTCH_FRACTIONS,
    two_handle: true,
    ..BASELINE_PROFILE
};

const SMEE_PROFILE: VehicleProfile = VehicleProfile {
    max_deceleration: 4.2,
    notch_fractions: &EIGHT_NOTCH_FRACTIONS,
    two_handle: true,
    smee_brake: true,
    ..BASELINE_PROFILE
};

/// The closed set of vehicle models the line operates.
///
/// [`TrainModel::None`] is the pre-classification placeholder a fresh
/// control session starts with; it shares the baseline constants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainModel {
    /// Not yet classified.
    #[default]
    None,
    /// 5320 series, the baseline fleet.
    Series5320,
    /// 5300 series.
    Series5300,
    /// 4300 series.
    Series4300,
    /// The 4321F set.
    Car4321F,
    /// 4000 series (two-handle cab).
    Series4000,
    /// Refurbished 4000 series cars.
    Car4000R,
    /// 50000 series.
    Series50000,
    /// 3300 series VVVF refit.
    Car3300V,
    /// 3000 series (SMEE brake).
    Series3000,
    /// 3020 series (SMEE brake).
    Series3020,
    /// 4600 series.
    Series4600,
    /// 5600 series.
    Series5600,
}

impl TrainModel {
    /// Every variant, in table order. Handy for exhaustive tests.
    pub const ALL: [Self; 13] = [
        Self::None,
        Self::Series5320,
        Self::Series5300,
        Self::Series4300,
        Self::Car4321F,
        Self::Series4000,
        Self::Car4000R,
        Self::Series50000,
        Self::Car3300V,
        Self::Series3000,
        Self::Series3020,
        Self::Series4600,
        Self::Series5600,
    ];

    /// Classifies a raw model identifier as reported by the lead car.
    ///
    /// Unrecognized identifiers map to [`TrainModel::Series5320`], the
    /// designated baseline — an explicit fallback, not an error.
    pub fn classify(identifier: &str) -> Self {
        match identifier {
            "5320" => Self::Series5320,
            "5300" => Self::Series5300,
            "4300" => Self::Series4300,
            "4321" => Self::Car4321F,
            "4000" => Self::Series4000,
            "4000R" => Self::Car4000R,
            "50000" => Self::Series50000,
            "3300V" => Self::Car3300V,
            "3000" => Self::Series3000,
            "3020" => Self::Series3020,
            "4600" => Self::Series4600,
            "5600" => Self::Series5600,
            _ => Self::Series5320,
        }
    }

    /// The kinematic profile for this model.
    pub const fn profile(self) -> &'static VehicleProfile {
        match self {
            Self::Series4000 | Self::Car4000R => &TWO_HANDLE_PROFILE,
            Self::Series3000 | Self::Series3020 => &SMEE_PROFILE,
            Self::None
            | Self::Series5320
            | Self::Series5300
            | Self::Series4300
            | Self::Car4321F
            | Self::Series50000
            | Self::Car3300V
            | Self::Series4600
            | Self::Series5600 => &BASELINE_PROFILE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_identifiers_classify_to_their_variant() {
        let table = [
            ("5320", TrainModel::Series5320),
            ("5300", TrainModel::Series5300),
            ("4300", TrainModel::Series4300),
            ("4321", TrainModel::Car4321F),
            ("4000", TrainModel::Series4000),
            ("4000R", TrainModel::Car4000R),
            ("50000", TrainModel::Series50000),
            ("3300V", TrainModel::Car3300V),
            ("3000", TrainModel::Series3000),
            ("3020", TrainModel::Series3020),
            ("4600", TrainModel::Series4600),
            ("5600", TrainModel::Series5600),
        ];
        for (identifier, expected) in table {
            assert_eq!(TrainModel::classify(identifier), expected);
        }
    }

    #[test]
    fn unknown_identifier_falls_back_to_baseline() {
        assert_eq!(TrainModel::classify(""), TrainModel::Series5320);
        assert_eq!(TrainModel::classify("9999"), TrainModel::Series5320);
        assert_eq!(TrainModel::classify("5320R"), TrainModel::Series5320);
    }

    #[test]
    fn two_handle_cabs_are_exactly_the_4000_and_3000_families() {
        for model in TrainModel::ALL {
            let expected = matches!(
                model,
                TrainModel::Series4000
                    | TrainModel::Car4000R
                    | TrainModel::Series3000
                    | TrainModel::Series3020
            );
            assert_eq!(model.profile().two_handle, expected, "{model:?}");
        }
    }

    #[test]
    fn smee_brakes_are_exactly_the_3000_family() {
        for model in TrainModel::ALL {
            let expected = matches!(model, TrainModel::Series3000 | TrainModel::Series3020);
            assert_eq!(model.profile().smee_brake, expected, "{model:?}");
        }
    }

    #[test]
    fn smee_vehicles_brake_slightly_softer() {
        for model in TrainModel::ALL {
            let profile = model.profile();
            let expected = if profile.smee_brake { 4.2 } else { 4.6 };
            assert!((profile.max_deceleration - expected).abs() < f32::EPSILON, "{model:?}");
        }
    }

    #[test]
    fn every_profile_shares_reaction_time_and_pressure() {
        for model in TrainModel::ALL {
            let profile = model.profile();
            assert!((profile.free_running_time - 0.5).abs() < f32::EPSILON);
            assert!((profile.max_pressure - 400.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn notch_counts_per_family() {
        assert_eq!(TrainModel::Series5320.profile().notch_count(), 6);
        assert_eq!(TrainModel::Series4000.profile().notch_count(), 7);
        assert_eq!(TrainModel::Car4000R.profile().notch_count(), 7);
        assert_eq!(TrainModel::Series3000.profile().notch_count(), 8);
        assert_eq!(TrainModel::None.profile().notch_count(), 6);
    }

    #[test]
    fn notch_fractions_increase_strictly_within_unit_range() {
        for model in TrainModel::ALL {
            let fractions = model.profile().notch_fractions;
            for window in fractions.windows(2) {
                if let [lighter, heavier] = window {
                    assert!(lighter < heavier, "{model:?}");
                }
            }
            for fraction in fractions {
                assert!(*fraction > 0.0 && *fraction < 1.0, "{model:?}");
            }
        }
    }

    #[test]
    fn notch_deceleration_scales_the_maximum() {
        let profile = TrainModel::Series5320.profile();
        let lightest = profile.notch_deceleration(0);
        let heaviest = profile.notch_deceleration(5);
        assert!(lightest.is_some_and(|dec| (dec - 0.18 * 4.6).abs() < 1e-5));
        assert!(heaviest.is_some_and(|dec| (dec - 0.89 * 4.6).abs() < 1e-5));
        assert_eq!(profile.notch_deceleration(6), None);
    }
}
