//! Braking pattern formulas and notch envelope curves for OpenTASC.
//!
//! # Overview
//!
//! A TASC "pattern" is a ceiling speed as a function of remaining distance.
//! This crate hosts the three curve formulas (stopping, stopping-reduction,
//! speed-limit), the shared kinematic constants, the pattern-mode bias and
//! the per-notch display curves derived from a vehicle profile. Everything
//! here is pure: no state, no I/O, total over all inputs, never NaN and
//! never negative on output.
//!
//! # Example
//!
//! ```
//! use opentasc_patterns::{stopping_pattern, PatternMode};
//!
//! // 100 m from the stop on flat track, normal mode.
//! let mode = PatternMode::Normal;
//! let ceiling = stopping_pattern(100.0, 3.0 + mode.deceleration_offset(), 0.5, 0.0);
//! assert!(ceiling > 44.0 && ceiling < 45.0);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod constants;
pub mod formula;
pub mod mode;
pub mod notch;

pub use formula::{
    fixed_gradient_window, gradient_corrected, is_numerically_zero, limit_pattern,
    stopping_pattern, stopping_reduction_pattern,
};
pub use mode::PatternMode;
pub use notch::{NotchCurve, highlighted_notch, notch_curves};
