//! Sizing of the shunt capacitor that brings the load to unity power factor.
//!
//! The solver looks only at R and L: it answers what the correction capacitance
//! should be, independent of what it currently is. The required capacitance
//! cancels the load susceptance, `ωC = -Im(Y_load)`.
//!
//! A load whose susceptance is already non-negative (purely resistive, or
//! capacitive) needs no correction, so the solver reports zero rather than a
//! negative capacitance. Non-finite results are reported as zero as well.

use crate::circuits::load::load_admittance;
use crate::math::{safe_div, Scalar};
use crate::simulation::{SupplyConfig, Tuning};
use crate::units::farads_to_microfarads;

/// Solver output for one (R, L) pair.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionSuggestion {
    /// Capacitance in µF that zeroes the total susceptance.
    pub unity_capacitance_uf: Scalar,
    /// Upper bound for the correction slider in µF.
    pub slider_ceiling_uf: Scalar,
}

/// Capacitance in µF that cancels the susceptance of an R-L load at `omega`.
///
/// Never negative and always finite.
#[must_use]
pub fn required_capacitance_uf(
    resistance_ohms: Scalar,
    inductance_mh: Scalar,
    omega: Scalar,
) -> Scalar {
    let load = load_admittance(resistance_ohms, inductance_mh, omega);
    let needed_susceptance = -load.im;
    let capacitance_uf = farads_to_microfarads(safe_div(needed_susceptance, omega));
    if capacitance_uf.is_finite() && capacitance_uf > 0.0 {
        capacitance_uf
    } else {
        0.0
    }
}

/// Slider ceiling: `round(unity × multiplier)` clamped to the tuning bounds.
#[must_use]
pub fn slider_ceiling_uf(unity_capacitance_uf: Scalar, tuning: &Tuning) -> Scalar {
    (unity_capacitance_uf * tuning.ceiling_multiplier)
        .round()
        .max(tuning.ceiling_min_uf)
        .min(tuning.ceiling_max_uf)
}

/// Runs the solver and derives the slider ceiling.
#[must_use]
pub fn suggest_correction(
    resistance_ohms: Scalar,
    inductance_mh: Scalar,
    supply: &SupplyConfig,
    tuning: &Tuning,
) -> CorrectionSuggestion {
    let unity_capacitance_uf =
        required_capacitance_uf(resistance_ohms, inductance_mh, supply.angular_frequency());
    CorrectionSuggestion {
        unity_capacitance_uf,
        slider_ceiling_uf: slider_ceiling_uf(unity_capacitance_uf, tuning),
    }
}
