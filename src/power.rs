//! Real, reactive and apparent power of the corrected load.
//!
//! Sign convention follows the total susceptance: a net-inductive load has
//! negative `B` and therefore negative `Q`, classified as lagging. An
//! over-corrected (net-capacitive) load has positive `Q` and is leading.

use std::fmt;

use crate::circuits::network::AdmittanceBreakdown;
use crate::math::{clamped_magnitude, safe_div, Scalar};
use crate::simulation::Tuning;

/// Apparent-power floor for [`PowerTriangle`], in VA.
pub const TRIANGLE_APPARENT_FLOOR: Scalar = 1.0e-9;

/// Load character seen from the supply.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerClass {
    /// |PF| at or above the unity threshold.
    Unity,
    /// Net inductive, current lags voltage.
    Lagging,
    /// Net capacitive, current leads voltage.
    Leading,
}

impl PowerClass {
    /// Classifies a power factor and reactive power.
    #[must_use]
    pub fn classify(power_factor: Scalar, reactive_power: Scalar, unity_threshold: Scalar) -> Self {
        if power_factor.abs() >= unity_threshold {
            Self::Unity
        } else if reactive_power < 0.0 {
            Self::Lagging
        } else {
            Self::Leading
        }
    }
}

impl fmt::Display for PowerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unity => "unity",
            Self::Lagging => "lagging (inductive)",
            Self::Leading => "leading (capacitive)",
        })
    }
}

/// Scalar results of one evaluation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Supply RMS voltage in V.
    pub rms_voltage: Scalar,
    /// RMS line current in A.
    pub rms_current: Scalar,
    /// Apparent power S in VA.
    pub apparent_power: Scalar,
    /// Real power P in W.
    pub real_power: Scalar,
    /// Reactive power Q in VAR.
    pub reactive_power: Scalar,
    /// P / S, in [-1, 1].
    pub power_factor: Scalar,
    /// atan2(Q, P) in radians.
    pub phase_rad: Scalar,
    /// |Z| = Vrms / Irms in ohms.
    pub impedance_magnitude: Scalar,
    /// Unity, lagging or leading.
    pub class: PowerClass,
}

impl Metrics {
    /// Phase angle in degrees.
    #[must_use]
    pub fn phase_deg(&self) -> Scalar {
        self.phase_rad.to_degrees()
    }

    /// Leg lengths of the power triangle.
    #[must_use]
    pub fn triangle(&self) -> PowerTriangle {
        PowerTriangle {
            real: self.real_power.abs(),
            reactive: self.reactive_power.abs(),
            apparent: self.apparent_power.abs().max(TRIANGLE_APPARENT_FLOOR),
        }
    }
}

/// Absolute P, Q and S, suitable for drawing the power triangle.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerTriangle {
    /// |P| in W (adjacent leg).
    pub real: Scalar,
    /// |Q| in VAR (opposite leg).
    pub reactive: Scalar,
    /// max(|S|, floor) in VA (hypotenuse).
    pub apparent: Scalar,
}

/// Computes power quantities from the corrected-load admittance at `rms_voltage`.
#[must_use]
pub fn compute_metrics(
    admittance: &AdmittanceBreakdown,
    rms_voltage: Scalar,
    tuning: &Tuning,
) -> Metrics {
    let total = admittance.total;
    let y_mag = clamped_magnitude(total);

    let rms_current = rms_voltage * y_mag;
    let apparent_power = rms_voltage * rms_current;
    let real_power = apparent_power * (total.re / y_mag);
    let reactive_power = apparent_power * (total.im / y_mag);
    let power_factor = safe_div(real_power, apparent_power);

    Metrics {
        rms_voltage,
        rms_current,
        apparent_power,
        real_power,
        reactive_power,
        power_factor,
        phase_rad: reactive_power.atan2(real_power),
        impedance_magnitude: safe_div(rms_voltage, rms_current),
        class: PowerClass::classify(power_factor, reactive_power, tuning.unity_pf_threshold),
    }
}
