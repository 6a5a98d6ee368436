//! Series resistive-inductive load and its admittance.

use crate::math::{CScalar, Scalar};
use crate::units::millihenries_to_henries;

use super::component::{reciprocal, Component, Inductor, Resistor};

/// Resistor and inductor in series, the load being corrected.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RlLoad {
    resistor: Resistor,
    inductor: Inductor,
}

impl RlLoad {
    /// Creates a load from SI values.
    #[must_use]
    pub fn new(resistance_ohms: Scalar, inductance_h: Scalar) -> Self {
        Self {
            resistor: Resistor::new(resistance_ohms),
            inductor: Inductor::new(inductance_h),
        }
    }

    /// Creates a load from resistance in ohms and inductance in millihenries.
    #[must_use]
    pub fn from_engineering(resistance_ohms: Scalar, inductance_mh: Scalar) -> Self {
        Self::new(resistance_ohms, millihenries_to_henries(inductance_mh))
    }

    /// Series resistor.
    #[must_use]
    pub fn resistor(&self) -> &Resistor {
        &self.resistor
    }

    /// Series inductor.
    #[must_use]
    pub fn inductor(&self) -> &Inductor {
        &self.inductor
    }
}

impl Component for RlLoad {
    fn impedance(&self, omega: Scalar) -> CScalar {
        self.resistor.impedance(omega) + self.inductor.impedance(omega)
    }

    /// `G = R / (R² + X²)`, `B = -X / (R² + X²)`; an exactly zero denominator
    /// (R = 0 and L = 0) is replaced by the degeneracy epsilon.
    fn admittance(&self, omega: Scalar) -> CScalar {
        reciprocal(self.impedance(omega))
    }
}

/// Admittance of a series R-L load with `inductance_mh` in millihenries at `omega`.
#[must_use]
pub fn load_admittance(resistance_ohms: Scalar, inductance_mh: Scalar, omega: Scalar) -> CScalar {
    RlLoad::from_engineering(resistance_ohms, inductance_mh).admittance(omega)
}
