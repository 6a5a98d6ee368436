use num_complex::Complex;

use crate::math::{CScalar, Scalar};
use crate::units::microfarads_to_farads;

use super::component::{reciprocal, Capacitor, Component};
use super::load::RlLoad;

/// Admittances of the corrected load, split by branch.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdmittanceBreakdown {
    /// Series R-L branch alone.
    pub load: CScalar,
    /// Shunt correction capacitor alone (purely imaginary).
    pub capacitor: CScalar,
    /// Both branches in parallel.
    pub total: CScalar,
}

impl AdmittanceBreakdown {
    /// Total conductance G in siemens.
    #[must_use]
    pub fn conductance(&self) -> Scalar {
        self.total.re
    }

    /// Total susceptance B in siemens. Negative means net inductive.
    #[must_use]
    pub fn susceptance(&self) -> Scalar {
        self.total.im
    }
}

/// An R-L load with a shunt correction capacitor across the supply.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectedLoad {
    load: RlLoad,
    correction: Capacitor,
}

impl CorrectedLoad {
    /// Creates the network from its two branches.
    #[must_use]
    pub fn new(load: RlLoad, correction: Capacitor) -> Self {
        Self { load, correction }
    }

    /// Creates the network from R in ohms, L in millihenries and C in microfarads.
    #[must_use]
    pub fn from_engineering(
        resistance_ohms: Scalar,
        inductance_mh: Scalar,
        capacitance_uf: Scalar,
    ) -> Self {
        Self::new(
            RlLoad::from_engineering(resistance_ohms, inductance_mh),
            Capacitor::new(microfarads_to_farads(capacitance_uf)),
        )
    }

    /// The uncorrected R-L branch.
    #[must_use]
    pub fn load(&self) -> &RlLoad {
        &self.load
    }

    /// The shunt capacitor branch.
    #[must_use]
    pub fn correction(&self) -> &Capacitor {
        &self.correction
    }

    /// Per-branch and total admittance at `omega`.
    ///
    /// Parallel branches add admittances. The capacitor is lossless, so the
    /// total conductance equals the load conductance.
    #[must_use]
    pub fn admittance_breakdown(&self, omega: Scalar) -> AdmittanceBreakdown {
        let load = self.load.admittance(omega);
        let capacitor = self.correction.admittance(omega);
        AdmittanceBreakdown {
            load,
            capacitor,
            total: Complex::new(load.re, load.im + capacitor.im),
        }
    }
}

impl Component for CorrectedLoad {
    fn impedance(&self, omega: Scalar) -> CScalar {
        reciprocal(self.admittance(omega))
    }

    fn admittance(&self, omega: Scalar) -> CScalar {
        self.admittance_breakdown(omega).total
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::angular_frequency;

    #[test]
    fn capacitor_does_not_change_conductance() {
        let omega = angular_frequency(50.0);
        let bare = CorrectedLoad::from_engineering(100.0, 200.0, 0.0).admittance_breakdown(omega);
        let corrected =
            CorrectedLoad::from_engineering(100.0, 200.0, 10.0).admittance_breakdown(omega);
        assert_eq!(bare.conductance(), corrected.conductance());
        assert!(corrected.susceptance() > bare.susceptance());
    }

    #[test]
    fn susceptances_add() {
        let omega = angular_frequency(50.0);
        let y = CorrectedLoad::from_engineering(100.0, 200.0, 5.0).admittance_breakdown(omega);
        assert_relative_eq!(y.total.im, y.load.im + y.capacitor.im);
        assert_relative_eq!(y.capacitor.im, omega * 5.0e-6, max_relative = 1.0e-12);
        assert_eq!(y.capacitor.re, 0.0);
    }

    #[test]
    fn network_impedance_is_reciprocal_of_total() {
        let omega = angular_frequency(50.0);
        let net = CorrectedLoad::from_engineering(100.0, 0.0, 0.0);
        let z = net.impedance(omega);
        assert_relative_eq!(z.re, 100.0, max_relative = 1.0e-12);
        assert_relative_eq!(z.im, 0.0, epsilon = 1.0e-12);
    }
}
