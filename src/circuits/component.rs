use num_complex::Complex;

use crate::math::{safe_div, CScalar, Scalar};

/// Trait implemented by the lumped elements of the corrected load.
pub trait Component {
    /// Returns the component's impedance for an angular frequency `omega` (rad/s).
    fn impedance(&self, omega: Scalar) -> CScalar;

    /// Returns the component's admittance for an angular frequency `omega` (rad/s).
    ///
    /// The default takes the reciprocal of [`Component::impedance`] with the
    /// zero-magnitude guard applied, so a short circuit yields a finite
    /// admittance instead of infinity.
    fn admittance(&self, omega: Scalar) -> CScalar {
        reciprocal(self.impedance(omega))
    }
}

/// Guarded reciprocal `1 / z = conj(z) / |z|²`.
///
/// `|z|²` is replaced by the degeneracy epsilon when it is exactly zero.
#[must_use]
pub fn reciprocal(z: CScalar) -> CScalar {
    let denom = z.norm_sqr();
    Complex::new(safe_div(z.re, denom), safe_div(-z.im, denom))
}

/// Lumped resistor model.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistor {
    resistance: Scalar,
}

impl Resistor {
    /// Creates a resistor.
    #[must_use]
    pub fn new(resistance_ohms: Scalar) -> Self {
        Self {
            resistance: resistance_ohms,
        }
    }

    /// Resistance magnitude in ohms.
    #[must_use]
    pub fn resistance(&self) -> Scalar {
        self.resistance
    }
}

impl Component for Resistor {
    fn impedance(&self, _omega: Scalar) -> CScalar {
        Complex::new(self.resistance, 0.0)
    }
}

/// Lumped capacitor model (ideal, lossless).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacitor {
    capacitance: Scalar,
}

impl Capacitor {
    /// Creates a capacitor.
    #[must_use]
    pub fn new(capacitance_f: Scalar) -> Self {
        Self {
            capacitance: capacitance_f,
        }
    }

    /// Returns the capacitance magnitude in farads.
    #[must_use]
    pub fn capacitance(&self) -> Scalar {
        self.capacitance
    }

    /// Susceptance `ωC` in siemens.
    #[must_use]
    pub fn susceptance(&self, omega: Scalar) -> Scalar {
        omega * self.capacitance
    }
}

impl Component for Capacitor {
    fn impedance(&self, omega: Scalar) -> CScalar {
        Complex::new(0.0, -safe_div(1.0, omega * self.capacitance))
    }

    // An absent capacitor is an open circuit: exactly zero admittance.
    fn admittance(&self, omega: Scalar) -> CScalar {
        Complex::new(0.0, self.susceptance(omega))
    }
}

/// Lumped inductor model (ideal).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inductor {
    inductance: Scalar,
}

impl Inductor {
    /// Creates an inductor.
    #[must_use]
    pub fn new(inductance_h: Scalar) -> Self {
        Self {
            inductance: inductance_h,
        }
    }

    /// Returns the inductance magnitude in henries.
    #[must_use]
    pub fn inductance(&self) -> Scalar {
        self.inductance
    }

    /// Reactance `ωL` in ohms.
    #[must_use]
    pub fn reactance(&self, omega: Scalar) -> Scalar {
        omega * self.inductance
    }
}

impl Component for Inductor {
    fn impedance(&self, omega: Scalar) -> CScalar {
        Complex::new(0.0, self.reactance(omega))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn resistor_impedance_is_real() {
        let r = Resistor::new(100.0);
        let z = r.impedance(1.0);
        assert_relative_eq!(z.re, 100.0);
        assert_relative_eq!(z.im, 0.0);
        assert_relative_eq!(r.admittance(1.0).re, 0.01);
    }

    #[test]
    fn capacitor_admittance_is_positive_susceptance() {
        let c = Capacitor::new(1e-6);
        let omega = 1.0e3;
        let y = c.admittance(omega);
        assert_relative_eq!(y.re, 0.0);
        assert_relative_eq!(y.im, 1.0e-3, max_relative = 1.0e-12);
        assert!(c.impedance(omega).im < 0.0);
    }

    #[test]
    fn missing_capacitor_is_open_circuit() {
        let c = Capacitor::new(0.0);
        assert_eq!(c.admittance(314.0), Complex::new(0.0, 0.0));
        assert!(c.impedance(314.0).im.is_finite());
    }

    #[test]
    fn shorted_inductor_admittance_is_finite() {
        let l = Inductor::new(0.0);
        let y = l.admittance(314.0);
        assert!(y.re.is_finite() && y.im.is_finite());
    }

    #[test]
    fn inductor_susceptance_is_negative() {
        let l = Inductor::new(0.2);
        let y = l.admittance(100.0);
        assert_relative_eq!(y.im, -0.05, max_relative = 1.0e-12);
    }
}
