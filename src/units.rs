//! Conversions between the engineering units the parameters are expressed in
//! and the SI units the formulas use.

use crate::math::Scalar;

const MILLI: Scalar = 1.0e-3;
const MICRO: Scalar = 1.0e-6;

/// Millihenries to henries.
#[inline]
#[must_use]
pub fn millihenries_to_henries(mh: Scalar) -> Scalar {
    mh * MILLI
}

/// Microfarads to farads.
#[inline]
#[must_use]
pub fn microfarads_to_farads(uf: Scalar) -> Scalar {
    uf * MICRO
}

/// Farads to microfarads.
#[inline]
#[must_use]
pub fn farads_to_microfarads(f: Scalar) -> Scalar {
    f / MICRO
}
