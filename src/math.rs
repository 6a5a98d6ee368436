//! Shared numerical primitives and the degeneracy guard policy.
//!
//! Every division in the engine whose denominator can be exactly zero for some
//! input in the declared parameter domain goes through [`safe_div`] or
//! [`clamped_magnitude`], so a zero denominator is replaced by
//! [`DEGENERACY_EPSILON`] in exactly one place.

use num_complex::Complex;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for phasors and admittances.
pub type CScalar = Complex<Scalar>;

/// Substitute for a denominator that would otherwise be exactly zero.
pub const DEGENERACY_EPSILON: Scalar = 1.0e-12;

/// Returns `value`, or [`DEGENERACY_EPSILON`] when `value` is zero or NaN.
#[inline]
#[must_use]
pub fn nonzero_or_epsilon(value: Scalar) -> Scalar {
    if value == 0.0 || value.is_nan() {
        DEGENERACY_EPSILON
    } else {
        value
    }
}

/// Divides `numerator` by `denominator` with the zero-denominator guard applied.
#[inline]
#[must_use]
pub fn safe_div(numerator: Scalar, denominator: Scalar) -> Scalar {
    numerator / nonzero_or_epsilon(denominator)
}

/// Magnitude of `value`, never smaller than [`DEGENERACY_EPSILON`] when zero.
#[inline]
#[must_use]
pub fn clamped_magnitude(value: CScalar) -> Scalar {
    nonzero_or_epsilon(value.re.hypot(value.im))
}

/// Computes the peak magnitude of a sinusoidal waveform with RMS value `rms`.
#[must_use]
pub fn sinusoid_peak(rms: Scalar) -> Scalar {
    rms * Scalar::sqrt(2.0)
}
