//! Supply defaults and presentation-tuned thresholds.
//!
//! ## Supply
//!
//! The default supply is a European low-voltage single-phase feed: 230 V RMS at
//! 50 Hz. These are defaults for [`SupplyConfig`](crate::simulation::SupplyConfig),
//! never process-wide mutable state; the engine always reads the values carried
//! by its configuration.
//!
//! ## Tuning
//!
//! The unity power-factor threshold and the correction-slider multiplier have no
//! physical derivation. They were picked so that the classification and slider
//! range look reasonable on screen, and are kept configurable through
//! [`Tuning`](crate::simulation::Tuning).

use std::f64::consts::PI;

use crate::math::Scalar;

/// Default RMS supply voltage in volts (V).
pub const DEFAULT_RMS_VOLTAGE: Scalar = 230.0;
/// Default supply frequency in hertz (Hz).
pub const DEFAULT_FREQUENCY_HZ: Scalar = 50.0;
/// Default number of waveform samples over one period.
pub const DEFAULT_SAMPLE_COUNT: usize = 600;

/// |PF| at or above this value is classified as unity.
pub const DEFAULT_UNITY_PF_THRESHOLD: Scalar = 0.999;
/// Multiplier applied to the unity-PF capacitance to size the slider ceiling.
pub const DEFAULT_CEILING_MULTIPLIER: Scalar = 1.2;
/// Lower bound of the correction slider ceiling in microfarads (µF).
pub const DEFAULT_CEILING_MIN_UF: Scalar = 100.0;
/// Upper bound of the correction slider ceiling in microfarads (µF).
pub const DEFAULT_CEILING_MAX_UF: Scalar = 20_000.0;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: Scalar) -> Scalar {
    2.0 * PI * hz
}

/// Returns the period in seconds of a sinusoid at `hz`.
#[inline]
#[must_use]
pub fn period_from_frequency(hz: Scalar) -> Scalar {
    1.0 / hz
}
