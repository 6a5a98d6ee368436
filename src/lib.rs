#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Supply defaults and tuning constants.
pub mod constants;
/// Unit conversions between engineering and SI units.
pub mod units;
/// Shared numeric utilities and degeneracy guards.
pub mod math;
/// Load, capacitor and network admittances.
pub mod circuits;
/// Unity power-factor correction sizing.
pub mod correction;
/// Real, reactive and apparent power.
pub mod power;
/// Time-domain waveform synthesis.
pub mod waveform;
/// User parameters and their validation.
pub mod parameters;
/// Engine configuration and evaluation.
pub mod simulation;
/// Capacitance sweeps.
pub mod sweep;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
