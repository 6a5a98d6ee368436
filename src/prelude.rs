//! Convenience re-exports for driving the engine.

pub use crate::circuits::{
    component::{Capacitor, Component, Inductor, Resistor},
    load::{load_admittance, RlLoad},
    network::{AdmittanceBreakdown, CorrectedLoad},
};
pub use crate::constants::*;
pub use crate::correction::{
    required_capacitance_uf, slider_ceiling_uf, suggest_correction, CorrectionSuggestion,
};
pub use crate::errors::PowerFactorError;
pub use crate::math::{clamped_magnitude, safe_div, CScalar, Scalar, DEGENERACY_EPSILON};
pub use crate::parameters::{ParameterError, ParameterModel, Parameters};
pub use crate::power::{compute_metrics, Metrics, PowerClass, PowerTriangle};
pub use crate::simulation::{
    evaluate, ConfigError, EngineConfig, Evaluation, Evaluator, SupplyConfig, Tuning,
};
pub use crate::sweep::{capacitance_sweep, linspace, write_capacitance_sweep_csv, SweepPoint};
pub use crate::waveform::{write_waveform_csv, Waveform, WaveformSample, WaveformSynthesizer};
