//! Engine configuration, the pure `evaluate` pipeline and its memoizing wrapper.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::circuits::network::{AdmittanceBreakdown, CorrectedLoad};
use crate::constants::{
    angular_frequency, period_from_frequency, DEFAULT_CEILING_MAX_UF, DEFAULT_CEILING_MIN_UF,
    DEFAULT_CEILING_MULTIPLIER, DEFAULT_FREQUENCY_HZ, DEFAULT_RMS_VOLTAGE, DEFAULT_SAMPLE_COUNT,
    DEFAULT_UNITY_PF_THRESHOLD,
};
use crate::correction::{suggest_correction, CorrectionSuggestion};
use crate::math::{sinusoid_peak, Scalar};
use crate::parameters::Parameters;
use crate::power::{compute_metrics, Metrics};
use crate::waveform::{Waveform, WaveformSynthesizer};

/// Errors raised while building an engine configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Supply voltage, frequency or sample count is unusable.
    #[error("invalid supply: {0}")]
    InvalidSupply(String),
    /// Classification threshold or ceiling policy is inconsistent.
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}

/// Fixed supply conditions and waveform resolution.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplyConfig {
    /// RMS supply voltage in volts.
    pub rms_voltage: Scalar,
    /// Supply frequency in hertz.
    pub frequency_hz: Scalar,
    /// Number of waveform samples over one period.
    pub sample_count: usize,
}

impl Default for SupplyConfig {
    fn default() -> Self {
        Self {
            rms_voltage: DEFAULT_RMS_VOLTAGE,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

impl SupplyConfig {
    /// Creates a validated supply configuration.
    pub fn new(
        rms_voltage: Scalar,
        frequency_hz: Scalar,
        sample_count: usize,
    ) -> Result<Self, ConfigError> {
        let supply = Self {
            rms_voltage,
            frequency_hz,
            sample_count,
        };
        supply.validate()?;
        Ok(supply)
    }

    /// Checks that every field is usable by the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.rms_voltage.is_finite() || self.rms_voltage <= 0.0 {
            return Err(ConfigError::InvalidSupply(format!(
                "rms_voltage must be finite and > 0, got {}",
                self.rms_voltage
            )));
        }
        if !self.frequency_hz.is_finite() || self.frequency_hz <= 0.0 {
            return Err(ConfigError::InvalidSupply(format!(
                "frequency_hz must be finite and > 0, got {}",
                self.frequency_hz
            )));
        }
        if self.sample_count == 0 {
            return Err(ConfigError::InvalidSupply("sample_count must be > 0".into()));
        }
        Ok(())
    }

    /// Angular frequency ω in rad/s.
    #[must_use]
    pub fn angular_frequency(&self) -> Scalar {
        angular_frequency(self.frequency_hz)
    }

    /// Period in seconds.
    #[must_use]
    pub fn period(&self) -> Scalar {
        period_from_frequency(self.frequency_hz)
    }

    /// Peak supply voltage in volts.
    #[must_use]
    pub fn peak_voltage(&self) -> Scalar {
        sinusoid_peak(self.rms_voltage)
    }
}

/// Presentation-tuned thresholds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// |PF| at or above this is classified as unity.
    pub unity_pf_threshold: Scalar,
    /// Applied to the unity-PF capacitance to size the slider ceiling.
    pub ceiling_multiplier: Scalar,
    /// Smallest slider ceiling in µF.
    pub ceiling_min_uf: Scalar,
    /// Largest slider ceiling in µF.
    pub ceiling_max_uf: Scalar,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            unity_pf_threshold: DEFAULT_UNITY_PF_THRESHOLD,
            ceiling_multiplier: DEFAULT_CEILING_MULTIPLIER,
            ceiling_min_uf: DEFAULT_CEILING_MIN_UF,
            ceiling_max_uf: DEFAULT_CEILING_MAX_UF,
        }
    }
}

impl Tuning {
    /// Checks threshold and ceiling policy for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.unity_pf_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(ConfigError::InvalidTuning(format!(
                "unity_pf_threshold must lie in (0, 1], got {t}"
            )));
        }
        if !self.ceiling_multiplier.is_finite() || self.ceiling_multiplier <= 1.0 {
            return Err(ConfigError::InvalidTuning(format!(
                "ceiling_multiplier must be finite and > 1, got {}",
                self.ceiling_multiplier
            )));
        }
        let (lo, hi) = (self.ceiling_min_uf, self.ceiling_max_uf);
        if !lo.is_finite() || !hi.is_finite() || lo < 0.0 || lo > hi {
            return Err(ConfigError::InvalidTuning(format!(
                "ceiling range [{lo}, {hi}] is not a finite non-negative interval"
            )));
        }
        Ok(())
    }
}

/// Everything the engine needs besides the three user parameters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineConfig {
    /// Supply conditions.
    pub supply: SupplyConfig,
    /// Classification and slider tuning.
    pub tuning: Tuning,
}

impl EngineConfig {
    /// Creates a validated configuration.
    pub fn new(supply: SupplyConfig, tuning: Tuning) -> Result<Self, ConfigError> {
        let config = Self { supply, tuning };
        config.validate()?;
        Ok(config)
    }

    /// Validates both halves.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.supply.validate()?;
        self.tuning.validate()
    }
}

/// Full result of one evaluation of the corrected load.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Parameters the evaluation was computed from.
    pub parameters: Parameters,
    /// Load, capacitor and total admittance.
    pub admittance: AdmittanceBreakdown,
    /// Scalar power quantities and classification.
    pub metrics: Metrics,
    /// One period of v, i and p.
    pub waveform: Waveform,
    /// Unity-PF capacitance and slider ceiling for the current R and L.
    pub correction: CorrectionSuggestion,
}

/// Evaluates admittance, metrics, waveform and correction for `params`.
///
/// Pure: identical inputs always yield bit-identical output.
#[must_use]
pub fn evaluate(config: &EngineConfig, params: &Parameters) -> Evaluation {
    let supply = &config.supply;
    let omega = supply.angular_frequency();

    let network = CorrectedLoad::from_engineering(
        params.resistance_ohms(),
        params.inductance_mh(),
        params.capacitance_uf(),
    );
    let admittance = network.admittance_breakdown(omega);
    let metrics = compute_metrics(&admittance, supply.rms_voltage, &config.tuning);
    let waveform = WaveformSynthesizer::from_metrics(supply, &metrics).synthesize();
    let correction = suggest_correction(
        params.resistance_ohms(),
        params.inductance_mh(),
        supply,
        &config.tuning,
    );

    debug!(
        r_ohms = params.resistance_ohms(),
        l_mh = params.inductance_mh(),
        c_uf = params.capacitance_uf(),
        pf = metrics.power_factor,
        class = %metrics.class,
        "evaluated corrected load"
    );

    Evaluation {
        parameters: *params,
        admittance,
        metrics,
        waveform,
        correction,
    }
}

type ParameterKey = [u64; 3];

fn parameter_key(params: &Parameters) -> ParameterKey {
    [
        params.resistance_ohms().to_bits(),
        params.inductance_mh().to_bits(),
        params.capacitance_uf().to_bits(),
    ]
}

/// Memoizes [`evaluate`] on the (R, L, Ccorr) tuple.
///
/// Only the most recent evaluation is retained; any parameter change recomputes
/// everything, so a stale result can never be returned.
#[derive(Debug, Clone)]
pub struct Evaluator {
    config: EngineConfig,
    cached: Option<(ParameterKey, Arc<Evaluation>)>,
    hits: u64,
    misses: u64,
}

impl Evaluator {
    /// Creates an evaluator with an empty cache.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cached: None,
            hits: 0,
            misses: 0,
        }
    }

    /// Configuration every evaluation uses.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the evaluation for `params`, recomputing only when they changed.
    pub fn evaluate(&mut self, params: &Parameters) -> Arc<Evaluation> {
        let key = parameter_key(params);
        if let Some((cached_key, evaluation)) = &self.cached {
            if *cached_key == key {
                self.hits += 1;
                trace!(hits = self.hits, "evaluation cache hit");
                return Arc::clone(evaluation);
            }
        }

        self.misses += 1;
        debug!(misses = self.misses, "evaluation cache miss");
        let evaluation = Arc::new(evaluate(&self.config, params));
        self.cached = Some((key, Arc::clone(&evaluation)));
        evaluation
    }

    /// Drops the cached evaluation.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Number of evaluations served from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of evaluations computed from scratch.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn params(r: Scalar, l: Scalar, c: Scalar) -> Parameters {
        Parameters::new(r, l, c).expect("valid parameters")
    }

    #[test]
    fn default_supply_is_mains() {
        let supply = SupplyConfig::default();
        assert_relative_eq!(supply.period(), 0.02);
        assert_relative_eq!(supply.peak_voltage(), 325.269_119_345_812, max_relative = 1.0e-12);
        supply.validate().expect("default supply is valid");
        Tuning::default().validate().expect("default tuning is valid");
    }

    #[test]
    fn rejects_unusable_supply() {
        assert!(matches!(
            SupplyConfig::new(230.0, 0.0, 600),
            Err(ConfigError::InvalidSupply(_))
        ));
        assert!(SupplyConfig::new(Scalar::NAN, 50.0, 600).is_err());
        assert!(SupplyConfig::new(230.0, 50.0, 0).is_err());
        assert!(SupplyConfig::new(120.0, 60.0, 256).is_ok());
    }

    #[test]
    fn rejects_inconsistent_tuning() {
        let bad_threshold = Tuning {
            unity_pf_threshold: 1.5,
            ..Tuning::default()
        };
        assert!(matches!(
            EngineConfig::new(SupplyConfig::default(), bad_threshold),
            Err(ConfigError::InvalidTuning(_))
        ));

        let inverted = Tuning {
            ceiling_min_uf: 500.0,
            ceiling_max_uf: 100.0,
            ..Tuning::default()
        };
        assert!(inverted.validate().is_err());

        let flat = Tuning {
            ceiling_multiplier: 1.0,
            ..Tuning::default()
        };
        assert!(flat.validate().is_err());
    }

    #[test]
    fn evaluation_is_pure() {
        let config = EngineConfig::default();
        let p = params(100.0, 200.0, 3.3);
        assert_eq!(evaluate(&config, &p), evaluate(&config, &p));
    }

    #[test]
    fn evaluator_reuses_unchanged_parameters() {
        let mut evaluator = Evaluator::new(EngineConfig::default());
        let p = params(100.0, 200.0, 0.0);
        let first = evaluator.evaluate(&p);
        let second = evaluator.evaluate(&p);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!((evaluator.hits(), evaluator.misses()), (1, 1));
    }

    #[test]
    fn evaluator_never_returns_stale_results() {
        let mut evaluator = Evaluator::new(EngineConfig::default());
        let before = evaluator.evaluate(&params(100.0, 200.0, 0.0));
        let after = evaluator.evaluate(&params(100.0, 200.0, 10.0));
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.parameters.capacitance_uf(), 10.0);
        assert!(after.metrics.power_factor > before.metrics.power_factor);

        evaluator.invalidate();
        let again = evaluator.evaluate(&params(100.0, 200.0, 10.0));
        assert_eq!(*again, *after);
        assert_eq!(evaluator.misses(), 3);
    }

    #[test]
    fn alternate_supply_changes_results() {
        let us = EngineConfig::new(
            SupplyConfig::new(120.0, 60.0, 128).expect("valid supply"),
            Tuning::default(),
        )
        .expect("valid config");
        let eval = evaluate(&us, &params(100.0, 0.0, 0.0));
        assert_eq!(eval.waveform.len(), 128);
        assert_relative_eq!(eval.metrics.rms_current, 1.2, max_relative = 1.0e-12);
    }
}
