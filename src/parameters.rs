//! The three user-adjustable scalars and the model that keeps them in range.

use tracing::debug;

use crate::correction::{suggest_correction, CorrectionSuggestion};
use crate::math::Scalar;
use crate::simulation::{evaluate, EngineConfig, Evaluation};

/// Upper bound on load resistance in ohms. The lower bound is exclusive zero.
pub const RESISTANCE_MAX_OHMS: Scalar = 500.0;
/// Lowest resistance offered by the input slider, in ohms.
pub const RESISTANCE_SLIDER_MIN_OHMS: Scalar = 1.0;
/// Upper bound on load inductance in millihenries.
pub const INDUCTANCE_MAX_MH: Scalar = 2_000.0;
/// Step of the correction capacitor slider, in microfarads.
pub const CAPACITANCE_SLIDER_STEP_UF: Scalar = 0.1;

/// Resistance the model starts with, in ohms.
pub const DEFAULT_RESISTANCE_OHMS: Scalar = 100.0;
/// Inductance the model starts with, in millihenries.
pub const DEFAULT_INDUCTANCE_MH: Scalar = 200.0;
/// Correction capacitance the model starts with, in microfarads.
pub const DEFAULT_CAPACITANCE_UF: Scalar = 0.0;

/// Decimal places kept when applying the unity-PF suggestion.
const SUGGESTION_DECIMALS: i32 = 3;

/// Raised when a parameter lies outside its declared domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    /// NaN or infinite input.
    #[error("{name} must be finite")]
    NotFinite {
        /// Parameter name.
        name: &'static str,
    },
    /// Value outside the admissible interval.
    #[error("{name} = {value} outside {range}")]
    OutOfRange {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: Scalar,
        /// Human-readable admissible interval.
        range: String,
    },
}

fn check_finite(name: &'static str, value: Scalar) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NotFinite { name })
    }
}

fn check_closed(
    name: &'static str,
    value: Scalar,
    min: Scalar,
    max: Scalar,
) -> Result<(), ParameterError> {
    check_finite(name, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange {
            name,
            value,
            range: format!("[{min}, {max}]"),
        })
    }
}

/// Load resistance, load inductance and correction capacitance.
///
/// Engineering units throughout: ohms, millihenries, microfarads.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    resistance_ohms: Scalar,
    inductance_mh: Scalar,
    capacitance_uf: Scalar,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            resistance_ohms: DEFAULT_RESISTANCE_OHMS,
            inductance_mh: DEFAULT_INDUCTANCE_MH,
            capacitance_uf: DEFAULT_CAPACITANCE_UF,
        }
    }
}

impl Parameters {
    /// Validates R ∈ (0, 500], L ∈ [0, 2000] and Ccorr ≥ 0.
    ///
    /// The upper bound on Ccorr depends on R and L and is enforced by
    /// [`ParameterModel`].
    pub fn new(
        resistance_ohms: Scalar,
        inductance_mh: Scalar,
        capacitance_uf: Scalar,
    ) -> Result<Self, ParameterError> {
        check_finite("resistance", resistance_ohms)?;
        if !(resistance_ohms > 0.0 && resistance_ohms <= RESISTANCE_MAX_OHMS) {
            return Err(ParameterError::OutOfRange {
                name: "resistance",
                value: resistance_ohms,
                range: format!("(0, {RESISTANCE_MAX_OHMS}]"),
            });
        }
        check_closed("inductance", inductance_mh, 0.0, INDUCTANCE_MAX_MH)?;
        check_closed("capacitance", capacitance_uf, 0.0, Scalar::MAX)?;
        Ok(Self {
            resistance_ohms,
            inductance_mh,
            capacitance_uf,
        })
    }

    /// Load resistance in ohms.
    #[must_use]
    pub fn resistance_ohms(&self) -> Scalar {
        self.resistance_ohms
    }

    /// Load inductance in millihenries.
    #[must_use]
    pub fn inductance_mh(&self) -> Scalar {
        self.inductance_mh
    }

    /// Correction capacitance in microfarads.
    #[must_use]
    pub fn capacitance_uf(&self) -> Scalar {
        self.capacitance_uf
    }
}

/// Current parameters plus the configuration they are evaluated under.
///
/// Every setter validates its input; Ccorr is additionally kept within the
/// correction ceiling derived from the current R and L.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterModel {
    config: EngineConfig,
    params: Parameters,
}

impl Default for ParameterModel {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ParameterModel {
    /// Creates a model with the default parameters.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            params: Parameters::default(),
        }
    }

    /// Creates a model with explicit parameters, checking Ccorr against the ceiling.
    pub fn with_parameters(config: EngineConfig, params: Parameters) -> Result<Self, ParameterError> {
        let mut model = Self::new(config);
        model.params = Parameters {
            capacitance_uf: 0.0,
            ..params
        };
        model.set_correction(params.capacitance_uf)?;
        Ok(model)
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current parameters.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Solver output for the current R and L.
    #[must_use]
    pub fn suggestion(&self) -> CorrectionSuggestion {
        suggest_correction(
            self.params.resistance_ohms,
            self.params.inductance_mh,
            &self.config.supply,
            &self.config.tuning,
        )
    }

    /// Largest admissible Ccorr in microfarads for the current R and L.
    #[must_use]
    pub fn correction_ceiling(&self) -> Scalar {
        self.suggestion().slider_ceiling_uf
    }

    /// Sets R in ohms.
    pub fn set_resistance(&mut self, resistance_ohms: Scalar) -> Result<(), ParameterError> {
        self.params = Parameters::new(
            resistance_ohms,
            self.params.inductance_mh,
            self.params.capacitance_uf,
        )?;
        self.clamp_correction();
        Ok(())
    }

    /// Sets L in millihenries.
    pub fn set_inductance(&mut self, inductance_mh: Scalar) -> Result<(), ParameterError> {
        self.params = Parameters::new(
            self.params.resistance_ohms,
            inductance_mh,
            self.params.capacitance_uf,
        )?;
        self.clamp_correction();
        Ok(())
    }

    /// Sets Ccorr in microfarads, bounded by [`ParameterModel::correction_ceiling`].
    pub fn set_correction(&mut self, capacitance_uf: Scalar) -> Result<(), ParameterError> {
        check_closed("capacitance", capacitance_uf, 0.0, self.correction_ceiling())?;
        self.params.capacitance_uf = capacitance_uf;
        Ok(())
    }

    /// Sets Ccorr to the unity-PF capacitance rounded to three decimals.
    ///
    /// Returns the value applied, which is capped at the ceiling for loads whose
    /// unity point lies beyond it.
    pub fn apply_unity_correction(&mut self) -> Scalar {
        let suggestion = self.suggestion();
        let scale = 10f64.powi(SUGGESTION_DECIMALS);
        let rounded = (suggestion.unity_capacitance_uf * scale).round() / scale;
        let applied = rounded.min(suggestion.slider_ceiling_uf);
        debug!(
            unity_uf = suggestion.unity_capacitance_uf,
            applied_uf = applied,
            "applied unity power-factor correction"
        );
        self.params.capacitance_uf = applied;
        applied
    }

    /// Evaluates the current parameters.
    #[must_use]
    pub fn evaluate(&self) -> Evaluation {
        evaluate(&self.config, &self.params)
    }

    fn clamp_correction(&mut self) {
        let ceiling = self.correction_ceiling();
        if self.params.capacitance_uf > ceiling {
            debug!(
                from_uf = self.params.capacitance_uf,
                to_uf = ceiling,
                "clamped correction capacitance to new ceiling"
            );
            self.params.capacitance_uf = ceiling;
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::power::PowerClass;

    #[test]
    fn defaults_match_reference_load() {
        let p = Parameters::default();
        assert_eq!(
            (p.resistance_ohms(), p.inductance_mh(), p.capacitance_uf()),
            (100.0, 200.0, 0.0)
        );
    }

    #[test]
    fn rejects_values_outside_domain() {
        assert!(matches!(
            Parameters::new(0.0, 200.0, 0.0),
            Err(ParameterError::OutOfRange { name: "resistance", .. })
        ));
        assert!(Parameters::new(500.5, 200.0, 0.0).is_err());
        assert!(Parameters::new(100.0, -1.0, 0.0).is_err());
        assert!(Parameters::new(100.0, 2_000.5, 0.0).is_err());
        assert!(Parameters::new(100.0, 200.0, -0.1).is_err());
        assert_eq!(
            Parameters::new(Scalar::NAN, 200.0, 0.0),
            Err(ParameterError::NotFinite { name: "resistance" })
        );
        assert!(Parameters::new(1.0e-6, 0.0, 0.0).is_ok());
        assert!(Parameters::new(500.0, 2_000.0, 0.0).is_ok());
    }

    #[test]
    fn error_messages_name_the_interval() {
        let err = Parameters::new(100.0, 3_000.0, 0.0).unwrap_err();
        assert_eq!(err.to_string(), "inductance = 3000 outside [0, 2000]");
    }

    #[test]
    fn correction_is_bounded_by_ceiling() {
        let mut model = ParameterModel::default();
        assert_eq!(model.correction_ceiling(), 100.0);
        assert!(model.set_correction(100.0).is_ok());
        assert!(model.set_correction(100.1).is_err());
        assert_eq!(model.parameters().capacitance_uf(), 100.0);
    }

    #[test]
    fn shrinking_ceiling_clamps_correction() {
        let config = EngineConfig::default();
        let params = Parameters::new(1.0, 10.0, 1_000.0).expect("valid parameters");
        let mut model = ParameterModel::with_parameters(config, params).expect("within ceiling");
        assert_eq!(model.parameters().capacitance_uf(), 1_000.0);

        model.set_resistance(100.0).expect("valid resistance");
        assert_eq!(model.parameters().capacitance_uf(), model.correction_ceiling());
    }

    #[test]
    fn unity_correction_is_rounded_and_effective() {
        let mut model = ParameterModel::default();
        let applied = model.apply_unity_correction();
        assert_eq!(applied, 14.339);
        assert_eq!(model.parameters().capacitance_uf(), applied);

        let eval = model.evaluate();
        assert!(eval.metrics.power_factor >= 0.999);
        assert_eq!(eval.metrics.class, PowerClass::Unity);
    }

    #[test]
    fn resistive_load_needs_no_correction() {
        let mut model = ParameterModel::default();
        model.set_inductance(0.0).expect("valid inductance");
        assert_eq!(model.apply_unity_correction(), 0.0);
        assert_relative_eq!(model.evaluate().metrics.power_factor, 1.0);
    }

    #[test]
    fn with_parameters_rejects_capacitance_above_ceiling() {
        let params = Parameters::new(100.0, 200.0, 5_000.0).expect("statically valid");
        assert!(ParameterModel::with_parameters(EngineConfig::default(), params).is_err());
    }
}
