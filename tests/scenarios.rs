use approx::assert_relative_eq;
use power_factor::prelude::*;

fn evaluate_default(r: Scalar, l_mh: Scalar, c_uf: Scalar) -> Evaluation {
    let params = Parameters::new(r, l_mh, c_uf).expect("valid parameters");
    evaluate(&EngineConfig::default(), &params)
}

#[test]
fn reference_inductive_load() {
    let eval = evaluate_default(100.0, 200.0, 0.0);

    let x_l = RlLoad::from_engineering(100.0, 200.0)
        .inductor()
        .reactance(angular_frequency(DEFAULT_FREQUENCY_HZ));
    assert_relative_eq!(x_l, 62.832, max_relative = 1.0e-5);

    assert_relative_eq!(eval.admittance.load.re, 0.007_169_5, max_relative = 1.0e-4);
    assert_relative_eq!(eval.admittance.load.im, -0.004_504_7, max_relative = 1.0e-4);

    let m = &eval.metrics;
    assert_relative_eq!(m.rms_current, 1.9475, max_relative = 1.0e-4);
    assert_relative_eq!(m.apparent_power, 447.92, max_relative = 1.0e-4);
    assert_relative_eq!(m.real_power, 379.27, max_relative = 1.0e-4);
    assert_relative_eq!(m.reactive_power, -238.30, max_relative = 1.0e-4);
    assert_relative_eq!(m.power_factor, 0.847, epsilon = 5.0e-4);
    assert_eq!(m.class, PowerClass::Lagging);

    assert_relative_eq!(eval.correction.unity_capacitance_uf, 14.34, max_relative = 1.0e-3);
    assert_eq!(eval.correction.slider_ceiling_uf, 100.0);
}

#[test]
fn reference_resistive_load() {
    let eval = evaluate_default(100.0, 0.0, 0.0);
    assert_eq!(eval.admittance.load.im, 0.0);
    assert_eq!(eval.metrics.power_factor, 1.0);
    assert_eq!(eval.metrics.class, PowerClass::Unity);
    assert_eq!(eval.correction.unity_capacitance_uf, 0.0);
}

#[test]
fn correction_reaches_unity_and_over_correction_leads() {
    let unity = required_capacitance_uf(100.0, 200.0, angular_frequency(DEFAULT_FREQUENCY_HZ));
    let corrected = evaluate_default(100.0, 200.0, unity);
    assert_eq!(corrected.metrics.class, PowerClass::Unity);
    assert_relative_eq!(corrected.metrics.power_factor, 1.0, epsilon = 1.0e-9);
    assert_relative_eq!(corrected.metrics.reactive_power, 0.0, epsilon = 1.0e-6);

    let over = evaluate_default(100.0, 200.0, 2.0 * unity + 5.0);
    assert_eq!(over.metrics.class, PowerClass::Leading);
    assert!(over.metrics.reactive_power > 0.0);
}

#[test]
fn correction_lowers_line_current_but_not_real_power() {
    let bare = evaluate_default(100.0, 200.0, 0.0);
    let corrected = evaluate_default(100.0, 200.0, 14.339);
    assert!(corrected.metrics.rms_current < bare.metrics.rms_current);
    assert_relative_eq!(
        corrected.metrics.real_power,
        bare.metrics.real_power,
        max_relative = 1.0e-12
    );
    assert!(corrected.waveform.returned_fraction() < bare.waveform.returned_fraction());
}

#[test]
fn waveform_mean_matches_real_power() {
    let eval = evaluate_default(47.0, 350.0, 5.0);
    assert_eq!(eval.waveform.len(), DEFAULT_SAMPLE_COUNT);
    assert_relative_eq!(
        eval.waveform.average_power(),
        eval.metrics.real_power,
        max_relative = 1.0e-9
    );
}

#[test]
fn model_session_walkthrough() {
    let mut model = ParameterModel::default();
    let mut evaluator = Evaluator::new(*model.config());

    let first = evaluator.evaluate(model.parameters());
    assert_eq!(first.metrics.class, PowerClass::Lagging);

    model.apply_unity_correction();
    let second = evaluator.evaluate(model.parameters());
    assert_eq!(second.metrics.class, PowerClass::Unity);

    model.set_inductance(0.0).expect("valid inductance");
    let third = evaluator.evaluate(model.parameters());
    assert_eq!(third.metrics.class, PowerClass::Leading);
    assert_eq!(evaluator.misses(), 3);
}

#[test]
fn parameter_errors_surface_through_crate_error() {
    let mut model = ParameterModel::default();
    let err: PowerFactorError = model.set_resistance(0.0).unwrap_err().into();
    assert!(matches!(err, PowerFactorError::Parameter(_)));
    assert_eq!(model.parameters().resistance_ohms(), 100.0);
}
