use std::io::{self, Write};

use power_factor::errors::Result;
use power_factor::prelude::*;
use tracing_subscriber::EnvFilter;

fn report(label: &str, eval: &Evaluation) {
    let m = &eval.metrics;
    let y = &eval.admittance;
    println!("== {label}");
    println!(
        "R = {} Ω, L = {} mH, Ccorr = {} µF",
        eval.parameters.resistance_ohms(),
        eval.parameters.inductance_mh(),
        eval.parameters.capacitance_uf()
    );
    println!("Vrms: {:.2} V   Irms: {:.3} A   |Z|: {:.2} Ω", m.rms_voltage, m.rms_current, m.impedance_magnitude);
    println!(
        "S: {:.2} VA   P: {:.2} W   Q: {:.2} VAR",
        m.apparent_power, m.real_power, m.reactive_power
    );
    println!("PF: {:.3} ({})   φ: {:.2}°", m.power_factor, m.class, m.phase_deg());
    println!(
        "Y_load: {:.6} {:+.6}j S   Y_cap: j{:.6} S",
        y.load.re, y.load.im, y.capacitor.im
    );
    println!(
        "unity C: {:.3} µF (slider max {} µF)   power returned {:.1}% of the cycle",
        eval.correction.unity_capacitance_uf,
        eval.correction.slider_ceiling_uf,
        eval.waveform.returned_fraction() * 100.0
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut model = ParameterModel::default();
    report("uncorrected", &model.evaluate());

    model.apply_unity_correction();
    let corrected = model.evaluate();
    report("corrected", &corrected);

    model.set_correction(60.0)?;
    report("over-corrected", &model.evaluate());

    // One period of the corrected waveform on stdout.
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out)?;
    write_waveform_csv(&mut out, &corrected.waveform)?;
    Ok(())
}
