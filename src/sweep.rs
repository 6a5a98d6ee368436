//! Correction-capacitance sweeps and post-processing helpers.

use std::io::{self, Write};

use crate::circuits::network::CorrectedLoad;
use crate::math::Scalar;
use crate::power::{compute_metrics, Metrics};
use crate::simulation::EngineConfig;

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Metrics of the corrected load at one capacitance.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    /// Correction capacitance in µF.
    pub capacitance_uf: Scalar,
    /// Power quantities at that capacitance.
    pub metrics: Metrics,
}

/// Evaluates power metrics of an R-L load for each correction capacitance (µF).
///
/// Waveforms are not synthesized.
#[must_use]
pub fn capacitance_sweep<I>(
    config: &EngineConfig,
    resistance_ohms: Scalar,
    inductance_mh: Scalar,
    capacitances_uf: I,
) -> Vec<SweepPoint>
where
    I: IntoIterator<Item = Scalar>,
{
    let omega = config.supply.angular_frequency();
    capacitances_uf
        .into_iter()
        .map(|c| {
            let y = CorrectedLoad::from_engineering(resistance_ohms, inductance_mh, c)
                .admittance_breakdown(omega);
            SweepPoint {
                capacitance_uf: c,
                metrics: compute_metrics(&y, config.supply.rms_voltage, &config.tuning),
            }
        })
        .collect()
}

/// Writes sweep points as CSV: `capacitance_uf,pf,p,q,s`.
pub fn write_capacitance_sweep_csv<W: Write>(mut w: W, points: &[SweepPoint]) -> io::Result<()> {
    writeln!(w, "capacitance_uf,pf,p,q,s")?;
    for p in points {
        let m = &p.metrics;
        writeln!(
            w,
            "{:.6e},{:.6e},{:.6e},{:.6e},{:.6e}",
            p.capacitance_uf, m.power_factor, m.real_power, m.reactive_power, m.apparent_power
        )?;
    }
    Ok(())
}
