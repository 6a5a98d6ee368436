//! One period of supply voltage, line current and instantaneous power.
//!
//! Samples are uniformly spaced over the half-open interval `[0, T)`:
//! `t_k = (k / N) · T` for `k = 0..N`. The current is shifted from the voltage
//! by the computed phase angle, `i(t) = I_pk · sin(ωt − φ)`, and the power is the
//! pointwise product `p = v · i`.

use std::io::{self, Write};
use std::iter::FusedIterator;

use crate::constants::{angular_frequency, period_from_frequency};
use crate::math::{sinusoid_peak, Scalar};
use crate::power::Metrics;
use crate::simulation::SupplyConfig;

/// A single time sample.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformSample {
    /// Time in seconds.
    pub t: Scalar,
    /// Supply voltage in V.
    pub v: Scalar,
    /// Line current in A.
    pub i: Scalar,
    /// Instantaneous power in W.
    pub p: Scalar,
}

/// Parameters of the sinusoids for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformSynthesizer {
    peak_voltage: Scalar,
    peak_current: Scalar,
    omega: Scalar,
    period: Scalar,
    phase_rad: Scalar,
    sample_count: usize,
}

impl WaveformSynthesizer {
    /// Creates a synthesizer from RMS quantities, phase and supply frequency.
    #[must_use]
    pub fn new(
        rms_voltage: Scalar,
        rms_current: Scalar,
        phase_rad: Scalar,
        frequency_hz: Scalar,
        sample_count: usize,
    ) -> Self {
        Self {
            peak_voltage: sinusoid_peak(rms_voltage),
            peak_current: sinusoid_peak(rms_current),
            omega: angular_frequency(frequency_hz),
            period: period_from_frequency(frequency_hz),
            phase_rad,
            sample_count,
        }
    }

    /// Creates a synthesizer for the supply and evaluated metrics.
    #[must_use]
    pub fn from_metrics(supply: &SupplyConfig, metrics: &Metrics) -> Self {
        Self::new(
            supply.rms_voltage,
            metrics.rms_current,
            metrics.phase_rad,
            supply.frequency_hz,
            supply.sample_count,
        )
    }

    /// Number of samples per period.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Sample `k` of the period.
    #[must_use]
    pub fn sample_at(&self, k: usize) -> WaveformSample {
        let t = (k as Scalar / self.sample_count as Scalar) * self.period;
        let angle = self.omega * t;
        let v = self.peak_voltage * angle.sin();
        let i = self.peak_current * (angle - self.phase_rad).sin();
        WaveformSample { t, v, i, p: v * i }
    }

    /// Lazy iterator over all samples. Each call starts from `t = 0`.
    #[must_use]
    pub fn samples(&self) -> Samples {
        Samples {
            synth: *self,
            next: 0,
        }
    }

    /// Collects one full period.
    #[cfg(not(feature = "parallel"))]
    #[must_use]
    pub fn synthesize(&self) -> Waveform {
        self.samples().collect()
    }

    /// Collects one full period, computing samples on the rayon pool.
    ///
    /// The indexed collect keeps output order equal to sample order.
    #[cfg(feature = "parallel")]
    #[must_use]
    pub fn synthesize(&self) -> Waveform {
        use rayon::prelude::*;

        let samples: Vec<WaveformSample> = (0..self.sample_count)
            .into_par_iter()
            .map(|k| self.sample_at(k))
            .collect();
        samples.into_iter().collect()
    }
}

/// Iterator returned by [`WaveformSynthesizer::samples`].
#[derive(Debug, Clone)]
pub struct Samples {
    synth: WaveformSynthesizer,
    next: usize,
}

impl Iterator for Samples {
    type Item = WaveformSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.synth.sample_count {
            return None;
        }
        let sample = self.synth.sample_at(self.next);
        self.next += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.synth.sample_count.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples {}

impl FusedIterator for Samples {}

/// Aligned time, voltage, current and power sequences.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Waveform {
    /// Sample times in seconds.
    pub times: Vec<Scalar>,
    /// Voltage per sample.
    pub voltage: Vec<Scalar>,
    /// Current per sample.
    pub current: Vec<Scalar>,
    /// Instantaneous power per sample.
    pub power: Vec<Scalar>,
}

impl FromIterator<WaveformSample> for Waveform {
    fn from_iter<I: IntoIterator<Item = WaveformSample>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut waveform = Self {
            times: Vec::with_capacity(lower),
            voltage: Vec::with_capacity(lower),
            current: Vec::with_capacity(lower),
            power: Vec::with_capacity(lower),
        };
        for s in iter {
            waveform.times.push(s.t);
            waveform.voltage.push(s.v);
            waveform.current.push(s.i);
            waveform.power.push(s.p);
        }
        waveform
    }
}

impl Waveform {
    /// Total captured samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True if no samples recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Iterates the samples in time order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = WaveformSample> + '_ {
        (0..self.len()).map(move |k| WaveformSample {
            t: self.times[k],
            v: self.voltage[k],
            i: self.current[k],
            p: self.power[k],
        })
    }

    /// Mean instantaneous power over the period; approximates P.
    #[must_use]
    pub fn average_power(&self) -> Scalar {
        if self.power.is_empty() {
            return 0.0;
        }
        self.power.iter().sum::<Scalar>() / self.power.len() as Scalar
    }

    /// Largest instantaneous power drawn from the supply.
    #[must_use]
    pub fn peak_power(&self) -> Scalar {
        self.power.iter().copied().fold(0.0, Scalar::max)
    }

    /// Share of samples during which power flows back to the source (p < 0).
    #[must_use]
    pub fn returned_fraction(&self) -> Scalar {
        if self.power.is_empty() {
            return 0.0;
        }
        let returned = self.power.iter().filter(|&&p| p < 0.0).count();
        returned as Scalar / self.power.len() as Scalar
    }
}

/// Writes the waveform as CSV: `time,voltage,current,power`.
pub fn write_waveform_csv<W: Write>(mut w: W, waveform: &Waveform) -> io::Result<()> {
    writeln!(w, "time,voltage,current,power")?;
    for s in waveform.iter() {
        writeln!(w, "{:.16e},{:.16e},{:.16e},{:.16e}", s.t, s.v, s.i, s.p)?;
    }
    Ok(())
}
