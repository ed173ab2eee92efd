use crate::Real;
use std::f64::consts::PI;

/// Q factors of the two second-order sections of a fourth-order
/// Butterworth filter: `1 / (2·cos(pi/8))` and `1 / (2·cos(3pi/8))`.
const SECTION_Q: [Real; 2] = [0.5411961001461969, 1.3065629648763764];

/// Samples of odd-reflection padding at each end of the record.
const PAD_LENGTH: usize = 24;

/// One normalised direct-form-II-transposed second-order section.
#[derive(Debug, Clone, Copy)]
struct Biquad {
    b0: Real,
    b1: Real,
    b2: Real,
    a1: Real,
    a2: Real,
}

impl Biquad {
    /// Low-pass coefficients for the given cutoff/sample-rate ratio and Q.
    fn lowpass(cutoff_ratio: Real, q: Real) -> Self {
        let w0 = 2.0 * PI * cutoff_ratio;
        let (sin_w0, cos_w0) = w0.sin_cos();
        let alpha = sin_w0 / (2.0 * q);
        let a0 = 1.0 + alpha;
        Biquad {
            b0: (1.0 - cos_w0) / 2.0 / a0,
            b1: (1.0 - cos_w0) / a0,
            b2: (1.0 - cos_w0) / 2.0 / a0,
            a1: -2.0 * cos_w0 / a0,
            a2: (1.0 - alpha) / a0,
        }
    }

    /// Runs the section over `data` in place. The state starts at the
    /// steady state of the first sample, so a constant signal passes
    /// through unchanged (the section has unit DC gain).
    fn run(&self, data: &mut [Real]) {
        let first = data.first().copied().unwrap_or_default();
        let mut z1 = first * (1.0 - self.b0);
        let mut z2 = first * (1.0 - self.b0 - self.b1 + self.a1);
        for sample in data.iter_mut() {
            let x = *sample;
            let y = self.b0 * x + z1;
            z1 = self.b1 * x - self.a1 * y + z2;
            z2 = self.b2 * x - self.a2 * y;
            *sample = y;
        }
    }
}

/// A fourth-order Butterworth low-pass run forward and backward over the
/// record, cancelling the phase delay. Length-preserving, unit DC gain.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ZeroPhaseLowPass {
    cutoff_hz: Real,
}

impl ZeroPhaseLowPass {
    pub(crate) fn new(cutoff_hz: Real) -> Self {
        ZeroPhaseLowPass { cutoff_hz }
    }

    /// Filters `values` sampled every `sample_interval` seconds. The
    /// cutoff must lie below the Nyquist frequency; the caller validates
    /// this against the record. The record is extended at both ends by odd
    /// reflection so the filter transients fall outside the kept samples.
    pub(crate) fn apply(&self, sample_interval: Real, values: &[Real]) -> Vec<Real> {
        let cutoff_ratio = self.cutoff_hz * sample_interval;
        debug_assert!(cutoff_ratio < 0.5);

        if values.is_empty() {
            return Vec::new();
        }

        let sections: Vec<Biquad> = SECTION_Q
            .iter()
            .map(|&q| Biquad::lowpass(cutoff_ratio, q))
            .collect();

        let pad = PAD_LENGTH.min(values.len() - 1);
        let mut extended = Vec::with_capacity(values.len() + 2 * pad);
        let first = values[0];
        let last = values[values.len() - 1];
        extended.extend((1..=pad).rev().map(|i| 2.0 * first - values[i]));
        extended.extend_from_slice(values);
        extended.extend((1..=pad).map(|i| 2.0 * last - values[values.len() - 1 - i]));

        for section in &sections {
            section.run(&mut extended);
        }
        extended.reverse();
        for section in &sections {
            section.run(&mut extended);
        }
        extended.reverse();
        extended[pad..pad + values.len()].to_vec()
    }
}
