use crate::Real;
use serde::Serialize;
use shpb_common::{MICROS_PER_SECOND, Megapascals, Micros, Volts};

/// A raw two-channel oscilloscope record: uniformly spaced, strictly
/// increasing time in seconds, channel 1 carrying the incident and reflected
/// signal, channel 2 the transmitted signal. Immutable once constructed.
#[derive(Debug, Clone, Default)]
pub struct RawChannelRecord {
    pub time: Vec<Real>,
    pub channel_1: Vec<Volts>,
    pub channel_2: Vec<Volts>,
}

impl RawChannelRecord {
    pub fn from_samples(samples: impl IntoIterator<Item = (Real, Volts, Volts)>) -> Self {
        let mut record = Self::default();
        for (time, v1, v2) in samples {
            record.time.push(time);
            record.channel_1.push(v1);
            record.channel_2.push(v2);
        }
        record
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// The sample interval in seconds, taken from the first pair of samples.
    pub fn sample_interval(&self) -> Option<Real> {
        Some(self.time.get(1)? - self.time.first()?)
    }
}

/// Both channels after polarity correction, excitation scaling, smoothing
/// and baseline removal. Time is re-zeroed to the first sample and held in
/// microseconds. Moving-average smoothing leaves the first `window - 1`
/// samples NaN; later stages skip non-finite samples.
#[derive(Debug, Clone, Default)]
pub struct ConditionedSignal {
    pub time: Vec<Micros>,
    pub channel_1: Vec<Volts>,
    pub channel_2: Vec<Volts>,
}

impl ConditionedSignal {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// The three stress pulses captured around the specimen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, Serialize)]
pub enum PulseLabel {
    #[strum(to_string = "incident")]
    Incident,
    #[strum(to_string = "reflected")]
    Reflected,
    #[strum(to_string = "transmitted")]
    Transmitted,
}

/// The oscilloscope channel a pulse rides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, Serialize)]
pub enum SourceChannel {
    #[strum(to_string = "CH1")]
    Ch1,
    #[strum(to_string = "CH2")]
    Ch2,
}

/// A detected pulse window: the first sample index at which the pulse's
/// channel crosses its threshold, and the channel it is read from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PulseWindow {
    pub label: PulseLabel,
    pub onset: usize,
    pub channel: SourceChannel,
}

/// The three stress pulses shifted to a common relative time origin and
/// inner-joined on exactly matching time values. `balance` is the
/// elementwise `incident + reflected` sum used for equilibrium inspection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SynchronizedPulseRecord {
    pub time: Vec<Micros>,
    pub incident: Vec<Megapascals>,
    pub reflected: Vec<Megapascals>,
    pub transmitted: Vec<Megapascals>,
    pub balance: Vec<Megapascals>,
}

impl SynchronizedPulseRecord {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Specimen stress, strain rate, strain and tangent modulus histories
/// derived from the synchronised pulses. `strain` is the running trapezoidal
/// integral of `strain_rate` over time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MechanicalRecord {
    pub time: Vec<Micros>,
    pub stress: Vec<Megapascals>,
    pub strain_rate: Vec<Real>,
    pub strain: Vec<Real>,
    pub tangent_modulus: Vec<Megapascals>,
    /// Mean strain rate rounded to the nearest multiple of 10, a reporting
    /// convention.
    pub representative_strain_rate: Real,
}

impl MechanicalRecord {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.time.truncate(len);
        self.stress.truncate(len);
        self.strain_rate.truncate(len);
        self.strain.truncate(len);
        self.tangent_modulus.truncate(len);
    }
}

/// Logarithmic stress/strain accounting for finite deformation. Defined
/// only while engineering strain is below one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrueResponseRecord {
    pub true_strain: Vec<Real>,
    pub true_stress: Vec<Megapascals>,
}

impl TrueResponseRecord {
    pub fn len(&self) -> usize {
        self.true_strain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.true_strain.is_empty()
    }
}

/// Re-zero the raw time axis to its first sample and convert to
/// microseconds.
pub(crate) fn rezeroed_micros(time: &[Real]) -> Vec<Micros> {
    let origin = time.first().copied().unwrap_or_default();
    time.iter()
        .map(|t| (t - origin) * MICROS_PER_SECOND)
        .collect()
}
