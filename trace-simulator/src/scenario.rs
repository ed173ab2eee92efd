use crate::{noise::Noise, pulse::Pulse};
use rand::Rng;
use shpb_common::{MICROS_PER_SECOND, Micros, Real, Volts};

/// A complete synthetic SHPB shot: an incident step on channel 1, its
/// reflection arriving `2·L1/c` later on the same channel, and the
/// transmitted pulse arriving `(L1+L2)/c` later on channel 2. The recorded
/// voltages are negated to mimic the inverted acquisition polarity of the
/// rig, so the reduction pipeline's default polarity recovers them.
#[derive(Debug, Clone)]
pub struct ShpbScenario {
    /// Sample interval in seconds.
    pub sample_interval: Real,
    pub samples: usize,
    /// Sample index at which the incident pulse arrives.
    pub incident_onset: usize,
    pub incident_amplitude: Volts,
    pub reflected_amplitude: Volts,
    pub transmitted_amplitude: Volts,
    /// Length of each flat pulse in microseconds.
    pub pulse_duration: Micros,
    /// Bar wave speed in m/s.
    pub wave_speed: Real,
    /// Bar length to the reflection point in m.
    pub incident_length: Real,
    /// Bar length from the reflection point to the transmission gauge in m.
    pub transmission_length: Real,
}

impl ShpbScenario {
    fn sample_interval_micros(&self) -> Micros {
        self.sample_interval * MICROS_PER_SECOND
    }

    /// Predicted reflected arrival, in microseconds from the record start.
    pub fn reflected_arrival(&self) -> Micros {
        self.incident_onset as Micros * self.sample_interval_micros()
            + 2.0 * self.incident_length / self.wave_speed * MICROS_PER_SECOND
    }

    /// Predicted transmitted arrival, in microseconds from the record start.
    pub fn transmitted_arrival(&self) -> Micros {
        self.incident_onset as Micros * self.sample_interval_micros()
            + (self.incident_length + self.transmission_length) / self.wave_speed
                * MICROS_PER_SECOND
    }

    fn channel_pulses(&self) -> ([Pulse; 2], Pulse) {
        let incident_start = self.incident_onset as Micros * self.sample_interval_micros();
        let channel_1 = [
            Pulse::Flat {
                start: incident_start,
                stop: incident_start + self.pulse_duration,
                amplitude: self.incident_amplitude,
            },
            Pulse::Flat {
                start: self.reflected_arrival(),
                stop: self.reflected_arrival() + self.pulse_duration,
                amplitude: self.reflected_amplitude,
            },
        ];
        let channel_2 = Pulse::Flat {
            start: self.transmitted_arrival(),
            stop: self.transmitted_arrival() + self.pulse_duration,
            amplitude: self.transmitted_amplitude,
        };
        (channel_1, channel_2)
    }

    /// The noiseless record, as `(time in s, CH1 in V, CH2 in V)` samples.
    pub fn trace(&self) -> Vec<(Real, Volts, Volts)> {
        let (channel_1, channel_2) = self.channel_pulses();
        (0..self.samples)
            .map(|index| {
                let time = index as Micros * self.sample_interval_micros();
                let v1: Volts = channel_1.iter().map(|pulse| pulse.get_value_at(time)).sum();
                let v2 = channel_2.get_value_at(time);
                (index as Real * self.sample_interval, -v1, -v2)
            })
            .collect()
    }

    /// The record with per-channel additive noise.
    pub fn noisy_trace<R: Rng>(
        &self,
        noise_1: &mut Noise,
        noise_2: &mut Noise,
        rng: &mut R,
    ) -> Vec<(Real, Volts, Volts)> {
        self.trace()
            .into_iter()
            .map(|(time, v1, v2)| (time, noise_1.noisify(v1, rng), noise_2.noisify(v2, rng)))
            .collect()
    }
}
