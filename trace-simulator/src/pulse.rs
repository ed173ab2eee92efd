use shpb_common::{Micros, Real};

/// A single stress pulse on one channel, evaluated in microseconds.
#[derive(Debug, Clone)]
pub enum Pulse {
    Flat {
        start: Micros,
        stop: Micros,
        amplitude: Real,
    },
    Triangular {
        start: Micros,
        peak_time: Micros,
        stop: Micros,
        amplitude: Real,
    },
    Gaussian {
        mean: Micros,
        sd: Micros,
        peak_amplitude: Real,
    },
}

impl Pulse {
    pub fn get_value_at(&self, time: Micros) -> Real {
        match *self {
            Self::Flat {
                start,
                stop,
                amplitude,
            } => {
                if start <= time && time < stop {
                    amplitude
                } else {
                    Real::default()
                }
            }
            Self::Triangular {
                start,
                peak_time,
                stop,
                amplitude,
            } => {
                if start <= time && time < peak_time {
                    amplitude * (time - start) / (peak_time - start)
                } else if peak_time <= time && time < stop {
                    amplitude * (stop - time) / (stop - peak_time)
                } else {
                    Real::default()
                }
            }
            Self::Gaussian {
                mean,
                sd,
                peak_amplitude,
            } => peak_amplitude * f64::exp(-f64::powi(0.5 * (time - mean) / sd, 2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn flat_pulse_is_bounded_half_open() {
        let pulse = Pulse::Flat {
            start: 10.0,
            stop: 20.0,
            amplitude: 5.0,
        };
        assert_eq!(pulse.get_value_at(9.99), 0.0);
        assert_eq!(pulse.get_value_at(10.0), 5.0);
        assert_eq!(pulse.get_value_at(19.99), 5.0);
        assert_eq!(pulse.get_value_at(20.0), 0.0);
    }

    #[test]
    fn triangular_pulse_peaks_at_peak_time() {
        let pulse = Pulse::Triangular {
            start: 0.0,
            peak_time: 10.0,
            stop: 30.0,
            amplitude: 2.0,
        };
        assert_approx_eq!(pulse.get_value_at(5.0), 1.0);
        assert_approx_eq!(pulse.get_value_at(10.0), 2.0);
        assert_approx_eq!(pulse.get_value_at(20.0), 1.0);
        assert_eq!(pulse.get_value_at(30.0), 0.0);
    }

    #[test]
    fn gaussian_pulse_is_symmetric() {
        let pulse = Pulse::Gaussian {
            mean: 50.0,
            sd: 5.0,
            peak_amplitude: 3.0,
        };
        assert_approx_eq!(pulse.get_value_at(45.0), pulse.get_value_at(55.0), 1e-12);
        assert_approx_eq!(pulse.get_value_at(50.0), 3.0, 1e-12);
    }
}
