use crate::Real;
use serde::Deserialize;
use shpb_common::{MICROS_PER_SECOND, Megapascals, Micros, PASCALS_PER_GIGAPASCAL};
use std::f64::consts::PI;
use thiserror::Error;

/// Rejected setup input. Raised once, at the pipeline boundary.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Missing or invalid setup parameter: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Setup parameter {key} must be positive, got {value}")]
    NonPositive { key: &'static str, value: Real },
    #[error("Smoothing window must hold at least one sample")]
    EmptySmoothingWindow,
    #[error("Low-pass cutoff {cutoff_hz} Hz is not below the Nyquist frequency {nyquist_hz} Hz")]
    CutoffAboveNyquist { cutoff_hz: Real, nyquist_hz: Real },
}

/// Sign convention of the acquisition relative to compressive-positive
/// stress. A fixed setup property of the rig, never auto-detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    /// Compression already reads positive.
    Direct,
    /// Bridge wiring inverts the trace; both channels are negated.
    #[default]
    Inverted,
}

impl Polarity {
    pub(crate) fn sign(self) -> Real {
        match self {
            Polarity::Direct => 1.0,
            Polarity::Inverted => -1.0,
        }
    }
}

/// The conditioning filter applied to both raw channels. Either choice
/// preserves signal length; the moving average leaves the first
/// `window - 1` samples NaN.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "mode")]
pub enum SmoothingMode {
    #[serde(rename = "movingAverage")]
    MovingAverage { window: usize },
    #[serde(rename = "lowpass")]
    Lowpass {
        #[serde(rename = "cutoffHz")]
        cutoff_hz: Real,
    },
}

/// Formula converting the synchronised bar pulses to specimen stress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StressFormula {
    /// Stress transmitted through the specimen, `(S/As)·T`.
    #[default]
    OneWave,
    /// Front/back averaged stress, `(S/As)·(I+R+T)/2`.
    ThreeWave,
}

fn unity() -> Real {
    1.0
}

/// Immutable setup of one test campaign: bar geometry and material, gauge
/// calibration, specimen dimensions and the conditioning options. Validated
/// once when entering the pipeline; stages trust it afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct SetupParameters {
    /// Gauge factor `K` in MPa/mV.
    pub gauge_factor: Real,
    /// Bar diameter `d` in mm.
    pub bar_diameter: Real,
    /// Bar material density `rho` in kg/m3.
    pub bar_density: Real,
    /// Bar Young's modulus `E` in GPa.
    pub bar_modulus: Real,
    /// Distance `L1` to the reflection point in m.
    pub incident_length: Real,
    /// Distance `L2` to the transmission gauge in m.
    pub transmission_length: Real,
    /// Striker bar length in m.
    pub striker_length: Real,
    /// Specimen height `Hs` in mm.
    pub specimen_height: Real,
    /// Specimen diameter `Ds` in mm.
    pub specimen_diameter: Real,
    /// Pre-trigger averaging window end, in us from the record start.
    pub trig_start: Micros,
    /// Moving-average length in samples. Also smooths the tangent-modulus
    /// series regardless of the conditioning mode.
    pub rm_window: usize,
    /// Onset threshold coefficient in mV of conditioned signal.
    pub zero_coef: Real,
    #[serde(default)]
    pub polarity: Polarity,
    /// Conditioning filter; defaults to a moving average of `rm_window`
    /// samples.
    #[serde(default)]
    pub smoothing: Option<SmoothingMode>,
    #[serde(default)]
    pub stress_formula: StressFormula,
    /// Excitation-voltage correction of channel 1, `V0_CH1 / V0`.
    #[serde(default = "unity")]
    pub excitation_scale_1: Real,
    /// Excitation-voltage correction of channel 2, `V0_CH2 / V0`.
    #[serde(default = "unity")]
    pub excitation_scale_2: Real,
}

impl SetupParameters {
    /// Builds and validates parameters from a flat key-value mapping, the
    /// form in which setup files reach the pipeline.
    pub fn from_map(
        map: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, ConfigurationError> {
        let parameters: Self = serde_json::from_value(serde_json::Value::Object(map.clone()))?;
        parameters.validate()?;
        Ok(parameters)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let positives = [
            ("gauge_factor", self.gauge_factor),
            ("bar_diameter", self.bar_diameter),
            ("bar_density", self.bar_density),
            ("bar_modulus", self.bar_modulus),
            ("incident_length", self.incident_length),
            ("transmission_length", self.transmission_length),
            ("striker_length", self.striker_length),
            ("specimen_height", self.specimen_height),
            ("specimen_diameter", self.specimen_diameter),
            ("trig_start", self.trig_start),
            ("zero_coef", self.zero_coef),
            ("excitation_scale_1", self.excitation_scale_1),
            ("excitation_scale_2", self.excitation_scale_2),
        ];
        for (key, value) in positives {
            if !(value > 0.0) {
                return Err(ConfigurationError::NonPositive { key, value });
            }
        }
        if self.rm_window == 0 {
            return Err(ConfigurationError::EmptySmoothingWindow);
        }
        match self.smoothing_mode() {
            SmoothingMode::MovingAverage { window: 0 } => {
                Err(ConfigurationError::EmptySmoothingWindow)
            }
            SmoothingMode::Lowpass { cutoff_hz } if !(cutoff_hz > 0.0) => {
                Err(ConfigurationError::NonPositive {
                    key: "cutoffHz",
                    value: cutoff_hz,
                })
            }
            _ => Ok(()),
        }
    }

    pub fn smoothing_mode(&self) -> SmoothingMode {
        self.smoothing.clone().unwrap_or(SmoothingMode::MovingAverage {
            window: self.rm_window,
        })
    }

    /// Elastic longitudinal wave speed in the bar, m/s.
    pub fn wave_speed(&self) -> Real {
        (self.bar_modulus / self.bar_density * PASCALS_PER_GIGAPASCAL).sqrt()
    }

    /// Bar cross-section in mm2.
    pub fn bar_area(&self) -> Real {
        PI * self.bar_diameter * self.bar_diameter / 4.0
    }

    /// Specimen cross-section in mm2.
    pub fn specimen_area(&self) -> Real {
        PI * self.specimen_diameter * self.specimen_diameter / 4.0
    }

    /// Expected delay of the reflected pulse behind the incident onset,
    /// `2·L1/c`, in us.
    pub fn reflected_delay(&self) -> Micros {
        2.0 * self.incident_length / self.wave_speed() * MICROS_PER_SECOND
    }

    /// Expected delay of the transmitted pulse behind the incident onset,
    /// `(L1+L2)/c`, in us.
    pub fn transmitted_delay(&self) -> Micros {
        (self.incident_length + self.transmission_length) / self.wave_speed() * MICROS_PER_SECOND
    }

    /// Round-trip transit time of the compressive wave through the striker,
    /// `2·striker/c`, in us. Beyond this bound the incident bar signal no
    /// longer represents a single clean loading pulse.
    pub fn striker_transit(&self) -> Micros {
        2.0 * self.striker_length / self.wave_speed() * MICROS_PER_SECOND
    }

    /// Amplitude threshold for the incident onset, `zero_coef · K`, in MPa.
    pub fn noise_threshold(&self) -> Megapascals {
        self.zero_coef * self.gauge_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use serde_json::json;

    fn steel_map() -> serde_json::Map<String, serde_json::Value> {
        json!({
            "gauge_factor": 10.0,
            "bar_diameter": 20.0,
            "bar_density": 7850.0,
            "bar_modulus": 200.0,
            "incident_length": 1.0,
            "transmission_length": 1.0,
            "striker_length": 0.3,
            "specimen_height": 8.0,
            "specimen_diameter": 8.0,
            "trig_start": 10.0,
            "rm_window": 50,
            "zero_coef": 0.6,
        })
        .as_object()
        .cloned()
        .expect("map literal")
    }

    #[test]
    fn derived_quantities_for_steel_bars() {
        let parameters = SetupParameters::from_map(&steel_map()).expect("valid setup");
        assert_approx_eq!(parameters.wave_speed(), 5047.6, 0.1);
        assert_approx_eq!(parameters.reflected_delay(), 396.23, 0.01);
        assert_approx_eq!(parameters.transmitted_delay(), 396.23, 0.01);
        assert_approx_eq!(parameters.striker_transit(), 118.87, 0.01);
        assert_approx_eq!(parameters.noise_threshold(), 6.0, 1e-12);
        assert_approx_eq!(parameters.bar_area(), 314.159, 0.001);
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let mut map = steel_map();
        map.remove("gauge_factor");
        assert!(matches!(
            SetupParameters::from_map(&map),
            Err(ConfigurationError::Parse(_))
        ));
    }

    #[test]
    fn non_numeric_value_is_a_configuration_error() {
        let mut map = steel_map();
        map.insert("bar_modulus".into(), json!("steel"));
        assert!(matches!(
            SetupParameters::from_map(&map),
            Err(ConfigurationError::Parse(_))
        ));
    }

    #[test]
    fn non_positive_value_is_rejected() {
        let mut map = steel_map();
        map.insert("bar_density".into(), json!(-7850.0));
        assert!(matches!(
            SetupParameters::from_map(&map),
            Err(ConfigurationError::NonPositive {
                key: "bar_density",
                ..
            })
        ));
    }

    #[test]
    fn smoothing_mode_defaults_to_the_moving_average() {
        let parameters = SetupParameters::from_map(&steel_map()).expect("valid setup");
        assert_eq!(
            parameters.smoothing_mode(),
            SmoothingMode::MovingAverage { window: 50 }
        );
    }

    #[test]
    fn lowpass_mode_parses_from_the_map() {
        let mut map = steel_map();
        map.insert(
            "smoothing".into(),
            json!({"mode": "lowpass", "cutoffHz": 200e3}),
        );
        let parameters = SetupParameters::from_map(&map).expect("valid setup");
        assert_eq!(
            parameters.smoothing_mode(),
            SmoothingMode::Lowpass { cutoff_hz: 200e3 }
        );
    }
}
