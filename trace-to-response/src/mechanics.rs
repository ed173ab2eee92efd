use crate::{
    Real,
    parameters::{SetupParameters, StressFormula},
    record::{MechanicalRecord, SynchronizedPulseRecord},
    window::smooth_series,
};
use itertools::Itertools;
use shpb_common::{
    GIGAPASCALS_PER_MEGAPASCAL, MILLIMETRES_PER_METRE, Megapascals, SECONDS_PER_MICRO,
};
use tracing::debug;

/// Derives the specimen's mechanical history from the synchronised pulses:
/// stress through the specimen, strain rate from the one-dimensional wave
/// relations, strain by trapezoidal integration and the tangent-modulus
/// curve used to spot unloading.
pub(crate) fn derive(
    pulses: &SynchronizedPulseRecord,
    parameters: &SetupParameters,
) -> MechanicalRecord {
    if pulses.is_empty() {
        return MechanicalRecord::default();
    }

    let area_ratio = parameters.bar_area() / parameters.specimen_area();
    let stress: Vec<Megapascals> = match parameters.stress_formula {
        StressFormula::OneWave => pulses
            .transmitted
            .iter()
            .map(|t| area_ratio * t)
            .collect(),
        StressFormula::ThreeWave => pulses
            .incident
            .iter()
            .zip(&pulses.reflected)
            .zip(&pulses.transmitted)
            .map(|((i, r), t)| 0.5 * area_ratio * (i + r + t))
            .collect(),
    };

    // (c / Hs) · (I - R - T) / E, scaled from mm and MPa/GPa to 1/s.
    let wave_term =
        parameters.wave_speed() * MILLIMETRES_PER_METRE / parameters.specimen_height;
    let modulus = parameters.bar_modulus;
    let strain_rate: Vec<Real> = pulses
        .incident
        .iter()
        .zip(&pulses.reflected)
        .zip(&pulses.transmitted)
        .map(|((i, r), t)| wave_term * (i - r - t) * GIGAPASCALS_PER_MEGAPASCAL / modulus)
        .collect();

    let mut strain = Vec::with_capacity(strain_rate.len());
    strain.push(0.0);
    for ((t0, r0), (t1, r1)) in pulses.time.iter().zip(&strain_rate).tuple_windows() {
        let previous = strain.last().copied().unwrap_or_default();
        strain.push(previous + 0.5 * (r0 + r1) * (t1 - t0) * SECONDS_PER_MICRO);
    }

    let mean_rate = strain_rate.iter().sum::<Real>() / strain_rate.len() as Real;
    let representative_strain_rate = (mean_rate / 10.0).round() * 10.0;
    debug!(representative_strain_rate, "mechanical history derived");

    let mut tangent_modulus: Vec<Megapascals> = stress
        .iter()
        .zip(&strain)
        .tuple_windows()
        .map(|((s0, e0), (s1, e1))| (s1 - s0) / (e1 - e0))
        .collect();
    tangent_modulus.push(Real::NAN);
    let tangent_modulus = smooth_series(&tangent_modulus, parameters.rm_window);

    MechanicalRecord {
        time: pulses.time.clone(),
        stress,
        strain_rate,
        strain,
        tangent_modulus,
        representative_strain_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use shpb_common::Micros;

    fn steel_parameters() -> SetupParameters {
        let map = serde_json::json!({
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
            "rm_window": 1,
            "zero_coef": 0.6,
        })
        .as_object()
        .cloned()
        .expect("map literal");
        SetupParameters::from_map(&map).expect("valid setup")
    }

    fn constant_pulses(incident: Real, reflected: Real, transmitted: Real, samples: usize) -> SynchronizedPulseRecord {
        SynchronizedPulseRecord {
            time: (0..samples).map(|i| i as Micros).collect(),
            incident: vec![incident; samples],
            reflected: vec![reflected; samples],
            transmitted: vec![transmitted; samples],
            balance: vec![incident + reflected; samples],
        }
    }

    #[test]
    fn one_wave_stress_scales_the_transmitted_pulse() {
        let record = derive(&constant_pulses(2.0, 0.5, 0.8, 10), &steel_parameters());
        // Area ratio (20/8)^2 = 6.25.
        for stress in &record.stress {
            assert_approx_eq!(*stress, 6.25 * 0.8, 1e-12);
        }
    }

    #[test]
    fn three_wave_stress_averages_the_pulses() {
        let mut parameters = steel_parameters();
        parameters.stress_formula = StressFormula::ThreeWave;
        let record = derive(&constant_pulses(2.0, 0.5, 0.8, 10), &parameters);
        for stress in &record.stress {
            assert_approx_eq!(*stress, 0.5 * 6.25 * 3.3, 1e-12);
        }
    }

    #[test]
    fn constant_strain_rate_integrates_exactly() {
        let parameters = steel_parameters();
        let record = derive(&constant_pulses(2.0, 0.5, 0.5, 101), &parameters);

        // I - R - T = 1 MPa throughout.
        let rate = parameters.wave_speed() * 1e3 / 8.0 * 1e-3 / 200.0;
        for sample in &record.strain_rate {
            assert_approx_eq!(*sample, rate, 1e-9);
        }
        // Trapezoidal integration of a constant is exact: strain = rate * t.
        assert_approx_eq!(record.strain[0], 0.0, 1e-15);
        assert_approx_eq!(record.strain[100], rate * 100.0 * 1e-6, 1e-12);
    }

    #[test]
    fn strain_rate_sign_follows_the_pulse_balance() {
        let record = derive(&constant_pulses(0.5, 0.3, 0.5, 10), &steel_parameters());
        assert!(record.strain_rate.iter().all(|rate| *rate < 0.0));
    }

    #[test]
    fn representative_rate_is_a_multiple_of_ten_near_the_mean() {
        let record = derive(&constant_pulses(2.0, 0.5, 0.5, 50), &steel_parameters());
        let mean =
            record.strain_rate.iter().sum::<Real>() / record.strain_rate.len() as Real;
        assert_eq!(record.representative_strain_rate % 10.0, 0.0);
        assert!((record.representative_strain_rate - mean).abs() <= 5.0);
    }

    #[test]
    fn tangent_modulus_of_a_linear_response_is_constant() {
        let parameters = steel_parameters();
        // Ramp transmitted stress with constant I - R - T so strain grows
        // linearly while stress grows linearly: constant tangent.
        let samples = 50;
        let pulses = SynchronizedPulseRecord {
            time: (0..samples).map(|i| i as Micros).collect(),
            incident: (0..samples).map(|i| 2.0 + i as Real * 0.01).collect(),
            reflected: (0..samples).map(|i| 0.5 + i as Real * 0.005).collect(),
            transmitted: (0..samples).map(|i| 0.5 + i as Real * 0.005).collect(),
            balance: vec![0.0; samples],
        };
        let record = derive(&pulses, &parameters);
        let finite: Vec<Real> = record
            .tangent_modulus
            .iter()
            .copied()
            .filter(|modulus| modulus.is_finite())
            .collect();
        assert!(!finite.is_empty());
        for window in finite.windows(2) {
            assert_approx_eq!(window[0], window[1], window[0].abs() * 1e-6);
        }
    }

    #[test]
    fn last_tangent_sample_is_undefined() {
        let record = derive(&constant_pulses(2.0, 0.5, 0.8, 10), &steel_parameters());
        assert_eq!(record.tangent_modulus.len(), record.len());
        assert!(record.tangent_modulus.last().copied().unwrap_or_default().is_nan());
    }
}
