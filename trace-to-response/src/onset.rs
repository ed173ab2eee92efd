use crate::{
    detectors::{AbsoluteThreshold, EventFilter, ThresholdDetector, UpperThreshold},
    error::{ReductionError, ReductionResult},
    parameters::SetupParameters,
    record::{ConditionedSignal, PulseLabel, PulseWindow, SourceChannel},
};
use shpb_common::{MILLIVOLTS_PER_VOLT, Micros};
use tracing::debug;

/// Locates the three pulse windows on the conditioned signal.
///
/// The incident onset is the first sample whose stress-scaled amplitude on
/// channel 1 clears the noise threshold `zero_coef · K` in either
/// direction. The reflected and transmitted onsets are not found by
/// amplitude (their pulses can sit near the noise level); they are the
/// first samples past the arrival times predicted from bar geometry and
/// wave speed.
pub(crate) fn detect(
    signal: &ConditionedSignal,
    parameters: &SetupParameters,
) -> ReductionResult<[PulseWindow; 3]> {
    let gauge = parameters.gauge_factor;
    let incident = signal
        .channel_1
        .iter()
        .map(|v| v * MILLIVOLTS_PER_VOLT * gauge)
        .enumerate()
        .events(ThresholdDetector::<AbsoluteThreshold>::new(
            parameters.noise_threshold(),
        ))
        .next()
        .ok_or(ReductionError::NoOnsetDetected(PulseLabel::Incident))?;

    let incident_time = signal.time.get(incident).copied().unwrap_or_default();
    debug!(
        incident,
        incident_time,
        reflected_delay = parameters.reflected_delay(),
        transmitted_delay = parameters.transmitted_delay(),
        "incident onset found, predicting reflected/transmitted arrivals"
    );

    let reflected = first_sample_after(
        signal,
        incident_time + parameters.reflected_delay(),
        PulseLabel::Reflected,
    )?;
    let transmitted = first_sample_after(
        signal,
        incident_time + parameters.transmitted_delay(),
        PulseLabel::Transmitted,
    )?;

    Ok([
        PulseWindow {
            label: PulseLabel::Incident,
            onset: incident,
            channel: SourceChannel::Ch1,
        },
        PulseWindow {
            label: PulseLabel::Reflected,
            onset: reflected,
            channel: SourceChannel::Ch1,
        },
        PulseWindow {
            label: PulseLabel::Transmitted,
            onset: transmitted,
            channel: SourceChannel::Ch2,
        },
    ])
}

/// First sample index whose time exceeds the predicted arrival, scanned
/// with the same threshold machinery as the amplitude test but over the
/// time axis itself.
fn first_sample_after(
    signal: &ConditionedSignal,
    arrival: Micros,
    label: PulseLabel,
) -> ReductionResult<usize> {
    signal
        .time
        .iter()
        .copied()
        .enumerate()
        .events(ThresholdDetector::<UpperThreshold>::new(arrival))
        .next()
        .ok_or(ReductionError::NoOnsetDetected(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Real;

    fn signal_with_step(step_at: usize, amplitude: Real, samples: usize) -> ConditionedSignal {
        ConditionedSignal {
            time: (0..samples).map(|i| i as Micros).collect(),
            channel_1: (0..samples)
                .map(|i| if i >= step_at { amplitude } else { 0.0 })
                .collect(),
            channel_2: vec![0.0; samples],
        }
    }

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

    #[test]
    fn noiseless_step_onset_is_exact() {
        // 5 mV step: 50 MPa stress-scaled, over the 6 MPa threshold.
        let signal = signal_with_step(1000, 5e-3, 2000);
        let windows = detect(&signal, &steel_parameters()).expect("onsets");
        assert_eq!(windows[0].onset, 1000);
        assert_eq!(windows[0].label, PulseLabel::Incident);
        assert_eq!(windows[0].channel, SourceChannel::Ch1);
    }

    #[test]
    fn negative_step_also_triggers_the_incident_onset() {
        let signal = signal_with_step(750, -5e-3, 2000);
        let windows = detect(&signal, &steel_parameters()).expect("onsets");
        assert_eq!(windows[0].onset, 750);
    }

    #[test]
    fn predicted_arrivals_follow_the_incident_onset() {
        let parameters = steel_parameters();
        let signal = signal_with_step(100, 5e-3, 2000);
        let windows = detect(&signal, &parameters).expect("onsets");

        // 1 us grid: the onset is the first sample strictly past the
        // predicted arrival.
        let expected_reflected = 100 + parameters.reflected_delay().floor() as usize + 1;
        let expected_transmitted = 100 + parameters.transmitted_delay().floor() as usize + 1;
        assert_eq!(windows[1].onset, expected_reflected);
        assert_eq!(windows[2].onset, expected_transmitted);
        assert_eq!(windows[1].channel, SourceChannel::Ch1);
        assert_eq!(windows[2].channel, SourceChannel::Ch2);
    }

    #[test]
    fn quiet_record_has_no_incident_onset() {
        let signal = signal_with_step(0, 1e-4, 500);
        assert!(matches!(
            detect(&signal, &steel_parameters()),
            Err(ReductionError::NoOnsetDetected(PulseLabel::Incident))
        ));
    }

    #[test]
    fn short_record_ends_before_the_predicted_arrival() {
        // Reflected arrival is ~396 us after onset; the record stops first.
        let signal = signal_with_step(100, 5e-3, 300);
        assert!(matches!(
            detect(&signal, &steel_parameters()),
            Err(ReductionError::NoOnsetDetected(PulseLabel::Reflected))
        ));
    }
}
