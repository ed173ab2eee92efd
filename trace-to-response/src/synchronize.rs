use crate::{
    error::{ReductionError, ReductionResult},
    parameters::SetupParameters,
    record::{ConditionedSignal, PulseWindow, SourceChannel, SynchronizedPulseRecord},
};
use itertools::Itertools;
use shpb_common::{MILLIVOLTS_PER_VOLT, Megapascals, Micros};
use tracing::debug;

/// Aligns the three pulses to a common relative time origin and merges
/// them on exactly matching time values.
///
/// Shifting drops the first `onset` samples of a pulse's channel and
/// re-indexes them onto the head of the time axis, so every pulse starts at
/// its own arrival. Because all three ride the same acquisition grid, the
/// shifted time values match exactly and the inner join loses no rows; a
/// fractional-sample onset error would surface here as a shrinking join.
pub(crate) fn synchronize(
    signal: &ConditionedSignal,
    windows: &[PulseWindow; 3],
    parameters: &SetupParameters,
) -> ReductionResult<SynchronizedPulseRecord> {
    let [incident, reflected, transmitted] = windows;
    let incident = shifted_pulse(signal, incident, parameters);
    let reflected = shifted_pulse(signal, reflected, parameters);
    let transmitted = shifted_pulse(signal, transmitted, parameters);

    let incident_reflected: Vec<(Micros, Megapascals, Megapascals)> = incident
        .iter()
        .merge_join_by(reflected.iter(), |a, b| a.0.total_cmp(&b.0))
        .filter_map(|pair| pair.both().map(|(i, r)| (i.0, i.1, r.1)))
        .collect();

    let mut record = SynchronizedPulseRecord::default();
    for ((time, incident, reflected), (_, transmitted)) in incident_reflected
        .iter()
        .merge_join_by(transmitted.iter(), |a, b| a.0.total_cmp(&b.0))
        .filter_map(|pair| pair.both())
    {
        record.time.push(*time);
        record.incident.push(*incident);
        record.reflected.push(*reflected);
        record.transmitted.push(*transmitted);
        record.balance.push(incident + reflected);
    }

    if record.is_empty() {
        return Err(ReductionError::EmptySynchronization);
    }
    debug!(
        rows = record.len(),
        bound = parameters.striker_transit(),
        "pulses synchronised"
    );
    Ok(record)
}

/// One pulse, stress-scaled and shifted to its arrival: sample `onset + j`
/// is paired with relative time `time[j]`, truncated strictly below the
/// striker transit bound, with samples left undefined by smoothing
/// discarded.
fn shifted_pulse(
    signal: &ConditionedSignal,
    window: &PulseWindow,
    parameters: &SetupParameters,
) -> Vec<(Micros, Megapascals)> {
    let channel = match window.channel {
        SourceChannel::Ch1 => &signal.channel_1,
        SourceChannel::Ch2 => &signal.channel_2,
    };
    let scale = MILLIVOLTS_PER_VOLT * parameters.gauge_factor;
    let bound = parameters.striker_transit();

    signal
        .time
        .iter()
        .zip(channel.iter().skip(window.onset))
        .map(|(time, voltage)| (*time, voltage * scale))
        .take_while(|(time, _)| *time < bound)
        .filter(|(_, stress)| stress.is_finite())
        .collect()
}
