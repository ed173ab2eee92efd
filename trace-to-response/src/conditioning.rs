use crate::{
    Real,
    error::{ReductionError, ReductionResult},
    parameters::{ConfigurationError, SetupParameters, SmoothingMode},
    record::{ConditionedSignal, RawChannelRecord, rezeroed_micros},
    window::{SmoothingWindow, WindowFilter, ZeroPhaseLowPass},
};
use shpb_common::{Micros, Volts};
use tracing::debug;

/// Conditions both raw channels: polarity correction, excitation-voltage
/// scaling, smoothing and baseline removal against the pre-trigger window.
/// The returned signal keeps the raw record's length on a re-zeroed
/// microsecond time axis.
pub(crate) fn condition(
    record: &RawChannelRecord,
    parameters: &SetupParameters,
) -> ReductionResult<ConditionedSignal> {
    let time = rezeroed_micros(&record.time);

    let channel_1 = condition_channel(
        record,
        &time,
        &record.channel_1,
        parameters.excitation_scale_1,
        parameters,
    )?;
    let channel_2 = condition_channel(
        record,
        &time,
        &record.channel_2,
        parameters.excitation_scale_2,
        parameters,
    )?;

    Ok(ConditionedSignal {
        time,
        channel_1,
        channel_2,
    })
}

fn condition_channel(
    record: &RawChannelRecord,
    time: &[Micros],
    raw: &[Volts],
    excitation_scale: Real,
    parameters: &SetupParameters,
) -> ReductionResult<Vec<Volts>> {
    let sign = parameters.polarity.sign();
    let scaled: Vec<Volts> = raw.iter().map(|v| v * sign * excitation_scale).collect();

    let smoothed = match parameters.smoothing_mode() {
        SmoothingMode::MovingAverage { window } => scaled
            .iter()
            .copied()
            .enumerate()
            .window(SmoothingWindow::new(window))
            .map(|(_, value)| value)
            .collect(),
        SmoothingMode::Lowpass { cutoff_hz } => {
            let sample_interval =
                record
                    .sample_interval()
                    .ok_or(ReductionError::InsufficientPretriggerData {
                        trig_start: parameters.trig_start,
                    })?;
            let nyquist_hz = 0.5 / sample_interval;
            if cutoff_hz >= nyquist_hz {
                return Err(ConfigurationError::CutoffAboveNyquist {
                    cutoff_hz,
                    nyquist_hz,
                }
                .into());
            }
            ZeroPhaseLowPass::new(cutoff_hz).apply(sample_interval, &scaled)
        }
    };

    let baseline = pretrigger_mean(time, &smoothed, parameters.trig_start)?;
    debug!(baseline, "pre-trigger baseline removed");

    Ok(smoothed.iter().map(|v| v - baseline).collect())
}

/// Mean of the finite smoothed samples inside `[0, trig_start]`. The
/// moving-average head is NaN, so only finite samples count; an empty or
/// all-NaN window is a terminal error for the specimen.
fn pretrigger_mean(time: &[Micros], smoothed: &[Volts], trig_start: Micros) -> ReductionResult<Real> {
    let (sum, count) = time
        .iter()
        .zip(smoothed)
        .take_while(|(t, _)| **t <= trig_start)
        .filter(|(_, v)| v.is_finite())
        .fold((0.0, 0_usize), |(sum, count), (_, v)| (sum + v, count + 1));

    if count == 0 {
        return Err(ReductionError::InsufficientPretriggerData { trig_start });
    }
    Ok(sum / count as Real)
}
