use crate::{
    Real, conditioning,
    error::ReductionResult,
    mechanics, onset,
    parameters::SetupParameters,
    record::{
        MechanicalRecord, RawChannelRecord, SynchronizedPulseRecord, TrueResponseRecord,
    },
    synchronize, true_response, unload,
    window::smooth_series,
};
use rayon::prelude::*;
use shpb_common::Megapascals;
use tracing::{info, info_span};

/// Window of the rolling mean behind the ultimate-stress summary.
const ULTIMATE_STRESS_WINDOW: usize = 10;

/// Everything the reduction produces for one specimen: the synchronised
/// pulses for balance inspection, the unload-truncated mechanical history,
/// the true response, and the scalar summary values.
#[derive(Debug, Clone)]
pub struct SpecimenResponse {
    pub synchronized: SynchronizedPulseRecord,
    pub mechanical: MechanicalRecord,
    pub true_response: TrueResponseRecord,
    /// Mean strain rate rounded to the nearest multiple of 10, in 1/s.
    pub strain_rate: Real,
    /// Peak of the smoothed true-stress series, when the record is long
    /// enough to smooth.
    pub ultimate_true_stress: Option<Megapascals>,
}

/// Runs the six reduction stages over one specimen's raw record.
///
/// The parameters are validated once here; stages trust them afterwards.
/// Pure and synchronous: the same record and parameters always reduce to
/// the same response.
pub fn process(
    record: &RawChannelRecord,
    parameters: &SetupParameters,
) -> ReductionResult<SpecimenResponse> {
    parameters.validate()?;

    let conditioned = conditioning::condition(record, parameters)?;
    let windows = onset::detect(&conditioned, parameters)?;
    let synchronized = synchronize::synchronize(&conditioned, &windows, parameters)?;
    let mechanical = unload::truncate_at_unload(mechanics::derive(&synchronized, parameters));
    let true_response = true_response::convert(&mechanical)?;

    let response = SpecimenResponse {
        strain_rate: mechanical.representative_strain_rate,
        ultimate_true_stress: ultimate_true_stress(&true_response),
        synchronized,
        mechanical,
        true_response,
    };
    info!(
        strain_rate = response.strain_rate,
        samples = response.mechanical.len(),
        "specimen reduced"
    );
    Ok(response)
}

/// One entry of a test campaign: a raw record with its setup and an
/// optional identifying label.
#[derive(Debug, Clone)]
pub struct Specimen {
    pub label: Option<String>,
    pub record: RawChannelRecord,
    pub parameters: SetupParameters,
}

/// Reduces a campaign of independent specimens in parallel. Results come
/// back in input order; one specimen's failure never aborts its siblings.
pub fn process_batch(specimens: &[Specimen]) -> Vec<ReductionResult<SpecimenResponse>> {
    specimens
        .par_iter()
        .map(|specimen| {
            let label = specimen.label.as_deref().unwrap_or("unlabelled");
            let span = info_span!("specimen", label);
            let _guard = span.enter();
            process(&specimen.record, &specimen.parameters)
        })
        .collect()
}

fn ultimate_true_stress(response: &TrueResponseRecord) -> Option<Megapascals> {
    smooth_series(&response.true_stress, ULTIMATE_STRESS_WINDOW)
        .into_iter()
        .filter(|stress| stress.is_finite())
        .max_by(Real::total_cmp)
}
