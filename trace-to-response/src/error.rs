use crate::{Real, parameters::ConfigurationError, record::PulseLabel};
use shpb_common::Micros;
use thiserror::Error;

pub type ReductionResult<T> = Result<T, ReductionError>;

/// Terminal failures of the reduction pipeline. Each aborts the affected
/// specimen only; batch processing reports them per specimen.
#[derive(Debug, Error)]
pub enum ReductionError {
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Pre-trigger window [0, {trig_start} us] contains no usable samples")]
    InsufficientPretriggerData { trig_start: Micros },
    #[error("No {0} onset detected within the record")]
    NoOnsetDetected(PulseLabel),
    #[error("Synchronised pulse join produced no common time points")]
    EmptySynchronization,
    #[error("Strain reached {strain} at the first synchronised sample, true response undefined")]
    InvalidStrainDomain { strain: Real },
}
