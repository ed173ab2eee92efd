use crate::{
    error::{ReductionError, ReductionResult},
    record::{MechanicalRecord, TrueResponseRecord},
};
use tracing::warn;

/// Converts the truncated engineering history to true stress and strain:
/// `trueStrain = -ln(1 - strain)`, `trueStress = stress · (1 - strain)`.
///
/// The map is undefined from the first sample with `strain >= 1`; such a
/// tail is dropped with a warning rather than passed through as NaN. Only
/// when not a single sample lies in the domain does the stage fail.
pub(crate) fn convert(record: &MechanicalRecord) -> ReductionResult<TrueResponseRecord> {
    let valid = record
        .strain
        .iter()
        .take_while(|strain| **strain < 1.0)
        .count();

    if valid < record.len() {
        let first_invalid = record.strain.get(valid).copied().unwrap_or_default();
        if valid == 0 {
            return Err(ReductionError::InvalidStrainDomain {
                strain: first_invalid,
            });
        }
        warn!(
            dropped = record.len() - valid,
            strain = first_invalid,
            "strain left the true-response domain, dropping tail samples"
        );
    }

    let mut response = TrueResponseRecord::default();
    for (strain, stress) in record.strain.iter().zip(&record.stress).take(valid) {
        response.true_strain.push(-(1.0 - strain).ln());
        response.true_stress.push(stress * (1.0 - strain));
    }
    Ok(response)
}
