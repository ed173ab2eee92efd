use crate::record::MechanicalRecord;
use tracing::debug;

/// Truncates the record at the onset of specimen unloading.
///
/// The tangent modulus collapses and goes most negative when the specimen
/// unloads or fails, so the global minimum of its smoothed series marks the
/// end of usable loading data; everything from that sample on is dropped.
/// A record whose tangent series holds no finite sample is returned
/// unchanged rather than rejected.
pub(crate) fn truncate_at_unload(mut record: MechanicalRecord) -> MechanicalRecord {
    let minimum = record
        .tangent_modulus
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, modulus)| modulus.is_finite())
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(index, _)| index);

    match minimum {
        Some(unload) => {
            debug!(unload, len = record.len(), "unload point found");
            record.truncate(unload);
            record
        }
        None => record,
    }
}
