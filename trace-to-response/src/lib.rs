//! This crate reduces raw two-channel Split-Hopkinson Pressure Bar records
//! into the mechanical response of the tested specimen.
//!
//! A raw record takes the form of `(time, voltage, voltage)` samples on a
//! uniform grid. Typical usage looks like:
//! ```ignore
//! let parameters = SetupParameters::from_map(&setup_map)?;
//! let response = process(&record, &parameters)?;
//! println!("strain rate {} 1/s", response.strain_rate);
//! ```
//! The reduction runs six stages in order: signal conditioning, pulse onset
//! detection, pulse synchronisation, mechanics derivation, unload truncation
//! and the true stress/strain conversion. Each stage consumes the previous
//! stage's record and the static setup parameters; nothing is shared between
//! specimens, so batches parallelise with [`process_batch`].

pub(crate) mod datatype;
pub(crate) mod detectors;
pub(crate) mod window;

mod conditioning;
mod error;
mod mechanics;
mod onset;
mod parameters;
mod processing;
mod record;
mod synchronize;
mod true_response;
mod unload;

pub use error::{ReductionError, ReductionResult};
pub use parameters::{ConfigurationError, Polarity, SetupParameters, SmoothingMode, StressFormula};
pub use processing::{Specimen, SpecimenResponse, process, process_batch};
pub use record::{
    ConditionedSignal, MechanicalRecord, PulseLabel, PulseWindow, RawChannelRecord, SourceChannel,
    SynchronizedPulseRecord, TrueResponseRecord,
};

pub(crate) use shpb_common::Real;
