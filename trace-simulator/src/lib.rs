//! Synthetic two-channel SHPB records for exercising the reduction
//! pipeline without an oscilloscope: pulse shapes placed at
//! geometry-consistent arrival times, optional noise, and the inverted
//! acquisition polarity of the real rig.

pub mod noise;
pub mod pulse;
pub mod scenario;

pub use noise::Noise;
pub use pulse::Pulse;
pub use scenario::ShpbScenario;
