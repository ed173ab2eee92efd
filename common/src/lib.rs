pub mod tracer;

/// Scalar type for every series in the reduction pipeline.
pub type Real = f64;

/// Record time in microseconds, relative to the first sample.
pub type Micros = f64;
/// Raw channel voltage in volts.
pub type Volts = f64;
/// Bar or specimen stress in megapascals.
pub type Megapascals = f64;

// Unit-scaling constants appearing in the documented formulas.
pub const MICROS_PER_SECOND: Real = 1e6;
pub const SECONDS_PER_MICRO: Real = 1e-6;
pub const MILLIVOLTS_PER_VOLT: Real = 1e3;
pub const PASCALS_PER_GIGAPASCAL: Real = 1e9;
pub const GIGAPASCALS_PER_MEGAPASCAL: Real = 1e-3;
pub const MILLIMETRES_PER_METRE: Real = 1e3;
