use crate::Real;
use std::fmt::{Debug, Display};

/// This trait abstracts any type used as a time variable.
pub(crate) trait Temporal: Default + Copy + Debug + Display + PartialEq {}

impl Temporal for usize {}

impl Temporal for Real {}

/// An abstraction of the points processed by the window and detector
/// filters. A point carries a time and a value.
pub(crate) trait TracePoint: Clone {
    /// The type which represents the time of the data point.
    type Time: Temporal;

    /// The type which contains the value of the data point.
    type Value: Copy;

    fn get_time(&self) -> Self::Time;

    fn get_value(&self) -> Self::Value;
}

/// The most basic non-trivial trace point: the first element is the time
/// and the second the value.
impl<X, Y> TracePoint for (X, Y)
where
    X: Temporal,
    Y: Copy + Clone,
{
    type Time = X;
    type Value = Y;

    fn get_time(&self) -> Self::Time {
        self.0
    }

    fn get_value(&self) -> Self::Value {
        self.1
    }
}
