use super::Detector;
use crate::Real;
use std::marker::PhantomData;

pub(crate) trait ThresholdClass: Default + Clone {
    fn test(value: Real, threshold: Real) -> bool;
}

/// Crossing test for the geometry-predicted arrivals: fires once the
/// scanned value (the record's own time axis) exceeds the threshold.
#[derive(Default, Clone)]
pub(crate) struct UpperThreshold {}
impl ThresholdClass for UpperThreshold {
    fn test(value: Real, threshold: Real) -> bool {
        value > threshold
    }
}

/// Crossing test for the incident pulse: the noise floor is exceeded in
/// either direction. NaN samples never fire.
#[derive(Default, Clone)]
pub(crate) struct AbsoluteThreshold {}
impl ThresholdClass for AbsoluteThreshold {
    fn test(value: Real, threshold: Real) -> bool {
        value.abs() > threshold
    }
}

/// Emits the sample index of every threshold crossing; the first emitted
/// event is the pulse onset.
#[derive(Default, Clone)]
pub(crate) struct ThresholdDetector<Class: ThresholdClass> {
    threshold: Real,
    phantom: PhantomData<Class>,
}

impl<Class: ThresholdClass> ThresholdDetector<Class> {
    pub(crate) fn new(threshold: Real) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }
}

impl<Class: ThresholdClass> Detector for ThresholdDetector<Class> {
    type TracePointType = (usize, Real);
    type EventPointType = usize;

    fn signal(&mut self, time: usize, value: Real) -> Option<usize> {
        Class::test(value, self.threshold).then_some(time)
    }
}
