pub(crate) mod lowpass;
pub(crate) mod smoothing_window;

use crate::{
    Real,
    datatype::{Temporal, TracePoint},
};
pub(crate) use lowpass::ZeroPhaseLowPass;
pub(crate) use smoothing_window::SmoothingWindow;

/// A stateful, length-preserving filter over a trace. `push` reports
/// whether the window has warmed up; until then `output` is `None` and the
/// iterator substitutes NaN, so each input sample maps to exactly one
/// output sample.
pub(crate) trait Window: Clone {
    type TimeType: Temporal;
    type InputType: Copy;

    fn push(&mut self, value: Self::InputType) -> bool;
    fn output(&self) -> Option<Real>;
}

#[derive(Clone)]
pub(crate) struct WindowIter<I, W>
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window,
{
    window_function: W,
    source: I,
}

impl<I, W> WindowIter<I, W>
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window,
{
    pub(crate) fn new(source: I, window_function: W) -> Self {
        WindowIter {
            source,
            window_function,
        }
    }
}

impl<I, W> Iterator for WindowIter<I, W>
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window<
            TimeType = <I::Item as TracePoint>::Time,
            InputType = <I::Item as TracePoint>::Value,
        >,
{
    type Item = (W::TimeType, Real);

    fn next(&mut self) -> Option<Self::Item> {
        let point = self.source.next()?;
        self.window_function.push(point.get_value());
        Some((
            point.get_time(),
            self.window_function.output().unwrap_or(Real::NAN),
        ))
    }
}

pub(crate) trait WindowFilter<I, W>
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window,
{
    fn window(self, window: W) -> WindowIter<I, W>;
}

impl<I, W> WindowFilter<I, W> for I
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window,
{
    fn window(self, window: W) -> WindowIter<I, W> {
        WindowIter::<I, W>::new(self, window)
    }
}

/// Trailing moving average of a plain series; the first `window - 1`
/// entries come out NaN.
pub(crate) fn smooth_series(values: &[Real], window: usize) -> Vec<Real> {
    values
        .iter()
        .copied()
        .enumerate()
        .window(SmoothingWindow::new(window))
        .map(|(_, value)| value)
        .collect()
}
