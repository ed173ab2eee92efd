use super::Window;
use crate::Real;
use std::collections::VecDeque;

/// A trailing moving-average window, emitted once the window is full.
/// Matches the rolling-mean conditioning of the oscilloscope records: the
/// mean of the last `size` samples, NaN while fewer have been seen.
#[derive(Default, Clone)]
pub(crate) struct SmoothingWindow {
    sum: Real,
    size: usize,
    window: VecDeque<Real>,
}

impl SmoothingWindow {
    pub(crate) fn new(size: usize) -> Self {
        SmoothingWindow {
            size,
            window: VecDeque::with_capacity(size),
            ..Default::default()
        }
    }

    fn is_full(&self) -> bool {
        self.window.len() == self.size
    }
}

impl Window for SmoothingWindow {
    type TimeType = usize;
    type InputType = Real;

    fn push(&mut self, value: Real) -> bool {
        if self.is_full() {
            self.sum -= self.window.pop_front().unwrap_or_default();
        }
        self.sum += value;
        self.window.push_back(value);
        self.is_full()
    }

    fn output(&self) -> Option<Real> {
        self.is_full().then(|| self.sum / self.size as Real)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowFilter;
    use assert_approx_eq::assert_approx_eq;

    fn smoothed(data: &[Real], size: usize) -> Vec<(usize, Real)> {
        data.iter()
            .copied()
            .enumerate()
            .window(SmoothingWindow::new(size))
            .collect()
    }

    #[test]
    fn no_data() {
        assert!(smoothed(&[], 3).is_empty());
    }

    #[test]
    fn output_is_length_preserving() {
        let output = smoothed(&[4.0, 3.0, 2.0, 5.0, 6.0], 3);
        assert_eq!(output.len(), 5);
    }

    #[test]
    fn warm_up_samples_are_nan() {
        let output = smoothed(&[4.0, 3.0, 2.0, 5.0], 3);
        assert!(output[0].1.is_nan());
        assert!(output[1].1.is_nan());
        assert!(output[2].1.is_finite());
        assert!(output[3].1.is_finite());
    }

    #[test]
    fn trailing_means() {
        let output = smoothed(&[4.0, 3.0, 2.0, 5.0, 6.0], 2);
        assert_approx_eq!(output[1].1, 3.5);
        assert_approx_eq!(output[2].1, 2.5);
        assert_approx_eq!(output[3].1, 3.5);
        assert_approx_eq!(output[4].1, 5.5);
    }

    #[test]
    fn window_of_one_is_the_identity() {
        let data = [4.0, 3.0, 2.0];
        let output = smoothed(&data, 1);
        for (sample, (_, mean)) in data.iter().zip(&output) {
            assert_approx_eq!(sample, mean);
        }
    }
}
