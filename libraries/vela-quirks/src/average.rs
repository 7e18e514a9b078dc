//! Fixed-window moving average
//!
//! Damps oscillation in reported buffering percentages caused by bursty
//! hardware byte counters. Pure smoothing, no control-loop semantics.

/// Moving average over a fixed-length window of recent samples
///
/// The window always holds exactly `length` samples; slots start zeroed, so
/// early averages are padded with the reset value until enough real samples
/// arrive.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    values: Vec<u32>,
}

impl MovingAverage {
    /// Create a window of `length` slots, all zeroed
    ///
    /// A zero length is treated as one slot.
    pub fn new(length: usize) -> Self {
        Self {
            values: vec![0; length.max(1)],
        }
    }

    /// Overwrite every slot with `value`, discarding all history
    pub fn reset(&mut self, value: u32) {
        self.values.fill(value);
    }

    /// Push a sample, dropping the oldest, and return the window mean
    ///
    /// Integer mean over exactly the window length; the accumulator is wide
    /// enough that the sum cannot overflow.
    pub fn accumulate(&mut self, value: u32) -> u32 {
        let last = self.values.len() - 1;
        self.values.rotate_left(1);
        self.values[last] = value;

        let sum: u64 = self.values.iter().map(|&v| u64::from(v)).sum();
        (sum / self.values.len() as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_window_pads_with_zeros() {
        let mut average = MovingAverage::new(10);
        assert_eq!(average.accumulate(70), 7);
    }

    #[test]
    fn reset_then_accumulate_same_value_is_identity() {
        let mut average = MovingAverage::new(10);
        average.reset(55);
        assert_eq!(average.accumulate(55), 55);
    }

    #[test]
    fn constant_input_converges_to_input() {
        let mut average = MovingAverage::new(10);
        let mut result = 0;
        for _ in 0..10 {
            result = average.accumulate(80);
        }
        assert_eq!(result, 80);
    }

    #[test]
    fn oldest_sample_is_dropped() {
        let mut average = MovingAverage::new(2);
        average.accumulate(10);
        average.accumulate(20);
        // Window is now [20, 30]; the 10 is gone
        assert_eq!(average.accumulate(30), 25);
    }

    #[test]
    fn zero_length_behaves_as_single_slot() {
        let mut average = MovingAverage::new(0);
        assert_eq!(average.accumulate(42), 42);
    }

    #[test]
    fn large_values_do_not_overflow() {
        let mut average = MovingAverage::new(10);
        average.reset(u32::MAX);
        assert_eq!(average.accumulate(u32::MAX), u32::MAX);
    }
}
