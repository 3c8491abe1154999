//! Global time accumulation.

use orrery_core::quantity::PhysicalQuantity;
use orrery_core::traits::TimeSample;
use orrery_core::tree::RuntimeTree;

/// Running total of simulated time, owned by the update thread rather
/// than the tree.
///
/// Each step's delta is summed arithmetically and the unit is taken
/// verbatim from the most recent extraction. If units change between
/// steps the total is still summed without conversion — callers see
/// that behavior on the wire, so it is preserved rather than fixed
/// here.
#[derive(Debug, Default)]
pub(crate) struct TimeAccumulator {
    total: f64,
    unit: String,
}

impl TimeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one step's delta and write the fresh global time node
    /// into the tree root.
    pub fn accumulate(&mut self, sample: TimeSample, tree: &mut RuntimeTree) {
        self.total += sample.delta;
        self.unit = sample.unit;
        tree.set_global_time(PhysicalQuantity::new(self.total, self.unit.clone()));
    }

    #[cfg(test)]
    pub fn total(&self) -> f64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(delta: f64, unit: &str) -> TimeSample {
        TimeSample {
            delta,
            unit: unit.to_string(),
        }
    }

    #[test]
    fn sums_deltas_into_the_time_node() {
        let mut acc = TimeAccumulator::new();
        let mut tree = RuntimeTree::new();
        acc.accumulate(sample(0.1, "ms"), &mut tree);
        acc.accumulate(sample(0.2, "ms"), &mut tree);
        let time = tree.global_time().expect("time node written");
        assert!((time.value - 0.3).abs() < 1e-12);
        assert_eq!(time.unit, "ms");
    }

    #[test]
    fn unit_change_keeps_sum_and_latest_unit() {
        let mut acc = TimeAccumulator::new();
        let mut tree = RuntimeTree::new();
        acc.accumulate(sample(1.0, "ms"), &mut tree);
        acc.accumulate(sample(2.0, "s"), &mut tree);
        let time = tree.global_time().expect("time node written");
        // No conversion: 1 ms + 2 s sums to 3 in the latest unit.
        assert!((time.value - 3.0).abs() < 1e-12);
        assert_eq!(time.unit, "s");
    }

    #[test]
    fn total_is_monotone_for_nonnegative_deltas() {
        let mut acc = TimeAccumulator::new();
        let mut tree = RuntimeTree::new();
        let mut previous = 0.0;
        for delta in [0.0, 0.5, 0.25, 0.0, 1.0] {
            acc.accumulate(sample(delta, "ms"), &mut tree);
            assert!(acc.total() >= previous);
            previous = acc.total();
        }
    }
}
