//! Software jitter suppression
//!
//! A single physical touch usually leaves a burst of samples within a few
//! pixels of each other. Deduplication keeps the first sample, then keeps a
//! later sample only when it moves more than `delta` pixels on either axis
//! from the most recently *kept* sample. Pressure is ignored.
//!
//! Single pass, order preserving, no hardware access.

use super::TouchSample;

/// Default deduplication distance in pixels
pub const DEFAULT_DEDUPE_DELTA: u32 = 5;

/// Iterator adapter returned by [`dedupe`]
#[derive(Debug, Clone)]
pub struct Dedupe<I> {
    inner: I,
    last_kept: Option<TouchSample>,
    delta: u32,
}

impl<I> Iterator for Dedupe<I>
where
    I: Iterator<Item = TouchSample>,
{
    type Item = TouchSample;

    fn next(&mut self) -> Option<TouchSample> {
        for sample in self.inner.by_ref() {
            let keep = match &self.last_kept {
                Some(reference) => !sample.is_near(reference, self.delta),
                None => true,
            };
            if keep {
                self.last_kept = Some(sample);
                return Some(sample);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.inner.size_hint();
        (0, upper)
    }
}

/// Collapse consecutive near-identical samples
///
/// Empty input yields empty output.
pub fn dedupe<I>(samples: I, delta: u32) -> Dedupe<I::IntoIter>
where
    I: IntoIterator<Item = TouchSample>,
{
    Dedupe {
        inner: samples.into_iter(),
        last_kept: None,
        delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::touch::TouchSamples;
    use proptest::prelude::*;

    fn run(samples: &[TouchSample], delta: u32) -> TouchSamples {
        dedupe(samples.iter().copied(), delta).collect()
    }

    #[test]
    fn test_empty() {
        assert!(run(&[], DEFAULT_DEDUPE_DELTA).is_empty());
    }

    #[test]
    fn test_burst_collapses_to_first() {
        let samples = [
            TouchSample::new(100, 100, 50.0 / 255.0),
            TouchSample::new(102, 101, 60.0 / 255.0),
            TouchSample::new(500, 500, 10.0 / 255.0),
        ];

        let unique = run(&samples, 5);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0], samples[0]);
        assert_eq!(unique[1], samples[2]);
    }

    #[test]
    fn test_compares_against_last_kept() {
        // Each step is 4 px, but the drift from the kept sample grows
        let samples = [
            TouchSample::new(0, 0, 0.5),
            TouchSample::new(4, 0, 0.5),
            TouchSample::new(8, 0, 0.5),
            TouchSample::new(12, 0, 0.5),
        ];

        let unique = run(&samples, 5);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[1].x, 8);
    }

    #[test]
    fn test_single_axis_move_is_kept() {
        let samples = [TouchSample::new(10, 10, 0.1), TouchSample::new(10, 16, 0.1)];
        assert_eq!(run(&samples, 5).len(), 2);
    }

    #[test]
    fn test_exact_delta_is_dropped() {
        let samples = [TouchSample::new(10, 10, 0.1), TouchSample::new(15, 5, 0.1)];
        assert_eq!(run(&samples, 5).len(), 1);
    }

    #[test]
    fn test_zero_delta_drops_only_exact_repeats() {
        let samples = [
            TouchSample::new(1, 1, 0.1),
            TouchSample::new(1, 1, 0.9),
            TouchSample::new(1, 2, 0.1),
            TouchSample::new(1, 2, 0.1),
        ];
        let unique = run(&samples, 0);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].pressure, 0.1);
    }

    fn sample_strategy() -> impl Strategy<Value = TouchSample> {
        (-20i32..260, -20i32..340, 0.0f32..=1.0).prop_map(|(x, y, p)| TouchSample::new(x, y, p))
    }

    proptest! {
        #[test]
        fn dedupe_is_idempotent(
            samples in prop::collection::vec(sample_strategy(), 0..64),
            delta in 0u32..50,
        ) {
            let once = run(&samples, delta);
            let twice = run(&once, delta);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn dedupe_never_grows(
            samples in prop::collection::vec(sample_strategy(), 0..64),
            delta in 0u32..50,
        ) {
            prop_assert!(run(&samples, delta).len() <= samples.len());
        }

        #[test]
        fn dedupe_keeps_first(
            samples in prop::collection::vec(sample_strategy(), 1..64),
            delta in 0u32..50,
        ) {
            prop_assert_eq!(run(&samples, delta)[0], samples[0]);
        }

        #[test]
        fn huge_delta_collapses_everything(
            samples in prop::collection::vec(sample_strategy(), 1..64),
        ) {
            let unique = run(&samples, u32::MAX);
            prop_assert_eq!(unique.len(), 1);
            prop_assert_eq!(unique[0], samples[0]);
        }

        #[test]
        fn consecutive_kept_samples_are_far_apart(
            samples in prop::collection::vec(sample_strategy(), 0..64),
            delta in 0u32..50,
        ) {
            let unique = run(&samples, delta);
            for pair in unique.windows(2) {
                prop_assert!(!pair[1].is_near(&pair[0], delta));
            }
        }
    }
}
