//! Touch controller trait

use crate::touch::{dedupe, TouchSamples, DEFAULT_DEDUPE_DELTA};

/// Polled touch controller
///
/// Every method performs bus I/O, hence `&mut self`. There is no blocking
/// wait for a touch: when nothing is queued the methods return immediately
/// with `false`, `0`, or an empty set.
pub trait TouchController {
    /// Error type for controller operations
    type Error;

    /// Check whether any samples are queued
    fn is_touched(&mut self) -> Result<bool, Self::Error> {
        Ok(self.touch_count()? > 0)
    }

    /// Number of samples currently queued in hardware
    fn touch_count(&mut self) -> Result<u8, Self::Error>;

    /// Drain queued samples into display-space points, oldest first
    ///
    /// An empty queue is not an error.
    fn touch_points(&mut self) -> Result<TouchSamples, Self::Error>;

    /// Drain, then drop samples within `delta` pixels of the last kept one
    fn unique_touch_points(&mut self, delta: u32) -> Result<TouchSamples, Self::Error> {
        let points = self.touch_points()?;
        Ok(dedupe(points, delta).collect())
    }

    /// [`unique_touch_points`](Self::unique_touch_points) with the default delta
    fn unique_touch_points_default(&mut self) -> Result<TouchSamples, Self::Error> {
        self.unique_touch_points(DEFAULT_DEDUPE_DELTA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::touch::TouchSample;

    /// Replays a canned drain
    struct ReplayController {
        queued: TouchSamples,
    }

    impl TouchController for ReplayController {
        type Error = ();

        fn touch_count(&mut self) -> Result<u8, ()> {
            Ok(self.queued.len() as u8)
        }

        fn touch_points(&mut self) -> Result<TouchSamples, ()> {
            Ok(core::mem::take(&mut self.queued))
        }
    }

    fn controller(points: &[(i32, i32, u8)]) -> ReplayController {
        ReplayController {
            queued: points
                .iter()
                .map(|&(x, y, z)| TouchSample::new(x, y, z as f32 / 255.0))
                .collect(),
        }
    }

    #[test]
    fn test_is_touched_follows_count() {
        let mut idle = controller(&[]);
        assert_eq!(idle.is_touched(), Ok(false));

        let mut busy = controller(&[(1, 1, 1)]);
        assert_eq!(busy.is_touched(), Ok(true));
    }

    #[test]
    fn test_unique_points_scenario() {
        let mut ctrl = controller(&[(100, 100, 50), (102, 101, 60), (500, 500, 10)]);
        let unique = ctrl.unique_touch_points_default().unwrap();

        assert_eq!(unique.len(), 2);
        assert_eq!((unique[0].x, unique[0].y), (100, 100));
        assert_eq!((unique[1].x, unique[1].y), (500, 500));
        assert_eq!(unique[1].pressure, 10.0 / 255.0);
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut ctrl = controller(&[(5, 5, 5)]);
        assert_eq!(ctrl.touch_points().unwrap().len(), 1);
        assert!(ctrl.touch_points().unwrap().is_empty());
        assert!(ctrl.unique_touch_points(5).unwrap().is_empty());
    }
}
