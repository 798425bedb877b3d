use crate::error::Result;
use tracing::{debug, warn};

/// Anything that improves by repeated iterations.
pub trait Trainer {
    /// One iteration; returns how far the estimates moved.
    fn train(&mut self) -> Result<f64>;
}

/// Runs a fixed number of iterations.
pub struct FixedIterationTrainer<'a, T: ?Sized> {
    trainer: &'a mut T,
    iterations: usize,
}

impl<'a, T: Trainer + ?Sized> FixedIterationTrainer<'a, T> {
    pub fn new(trainer: &'a mut T, iterations: usize) -> Self {
        Self {
            trainer,
            iterations,
        }
    }

    /// Mean delta over all iterations.
    pub fn train(&mut self) -> Result<f64> {
        let mut sum = 0.;
        for _ in 0..self.iterations {
            sum += self.trainer.train()?;
        }

        Ok(if self.iterations == 0 {
            0.
        } else {
            sum / self.iterations as f64
        })
    }
}

/// Runs until an iteration moves less than `threshold`, or until
/// `max_iterations` when given.
pub struct ThresholdTrainer<'a, T: ?Sized> {
    trainer: &'a mut T,
    threshold: f64,
    max_iterations: Option<usize>,
}

impl<'a, T: Trainer + ?Sized> ThresholdTrainer<'a, T> {
    pub fn new(trainer: &'a mut T, threshold: f64, max_iterations: Option<usize>) -> Self {
        Self {
            trainer,
            threshold,
            max_iterations,
        }
    }

    /// Returns (converged, iterations run). Hitting the cap is not an error.
    pub fn train(&mut self) -> Result<(bool, usize)> {
        let mut iterations = 0;
        loop {
            if self.max_iterations.is_some_and(|m| iterations >= m) {
                warn!(
                    iterations,
                    threshold = self.threshold,
                    "Stopped before reaching the convergence threshold"
                );
                return Ok((false, iterations));
            }

            let delta = self.trainer.train()?;
            iterations += 1;
            debug!(iterations, delta, "Trainer iteration");

            if delta < self.threshold {
                return Ok((true, iterations));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::*;

    /// Halves its delta every iteration.
    struct Halving {
        delta: f64,
        calls: usize,
    }

    impl Trainer for Halving {
        fn train(&mut self) -> Result<f64> {
            self.calls += 1;
            self.delta /= 2.;
            Ok(self.delta)
        }
    }

    #[test]
    fn fixed_iterations_average_deltas() {
        let t = &mut Halving { delta: 8., calls: 0 };

        let mean = FixedIterationTrainer::new(t, 3).train().unwrap();
        assert_eq!(t.calls, 3);
        assert_float_eq!(mean, (4. + 2. + 1.) / 3., abs <= 1e-12);
    }

    #[test]
    fn threshold_stops_when_delta_is_small() {
        let t = &mut Halving { delta: 1., calls: 0 };

        let ret = ThresholdTrainer::new(t, 0.1, None).train().unwrap();
        assert_eq!(ret, (true, 4));
    }

    #[test]
    fn threshold_reports_cap() {
        let t = &mut Halving { delta: 1., calls: 0 };

        let ret = ThresholdTrainer::new(t, 1e-9, Some(5)).train().unwrap();
        assert_eq!(ret, (false, 5));
        assert_eq!(t.calls, 5);
    }
}
