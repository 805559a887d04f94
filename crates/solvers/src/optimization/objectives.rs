//! Benchmark objectives for exercising strategy engines.
//!
//! All of these are infallible and safe to evaluate in parallel.

use std::{convert::Infallible, f64::consts::PI};

use haru_core::Objective;

/// Sum of squares, minimized at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sphere;

impl Objective for Sphere {
    type Error = Infallible;

    fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
        Ok(x.iter().map(|v| v * v).sum())
    }
}

/// Population standard deviation of the coordinates.
///
/// Minimized, with value zero, wherever all coordinates are equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDev;

impl Objective for StdDev {
    type Error = Infallible;

    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
        if x.is_empty() {
            return Ok(0.0);
        }
        let n = x.len() as f64;
        let mean = x.iter().sum::<f64>() / n;
        let variance = x.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Ok(variance.sqrt())
    }
}

/// The Rastrigin function, highly multimodal with its global minimum at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rastrigin;

impl Objective for Rastrigin {
    type Error = Infallible;

    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
        let a = 10.0;
        let sum: f64 = x.iter().map(|v| v * v - a * (2.0 * PI * v).cos()).sum();
        Ok(a * x.len() as f64 + sum)
    }
}

/// The Rosenbrock valley, minimized at `(1, 1, ..., 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rosenbrock;

impl Objective for Rosenbrock {
    type Error = Infallible;

    fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
        let value: f64 = x
            .windows(2)
            .map(|w| {
                let (a, b) = (w[0], w[1]);
                100.0 * (b - a * a).powi(2) + (1.0 - a).powi(2)
            })
            .sum();
        Ok(value)
    }
}

/// Distance to `target` minus a steeper quadratic penalty, summed over coordinates.
///
/// Each term `|x - t| - ((x - t)² + x/5)` is maximized at `x = t - 0.6`, where
/// it equals `0.36 - t/5`. Unbounded below, so only maximization makes sense.
#[derive(Debug, Clone, Copy)]
pub struct PenalizedTarget {
    pub target: f64,
}

impl Objective for PenalizedTarget {
    type Error = Infallible;

    fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
        let t = self.target;
        let value: f64 = x
            .iter()
            .map(|v| (v - t).abs() - ((v - t).powi(2) + v / 5.0))
            .sum();
        Ok(value)
    }
}

/// An inverted paraboloid `peak - Σx²`, maximized at the origin.
#[derive(Debug, Clone, Copy)]
pub struct Paraboloid {
    pub peak: f64,
}

impl Objective for Paraboloid {
    type Error = Infallible;

    fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
        Ok(self.peak - x.iter().map(|v| v * v).sum::<f64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn minima_are_where_expected() {
        assert_relative_eq!(Sphere.evaluate(&[0.0, 0.0, 0.0]).unwrap(), 0.0);
        assert_relative_eq!(StdDev.evaluate(&[4.2, 4.2]).unwrap(), 0.0);
        assert_relative_eq!(Rastrigin.evaluate(&[0.0, 0.0]).unwrap(), 0.0);
        assert_relative_eq!(Rosenbrock.evaluate(&[1.0, 1.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn values_away_from_minimum() {
        assert_relative_eq!(Sphere.evaluate(&[3.0, 4.0]).unwrap(), 25.0);
        let spread = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(StdDev.evaluate(&spread).unwrap(), 2.0);
        assert_relative_eq!(Rastrigin.evaluate(&[1.0]).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(Rosenbrock.evaluate(&[0.0, 0.0]).unwrap(), 1.0);
    }

    #[test]
    fn paraboloid_peaks_at_origin() {
        let paraboloid = Paraboloid { peak: 7.5 };

        assert_relative_eq!(paraboloid.evaluate(&[0.0, 0.0]).unwrap(), 7.5);
        assert_relative_eq!(paraboloid.evaluate(&[1.0, -2.0]).unwrap(), 2.5);
    }

    #[test]
    fn penalized_target_peaks_left_of_target() {
        let objective = PenalizedTarget { target: 1.0 };

        let peak = objective.evaluate(&[0.4, 0.4]).unwrap();
        let at_target = objective.evaluate(&[1.0]).unwrap();

        assert_relative_eq!(peak, 0.32, epsilon = 1e-12);
        assert_relative_eq!(at_target, -0.2, epsilon = 1e-12);
        assert!(objective.evaluate(&[0.3]).unwrap() < 0.16);
        assert!(objective.evaluate(&[0.5]).unwrap() < 0.16);
    }

    #[test]
    fn empty_input_is_zero() {
        assert_relative_eq!(StdDev.evaluate(&[]).unwrap(), 0.0);
        assert_relative_eq!(Sphere.evaluate(&[]).unwrap(), 0.0);
    }
}
