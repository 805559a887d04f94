use haru_core::Point;

/// Indicates why an ask/tell run finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Ran every configured generation.
    Complete,

    /// The strategy reported that the search is finished.
    Converged,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of an ask/tell run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Final run status.
    pub status: Status,

    /// Best candidate found.
    pub x: Vec<f64>,

    /// Objective value at `x`.
    pub objective: f64,

    /// Number of completed generations.
    pub generations: usize,

    /// Number of objective evaluations.
    pub evaluations: usize,

    /// Best-so-far objective after each generation.
    pub history: Vec<f64>,
}

impl Solution {
    pub(super) fn new(
        status: Status,
        best: &Point,
        generations: usize,
        evaluations: usize,
        history: Vec<f64>,
    ) -> Self {
        Self {
            status,
            x: best.x.clone(),
            objective: best.objective,
            generations,
            evaluations,
            history,
        }
    }

    /// Returns the best point as a [`Point`].
    #[must_use]
    pub fn best(&self) -> Point {
        Point::new(self.x.clone(), self.objective)
    }
}
