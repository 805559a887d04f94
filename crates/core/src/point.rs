/// A point in the search space proposed by a strategy engine.
pub type Candidate = Vec<f64>;

/// The batch of candidates proposed by one `ask`.
pub type Population = Vec<Candidate>;

/// A candidate together with its evaluated objective value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The candidate.
    pub x: Candidate,

    /// The objective value at `x`. Lower is better.
    pub objective: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: Candidate, objective: f64) -> Self {
        Self { x, objective }
    }

    /// Returns `true` if this point has a strictly lower objective than `other`.
    ///
    /// `NaN` objectives never improve on anything.
    #[must_use]
    pub fn improves_on(&self, other: &Point) -> bool {
        self.objective < other.objective
    }
}
