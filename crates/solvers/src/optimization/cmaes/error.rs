use thiserror::Error;

/// Errors that can occur when telling a CMA-ES engine.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("expected a population of {expected}, got {actual}")]
    PopulationLength { expected: usize, actual: usize },

    #[error("expected {expected} fitness values, got {actual}")]
    FitnessLength { expected: usize, actual: usize },

    #[error("candidate {index} has dimension {actual}, expected {expected}")]
    Dimension {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("fitness of candidate {index} is NaN")]
    NotANumber { index: usize },

    #[error("covariance matrix is no longer finite and positive definite")]
    Degenerate,
}
