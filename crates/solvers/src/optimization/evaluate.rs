use rayon::prelude::*;
use thiserror::Error;

use haru_core::{Candidate, Objective};

/// How the candidates of a population are evaluated.
///
/// Objectives are pure, so candidates may be evaluated in any order. Both
/// modes return fitness values in population order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Evaluation {
    /// Evaluate candidates one after another on the calling thread.
    #[default]
    Sequential,

    /// Fan candidates out over the rayon thread pool and join before returning.
    Parallel,
}

/// Errors that can occur when evaluating a single candidate.
#[derive(Debug, Error)]
pub enum EvalError<E> {
    /// The objective returned an error.
    #[error("objective failed")]
    Objective(#[source] E),

    /// The objective returned `NaN`, which cannot be ranked.
    #[error("objective returned NaN")]
    NotANumber,
}

/// A failed evaluation, tagged with the index of the offending candidate.
#[derive(Debug, Error)]
#[error("evaluation of candidate {index} failed")]
pub struct CandidateError<E> {
    /// Index of the candidate within its population.
    pub index: usize,

    /// Why the evaluation failed.
    #[source]
    pub error: EvalError<E>,
}

/// Evaluates the objective at `x`, rejecting `NaN` results.
///
/// # Errors
///
/// Returns an error if the objective fails or returns `NaN`.
pub fn evaluate<O: Objective>(objective: &O, x: &[f64]) -> Result<f64, EvalError<O::Error>> {
    let value = objective.evaluate(x).map_err(EvalError::Objective)?;
    if value.is_nan() {
        return Err(EvalError::NotANumber);
    }
    Ok(value)
}

/// Evaluates every candidate of a population.
///
/// The returned fitness vector has the same length as `population`, and
/// `fitness[i]` is the objective value of `population[i]`.
///
/// # Errors
///
/// Returns the failure of the lowest-indexed candidate that could not be
/// evaluated. In parallel mode every candidate is still evaluated before the
/// failure is reported.
pub fn evaluate_population<O>(
    objective: &O,
    population: &[Candidate],
    mode: Evaluation,
) -> Result<Vec<f64>, CandidateError<O::Error>>
where
    O: Objective + Sync,
{
    let tag = |(index, result): (usize, Result<f64, EvalError<O::Error>>)| {
        result.map_err(|error| CandidateError { index, error })
    };

    match mode {
        Evaluation::Sequential => population
            .iter()
            .map(|x| evaluate(objective, x))
            .enumerate()
            .map(tag)
            .collect(),
        Evaluation::Parallel => {
            let results: Vec<_> = population
                .par_iter()
                .map(|x| evaluate(objective, x))
                .collect();
            results.into_iter().enumerate().map(tag).collect()
        }
    }
}
