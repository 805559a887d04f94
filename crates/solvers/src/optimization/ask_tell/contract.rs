use thiserror::Error;

use haru_core::Candidate;

use super::Config;

/// Ways a strategy engine can break the ask/tell contract.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("expected a population of {expected}, got {actual}")]
    PopulationSize { expected: usize, actual: usize },

    #[error("candidate {index} has dimension {actual}, expected {expected}")]
    Dimension {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("no best point recorded after tell")]
    MissingBest,
}

/// Checks an asked population against the configured shape.
pub(super) fn check_population(
    population: &[Candidate],
    config: &Config,
) -> Result<(), ContractViolation> {
    if population.len() != config.population_size() {
        return Err(ContractViolation::PopulationSize {
            expected: config.population_size(),
            actual: population.len(),
        });
    }

    let expected = config.dimension();
    match population.iter().position(|x| x.len() != expected) {
        Some(index) => Err(ContractViolation::Dimension {
            index,
            expected,
            actual: population[index].len(),
        }),
        None => Ok(()),
    }
}
