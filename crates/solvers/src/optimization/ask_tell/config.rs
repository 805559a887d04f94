use thiserror::Error;

use crate::optimization::Evaluation;

/// Configuration for the ask/tell driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    dimension: usize,
    population_size: usize,
    generations: usize,
    evaluation: Evaluation,
}

/// Errors that can occur when validating a driver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("dimension must be positive")]
    Dimension,

    #[error("population_size must be positive")]
    PopulationSize,

    #[error("generations must be positive")]
    Generations,
}

impl Default for Config {
    /// Two variables, ten candidates per generation, and 100 generations.
    fn default() -> Self {
        Self {
            dimension: 2,
            population_size: 10,
            generations: 100,
            evaluation: Evaluation::Sequential,
        }
    }
}

impl Config {
    /// Creates a new config with sequential evaluation.
    ///
    /// # Errors
    ///
    /// Returns an error if `dimension`, `population_size`, or `generations`
    /// is zero. At least one generation is required to produce a best result.
    pub fn new(
        dimension: usize,
        population_size: usize,
        generations: usize,
    ) -> Result<Self, ConfigError> {
        if dimension == 0 {
            return Err(ConfigError::Dimension);
        }
        if population_size == 0 {
            return Err(ConfigError::PopulationSize);
        }
        if generations == 0 {
            return Err(ConfigError::Generations);
        }

        Ok(Self {
            dimension,
            population_size,
            generations,
            evaluation: Evaluation::Sequential,
        })
    }

    /// Sets how each population is evaluated.
    #[must_use]
    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Returns the expected length of every candidate.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the expected number of candidates per population.
    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Returns the number of ask/evaluate/tell cycles to run.
    #[must_use]
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Returns the evaluation mode.
    #[must_use]
    pub fn evaluation(&self) -> Evaluation {
        self.evaluation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_values() {
        assert_eq!(Config::new(0, 10, 100), Err(ConfigError::Dimension));
        assert_eq!(Config::new(2, 0, 100), Err(ConfigError::PopulationSize));
        assert_eq!(Config::new(2, 10, 0), Err(ConfigError::Generations));
    }

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        let rebuilt = Config::new(
            config.dimension(),
            config.population_size(),
            config.generations(),
        );

        assert_eq!(rebuilt, Ok(config));
        assert_eq!(config.evaluation(), Evaluation::Sequential);
    }

    #[test]
    fn accepts_single_candidate_populations() {
        let config = Config::new(3, 1, 1).unwrap();

        assert_eq!(config.population_size(), 1);
        assert_eq!(config.evaluation(), Evaluation::Sequential);
    }

    #[test]
    fn evaluation_mode_is_settable() {
        let config = Config::new(2, 10, 5)
            .unwrap()
            .with_evaluation(Evaluation::Parallel);

        assert_eq!(config.evaluation(), Evaluation::Parallel);
        assert_eq!(config.generations(), 5);
    }
}
