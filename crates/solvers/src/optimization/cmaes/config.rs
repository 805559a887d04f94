use thiserror::Error;

use crate::optimization::{Evaluation, ask_tell};

/// Configuration for a CMA-ES run.
///
/// Built with [`Config::new`] and refined with the `with_*` methods, each of
/// which validates its argument.
///
/// ```
/// use haru_solvers::optimization::cmaes::Config;
///
/// let config = Config::new(vec![5.0, 5.0], 1.0)
///     .and_then(|c| c.with_population_size(10))
///     .and_then(|c| c.with_generations(100));
///
/// assert!(config.is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    initial_point: Vec<f64>,
    sigma: f64,
    population_size: usize,
    generations: usize,
    tol: Option<f64>,
    only_diag: bool,
    seed: Option<u64>,
    evaluation: Evaluation,
}

/// Errors that can occur when validating a CMA-ES config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("initial_point must be non-empty and finite")]
    InitialPoint,

    #[error("sigma must be finite and positive")]
    Sigma,

    #[error("population_size must be positive")]
    PopulationSize,

    #[error("generations must be positive")]
    Generations,

    #[error("tol must be finite and non-negative")]
    Tolerance,
}

/// Default number of generations.
const DEFAULT_GENERATIONS: usize = 100;

/// Returns the default population size `4 + floor(3 ln n)`.
#[must_use]
pub fn default_population_size(dimension: usize) -> usize {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let extra = (3.0 * (dimension as f64).ln()).floor().max(0.0) as usize;
    4 + extra
}

impl Config {
    /// Creates a config centred on `initial_point` with step size `sigma`.
    ///
    /// The population size defaults to [`default_population_size`] and the
    /// generation budget to 100.
    ///
    /// # Errors
    ///
    /// Returns an error if `initial_point` is empty or contains non-finite
    /// values, or if `sigma` is not finite and positive.
    pub fn new(initial_point: Vec<f64>, sigma: f64) -> Result<Self, ConfigError> {
        if initial_point.is_empty() || initial_point.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::InitialPoint);
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ConfigError::Sigma);
        }

        let population_size = default_population_size(initial_point.len());
        Ok(Self {
            initial_point,
            sigma,
            population_size,
            generations: DEFAULT_GENERATIONS,
            tol: None,
            only_diag: false,
            seed: None,
            evaluation: Evaluation::Sequential,
        })
    }

    /// Sets the number of candidates sampled per generation.
    ///
    /// # Errors
    ///
    /// Returns an error if `population_size` is zero.
    pub fn with_population_size(mut self, population_size: usize) -> Result<Self, ConfigError> {
        if population_size == 0 {
            return Err(ConfigError::PopulationSize);
        }
        self.population_size = population_size;
        Ok(self)
    }

    /// Sets the number of ask/tell generations.
    ///
    /// # Errors
    ///
    /// Returns an error if `generations` is zero.
    pub fn with_generations(mut self, generations: usize) -> Result<Self, ConfigError> {
        if generations == 0 {
            return Err(ConfigError::Generations);
        }
        self.generations = generations;
        Ok(self)
    }

    /// Enables early termination once the best objective stagnates within `tol`.
    ///
    /// # Errors
    ///
    /// Returns an error if `tol` is negative or non-finite.
    pub fn with_tol(mut self, tol: f64) -> Result<Self, ConfigError> {
        if !tol.is_finite() || tol < 0.0 {
            return Err(ConfigError::Tolerance);
        }
        self.tol = Some(tol);
        Ok(self)
    }

    /// Restricts the covariance matrix to its diagonal.
    #[must_use]
    pub fn with_only_diag(mut self, only_diag: bool) -> Self {
        self.only_diag = only_diag;
        self
    }

    /// Seeds the engine's random number generator.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets how each population is evaluated.
    #[must_use]
    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Returns the starting mean of the search distribution.
    #[must_use]
    pub fn initial_point(&self) -> &[f64] {
        &self.initial_point
    }

    /// Returns the number of search variables.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.initial_point.len()
    }

    /// Returns the initial step size.
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Returns the number of candidates per generation.
    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Returns the generation budget.
    #[must_use]
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Returns the stagnation tolerance, if early termination is enabled.
    #[must_use]
    pub fn tol(&self) -> Option<f64> {
        self.tol
    }

    /// Returns `true` if the covariance matrix is kept diagonal.
    #[must_use]
    pub fn only_diag(&self) -> bool {
        self.only_diag
    }

    /// Returns the RNG seed, if one was set.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the evaluation mode.
    #[must_use]
    pub fn evaluation(&self) -> Evaluation {
        self.evaluation
    }

    /// Builds the matching driver config.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver rejects the derived values.
    pub fn driver_config(&self) -> Result<ask_tell::Config, ask_tell::ConfigError> {
        let dimension = self.dimension();
        let config = ask_tell::Config::new(dimension, self.population_size, self.generations)?;
        Ok(config.with_evaluation(self.evaluation))
    }
}
