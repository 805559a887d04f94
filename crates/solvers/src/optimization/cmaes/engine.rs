use nalgebra::DVector;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;

use haru_core::{Candidate, Point, Population, Strategy};

use super::{Config, Error, Params, state::STAGNATION_WINDOW, state::State};

/// A CMA-ES strategy engine.
///
/// The engine owns its search distribution and random number generator.
/// Drive it with [`ask_tell::run`](crate::optimization::ask_tell::run), or
/// use the [`minimize`](super::minimize) and [`maximize`](super::maximize)
/// entry points which build one from a [`Config`].
#[derive(Debug, Clone)]
pub struct Cmaes<R = StdRng> {
    params: Params,
    state: State,
    only_diag: bool,
    tol: Option<f64>,
    rng: R,
}

impl Cmaes<StdRng> {
    /// Creates an engine seeded from `config.seed()`, or from OS entropy when
    /// no seed is set.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Cmaes<R> {
    /// Creates an engine that draws its samples from `rng`.
    ///
    /// The seed in `config` is ignored.
    pub fn with_rng(config: &Config, rng: R) -> Self {
        Self {
            params: Params::new(config.dimension(), config.population_size()),
            state: State::new(config.initial_point(), config.sigma()),
            only_diag: config.only_diag(),
            tol: config.tol(),
            rng,
        }
    }

    /// Returns the number of completed generations.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.state.generation
    }

    /// Returns the current step size.
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.state.sigma
    }

    /// Returns the current mean of the search distribution.
    #[must_use]
    pub fn mean(&self) -> &[f64] {
        self.state.mean.as_slice()
    }

    /// Returns the strategy constants.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    fn validate(&self, population: &[Candidate], fitness: &[f64]) -> Result<(), Error> {
        let lambda = self.params.lambda;
        let dimension = self.params.dimension;

        if population.len() != lambda {
            return Err(Error::PopulationLength {
                expected: lambda,
                actual: population.len(),
            });
        }
        if fitness.len() != lambda {
            return Err(Error::FitnessLength {
                expected: lambda,
                actual: fitness.len(),
            });
        }
        if let Some((index, x)) = population
            .iter()
            .enumerate()
            .find(|(_, x)| x.len() != dimension)
        {
            return Err(Error::Dimension {
                index,
                expected: dimension,
                actual: x.len(),
            });
        }
        if let Some(index) = fitness.iter().position(|f| f.is_nan()) {
            return Err(Error::NotANumber { index });
        }
        Ok(())
    }
}

impl<R: Rng> Strategy for Cmaes<R> {
    type Error = Error;

    fn ask(&mut self) -> Result<Population, Self::Error> {
        let n = self.params.dimension;
        let population = (0..self.params.lambda)
            .map(|_| {
                let z = DVector::from_fn(n, |_, _| self.rng.sample::<f64, _>(StandardNormal));
                self.state.sample(&z).as_slice().to_vec()
            })
            .collect();
        Ok(population)
    }

    fn tell(&mut self, population: &[Candidate], fitness: &[f64]) -> Result<(), Self::Error> {
        self.validate(population, fitness)?;

        let mut order: Vec<usize> = (0..fitness.len()).collect();
        order.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));

        let leader = Point::new(population[order[0]].clone(), fitness[order[0]]);
        self.state.record_best(leader);

        let steps: Vec<DVector<f64>> = order
            .iter()
            .take(self.params.mu)
            .map(|&i| {
                (DVector::from_column_slice(&population[i]) - &self.state.mean) / self.state.sigma
            })
            .collect();

        self.state.update(&self.params, &steps, self.only_diag)
    }

    fn best(&self) -> Option<&Point> {
        self.state.best.as_ref()
    }

    /// Stops once the best objective has not moved by more than `tol` over
    /// the last generations. Never stops when no tolerance is configured.
    fn should_stop(&self) -> bool {
        let (Some(tol), Some(best)) = (self.tol, self.state.best.as_ref()) else {
            return false;
        };
        let window = &self.state.recent_best;
        if window.len() < STAGNATION_WINDOW {
            return false;
        }

        #[allow(clippy::cast_precision_loss)]
        let mean = window.iter().sum::<f64>() / window.len() as f64;
        (mean - best.objective).abs() < tol
    }
}
