//! Covariance matrix adaptation evolution strategy.
//!
//! # Algorithm
//!
//! The engine keeps a multivariate normal search distribution with mean `m`,
//! step size `σ` and covariance `C = B·D²·Bᵀ`. Each generation it samples
//! `λ` candidates `x = m + σ·B·(D ∘ z)` with `z ~ N(0, I)`, ranks them by
//! fitness and moves the mean toward a weighted average of the best `μ`.
//!
//! Step size follows cumulative step-size adaptation: it grows when recent
//! steps are correlated and shrinks when they cancel. The covariance learns
//! from the evolution path (rank-one update) and from the selected steps
//! themselves (rank-μ update).
//!
//! # Termination
//!
//! By default the engine runs the configured number of generations. With a
//! tolerance set, it also reports convergence once the best objective has
//! settled within that tolerance over its recent history.
//!
//! # Maximization
//!
//! [`maximize`] minimizes the negated objective. Observers therefore see
//! negated fitness values, while the returned [`Solution`] is reported in
//! the caller's original sign.

mod config;
mod engine;
mod error;
mod params;
mod state;


pub use config::{Config, ConfigError, default_population_size};
pub use engine::Cmaes;
pub use error::Error;
pub use params::Params;

use haru_core::{Objective, Observer};

use crate::optimization::{
    Negate,
    ask_tell::{self, Action, Event, Solution},
};

/// Finds a minimum of `objective` with CMA-ES.
///
/// The observer receives an [`Event`] after each generation.
///
/// # Errors
///
/// Returns an error if the config cannot drive a run, the objective fails
/// for any candidate, or the engine degenerates.
pub fn minimize<O, Obs>(
    objective: &O,
    config: &Config,
    observer: Obs,
) -> Result<Solution, ask_tell::Error>
where
    O: Objective + Sync,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let driver = config.driver_config()?;
    let mut engine = Cmaes::new(config);
    ask_tell::run(&mut engine, objective, &driver, observer)
}

/// Finds a minimum of `objective` with CMA-ES, without observation.
///
/// # Errors
///
/// See [`minimize`].
pub fn minimize_unobserved<O>(objective: &O, config: &Config) -> Result<Solution, ask_tell::Error>
where
    O: Objective + Sync,
{
    minimize(objective, config, ())
}

/// Finds a maximum of `objective` with CMA-ES.
///
/// Events carry the negated objective values that the engine minimizes.
///
/// # Errors
///
/// See [`minimize`].
pub fn maximize<O, Obs>(
    objective: &O,
    config: &Config,
    observer: Obs,
) -> Result<Solution, ask_tell::Error>
where
    O: Objective + Sync,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let mut solution = minimize(&Negate(objective), config, observer)?;
    solution.objective = -solution.objective;
    for value in &mut solution.history {
        *value = -*value;
    }
    Ok(solution)
}

/// Finds a maximum of `objective` with CMA-ES, without observation.
///
/// # Errors
///
/// See [`minimize`].
pub fn maximize_unobserved<O>(objective: &O, config: &Config) -> Result<Solution, ask_tell::Error>
where
    O: Objective + Sync,
{
    maximize(objective, config, ())
}
