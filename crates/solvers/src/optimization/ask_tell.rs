//! Ask/tell driver for black-box strategy engines.
//!
//! # Algorithm
//!
//! The driver runs a fixed number of generations. Each generation:
//!
//! 1. **Ask** the [`Strategy`] for a population and check its shape against
//!    the [`Config`].
//! 2. **Evaluate** the [`Objective`] at every candidate, sequentially or in
//!    parallel. Fitness values always come back in population order.
//! 3. **Tell** the strategy the population and its fitness.
//!
//! The driver never inspects the strategy's internal state. After the last
//! generation it reads the strategy's best point and reports it.
//!
//! # Ordering
//!
//! Ask for generation `k + 1` is never issued before Tell for generation `k`
//! returned, and Tell is never issued with a partial fitness vector. Only the
//! evaluation step runs concurrently.
//!
//! # Observer Events
//!
//! The driver emits one [`Event`] per completed generation, after Tell.
//! Observers can return [`Action::StopEarly`] to end the run before the next
//! Ask. This is the only cancellation point; a generation in progress always
//! finishes or fails as a whole.
//!
//! # Errors
//!
//! Objective failures, contract violations and strategy failures abort the
//! run. None are retried, because the strategy state has already moved on.
//! The caller still owns the strategy and can query
//! [`Strategy::best`] for the progress made before the failure.

mod action;
mod config;
mod contract;
mod error;
mod event;
mod solution;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use contract::ContractViolation;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use haru_core::{Objective, Observer, Strategy};
use tracing::{debug, instrument, warn};

use crate::optimization::evaluate_population;

use contract::check_population;

/// Runs the ask/evaluate/tell loop against `strategy`.
///
/// The observer receives an [`Event`] after each generation.
/// See the [module docs](self) for details on ordering and observer actions.
///
/// # Errors
///
/// Returns an error if the strategy fails, returns a population that does not
/// match `config`, or the objective fails for any candidate.
#[instrument(
    level = "debug",
    skip_all,
    fields(
        dimension = config.dimension(),
        population_size = config.population_size(),
        generations = config.generations(),
    )
)]
pub fn run<S, O, Obs>(
    strategy: &mut S,
    objective: &O,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    S: Strategy,
    O: Objective + Sync,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    drive(strategy, objective, config, observer)
        .inspect_err(|err| warn!(error = %err, "ask/tell run aborted"))
}

/// Runs the ask/evaluate/tell loop without observer support.
///
/// This is a convenience wrapper around [`run`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if the strategy fails, returns a population that does not
/// match `config`, or the objective fails for any candidate.
pub fn run_unobserved<S, O>(
    strategy: &mut S,
    objective: &O,
    config: &Config,
) -> Result<Solution, Error>
where
    S: Strategy,
    O: Objective + Sync,
{
    run(strategy, objective, config, ())
}

fn drive<S, O, Obs>(
    strategy: &mut S,
    objective: &O,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    S: Strategy,
    O: Objective + Sync,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let mut history = Vec::with_capacity(config.generations());
    let mut evaluations = 0;

    for generation in 1..=config.generations() {
        let population = strategy
            .ask()
            .map_err(|err| Error::strategy(generation, err))?;
        check_population(&population, config).map_err(|violation| Error::EngineContract {
            generation,
            violation,
        })?;

        let fitness = evaluate_population(objective, &population, config.evaluation())
            .map_err(|err| Error::Objective {
                generation,
                index: err.index,
                source: Box::new(err.error),
            })?;
        evaluations += population.len();

        strategy
            .tell(&population, &fitness)
            .map_err(|err| Error::strategy(generation, err))?;

        let Some(best) = strategy.best() else {
            return Err(Error::EngineContract {
                generation,
                violation: ContractViolation::MissingBest,
            });
        };
        history.push(best.objective);
        debug!(generation, best = best.objective, "generation told");

        let event = Event {
            generation,
            population: &population,
            fitness: &fitness,
            best,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            debug!(generation, "stopped by observer");
            return Ok(Solution::new(
                Status::StoppedByObserver,
                best,
                generation,
                evaluations,
                history,
            ));
        }

        if strategy.should_stop() {
            debug!(generation, "strategy converged");
            return Ok(Solution::new(
                Status::Converged,
                best,
                generation,
                evaluations,
                history,
            ));
        }
    }

    // Config guarantees at least one generation, so a best point exists.
    let Some(best) = strategy.best() else {
        return Err(Error::EngineContract {
            generation: config.generations(),
            violation: ContractViolation::MissingBest,
        });
    };

    Ok(Solution::new(
        Status::Complete,
        best,
        config.generations(),
        evaluations,
        history,
    ))
}
