use crate::{Candidate, Point, Population};

/// A black-box ask/tell optimizer.
///
/// A strategy proposes a population with [`ask`](Strategy::ask), receives
/// the fitness of every candidate through [`tell`](Strategy::tell), and
/// keeps a record of the best point it has been told about. How it adapts
/// its search distribution between generations is entirely its own concern;
/// callers never see its internal state.
///
/// # Contract
///
/// - `tell` receives the population from the preceding `ask` together with
///   a fitness slice of the same length, where `fitness[i]` belongs to
///   `population[i]`.
/// - `ask` for the next generation is only called after `tell` returned.
/// - After a successful `tell`, [`best`](Strategy::best) returns `Some`.
pub trait Strategy {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Samples a new population.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the strategy cannot produce a population.
    fn ask(&mut self) -> Result<Population, Self::Error>;

    /// Updates the search state from an evaluated population.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the population or fitness is rejected or
    /// the update fails.
    fn tell(&mut self, population: &[Candidate], fitness: &[f64]) -> Result<(), Self::Error>;

    /// Returns the best point told so far, or `None` before the first `tell`.
    fn best(&self) -> Option<&Point>;

    /// Returns `true` if the strategy considers the search finished.
    ///
    /// The default implementation never stops, leaving the generation budget
    /// to the driver.
    fn should_stop(&self) -> bool {
        false
    }
}
