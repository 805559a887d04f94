use haru_core::{Candidate, Point};

/// Event emitted by the ask/tell driver after each completed generation.
///
/// The event is emitted after `tell` returned, so `best` already includes
/// this generation's population.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// The generation number, starting at 1.
    pub generation: usize,

    /// The population asked for in this generation.
    pub population: &'a [Candidate],

    /// Fitness values in population order.
    pub fitness: &'a [f64],

    /// The strategy's best point across all generations so far.
    pub best: &'a Point,
}

impl<'a> Event<'a> {
    /// Returns the best candidate of this generation alone, with its fitness.
    #[must_use]
    pub fn generation_best(&self) -> Option<(&'a Candidate, f64)> {
        self.population
            .iter()
            .zip(self.fitness.iter().copied())
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
    }
}
