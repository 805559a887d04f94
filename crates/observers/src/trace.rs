use haru_core::Observer;
use tracing::info;

use crate::traits::{HasGeneration, HasObjective};

/// Logs the best-so-far objective through `tracing` every few generations.
///
/// Never requests an action.
#[derive(Debug, Clone, Copy)]
pub struct TraceObserver {
    every: usize,
}

impl TraceObserver {
    /// Creates an observer that logs every `every`-th generation.
    ///
    /// An interval of zero is treated as one.
    #[must_use]
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }

    /// Returns `true` if `generation` falls on the logging cadence.
    #[must_use]
    pub fn logs(&self, generation: usize) -> bool {
        generation % self.every == 0
    }
}

impl Default for TraceObserver {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<E, A> Observer<E, A> for TraceObserver
where
    E: HasGeneration + HasObjective,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        let generation = event.generation();
        if self.logs(generation) {
            info!(generation, best = event.objective(), "generation complete");
        }
        None
    }
}
