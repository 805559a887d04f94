use haru_core::Observer;

use crate::traits::HasObjective;

/// Records the best-so-far objective reported by each event.
///
/// Pass `&mut history` to a driver to inspect the record after the run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestHistory {
    values: Vec<f64>,
}

impl BestHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded objectives, oldest first.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns `true` if no recorded objective is worse than its predecessor.
    #[must_use]
    pub fn is_monotone(&self) -> bool {
        self.values.windows(2).all(|w| w[1] <= w[0])
    }
}

impl<E: HasObjective, A> Observer<E, A> for BestHistory {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.values.push(event.objective());
        None
    }
}

/// Allows `&mut BestHistory` to be passed to drivers that take an observer by
/// value, so the history can be read after the run completes.
impl<E: HasObjective, A> Observer<E, A> for &mut BestHistory {
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
