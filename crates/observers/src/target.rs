use haru_core::Observer;

use crate::traits::{CanStopEarly, HasObjective};

/// Stops a run once the best-so-far objective reaches `target` or lower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetObjective {
    pub target: f64,
}

impl TargetObjective {
    #[must_use]
    pub fn new(target: f64) -> Self {
        Self { target }
    }
}

impl<E, A> Observer<E, A> for TargetObjective
where
    E: HasObjective,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (event.objective() <= self.target).then(A::stop_early)
    }
}
