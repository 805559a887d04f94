//! Capability traits for cross-driver observers.
//!
//! These traits abstract over driver-specific event and action types, so an
//! observer can be written once and used with any driver that implements them.
//!
//! # Example
//!
//! ```rust
//! use haru_core::Observer;
//! use haru_observers::traits::{CanStopEarly, HasGeneration};
//!
//! struct Budget {
//!     max_generations: usize,
//! }
//!
//! impl<E: HasGeneration, A: CanStopEarly> Observer<E, A> for Budget {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.generation() >= self.max_generations).then(A::stop_early)
//!     }
//! }
//! ```

use haru_solvers::optimization::ask_tell;

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the best-so-far objective for this event.
    fn objective(&self) -> f64;
}

/// An event that belongs to a numbered generation.
pub trait HasGeneration {
    /// Returns the generation number, starting at 1.
    fn generation(&self) -> usize;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the run early.
    fn stop_early() -> Self;
}

impl HasObjective for ask_tell::Event<'_> {
    fn objective(&self) -> f64 {
        self.best.objective
    }
}

impl HasGeneration for ask_tell::Event<'_> {
    fn generation(&self) -> usize {
        self.generation
    }
}

impl CanStopEarly for ask_tell::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
