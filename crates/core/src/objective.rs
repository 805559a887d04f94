/// Defines an objective to be minimized.
///
/// An objective maps a candidate `x` to a scalar fitness value, where lower
/// is better. Drivers may evaluate every candidate of a population
/// independently and in any order, possibly on several threads at once, so
/// implementations must be pure: no side effects and no shared mutable state.
///
/// Closures of the form `Fn(&[f64]) -> Result<f64, E>` implement this trait
/// automatically.
pub trait Objective {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Computes the fitness of `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the fitness cannot be computed for `x`.
    fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error>;
}

impl<F, E> Objective for F
where
    F: Fn(&[f64]) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
        self(x)
    }
}
