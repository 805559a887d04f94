use haru_core::Objective;

/// Adapter that negates the objective value.
///
/// Used to implement maximization by minimizing the negated objective.
#[derive(Debug)]
pub struct Negate<'a, O>(pub &'a O);

impl<O: Objective> Objective for Negate<'_, O> {
    type Error = O::Error;

    fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
        self.0.evaluate(x).map(|v| -v)
    }
}
