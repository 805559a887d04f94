/// Actions an observer can take during an ask/tell run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop before the next generation and return the best point so far.
    StopEarly,
}
