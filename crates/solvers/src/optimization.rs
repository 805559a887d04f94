//! Black-box optimization with ask/tell strategy engines.
//!
//! An [`Objective`] maps a candidate `x: &[f64]` to a scalar fitness. A
//! [`Strategy`] proposes populations of candidates and learns from their
//! fitness. The [`ask_tell`] driver connects the two.
//!
//! # Modules
//!
//! - [`ask_tell`]: the generation loop, its config, events, and errors
//! - [`cmaes`]: a covariance matrix adaptation engine with `minimize` and
//!   `maximize` entry points
//! - [`objectives`]: benchmark functions
//!
//! [`Objective`]: haru_core::Objective
//! [`Strategy`]: haru_core::Strategy

mod evaluate;
mod negate;

pub use evaluate::{CandidateError, EvalError, Evaluation, evaluate, evaluate_population};
pub use negate::Negate;

pub mod ask_tell;
pub mod cmaes;
pub mod objectives;
