//! Minimizes a 2-D sphere with CMA-ES and prints the best point.
//!
//! # Usage
//!
//! ```text
//! cargo run --example sphere
//! RUST_LOG=debug cargo run --example sphere
//! ```

use std::error::Error;

use haru_core::Observer;
use haru_observers::{TargetObjective, TraceObserver};
use haru_solvers::optimization::{
    ask_tell::{Action, Event},
    cmaes::{self, Config},
    objectives::Sphere,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env();
    tracing_subscriber::fmt()
        .with_env_filter(filter.unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::new(vec![5.0, 5.0], 1.0)?
        .with_population_size(10)?
        .with_generations(100)?
        .with_seed(42);

    let mut trace = TraceObserver::new(10);
    let mut target = TargetObjective::new(1e-12);
    let observer = |event: &Event<'_>| -> Option<Action> {
        let _: Option<Action> = trace.observe(event);
        target.observe(event)
    };

    let solution = cmaes::minimize(&Sphere, &config, observer)?;

    println!(
        "{:?} after {} generations ({} evaluations)",
        solution.status, solution.generations, solution.evaluations
    );
    println!("best x = {:?}", solution.x);
    println!("best objective = {:e}", solution.objective);

    Ok(())
}
