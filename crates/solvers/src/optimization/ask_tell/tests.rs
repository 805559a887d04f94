use std::convert::Infallible;
use std::error::Error as StdError;
use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

use haru_core::{Candidate, Objective, Point, Population, Strategy};

use crate::optimization::{EvalError, Evaluation};

use super::{
    Action, Config, ConfigError, ContractViolation, Error, Event, Status, run, run_unobserved,
};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
enum Refused {
    #[error("ask refused")]
    Ask,

    #[error("tell refused")]
    Tell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Ask,
    Tell,
}

/// A deterministic strategy that records every call it receives.
///
/// Candidate `i` of generation `g` is filled with a scrambled value so that
/// fitness order differs from population order.
#[derive(Default)]
struct Recording {
    dimension: usize,
    population_size: usize,
    generation: usize,
    calls: Vec<Call>,
    told: Vec<(Population, Vec<f64>)>,
    best: Option<Point>,
    nan_at: Option<(usize, usize)>,
    oversize_at: Option<usize>,
    short_candidate_at: Option<usize>,
    stop_after: Option<usize>,
    forget_best: bool,
    refuse_ask_at: Option<usize>,
    refuse_tell_at: Option<usize>,
}

impl Recording {
    fn new(dimension: usize, population_size: usize) -> Self {
        Self {
            dimension,
            population_size,
            ..Self::default()
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn value(generation: usize, index: usize) -> f64 {
        ((generation * 7 + index * 13) % 17) as f64 - 8.0
    }
}

impl Strategy for Recording {
    type Error = Refused;

    fn ask(&mut self) -> Result<Population, Self::Error> {
        self.generation += 1;
        self.calls.push(Call::Ask);
        if self.refuse_ask_at == Some(self.generation) {
            return Err(Refused::Ask);
        }

        let g = self.generation;
        let mut population: Population = (0..self.population_size)
            .map(|i| vec![Self::value(g, i); self.dimension])
            .collect();

        if let Some((gen_at, index)) = self.nan_at {
            if gen_at == g {
                population[index][0] = f64::NAN;
            }
        }
        if self.oversize_at == Some(g) {
            population.push(vec![0.0; self.dimension]);
        }
        if self.short_candidate_at == Some(g) {
            population[0].pop();
        }

        Ok(population)
    }

    fn tell(&mut self, population: &[Candidate], fitness: &[f64]) -> Result<(), Self::Error> {
        self.calls.push(Call::Tell);
        if self.refuse_tell_at == Some(self.generation) {
            return Err(Refused::Tell);
        }
        self.told.push((population.to_vec(), fitness.to_vec()));

        for (x, &objective) in population.iter().zip(fitness) {
            let point = Point::new(x.clone(), objective);
            if self
                .best
                .as_ref()
                .is_none_or(|best| point.improves_on(best))
            {
                self.best = Some(point);
            }
        }
        Ok(())
    }

    fn best(&self) -> Option<&Point> {
        if self.forget_best {
            None
        } else {
            self.best.as_ref()
        }
    }

    fn should_stop(&self) -> bool {
        self.stop_after.is_some_and(|n| self.generation >= n)
    }
}

#[derive(Debug, Error)]
#[error("first coordinate is NaN")]
struct NanCoordinate;

/// Returns the first coordinate, failing on `NaN`. Counts its calls.
#[derive(Default)]
struct FirstCoordinate {
    calls: AtomicUsize,
}

impl FirstCoordinate {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Objective for FirstCoordinate {
    type Error = NanCoordinate;

    fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if x[0].is_nan() {
            Err(NanCoordinate)
        } else {
            Ok(x[0])
        }
    }
}

#[test]
fn runs_exact_generations_alternating_ask_and_tell() {
    let mut strategy = Recording::new(2, 4);
    let objective = FirstCoordinate::default();
    let config = Config::new(2, 4, 5).unwrap();

    let solution = run_unobserved(&mut strategy, &objective, &config).expect("should complete");

    let expected: Vec<Call> = [Call::Ask, Call::Tell].repeat(5);
    assert_eq!(strategy.calls, expected);
    assert_eq!(solution.status, Status::Complete);
    assert_eq!(solution.generations, 5);
    assert_eq!(solution.evaluations, 20);
    assert_eq!(solution.history.len(), 5);
    assert_eq!(objective.calls(), 20);
}

#[test]
fn fitness_is_told_in_population_order() {
    for evaluation in [Evaluation::Sequential, Evaluation::Parallel] {
        let mut strategy = Recording::new(3, 9);
        let objective = FirstCoordinate::default();
        let config = Config::new(3, 9, 4).unwrap().with_evaluation(evaluation);

        run_unobserved(&mut strategy, &objective, &config).expect("should complete");

        assert_eq!(strategy.told.len(), 4);
        for (population, fitness) in &strategy.told {
            assert_eq!(population.len(), fitness.len());
            for (x, f) in population.iter().zip(fitness) {
                assert_eq!(x[0], *f);
            }
        }
    }
}

#[test]
fn parallel_and_sequential_agree() {
    let objective = FirstCoordinate::default();

    let mut sequential = Recording::new(2, 16);
    let config = Config::new(2, 16, 6).unwrap();
    let a = run_unobserved(&mut sequential, &objective, &config).unwrap();

    let mut parallel = Recording::new(2, 16);
    let config = config.with_evaluation(Evaluation::Parallel);
    let b = run_unobserved(&mut parallel, &objective, &config).unwrap();

    assert_eq!(a, b);
}

#[test]
fn reports_strategy_best_and_monotone_history() {
    let mut strategy = Recording::new(1, 3);
    let objective = FirstCoordinate::default();
    let config = Config::new(1, 3, 10).unwrap();

    let solution = run_unobserved(&mut strategy, &objective, &config).unwrap();

    let best = strategy.best().unwrap();
    assert_eq!(solution.objective, best.objective);
    assert_eq!(solution.x, best.x);
    assert_eq!(&solution.best(), best);
    assert!(solution.history.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn objective_failure_aborts_without_tell() {
    let mut strategy = Recording::new(2, 5);
    strategy.nan_at = Some((2, 3));
    let objective = FirstCoordinate::default();
    let config = Config::new(2, 5, 10).unwrap();

    let err = run_unobserved(&mut strategy, &objective, &config).unwrap_err();

    match &err {
        Error::Objective {
            generation, index, ..
        } => {
            assert_eq!(*generation, 2);
            assert_eq!(*index, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.generation(), Some(2));
    assert_eq!(strategy.calls, vec![Call::Ask, Call::Tell, Call::Ask]);

    // Progress from generation 1 is still available.
    assert!(strategy.best().is_some());
}

#[test]
fn objective_failure_source_is_preserved() {
    let mut strategy = Recording::new(2, 5);
    strategy.nan_at = Some((1, 0));
    let objective = FirstCoordinate::default();
    let config = Config::new(2, 5, 1)
        .unwrap()
        .with_evaluation(Evaluation::Parallel);

    let err = run_unobserved(&mut strategy, &objective, &config).unwrap_err();

    let Error::Objective { source, .. } = err else {
        panic!("expected objective error");
    };
    let eval = source
        .downcast_ref::<EvalError<NanCoordinate>>()
        .expect("source should be an EvalError");
    assert!(matches!(eval, EvalError::Objective(NanCoordinate)));
}

#[test]
fn nan_fitness_is_an_objective_failure() {
    let mut strategy = Recording::new(1, 4);
    let objective = |x: &[f64]| -> Result<f64, Infallible> {
        Ok(if x[0] > 0.0 { f64::NAN } else { x[0] })
    };
    let config = Config::new(1, 4, 3).unwrap();

    let err = run_unobserved(&mut strategy, &objective, &config).unwrap_err();

    assert!(matches!(err, Error::Objective { generation: 1, .. }));
    assert_eq!(strategy.calls, vec![Call::Ask]);
}

#[test]
fn oversized_population_aborts_before_evaluation() {
    let mut strategy = Recording::new(2, 4);
    strategy.oversize_at = Some(1);
    let objective = FirstCoordinate::default();
    let config = Config::new(2, 4, 10).unwrap();

    let err = run_unobserved(&mut strategy, &objective, &config).unwrap_err();

    assert!(matches!(
        err,
        Error::EngineContract {
            generation: 1,
            violation: ContractViolation::PopulationSize {
                expected: 4,
                actual: 5
            }
        }
    ));
    assert_eq!(objective.calls(), 0);
    assert_eq!(strategy.calls, vec![Call::Ask]);
}

#[test]
fn wrong_candidate_dimension_aborts_before_evaluation() {
    let mut strategy = Recording::new(3, 4);
    strategy.short_candidate_at = Some(3);
    let objective = FirstCoordinate::default();
    let config = Config::new(3, 4, 10).unwrap();

    let err = run_unobserved(&mut strategy, &objective, &config).unwrap_err();

    assert!(matches!(
        err,
        Error::EngineContract {
            generation: 3,
            violation: ContractViolation::Dimension {
                index: 0,
                expected: 3,
                actual: 2
            }
        }
    ));
    assert_eq!(objective.calls(), 8);
}

#[test]
fn missing_best_is_a_contract_violation() {
    let mut strategy = Recording::new(1, 2);
    strategy.forget_best = true;
    let objective = FirstCoordinate::default();
    let config = Config::new(1, 2, 3).unwrap();

    let err = run_unobserved(&mut strategy, &objective, &config).unwrap_err();

    assert!(matches!(
        err,
        Error::EngineContract {
            generation: 1,
            violation: ContractViolation::MissingBest
        }
    ));
}

#[test]
fn observer_stops_between_generations() {
    let mut strategy = Recording::new(2, 3);
    let objective = FirstCoordinate::default();
    let config = Config::new(2, 3, 10).unwrap();

    let mut seen = Vec::new();
    let observer = |event: &Event<'_>| {
        seen.push(event.generation);
        (event.generation == 3).then_some(Action::StopEarly)
    };

    let solution = run(&mut strategy, &objective, &config, observer).unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.generations, 3);
    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(strategy.calls.len(), 6);
}

#[test]
fn events_carry_told_population() {
    let mut strategy = Recording::new(1, 5);
    let objective = FirstCoordinate::default();
    let config = Config::new(1, 5, 2).unwrap();

    let mut generation_bests = Vec::new();
    let observer = |event: &Event<'_>| -> Option<Action> {
        assert_eq!(event.population.len(), event.fitness.len());
        assert!(event.best.objective <= event.generation_best().unwrap().1);
        generation_bests.push(event.generation_best().unwrap().1);
        None
    };

    run(&mut strategy, &objective, &config, observer).unwrap();

    assert_eq!(generation_bests.len(), 2);
}

#[test]
fn strategy_convergence_ends_run() {
    let mut strategy = Recording::new(2, 3);
    strategy.stop_after = Some(4);
    let objective = FirstCoordinate::default();
    let config = Config::new(2, 3, 50).unwrap();

    let solution = run_unobserved(&mut strategy, &objective, &config).unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.generations, 4);
    assert_eq!(solution.evaluations, 12);
}

#[test]
fn single_candidate_populations_are_accepted() {
    let mut strategy = Recording::new(2, 1);
    let objective = FirstCoordinate::default();
    let config = Config::new(2, 1, 7).unwrap();

    let solution = run_unobserved(&mut strategy, &objective, &config).unwrap();

    assert_eq!(solution.status, Status::Complete);
    assert_eq!(solution.evaluations, 7);
    for (population, fitness) in &strategy.told {
        assert_eq!(population.len(), 1);
        assert_eq!(fitness.len(), 1);
    }
}

#[test]
fn strategy_tell_failure_aborts_run() {
    let mut strategy = Recording::new(1, 4);
    strategy.refuse_tell_at = Some(2);
    let objective = FirstCoordinate::default();
    let config = Config::new(1, 4, 10).unwrap();

    let err = run_unobserved(&mut strategy, &objective, &config).unwrap_err();

    let Error::Strategy { generation, source } = &err else {
        panic!("expected strategy error, got {err}");
    };
    assert_eq!(*generation, 2);
    assert_eq!(source.downcast_ref::<Refused>(), Some(&Refused::Tell));
    assert_eq!(err.generation(), Some(2));

    // Nothing is asked after the failure, and generation 1 is still recorded.
    assert_eq!(
        strategy.calls,
        vec![Call::Ask, Call::Tell, Call::Ask, Call::Tell]
    );
    assert_eq!(objective.calls(), 8);
    let best = strategy.best().expect("generation 1 was told");
    let (_, first_fitness) = &strategy.told[0];
    let lowest = first_fitness.iter().copied().fold(f64::INFINITY, f64::min);
    assert_eq!(best.objective, lowest);
}

#[test]
fn strategy_ask_failure_aborts_before_evaluation() {
    let mut strategy = Recording::new(2, 3);
    strategy.refuse_ask_at = Some(3);
    let objective = FirstCoordinate::default();
    let config = Config::new(2, 3, 10).unwrap();

    let err = run_unobserved(&mut strategy, &objective, &config).unwrap_err();

    match &err {
        Error::Strategy { generation, source } => {
            assert_eq!(*generation, 3);
            assert_eq!(source.downcast_ref::<Refused>(), Some(&Refused::Ask));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(objective.calls(), 6);
    assert_eq!(strategy.calls.len(), 5);
    assert_eq!(strategy.told.len(), 2);
    assert!(strategy.best().is_some());
}

#[test]
fn config_errors_convert_without_generation() {
    let err = Error::from(ConfigError::Generations);

    assert!(matches!(err, Error::InvalidConfig(ConfigError::Generations)));
    assert_eq!(err.generation(), None);
    assert!(err.source().is_some());
}
