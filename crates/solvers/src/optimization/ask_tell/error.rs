use std::error::Error as StdError;

use thiserror::Error;

use super::{ConfigError, ContractViolation};

/// Errors that can occur during an ask/tell run.
///
/// Every variant is fatal to the run. Generations already told are not
/// rolled back, so the strategy's best point remains available to the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("strategy failed in generation {generation}")]
    Strategy {
        generation: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("engine contract violated in generation {generation}: {violation}")]
    EngineContract {
        generation: usize,
        violation: ContractViolation,
    },

    #[error("objective failed for candidate {index} in generation {generation}")]
    Objective {
        generation: usize,
        index: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    pub(super) fn strategy<E: StdError + Send + Sync + 'static>(generation: usize, err: E) -> Self {
        Self::Strategy {
            generation,
            source: Box::new(err),
        }
    }

    /// Returns the generation in which the run failed, if it got that far.
    #[must_use]
    pub fn generation(&self) -> Option<usize> {
        match self {
            Self::InvalidConfig(_) => None,
            Self::Strategy { generation, .. }
            | Self::EngineContract { generation, .. }
            | Self::Objective { generation, .. } => Some(*generation),
        }
    }
}
