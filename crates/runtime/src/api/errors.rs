//! Unified error type surfaced by the runtime API.
//!
//! Wraps snapshot, configuration and solver failures so hosts can bubble them
//! up with consistent context.
use mdp_core::{ConfigError, CoreError, ErrorSeverity, SnapshotError};
use thiserror::Error;

use crate::providers::mdp::{IterationError, TransitionError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no episode in progress; call start_episode first")]
    EpisodeNotStarted,

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Iteration(#[from] IterationError),
}

impl CoreError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EpisodeNotStarted => ErrorSeverity::Internal,
            Self::Snapshot(err) => err.severity(),
            Self::Config(err) => err.severity(),
            Self::Transition(err) => err.severity(),
            Self::Iteration(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EpisodeNotStarted => "RUNTIME_EPISODE_NOT_STARTED",
            Self::Snapshot(err) => err.error_code(),
            Self::Config(err) => err.error_code(),
            Self::Transition(err) => err.error_code(),
            Self::Iteration(err) => err.error_code(),
        }
    }
}
