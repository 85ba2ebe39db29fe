//! Stochastic movement model.
//!
//! An attempted move succeeds with probability `p`; otherwise the mover slips
//! to the left or right of the intended heading, `(1 - p) / 2` each. A slip
//! into a blocked cell leaves the mover where it was. `Stop` always stays put.

use arrayvec::ArrayVec;
use mdp_core::{CoreError, Direction, DirectionSet, ErrorSeverity, Position, ValueGrid};

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("transition success probability must lie in [0, 1], got {0}")]
    Probability(f64),

    #[error("direction {direction} is not legal at {position}")]
    IllegalDirection {
        position: Position,
        direction: Direction,
    },

    #[error("moving {direction} from {position} lands on a cell without a value")]
    BlockedOutcome {
        position: Position,
        direction: Direction,
    },
}

impl CoreError for TransitionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Probability(_) => ErrorSeverity::Validation,
            Self::IllegalDirection { .. } | Self::BlockedOutcome { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Probability(_) => "TRANSITION_PROBABILITY",
            Self::IllegalDirection { .. } => "TRANSITION_ILLEGAL_DIRECTION",
            Self::BlockedOutcome { .. } => "TRANSITION_BLOCKED_OUTCOME",
        }
    }
}

/// One possible result of an attempted move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    pub direction: Direction,
    pub probability: f64,
}

/// At most intended + two slips.
pub type Outcomes = ArrayVec<Outcome, 3>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionModel {
    success: f64,
}

impl TransitionModel {
    pub fn new(success: f64) -> Result<Self, TransitionError> {
        if !(0.0..=1.0).contains(&success) {
            return Err(TransitionError::Probability(success));
        }
        Ok(Self { success })
    }

    pub fn success(&self) -> f64 {
        self.success
    }

    /// Distribution over executed directions when attempting `intended`.
    ///
    /// `legal` is the legal set at the mover's cell; `intended` must be in it.
    /// Slips into illegal directions are reported as `Stop`, and outcomes that
    /// resolve to the same direction are merged.
    pub fn outcomes(
        &self,
        position: Position,
        intended: Direction,
        legal: DirectionSet,
    ) -> Result<Outcomes, TransitionError> {
        if !legal.has(intended) {
            return Err(TransitionError::IllegalDirection {
                position,
                direction: intended,
            });
        }

        let mut outcomes = Outcomes::new();
        if intended.is_stop() {
            outcomes.push(Outcome {
                direction: Direction::Stop,
                probability: 1.0,
            });
            return Ok(outcomes);
        }

        let slip = (1.0 - self.success) / 2.0;
        let attempts = [
            (intended, self.success),
            (intended.left(), slip),
            (intended.right(), slip),
        ];
        for (direction, probability) in attempts {
            let direction = if legal.has(direction) {
                direction
            } else {
                Direction::Stop
            };
            match outcomes
                .iter_mut()
                .find(|outcome| outcome.direction == direction)
            {
                Some(outcome) => outcome.probability += probability,
                None => outcomes.push(Outcome {
                    direction,
                    probability,
                }),
            }
        }
        Ok(outcomes)
    }

    /// Probability-weighted utility of attempting `intended` from `position`.
    pub fn expected_utility(
        &self,
        utilities: &ValueGrid,
        position: Position,
        intended: Direction,
        legal: DirectionSet,
    ) -> Result<f64, TransitionError> {
        self.outcomes(position, intended, legal)?
            .iter()
            .try_fold(0.0, |total, outcome| {
                let value = utilities
                    .value(position.step(outcome.direction))
                    .ok_or(TransitionError::BlockedOutcome {
                        position,
                        direction: outcome.direction,
                    })?;
                Ok::<f64, TransitionError>(total + outcome.probability * value)
            })
    }
}
