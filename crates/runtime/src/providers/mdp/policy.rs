//! Action selection from a converged utility map.

use arrayvec::ArrayVec;
use mdp_core::{Direction, DirectionSet, Position, RngOracle, ValueGrid};

use super::transition::{TransitionError, TransitionModel};

/// A candidate move with its expected utility.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredMove {
    pub direction: Direction,
    pub utility: f64,
}

/// Every candidate attaining the maximum expected utility.
pub type BestMoves = ArrayVec<ScoredMove, 5>;

pub struct PolicyExtractor {
    model: TransitionModel,
}

impl PolicyExtractor {
    pub fn new(model: TransitionModel) -> Self {
        Self { model }
    }

    /// Scores every candidate move and keeps the ones tied for the maximum.
    ///
    /// `Stop` is only a candidate when it is the sole legal direction. Ties
    /// are exact float equality; symmetric positions produce bit-identical
    /// utilities, which is exactly the case the random tie-break is for.
    pub fn best_moves(
        &self,
        utilities: &ValueGrid,
        position: Position,
        legal: DirectionSet,
    ) -> Result<BestMoves, TransitionError> {
        let moving = legal - DirectionSet::STOP;
        let candidates = if moving.is_empty() {
            DirectionSet::STOP
        } else {
            moving
        };

        let mut best = BestMoves::new();
        for direction in candidates.directions() {
            let utility = self
                .model
                .expected_utility(utilities, position, direction, legal)?;
            let scored = ScoredMove { direction, utility };
            match best.first() {
                Some(top) if utility > top.utility => {
                    best.clear();
                    best.push(scored);
                }
                Some(top) if utility == top.utility => best.push(scored),
                Some(_) => {}
                None => best.push(scored),
            }
        }
        Ok(best)
    }

    /// Picks uniformly among the best moves.
    pub fn choose<R>(
        &self,
        utilities: &ValueGrid,
        position: Position,
        legal: DirectionSet,
        rng: &mut R,
    ) -> Result<(ScoredMove, usize), TransitionError>
    where
        R: RngOracle,
    {
        let best = self.best_moves(utilities, position, legal)?;
        let chosen = rng
            .uniform_choice(best.as_slice())
            .copied()
            .ok_or(TransitionError::IllegalDirection {
                position,
                direction: Direction::Stop,
            })?;
        Ok((chosen, best.len()))
    }
}
