//! Bellman value iteration over a reward map.
//!
//! Each sweep recomputes every open cell from the previous sweep's utilities
//! (Jacobi update):
//!
//! `U'(c) = R(c) + γ · max_d E[U(next) | c, d]`
//!
//! and stops once the summed absolute change over all open cells is at most
//! `ε`. The utilities passed in are the starting guess; keeping them between
//! decisions (warm start) means a mostly unchanged world reconverges in a
//! handful of sweeps.

use mdp_core::{
    CoreError, DirectionSet, ErrorSeverity, Position, SolverConfig, ValueGrid, WallLayout,
};

use super::transition::{TransitionError, TransitionModel};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum IterationError {
    #[error("{grid} map does not match the episode's wall layout")]
    ShapeMismatch { grid: &'static str },

    #[error("utility at {position} became non-finite")]
    NonFinite { position: Position },

    #[error("value iteration did not converge within {sweeps} sweeps (delta {delta})")]
    NotConverged { sweeps: u32, delta: f64 },

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl CoreError for IterationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ShapeMismatch { .. } => ErrorSeverity::Internal,
            Self::NonFinite { .. } | Self::NotConverged { .. } => ErrorSeverity::Fatal,
            Self::Transition(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ShapeMismatch { .. } => "ITERATION_SHAPE_MISMATCH",
            Self::NonFinite { .. } => "ITERATION_NON_FINITE",
            Self::NotConverged { .. } => "ITERATION_NOT_CONVERGED",
            Self::Transition(err) => err.error_code(),
        }
    }
}

/// Outcome of a converged solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Convergence {
    pub sweeps: u32,
    /// Summed absolute change of the last sweep.
    pub delta: f64,
}

pub struct ValueIteration<'a> {
    layout: &'a WallLayout,
    model: TransitionModel,
    config: &'a SolverConfig,
    cells: Vec<(Position, DirectionSet)>,
}

impl<'a> ValueIteration<'a> {
    pub fn new(layout: &'a WallLayout, model: TransitionModel, config: &'a SolverConfig) -> Self {
        let cells = layout
            .open_cells()
            .map(|position| (position, layout.legal_directions(position)))
            .collect();

        Self {
            layout,
            model,
            config,
            cells,
        }
    }

    /// Iterates `utilities` in place until convergence.
    ///
    /// On success `utilities` holds the converged map and should be kept as
    /// the starting guess for the next decision.
    pub fn solve(
        &self,
        rewards: &ValueGrid,
        utilities: &mut ValueGrid,
    ) -> Result<Convergence, IterationError> {
        if !rewards.matches_layout(self.layout) {
            return Err(IterationError::ShapeMismatch { grid: "reward" });
        }
        if !utilities.matches_layout(self.layout) {
            return Err(IterationError::ShapeMismatch { grid: "utility" });
        }

        let discount = self.config.discount;
        let mut previous = utilities.clone();
        let mut sweeps = 0;

        loop {
            let mut delta = 0.0;
            for &(position, legal) in &self.cells {
                let (Some(reward), Some(old)) = (rewards.value(position), previous.value(position))
                else {
                    continue;
                };

                let updated = reward + discount * self.best_utility(&previous, position, legal)?;
                if !updated.is_finite() {
                    return Err(IterationError::NonFinite { position });
                }
                delta += (updated - old).abs();
                utilities.set(position, updated);
            }
            sweeps += 1;
            tracing::trace!(sweep = sweeps, delta, "value iteration sweep");

            if delta <= self.config.epsilon {
                return Ok(Convergence { sweeps, delta });
            }
            if sweeps >= self.config.sweep_cap {
                tracing::error!(
                    sweeps,
                    delta,
                    epsilon = self.config.epsilon,
                    discount,
                    "value iteration hit the sweep cap; rewards or discount are misconfigured"
                );
                return Err(IterationError::NotConverged { sweeps, delta });
            }
            previous.clone_from(utilities);
        }
    }

    /// Utility of the best action from `position`, optionally blended with
    /// the worst one when `optimism < 1`.
    fn best_utility(
        &self,
        utilities: &ValueGrid,
        position: Position,
        legal: DirectionSet,
    ) -> Result<f64, TransitionError> {
        let mut best = f64::NEG_INFINITY;
        let mut worst = f64::INFINITY;
        for direction in legal.directions() {
            let expected = self
                .model
                .expected_utility(utilities, position, direction, legal)?;
            best = best.max(expected);
            worst = worst.min(expected);
        }

        let optimism = self.config.optimism;
        if optimism >= 1.0 {
            return Ok(best);
        }
        Ok(optimism * best.max(0.0) + (1.0 - optimism) * worst.min(0.0))
    }
}

#[cfg(test)]
mod tests {
    use mdp_core::{Cell, MapDimensions};

    use super::*;

    fn corridor() -> WallLayout {
        WallLayout::open(MapDimensions::new(5, 1))
    }

    #[test]
    fn single_cell_converges_to_geometric_sum() {
        let layout = WallLayout::open(MapDimensions::new(1, 1));
        let config = SolverConfig::default().with_epsilon(1e-9);
        let model = TransitionModel::new(0.8).unwrap();
        let rewards = ValueGrid::from_layout(&layout, 1.0);
        let mut utilities = ValueGrid::from_layout(&layout, 0.0);

        ValueIteration::new(&layout, model, &config)
            .solve(&rewards, &mut utilities)
            .unwrap();

        let value = utilities.value(Position::ORIGIN).unwrap();
        assert!((value - 10.0).abs() < 1e-6);
    }

    #[test]
    fn walls_stay_walls() {
        let layout =
            WallLayout::new(MapDimensions::new(3, 3), [Position::new(1, 1)]).unwrap();
        let config = SolverConfig::default();
        let model = TransitionModel::new(0.8).unwrap();
        let mut rewards = ValueGrid::from_layout(&layout, -1.0);
        rewards.set(Position::new(2, 2), 10.0);
        let mut utilities = ValueGrid::from_layout(&layout, 0.0);

        ValueIteration::new(&layout, model, &config)
            .solve(&rewards, &mut utilities)
            .unwrap();

        for (position, cell) in utilities.iter() {
            assert_eq!(cell.is_wall(), layout.is_wall(position));
        }
        assert_eq!(utilities.get(Position::new(1, 1)), Some(Cell::Wall));
    }

    #[test]
    fn warm_start_reconverges_immediately() {
        let layout = corridor();
        let config = SolverConfig::default();
        let model = TransitionModel::new(0.8).unwrap();
        let mut rewards = ValueGrid::from_layout(&layout, -1.0);
        rewards.set(Position::new(4, 0), 10.0);
        let mut utilities = ValueGrid::from_layout(&layout, 0.0);

        let engine = ValueIteration::new(&layout, model, &config);
        let cold = engine.solve(&rewards, &mut utilities).unwrap();
        let warm = engine.solve(&rewards, &mut utilities).unwrap();

        assert!(warm.sweeps <= cold.sweeps);
        assert!(warm.sweeps < cold.sweeps / 2);
    }

    #[test]
    fn sweep_cap_reports_non_convergence() {
        let layout = corridor();
        let config = SolverConfig::default()
            .with_discount(0.99)
            .with_epsilon(1e-6)
            .with_sweep_cap(3);
        let model = TransitionModel::new(0.8).unwrap();
        let rewards = ValueGrid::from_layout(&layout, 5.0);
        let mut utilities = ValueGrid::from_layout(&layout, 0.0);

        let err = ValueIteration::new(&layout, model, &config)
            .solve(&rewards, &mut utilities)
            .unwrap_err();
        assert!(matches!(err, IterationError::NotConverged { sweeps: 3, .. }));
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let layout = corridor();
        let other = WallLayout::open(MapDimensions::new(4, 1));
        let config = SolverConfig::default();
        let model = TransitionModel::new(0.8).unwrap();
        let rewards = ValueGrid::from_layout(&other, 0.0);
        let mut utilities = ValueGrid::from_layout(&layout, 0.0);

        let err = ValueIteration::new(&layout, model, &config)
            .solve(&rewards, &mut utilities)
            .unwrap_err();
        assert_eq!(err, IterationError::ShapeMismatch { grid: "reward" });
    }

    #[test]
    fn pessimism_lowers_utilities() {
        let layout = corridor();
        let model = TransitionModel::new(0.8).unwrap();
        let mut rewards = ValueGrid::from_layout(&layout, -1.0);
        rewards.set(Position::new(0, 0), -50.0);
        rewards.set(Position::new(4, 0), 10.0);

        let solve = |config: SolverConfig| {
            let mut utilities = ValueGrid::from_layout(&layout, 0.0);
            ValueIteration::new(&layout, model, &config)
                .solve(&rewards, &mut utilities)
                .unwrap();
            utilities
        };

        let greedy = solve(SolverConfig::default());
        let cautious = solve(SolverConfig::default().with_optimism(0.85));
        let cell = Position::new(2, 0);
        assert!(cautious.value(cell).unwrap() < greedy.value(cell).unwrap());
    }
}
