//! Episode-scoped solver state and the decision entry point.

use mdp_core::{
    Direction, GridKind, ProfileTable, RewardProfile, RngOracle, SolverConfig, ValueGrid,
    WallLayout, WorldOracle, env,
};
use rand::rngs::StdRng;

use super::iteration::{Convergence, ValueIteration};
use super::policy::PolicyExtractor;
use super::reward::RewardMapBuilder;
use super::threat::ThreatTracker;
use super::transition::TransitionModel;
use crate::api::{DirectionProvider, Result, RuntimeError};
use crate::providers::RandOracle;

/// Summary of one decision, mostly for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    pub direction: Direction,
    /// Expected utility of the chosen move.
    pub utility: f64,
    /// Number of moves tied for the best utility.
    pub ties: usize,
    pub convergence: Convergence,
}

#[derive(Clone, Debug)]
struct Episode {
    layout: WallLayout,
    kind: GridKind,
    profile: RewardProfile,
    /// Converged utilities of the previous decision; the warm start.
    utilities: ValueGrid,
    tracker: ThreatTracker,
    decisions: u64,
}

/// Everything carried between decisions of one episode.
///
/// Owns the warm-start utility map exclusively; nothing else reads or writes
/// it between decisions.
#[derive(Clone, Debug, Default)]
pub struct SolverState {
    episode: Option<Episode>,
}

impl SolverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.episode.is_some()
    }

    pub fn grid_kind(&self) -> Option<GridKind> {
        self.episode.as_ref().map(|episode| episode.kind)
    }

    pub fn profile(&self) -> Option<RewardProfile> {
        self.episode.as_ref().map(|episode| episode.profile)
    }

    /// Warm-start utilities as left by the last decision.
    pub fn utilities(&self) -> Option<&ValueGrid> {
        self.episode.as_ref().map(|episode| &episode.utilities)
    }

    /// Measures the grid, fixes the wall layout and picks the reward profile.
    ///
    /// Replaces any episode already in progress.
    pub fn start<W>(&mut self, world: &W, profiles: &ProfileTable) -> Result<GridKind>
    where
        W: WorldOracle + ?Sized,
    {
        let dimensions = world.dimensions()?;
        let layout = WallLayout::new(dimensions, world.walls())?;
        env::validate(world, &layout)?;

        let kind = GridKind::resolve(dimensions);
        let utilities = ValueGrid::from_layout(&layout, 0.0);
        tracing::debug!(
            width = dimensions.width,
            height = dimensions.height,
            %kind,
            "episode started"
        );

        self.episode = Some(Episode {
            layout,
            kind,
            profile: profiles.get(kind),
            utilities,
            tracker: ThreatTracker::new(),
            decisions: 0,
        });
        Ok(kind)
    }

    /// Forgets the warm start, profile and threat history.
    pub fn reset(&mut self) {
        if let Some(episode) = self.episode.take() {
            tracing::debug!(decisions = episode.decisions, "episode ended");
        }
    }

    /// Runs one full decision: reward map, value iteration, policy.
    ///
    /// The warm start and threat history only advance when the decision
    /// succeeds; after an error the episode is left as it was.
    pub fn step<W, R>(&mut self, world: &W, config: &SolverConfig, rng: &mut R) -> Result<Decision>
    where
        W: WorldOracle + ?Sized,
        R: RngOracle,
    {
        let episode = self.episode.as_mut().ok_or(RuntimeError::EpisodeNotStarted)?;
        env::validate(world, &episode.layout)?;

        let model = TransitionModel::new(world.direction_prob())?;
        let rewards = RewardMapBuilder::new(&episode.layout, episode.kind, episode.profile, config)
            .build(world, &episode.tracker);

        let mut utilities = episode.utilities.clone();
        let convergence =
            ValueIteration::new(&episode.layout, model, config).solve(&rewards, &mut utilities)?;

        let agent = world.agent();
        let legal = world.legal_directions(agent);
        let (chosen, ties) = PolicyExtractor::new(model).choose(&utilities, agent, legal, rng)?;

        episode.utilities = utilities;
        episode.tracker.observe(&world.threats());
        episode.decisions += 1;

        tracing::debug!(
            decision = episode.decisions,
            sweeps = convergence.sweeps,
            delta = convergence.delta,
            direction = %chosen.direction,
            utility = chosen.utility,
            ties,
            "decision made"
        );
        tracing::trace!("utility map:\n{}", episode.utilities);

        Ok(Decision {
            direction: chosen.direction,
            utility: chosen.utility,
            ties,
            convergence,
        })
    }
}

/// MDP-driven controller for the agent.
///
/// Call [`MdpAgent::start_episode`] once the maze is known, then
/// [`MdpAgent::decide`] for every move, and [`MdpAgent::end_episode`] between
/// games.
pub struct MdpAgent<R = RandOracle<StdRng>> {
    config: SolverConfig,
    profiles: ProfileTable,
    state: SolverState,
    rng: R,
}

impl MdpAgent<RandOracle<StdRng>> {
    /// Agent with an entropy-seeded tie-break source.
    pub fn new(config: SolverConfig) -> Result<Self> {
        Self::with_rng(config, RandOracle::from_entropy())
    }
}

impl<R: RngOracle> MdpAgent<R> {
    pub fn with_rng(config: SolverConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            profiles: ProfileTable::default(),
            state: SolverState::new(),
            rng,
        })
    }

    /// Overrides the reward profiles; applies from the next episode on.
    pub fn with_profiles(mut self, profiles: ProfileTable) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn state(&self) -> &SolverState {
        &self.state
    }

    pub fn start_episode<W>(&mut self, world: &W) -> Result<GridKind>
    where
        W: WorldOracle + ?Sized,
    {
        self.state.start(world, &self.profiles)
    }

    pub fn end_episode(&mut self) {
        self.state.reset();
    }

    /// Chooses the next move; always one of the world's legal directions.
    pub fn decide<W>(&mut self, world: &W) -> Result<Direction>
    where
        W: WorldOracle + ?Sized,
    {
        self.decide_detailed(world).map(|decision| decision.direction)
    }

    pub fn decide_detailed<W>(&mut self, world: &W) -> Result<Decision>
    where
        W: WorldOracle + ?Sized,
    {
        self.state.step(world, &self.config, &mut self.rng)
    }
}

impl<R: RngOracle> DirectionProvider for MdpAgent<R> {
    fn provide_direction(&mut self, world: &dyn WorldOracle) -> Result<Direction> {
        self.decide(world)
    }
}
