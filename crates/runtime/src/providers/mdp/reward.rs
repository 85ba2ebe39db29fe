//! Immediate reward map for one decision.
//!
//! Built fresh from the world snapshot every decision, in this order:
//!
//! 1. every open cell gets `profile.empty` (walls are already walls)
//! 2. consumables add their value
//! 3. the agent's own cell adds `profile.agent`
//! 4. every adversary adds its value at its cell and `value / distance` over
//!    its projected reach and its sightlines
//! 5. the classic maze adds `profile.danger_zone` over the spawn chokepoint
//!
//! All adjustments are additive and bounded, so the map stays finite.

use mdp_core::{
    GridKind, ReachabilitySearch, RewardProfile, SolverConfig, ThreatSighting, ValueGrid,
    WallLayout, WorldOracle,
};

use super::threat::ThreatTracker;

pub type RewardMap = ValueGrid;

pub struct RewardMapBuilder<'a> {
    layout: &'a WallLayout,
    kind: GridKind,
    profile: RewardProfile,
    config: &'a SolverConfig,
}

impl<'a> RewardMapBuilder<'a> {
    pub fn new(
        layout: &'a WallLayout,
        kind: GridKind,
        profile: RewardProfile,
        config: &'a SolverConfig,
    ) -> Self {
        Self {
            layout,
            kind,
            profile,
            config,
        }
    }

    pub fn build<W>(&self, world: &W, tracker: &ThreatTracker) -> RewardMap
    where
        W: WorldOracle + ?Sized,
    {
        let profile = &self.profile;
        let mut rewards = ValueGrid::from_layout(self.layout, profile.empty);

        for capsule in world.capsules() {
            rewards.add(capsule, profile.consumable_major);
        }
        for food in world.food() {
            rewards.add(food, profile.consumable_minor);
        }

        rewards.add(world.agent(), profile.agent);

        let search = ReachabilitySearch::new(self.layout);
        for (index, threat) in world.threats().iter().enumerate() {
            let cell = threat.cell();
            let value = self.threat_value(threat);
            let heading = tracker.heading(index, cell);

            rewards.add(cell, value);
            let projected = search.threat_projection(
                cell,
                heading,
                self.config.prediction_budget,
                self.config.junction_exits,
            );
            let visible = search.sightlines(cell, self.config.sightline_budget);
            for reach in projected.iter().chain(&visible) {
                rewards.add(reach.position, value / f64::from(reach.distance));
            }
        }

        if let Some(zone) = self.kind.danger_zone() {
            for cell in zone.cells() {
                rewards.add(cell, profile.danger_zone);
            }
        }

        rewards
    }

    /// Reward carried by one adversary.
    ///
    /// A neutralized adversary is an opportunity whose value fades with its
    /// remaining neutral time; an active one is a plain threat.
    pub fn threat_value(&self, threat: &ThreatSighting) -> f64 {
        if threat.is_neutralized() {
            self.profile.threat_neutralized * f64::from(threat.neutralized_for)
                / f64::from(self.config.max_neutral_duration)
        } else {
            self.profile.threat
        }
    }
}
