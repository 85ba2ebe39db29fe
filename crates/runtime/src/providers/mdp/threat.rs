//! Heading inference for mobile adversaries.

use mdp_core::{Direction, Position, ThreatSighting};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Track {
    cell: Position,
    heading: Option<Direction>,
}

/// Remembers where each adversary was at the previous decision.
///
/// Adversaries are identified by their index in the snapshot, which the host
/// keeps stable for an episode. A change in the number of adversaries drops
/// all history.
#[derive(Clone, Debug, Default)]
pub struct ThreatTracker {
    tracks: Vec<Track>,
}

impl ThreatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Heading of adversary `index` if it is now at `cell`.
    ///
    /// A one-cell move gives the heading directly; staying in place keeps the
    /// previous heading; anything else (first sighting, teleport) is unknown.
    pub fn heading(&self, index: usize, cell: Position) -> Option<Direction> {
        let track = self.tracks.get(index)?;
        if track.cell == cell {
            track.heading
        } else {
            track.cell.direction_to(cell)
        }
    }

    /// Records this decision's sightings. Call after the reward map is built.
    pub fn observe(&mut self, threats: &[ThreatSighting]) {
        if threats.len() != self.tracks.len() {
            if !self.tracks.is_empty() {
                tracing::debug!(
                    before = self.tracks.len(),
                    after = threats.len(),
                    "threat count changed, dropping heading history"
                );
            }
            self.tracks = threats
                .iter()
                .map(|threat| Track {
                    cell: threat.cell(),
                    heading: None,
                })
                .collect();
            return;
        }

        for (index, threat) in threats.iter().enumerate() {
            let cell = threat.cell();
            let heading = self.heading(index, cell);
            let previous = self.tracks[index].cell;
            if previous.manhattan_distance(cell) > 1 {
                tracing::warn!(index, from = %previous, to = %cell, "threat teleported");
            }
            self.tracks[index] = Track { cell, heading };
        }
    }
}
