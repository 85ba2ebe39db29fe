//! World snapshot persistence for replay.

use std::path::Path;

use mdp_core::WorldSnapshot;

use crate::loaders::{LoadResult, read_file};

/// Reads and writes [`WorldSnapshot`]s as JSON.
pub struct SnapshotLoader;

impl SnapshotLoader {
    pub fn load(path: &Path) -> LoadResult<WorldSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<WorldSnapshot> {
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse snapshot JSON: {}", e))
    }

    pub fn to_json(snapshot: &WorldSnapshot) -> LoadResult<String> {
        serde_json::to_string_pretty(snapshot)
            .map_err(|e| anyhow::anyhow!("Failed to serialize snapshot: {}", e))
    }

    pub fn save(snapshot: &WorldSnapshot, path: &Path) -> LoadResult<()> {
        let content = Self::to_json(snapshot)?;
        std::fs::write(path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use mdp_core::DEFAULT_DIRECTION_PROB;

    use super::*;

    #[test]
    fn optional_fields_default() {
        let json = r#"{
            "agent": { "x": 1, "y": 0 },
            "corners": [{ "x": 0, "y": 0 }, { "x": 2, "y": 0 }],
            "walls": []
        }"#;
        let snapshot = SnapshotLoader::parse(json).unwrap();
        assert!(snapshot.food.is_empty());
        assert!(snapshot.threats.is_empty());
        assert_eq!(snapshot.direction_prob, DEFAULT_DIRECTION_PROB);
    }

    #[test]
    fn threat_neutralization_defaults_to_active() {
        let json = r#"{
            "agent": { "x": 0, "y": 0 },
            "corners": [{ "x": 0, "y": 0 }, { "x": 3, "y": 0 }],
            "walls": [],
            "threats": [{ "x": 2.5, "y": 0.0 }]
        }"#;
        let snapshot = SnapshotLoader::parse(json).unwrap();
        assert!(!snapshot.threats[0].is_neutralized());
    }
}
