//! Reward profile loader.

use std::path::Path;

use mdp_core::{ProfileTable, RewardProfile};

use crate::loaders::{LoadResult, read_file};

/// Loader for per-grid-kind reward profiles from RON files.
///
/// Grid kinds left out of the file keep their built-in profile.
pub struct ProfileLoader;

impl ProfileLoader {
    pub fn load(path: &Path) -> LoadResult<ProfileTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ProfileTable> {
        let table: ProfileTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse reward profiles RON: {}", e))?;

        check_finite("small", &table.small)?;
        check_finite("classic", &table.classic)?;
        check_finite("custom", &table.custom)?;

        Ok(table)
    }
}

fn check_finite(kind: &str, profile: &RewardProfile) -> LoadResult<()> {
    let values = [
        profile.empty,
        profile.threat,
        profile.threat_neutralized,
        profile.consumable_minor,
        profile.consumable_major,
        profile.agent,
        profile.danger_zone,
    ];
    if values.iter().any(|value| !value.is_finite()) {
        anyhow::bail!("Reward profile '{}' contains a non-finite value", kind);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use mdp_core::GridKind;

    use super::*;

    #[test]
    fn shipped_profiles_match_builtins() {
        let table = ProfileLoader::parse(include_str!("../../data/profiles.ron")).unwrap();
        assert_eq!(table, ProfileTable::default());
    }

    #[test]
    fn omitted_kinds_keep_builtin_profile() {
        let text = "(small: (empty: 1.0, threat: -1.0, threat_neutralized: 5.0, \
                    consumable_minor: 1.0, consumable_major: 2.0, agent: 0.0, danger_zone: 0.0))";
        let table = ProfileLoader::parse(text).unwrap();
        assert_eq!(table.small.empty, 1.0);
        assert_eq!(table.get(GridKind::Classic), RewardProfile::CLASSIC);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let profile = RewardProfile {
            threat: f64::NEG_INFINITY,
            ..RewardProfile::CLASSIC
        };
        let err = check_finite("custom", &profile).unwrap_err();
        assert!(err.to_string().contains("custom"));
        assert!(check_finite("classic", &RewardProfile::CLASSIC).is_ok());
    }
}
