//! Solver configuration loader.

use std::path::Path;

use mdp_core::SolverConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for solver configuration from TOML files.
///
/// Missing keys take their default values; the result is validated before it
/// is returned.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<SolverConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SolverConfig> {
        let config: SolverConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse solver config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid solver config: {}", e))?;

        Ok(config)
    }
}
