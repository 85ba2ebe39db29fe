//! Content loaders for reading solver data from files.
//!
//! Each loader offers `parse` for in-memory text and `load` for a file path.

pub mod config;
pub mod layout;
pub mod profile;
pub mod snapshot;

pub use config::ConfigLoader;
pub use layout::LayoutLoader;
pub use profile::ProfileLoader;
pub use snapshot::SnapshotLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
