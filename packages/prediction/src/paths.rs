#![allow(clippy::module_name_repetitions)]
//! Canonical file paths for the artifact data directory.
//!
//! All paths are relative to the project root's `data/` directory unless
//! overridden with `HOUSE_PRICE_DATA_DIR`.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "HOUSE_PRICE_DATA_DIR";

/// File name of the cleaned historical housing dataset.
pub const HOUSING_FILE: &str = "housing.csv";

/// File name of the county boundary and aggregate dataset.
pub const REGIONS_FILE: &str = "regions.geojson";

/// File name of the serialized model.
pub const MODEL_FILE: &str = "model.json";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
#[must_use]
pub fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Returns the data directory from `HOUSE_PRICE_DATA_DIR`, falling back
/// to [`data_dir`].
#[must_use]
pub fn data_dir_from_env() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV)
        .filter(|dir| !dir.is_empty())
        .map_or_else(data_dir, PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_holds_artifacts() {
        let dir = data_dir();
        for file in [HOUSING_FILE, REGIONS_FILE, MODEL_FILE] {
            assert!(dir.join(file).is_file(), "missing {file} in {}", dir.display());
        }
    }

    #[test]
    fn project_root_has_workspace_manifest() {
        assert!(project_root().join("Cargo.toml").is_file());
        assert!(project_root().join("packages").is_dir());
    }
}
