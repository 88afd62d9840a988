//! Dataset source selection.
//!
//! A directory is built either from the compiled-in tables or from a
//! dataset file/directory on disk. The environment variable
//! [`DATASET_ENV_VAR`] selects a path; callers with their own flag (the CLI's
//! `--dataset`) pass [`DatasetSource::Path`] directly.

use std::path::PathBuf;

use crate::dataset::Dataset;
use crate::error::DatasetError;

/// Environment variable naming a dataset file or directory.
pub const DATASET_ENV_VAR: &str = "REGIONDIR_DATASET";

/// Where a directory's reference data comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatasetSource {
    /// The compiled-in ISO 3166 tables.
    #[default]
    Bundled,
    /// A dataset file (`.json`, `.yaml`, `.yml`) or two-table directory.
    Path(PathBuf),
}

impl DatasetSource {
    /// Read [`DATASET_ENV_VAR`]. Unset or blank selects the bundled tables.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(DATASET_ENV_VAR).ok())
    }

    fn from_env_value(value: Option<String>) -> Self {
        match value {
            Some(path) if !path.trim().is_empty() => Self::Path(PathBuf::from(path.trim())),
            _ => Self::Bundled,
        }
    }

    /// Explicit path if given, otherwise the environment.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        explicit.map_or_else(Self::from_env, Self::Path)
    }

    /// Load the dataset this source names.
    ///
    /// # Errors
    ///
    /// Propagates any [`DatasetError`] from loading or validation.
    pub fn load(&self) -> Result<Dataset, DatasetError> {
        match self {
            Self::Bundled => Dataset::bundled(),
            Self::Path(path) => Dataset::from_path(path),
        }
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bundled => f.write_str("bundled"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_env_selects_bundled() {
        assert_eq!(DatasetSource::from_env_value(None), DatasetSource::Bundled);
        assert_eq!(
            DatasetSource::from_env_value(Some("  ".into())),
            DatasetSource::Bundled
        );
    }

    #[test]
    fn env_value_selects_path() {
        assert_eq!(
            DatasetSource::from_env_value(Some(" /srv/iso.yaml ".into())),
            DatasetSource::Path(PathBuf::from("/srv/iso.yaml"))
        );
    }

    #[test]
    fn explicit_path_wins() {
        let source = DatasetSource::resolve(Some(PathBuf::from("custom.json")));
        assert_eq!(source, DatasetSource::Path(PathBuf::from("custom.json")));
    }

    #[test]
    fn display() {
        assert_eq!(DatasetSource::Bundled.to_string(), "bundled");
        assert_eq!(
            DatasetSource::Path(PathBuf::from("a/b.json")).to_string(),
            "a/b.json"
        );
    }

    #[test]
    fn bundled_loads() {
        let dataset = DatasetSource::Bundled.load().unwrap();
        assert!(dataset.countries.contains_key("PK"));
    }
}
