//! # Error Types
//!
//! Lookups never fail: a miss is `None`. The only fallible surfaces are
//! identifier construction ([`ValidationError`]) and dataset loading
//! ([`DatasetError`]). Both use `thiserror` for derive-based `Display`
//! and `Error` implementations.

use std::path::PathBuf;

use thiserror::Error;

/// An identifier string did not match its ISO 3166 format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Not two ASCII letters.
    #[error("invalid ISO 3166-1 alpha-2 code: {0:?}")]
    InvalidCountryCode(String),

    /// Not three ASCII letters.
    #[error("invalid ISO 3166-1 alpha-3 code: {0:?}")]
    InvalidAlpha3Code(String),

    /// Not `CC-XXX` with a 1-3 character alphanumeric local part.
    #[error("invalid ISO 3166-2 region code: {0:?}")]
    InvalidRegionCode(String),
}

/// Failure while loading or validating a dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Reading a dataset file failed.
    #[error("failed to read dataset file {}: {source}", .path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON decoding failed.
    #[error("invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML decoding failed.
    #[error("invalid YAML dataset: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension is neither `.json`, `.yaml` nor `.yml`.
    #[error("unsupported dataset format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A dataset directory lacks one of its two tables.
    #[error("dataset directory {} has no {table} table", .dir.display())]
    MissingTable {
        /// The dataset directory.
        dir: PathBuf,
        /// `countries` or `alpha3`.
        table: &'static str,
    },

    /// A subdivision is filed under a country its region code does not name.
    #[error("subdivision {region} is filed under country {country}")]
    ForeignSubdivision {
        /// The owning country key.
        country: String,
        /// The offending region code.
        region: String,
    },

    /// An alpha-3 code points at a country that is not in the dataset.
    #[error("alpha-3 code {alpha3} maps to unknown country {alpha2}")]
    DanglingAlpha3 {
        /// The alpha-3 key.
        alpha3: String,
        /// The missing alpha-2 target.
        alpha2: String,
    },

    /// A pre-promoted entry carries a code that disagrees with its key.
    #[error("entry {key} carries mismatched code {found}")]
    MismatchedCode {
        /// The map key.
        key: String,
        /// The code embedded in the entry.
        found: String,
    },

    /// A pre-promoted subdivision names a different owning country.
    #[error("subdivision {region} carries country name {found:?}, expected {expected:?}")]
    MismatchedCountryName {
        /// The subdivision's region code.
        region: String,
        /// The country name embedded in the entry.
        found: String,
        /// The name of the country the entry is filed under.
        expected: String,
    },
}
