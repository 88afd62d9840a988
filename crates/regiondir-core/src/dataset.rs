//! # Reference Dataset
//!
//! The static tables a [`Directory`](crate::Directory) is built from: the
//! country map (ISO 3166-1 names with their ISO 3166-2 subdivisions) and the
//! alpha-3 index.
//!
//! ## Sources
//!
//! - **Bundled.** `data/countries.json` and `data/alpha3.json`, compiled in.
//!   Generated from the Debian `iso-codes` ISO 3166-1/3166-2 tables.
//! - **Single file.** A JSON or YAML document with top-level `countries`
//!   and `codes` keys. Format is chosen by extension.
//! - **Directory.** `countries.{json,yaml,yml}` plus `alpha3.{json,yaml,yml}`,
//!   the same two-table layout as the bundled data.
//!
//! ## Validation
//!
//! Every load path ends in [`Dataset::validate`]. Malformed codes are
//! already rejected during deserialization by the validating newtypes.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;
use crate::identity::{Alpha3Code, CountryCode};
use crate::record::{CountryEntry, CountryMap, SubdivisionEntry};

/// Bundled country table.
const COUNTRIES_JSON: &str = include_str!("../data/countries.json");

/// Bundled alpha-3 index.
const ALPHA3_JSON: &str = include_str!("../data/alpha3.json");

/// Alpha-3 → alpha-2 index.
pub type Alpha3Index = BTreeMap<Alpha3Code, CountryCode>;

/// Serialization format of a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl DatasetFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    fn parse<T: DeserializeOwned>(self, text: &str) -> Result<T, DatasetError> {
        Ok(match self {
            Self::Json => serde_json::from_str(text)?,
            Self::Yaml => serde_yaml::from_str(text)?,
        })
    }
}

/// The complete reference data for one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Countries keyed by alpha-2 code.
    pub countries: CountryMap,
    /// Alpha-3 → alpha-2 index.
    #[serde(default)]
    pub codes: Alpha3Index,
}

impl Dataset {
    /// Load the compiled-in ISO 3166 tables.
    ///
    /// # Errors
    ///
    /// Fails only if the bundled tables are corrupt.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_tables(COUNTRIES_JSON, ALPHA3_JSON, DatasetFormat::Json)
    }

    /// Build a dataset from its two tables, both in `format`.
    ///
    /// # Errors
    ///
    /// Returns a decoding error or the first invariant violation found.
    pub fn from_tables(
        countries: &str,
        codes: &str,
        format: DatasetFormat,
    ) -> Result<Self, DatasetError> {
        let dataset = Self {
            countries: format.parse(countries)?,
            codes: format.parse(codes)?,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Parse a single-document dataset (`countries` + `codes`).
    ///
    /// # Errors
    ///
    /// Returns a decoding error or the first invariant violation found.
    pub fn parse(text: &str, format: DatasetFormat) -> Result<Self, DatasetError> {
        let dataset: Self = format.parse(text)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Load a dataset from a file or a two-table directory.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Io`] if a file cannot be read,
    /// [`DatasetError::UnsupportedFormat`] for an unknown extension,
    /// [`DatasetError::MissingTable`] for an incomplete directory, or a
    /// decoding/validation error.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        if path.is_dir() {
            return Self::from_dir(path);
        }
        let format = DatasetFormat::from_path(path)
            .ok_or_else(|| DatasetError::UnsupportedFormat(path.to_path_buf()))?;
        let text = read_file(path)?;
        let dataset = Self::parse(&text, format)?;
        tracing::debug!(
            path = %path.display(),
            countries = dataset.countries.len(),
            "loaded dataset file"
        );
        Ok(dataset)
    }

    fn from_dir(dir: &Path) -> Result<Self, DatasetError> {
        let (countries_path, format) = find_table(dir, "countries")?;
        let (codes_path, codes_format) = find_table(dir, "alpha3")?;
        let dataset = Self {
            countries: format.parse(&read_file(&countries_path)?)?,
            codes: codes_format.parse(&read_file(&codes_path)?)?,
        };
        dataset.validate()?;
        tracing::debug!(
            dir = %dir.display(),
            countries = dataset.countries.len(),
            "loaded dataset directory"
        );
        Ok(dataset)
    }

    /// Check the cross-table invariants.
    ///
    /// - Pre-promoted entries carry the code of the key they are filed under.
    /// - Pre-promoted subdivisions carry their owning country's name.
    /// - Every region code is prefixed by its owning country's code.
    /// - Every alpha-3 code maps to a country in the dataset.
    ///
    /// # Errors
    ///
    /// Returns the first violation in key order.
    pub fn validate(&self) -> Result<(), DatasetError> {
        for (code, entry) in &self.countries {
            if let CountryEntry::Full(info) = entry {
                if &info.code != code {
                    return Err(DatasetError::MismatchedCode {
                        key: code.to_string(),
                        found: info.code.to_string(),
                    });
                }
            }
            for (region, sub) in entry.sub() {
                if !region.belongs_to(code) {
                    return Err(DatasetError::ForeignSubdivision {
                        country: code.to_string(),
                        region: region.to_string(),
                    });
                }
                if let SubdivisionEntry::Full(info) = sub {
                    let found = if &info.region_code != region {
                        Some(info.region_code.as_str())
                    } else if &info.country_code != code {
                        Some(info.country_code.as_str())
                    } else if info.code != region.local() {
                        Some(info.code.as_str())
                    } else {
                        None
                    };
                    if let Some(found) = found {
                        return Err(DatasetError::MismatchedCode {
                            key: region.to_string(),
                            found: found.to_owned(),
                        });
                    }
                    if info.country_name != entry.name() {
                        return Err(DatasetError::MismatchedCountryName {
                            region: region.to_string(),
                            found: info.country_name.clone(),
                            expected: entry.name().to_owned(),
                        });
                    }
                }
            }
        }
        for (alpha3, alpha2) in &self.codes {
            if !self.countries.contains_key(alpha2) {
                return Err(DatasetError::DanglingAlpha3 {
                    alpha3: alpha3.to_string(),
                    alpha2: alpha2.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Total number of subdivisions across all countries.
    pub fn subdivision_count(&self) -> usize {
        self.countries.values().map(|c| c.sub().len()).sum()
    }
}

fn read_file(path: &Path) -> Result<String, DatasetError> {
    std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn find_table(
    dir: &Path,
    table: &'static str,
) -> Result<(std::path::PathBuf, DatasetFormat), DatasetError> {
    ["json", "yaml", "yml"]
        .iter()
        .map(|ext| dir.join(format!("{table}.{ext}")))
        .find(|candidate| candidate.is_file())
        .and_then(|path| DatasetFormat::from_path(&path).map(|format| (path, format)))
        .ok_or_else(|| DatasetError::MissingTable {
            dir: dir.to_path_buf(),
            table,
        })
}
