//! # Country and Subdivision Records
//!
//! Every directory entry is either *Partial* (display data only) or *Full*
//! (display data plus its canonical code fields). The directory is loaded
//! with Partial entries and promotes them in place the first time a lookup
//! returns them.
//!
//! ## Invariants
//!
//! - Promotion is one-way. There is no method that turns a Full entry back
//!   into a Partial one.
//! - A subdivision's promotion is independent of its country's.
//! - A Full subdivision's `region_code` is prefixed by its `country_code`.
//!
//! ## Wire shape
//!
//! Both variants serialize untagged, with the field names of the ISO 3166-2
//! JSON tables (`type`, `countryName`, `countryCode`, `regionCode`). A Full
//! entry is a Partial entry with extra fields, so deserialization tries
//! Full first.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::identity::{CountryCode, RegionCode};

/// Subdivisions of one country, keyed by composite region code.
pub type SubdivisionMap = BTreeMap<RegionCode, SubdivisionEntry>;

/// All countries, keyed by alpha-2 code.
pub type CountryMap = BTreeMap<CountryCode, CountryEntry>;

// ---------------------------------------------------------------------------
// Subdivisions
// ---------------------------------------------------------------------------

/// Subdivision display data as loaded from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubdivisionPartial {
    /// Category label, lower-case (`"state"`, `"province"`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name.
    pub name: String,
}

/// A subdivision enriched with its codes and owning country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubdivisionInfo {
    /// Category label, lower-case.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name.
    pub name: String,
    /// Display name of the owning country.
    pub country_name: String,
    /// Alpha-2 code of the owning country.
    pub country_code: CountryCode,
    /// Local subdivision code (`CA` for `US-CA`).
    pub code: String,
    /// Composite region code (`US-CA`).
    pub region_code: RegionCode,
}

/// A stored subdivision in either state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubdivisionEntry {
    /// Promoted by a successful lookup.
    Full(SubdivisionInfo),
    /// Not yet returned by any lookup.
    Partial(SubdivisionPartial),
}

impl SubdivisionEntry {
    /// Create a Partial entry.
    pub fn partial(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Partial(SubdivisionPartial {
            kind: kind.into(),
            name: name.into(),
        })
    }

    /// Display name, in either state.
    pub fn name(&self) -> &str {
        match self {
            Self::Full(info) => &info.name,
            Self::Partial(partial) => &partial.name,
        }
    }

    /// Category label, in either state.
    pub fn kind(&self) -> &str {
        match self {
            Self::Full(info) => &info.kind,
            Self::Partial(partial) => &partial.kind,
        }
    }

    /// Whether the entry has been promoted.
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }

    /// The Full record, if promoted.
    pub fn as_full(&self) -> Option<&SubdivisionInfo> {
        match self {
            Self::Full(info) => Some(info),
            Self::Partial(_) => None,
        }
    }

    /// Promote in place. Returns `true` if the entry changed state.
    pub(crate) fn promote(&mut self, region_code: &RegionCode, country_name: &str) -> bool {
        let Self::Partial(partial) = self else {
            return false;
        };
        let info = SubdivisionInfo {
            kind: std::mem::take(&mut partial.kind),
            name: std::mem::take(&mut partial.name),
            country_name: country_name.to_string(),
            country_code: region_code.country(),
            code: region_code.local().to_string(),
            region_code: region_code.clone(),
        };
        *self = Self::Full(info);
        true
    }
}

// ---------------------------------------------------------------------------
// Countries
// ---------------------------------------------------------------------------

/// Country display data as loaded from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountryPartial {
    /// Display name.
    pub name: String,
    /// Subdivisions of this country.
    #[serde(default)]
    pub sub: SubdivisionMap,
}

/// A country enriched with its alpha-2 code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryInfo {
    /// Alpha-2 code.
    pub code: CountryCode,
    /// Display name.
    pub name: String,
    /// Subdivisions of this country, each Partial or Full on its own.
    #[serde(default)]
    pub sub: SubdivisionMap,
}

/// A stored country in either state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountryEntry {
    /// Promoted by a successful lookup.
    Full(CountryInfo),
    /// Not yet returned by any lookup.
    Partial(CountryPartial),
}

impl CountryEntry {
    /// Create a Partial entry with no subdivisions.
    pub fn partial(name: impl Into<String>) -> Self {
        Self::Partial(CountryPartial {
            name: name.into(),
            sub: SubdivisionMap::new(),
        })
    }

    /// Display name, in either state.
    pub fn name(&self) -> &str {
        match self {
            Self::Full(info) => &info.name,
            Self::Partial(partial) => &partial.name,
        }
    }

    /// Subdivisions, in either state.
    pub fn sub(&self) -> &SubdivisionMap {
        match self {
            Self::Full(info) => &info.sub,
            Self::Partial(partial) => &partial.sub,
        }
    }

    /// Mutable subdivisions, in either state.
    pub(crate) fn sub_mut(&mut self) -> &mut SubdivisionMap {
        match self {
            Self::Full(info) => &mut info.sub,
            Self::Partial(partial) => &mut partial.sub,
        }
    }

    /// Whether the entry has been promoted.
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }

    /// The Full record, if promoted.
    pub fn as_full(&self) -> Option<&CountryInfo> {
        match self {
            Self::Full(info) => Some(info),
            Self::Partial(_) => None,
        }
    }

    /// Promote in place. Subdivisions keep their own state.
    /// Returns `true` if the entry changed state.
    pub(crate) fn promote(&mut self, code: &CountryCode) -> bool {
        let Self::Partial(partial) = self else {
            return false;
        };
        let info = CountryInfo {
            code: code.clone(),
            name: std::mem::take(&mut partial.name),
            sub: std::mem::take(&mut partial.sub),
        };
        *self = Self::Full(info);
        true
    }
}
