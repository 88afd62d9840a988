//! # ISO 3166 Code Newtypes
//!
//! Validated identifiers for the three code spaces the directory works
//! with. Each is a distinct type: a [`CountryCode`] cannot be passed where
//! a [`RegionCode`] is expected.
//!
//! ## Validation
//!
//! Construction trims surrounding whitespace, upper-cases ASCII letters and
//! rejects anything outside the ISO format:
//!
//! - [`CountryCode`]: ISO 3166-1 alpha-2, two letters (`US`).
//! - [`Alpha3Code`]: ISO 3166-1 alpha-3, three letters (`USA`).
//! - [`RegionCode`]: ISO 3166-2, `CC-XXX` with a 1-3 character
//!   alphanumeric local part (`US-CA`, `FR-971`, `GB-ENG`).
//!
//! Deserialization routes through the same constructors, so a dataset with
//! a malformed key is rejected at load time.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Implements `Deserialize` for a string newtype by deserializing a plain
/// `String` and passing it through the type's `new()` constructor.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Implements the string-view traits shared by every code newtype.
macro_rules! impl_code_str {
    ($ty:ident) => {
        impl $ty {
            /// Access the normalized code string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

fn is_letters(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_alphabetic())
}

// ---------------------------------------------------------------------------
// Alpha-2
// ---------------------------------------------------------------------------

/// ISO 3166-1 alpha-2 country code, stored upper-case.
///
/// This is the primary key of the directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CountryCode(String);

impl_validating_deserialize!(CountryCode);
impl_code_str!(CountryCode);

impl CountryCode {
    /// Create an alpha-2 code, normalizing case.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCountryCode`] unless the trimmed
    /// input is exactly two ASCII letters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if !is_letters(trimmed, 2) {
            return Err(ValidationError::InvalidCountryCode(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }
}

// ---------------------------------------------------------------------------
// Alpha-3
// ---------------------------------------------------------------------------

/// ISO 3166-1 alpha-3 country code, stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Alpha3Code(String);

impl_validating_deserialize!(Alpha3Code);
impl_code_str!(Alpha3Code);

impl Alpha3Code {
    /// Create an alpha-3 code, normalizing case.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAlpha3Code`] unless the trimmed
    /// input is exactly three ASCII letters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if !is_letters(trimmed, 3) {
            return Err(ValidationError::InvalidAlpha3Code(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }
}

// ---------------------------------------------------------------------------
// Region code (ISO 3166-2)
// ---------------------------------------------------------------------------

/// ISO 3166-2 subdivision code of the form `CC-XXX`, stored upper-case.
///
/// The first two characters are always the owning country's alpha-2 code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RegionCode(String);

impl_validating_deserialize!(RegionCode);
impl_code_str!(RegionCode);

impl RegionCode {
    /// Create a region code from its composite form, normalizing case.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRegionCode`] if the input is not
    /// two letters, a hyphen, and a 1-3 character alphanumeric local part.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        let invalid = || ValidationError::InvalidRegionCode(trimmed.to_string());
        let (country, local) = trimmed.split_once('-').ok_or_else(invalid)?;
        if !is_letters(country, 2) || !is_local_part(local) {
            return Err(invalid());
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Build a region code from a country and a local subdivision code.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRegionCode`] if `local` is not a
    /// valid local part.
    pub fn from_parts(country: &CountryCode, local: &str) -> Result<Self, ValidationError> {
        Self::new(format!("{}-{}", country.as_str(), local.trim()))
    }

    /// The owning country's alpha-2 code.
    pub fn country(&self) -> CountryCode {
        CountryCode(self.0[..2].to_string())
    }

    /// The local subdivision code after the hyphen (`CA` in `US-CA`).
    pub fn local(&self) -> &str {
        &self.0[3..]
    }

    /// Whether this region belongs to `country`.
    pub fn belongs_to(&self, country: &CountryCode) -> bool {
        self.0.starts_with(country.as_str()) && self.0.as_bytes().get(2) == Some(&b'-')
    }
}

fn is_local_part(s: &str) -> bool {
    (1..=3).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphanumeric())
}
