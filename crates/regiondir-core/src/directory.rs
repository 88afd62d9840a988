//! # Region Directory
//!
//! The in-memory lookup table over a [`Dataset`]. Two operations resolve
//! user input to records:
//!
//! - [`Directory::country`] takes an alpha-2 code, an alpha-3 code, or a
//!   display name.
//! - [`Directory::subdivision`] takes either a composite region code
//!   (`"US-CA"`) or a country plus a subdivision code or name.
//!
//! A miss is `None`, never an error. A hit promotes the matched entries from
//! Partial to Full in place and returns a clone of the Full record.
//!
//! ## Resolution Order
//!
//! Countries: alpha-2 code, then alpha-3 code, then folded display name.
//! Subdivisions: local or full region code, then folded display name.
//! Name matches take the first entry in code order, so duplicated names
//! resolve deterministically (`FR` / `"Guadeloupe"` is `FR-971`, not
//! `FR-GP`).
//!
//! ## Concurrency
//!
//! The country map sits behind a `parking_lot::RwLock`. Lookups resolve
//! under the read lock and return directly when the target is already Full;
//! only a first-time hit takes the write lock. Promotion is idempotent, so
//! two threads racing on the same entry both observe the same Full record.
//! The alpha-3 index is immutable and read without locking.

use parking_lot::{RwLock, RwLockReadGuard};
use serde::Serialize;

use crate::config::DatasetSource;
use crate::dataset::{Alpha3Index, Dataset};
use crate::error::DatasetError;
use crate::identity::{Alpha3Code, CountryCode, RegionCode};
use crate::record::{
    CountryEntry, CountryInfo, CountryMap, SubdivisionEntry, SubdivisionInfo, SubdivisionMap,
};
use crate::text::{fold_name, matches_folded};

/// Counts describing a directory and how much of it has been promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    /// Number of countries.
    pub countries: usize,
    /// Number of subdivisions across all countries.
    pub subdivisions: usize,
    /// Number of alpha-3 codes in the index.
    pub alpha3_codes: usize,
    /// Countries currently in Full form.
    pub full_countries: usize,
    /// Subdivisions currently in Full form.
    pub full_subdivisions: usize,
}

/// ISO 3166 country and subdivision directory.
///
/// Built once and passed to whatever needs it; there is no global instance.
#[derive(Debug)]
pub struct Directory {
    countries: RwLock<CountryMap>,
    codes: Alpha3Index,
}

impl Directory {
    /// Build a directory over an already validated dataset.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            countries: RwLock::new(dataset.countries),
            codes: dataset.codes,
        }
    }

    /// Build a directory over the compiled-in ISO 3166 tables.
    ///
    /// # Errors
    ///
    /// Fails only if the bundled tables are corrupt.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::open(&DatasetSource::Bundled)
    }

    /// Build a directory from a configured source.
    ///
    /// # Errors
    ///
    /// Propagates loading and validation failures.
    pub fn open(source: &DatasetSource) -> Result<Self, DatasetError> {
        let dataset = source.load()?;
        tracing::debug!(
            %source,
            countries = dataset.countries.len(),
            subdivisions = dataset.subdivision_count(),
            alpha3_codes = dataset.codes.len(),
            "region directory loaded"
        );
        Ok(Self::new(dataset))
    }

    /// Look up a country by alpha-2 code, alpha-3 code, or display name.
    ///
    /// Codes match case-insensitively; names match after case folding.
    /// On a hit the country is promoted to Full. Its subdivisions keep
    /// their own state.
    pub fn country(&self, code_or_name: &str) -> Option<CountryInfo> {
        let query = code_or_name.trim();
        if query.is_empty() {
            return None;
        }

        let code = {
            let data = self.countries.read();
            let Some(code) = self.resolve_country(&data, query) else {
                tracing::trace!(query, "country lookup missed");
                return None;
            };
            if let Some(info) = data.get(&code).and_then(CountryEntry::as_full) {
                return Some(info.clone());
            }
            code
        };

        let mut data = self.countries.write();
        let entry = data.get_mut(&code)?;
        if entry.promote(&code) {
            tracing::debug!(%code, "promoted country");
        }
        entry.as_full().cloned()
    }

    /// Look up a subdivision.
    ///
    /// With `subdivision_code_or_name` absent, `country_or_region` must be a
    /// composite region code such as `"US-CA"`. Otherwise
    /// `country_or_region` is resolved like [`Directory::country`] and the
    /// second argument is matched within that country, first as a local or
    /// full region code (`"CA"`, `"US-CA"`), then as a display name.
    ///
    /// On a hit both the subdivision and its country are promoted to Full.
    /// A miss promotes nothing.
    pub fn subdivision(
        &self,
        country_or_region: &str,
        subdivision_code_or_name: Option<&str>,
    ) -> Option<SubdivisionInfo> {
        let (country_query, sub_query) = match subdivision_code_or_name {
            Some(sub) => (country_or_region.trim(), sub.trim()),
            None => split_composite(country_or_region)?,
        };
        if country_query.is_empty() || sub_query.is_empty() {
            return None;
        }

        let (code, region) = {
            let data = self.countries.read();
            let Some((code, region)) = self
                .resolve_country(&data, country_query)
                .and_then(|code| {
                    let region = resolve_subdivision(&code, data.get(&code)?.sub(), sub_query)?;
                    Some((code, region))
                })
            else {
                tracing::trace!(country_query, sub_query, "subdivision lookup missed");
                return None;
            };
            if let Some(entry) = data.get(&code).filter(|entry| entry.is_full()) {
                if let Some(info) = entry.sub().get(&region).and_then(SubdivisionEntry::as_full) {
                    return Some(info.clone());
                }
            }
            (code, region)
        };

        let mut data = self.countries.write();
        let country = data.get_mut(&code)?;
        if country.promote(&code) {
            tracing::debug!(%code, "promoted country");
        }
        let country_name = country.name().to_string();
        let sub = country.sub_mut().get_mut(&region)?;
        if sub.promote(&region, &country_name) {
            tracing::debug!(region_code = %region, "promoted subdivision");
        }
        sub.as_full().cloned()
    }

    /// Read access to the country map, including each entry's current
    /// Partial/Full state.
    ///
    /// The guard holds the read lock. Drop it before calling
    /// [`Directory::country`] or [`Directory::subdivision`] on the same
    /// thread; a lookup that needs to promote would otherwise wait on it.
    pub fn data(&self) -> RwLockReadGuard<'_, CountryMap> {
        self.countries.read()
    }

    /// The alpha-3 → alpha-2 index.
    pub fn codes(&self) -> &Alpha3Index {
        &self.codes
    }

    /// Resolve an alpha-3 code to its alpha-2 code.
    pub fn alpha2(&self, alpha3: &str) -> Option<CountryCode> {
        let alpha3 = Alpha3Code::new(alpha3).ok()?;
        self.codes.get(&alpha3).cloned()
    }

    /// Number of countries.
    pub fn len(&self) -> usize {
        self.countries.read().len()
    }

    /// Whether the directory holds no countries.
    pub fn is_empty(&self) -> bool {
        self.countries.read().is_empty()
    }

    /// Current counts, including promotion progress.
    pub fn stats(&self) -> DirectoryStats {
        let data = self.countries.read();
        let mut stats = DirectoryStats {
            countries: data.len(),
            subdivisions: 0,
            alpha3_codes: self.codes.len(),
            full_countries: 0,
            full_subdivisions: 0,
        };
        for entry in data.values() {
            stats.full_countries += usize::from(entry.is_full());
            stats.subdivisions += entry.sub().len();
            stats.full_subdivisions += entry.sub().values().filter(|s| s.is_full()).count();
        }
        stats
    }

    fn resolve_country(&self, data: &CountryMap, query: &str) -> Option<CountryCode> {
        if let Ok(code) = CountryCode::new(query) {
            if data.contains_key(&code) {
                return Some(code);
            }
        }
        if let Ok(alpha3) = Alpha3Code::new(query) {
            if let Some(code) = self.codes.get(&alpha3) {
                return Some(code.clone());
            }
        }
        let folded = fold_name(query);
        data.iter()
            .find(|(_, entry)| matches_folded(entry.name(), &folded))
            .map(|(code, _)| code.clone())
    }
}

impl From<Dataset> for Directory {
    fn from(dataset: Dataset) -> Self {
        Self::new(dataset)
    }
}

/// Split `"US-CA"` into `("US", "CA")` at the first hyphen.
fn split_composite(input: &str) -> Option<(&str, &str)> {
    let (country, local) = input.trim().split_once('-')?;
    Some((country.trim(), local.trim()))
}

/// Code match first, name match as fallback.
fn resolve_subdivision(
    country: &CountryCode,
    sub: &SubdivisionMap,
    query: &str,
) -> Option<RegionCode> {
    let by_local = RegionCode::from_parts(country, query)
        .ok()
        .filter(|region| sub.contains_key(region));
    let by_full = || {
        RegionCode::new(query)
            .ok()
            .filter(|region| region.belongs_to(country) && sub.contains_key(region))
    };
    let by_name = || {
        let folded = fold_name(query);
        sub.iter()
            .find(|(_, entry)| matches_folded(entry.name(), &folded))
            .map(|(region, _)| region.clone())
    };
    by_local.or_else(by_full).or_else(by_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetFormat;

    /// `XT-AB` is named "CD", the code of its sibling `XT-CD`.
    const COLLIDING: &str = r#"{
        "countries": {
            "XT": {"name": "Testland", "sub": {
                "XT-AB": {"type": "province", "name": "CD"},
                "XT-CD": {"type": "province", "name": "Alpha"},
                "XT-EF": {"type": "province", "name": "Twin"},
                "XT-GH": {"type": "region", "name": "Twin"}
            }},
            "XU": {"name": "Otherland"}
        },
        "codes": {"XTT": "XT", "XUU": "XU"}
    }"#;

    fn colliding() -> Directory {
        Directory::new(Dataset::parse(COLLIDING, DatasetFormat::Json).unwrap())
    }

    #[test]
    fn country_by_code_name_and_alpha3() {
        let dir = colliding();
        let by_code = dir.country("XT").unwrap();
        assert_eq!(by_code.code.as_str(), "XT");
        assert_eq!(by_code.name, "Testland");
        assert_eq!(dir.country("xt").unwrap(), by_code);
        assert_eq!(dir.country("testLAND").unwrap(), by_code);
        assert_eq!(dir.country("XTT").unwrap(), by_code);
        assert_eq!(dir.country("  xtt ").unwrap(), by_code);
    }

    #[test]
    fn country_miss_is_none() {
        let dir = colliding();
        assert!(dir.country("ZZ").is_none());
        assert!(dir.country("ZZZ").is_none());
        assert!(dir.country("").is_none());
        assert!(dir.country("   ").is_none());
        assert!(dir.country("Testlan").is_none());
    }

    #[test]
    fn country_promotes_only_the_hit() {
        let dir = colliding();
        dir.country("XT").unwrap();
        let data = dir.data();
        assert!(data["XT"].is_full());
        assert!(!data["XU"].is_full());
        assert!(data["XT"].sub().values().all(|s| !s.is_full()));
    }

    #[test]
    fn code_match_beats_name_match() {
        let dir = colliding();
        let hit = dir.subdivision("XT", Some("CD")).unwrap();
        assert_eq!(hit.region_code.as_str(), "XT-CD");
        assert_eq!(hit.name, "Alpha");

        let lower = dir.subdivision("XT", Some("cd ")).unwrap();
        assert_eq!(lower.region_code.as_str(), "XT-CD");
    }

    #[test]
    fn name_fallback_when_no_code_matches() {
        let dir = colliding();
        let hit = dir.subdivision("XT", Some("alpha")).unwrap();
        assert_eq!(hit.region_code.as_str(), "XT-CD");
    }

    #[test]
    fn duplicate_names_take_lowest_code() {
        let dir = colliding();
        let hit = dir.subdivision("XT", Some("Twin")).unwrap();
        assert_eq!(hit.region_code.as_str(), "XT-EF");
        assert_eq!(hit.kind, "province");
    }

    #[test]
    fn full_region_code_as_second_argument() {
        let dir = colliding();
        let hit = dir.subdivision("Testland", Some("xt-ab")).unwrap();
        assert_eq!(hit.region_code.as_str(), "XT-AB");
        assert_eq!(hit.code, "AB");
        assert!(dir.subdivision("XU", Some("XT-AB")).is_none());
    }

    #[test]
    fn composite_shape() {
        let dir = colliding();
        let hit = dir.subdivision("XT-AB", None).unwrap();
        assert_eq!(hit.country_code.as_str(), "XT");
        assert_eq!(hit.country_name, "Testland");
        assert_eq!(hit.code, "AB");
        assert!(dir.subdivision("XTAB", None).is_none());
        assert!(dir.subdivision("XT-", None).is_none());
        assert!(dir.subdivision("-AB", None).is_none());
    }

    #[test]
    fn subdivision_promotes_country_too() {
        let dir = colliding();
        dir.subdivision("XT-AB", None).unwrap();
        let data = dir.data();
        assert!(data["XT"].is_full());
        assert!(data["XT"].sub()["XT-AB"].is_full());
        assert!(!data["XT"].sub()["XT-CD"].is_full());
    }

    #[test]
    fn subdivision_miss_promotes_nothing() {
        let dir = colliding();
        assert!(dir.subdivision("XT", Some("Nowhere")).is_none());
        assert!(dir.subdivision("XU", Some("AB")).is_none());
        assert!(dir.subdivision("ZZ", Some("AB")).is_none());
        assert!(dir.subdivision("XT", Some("")).is_none());
        assert_eq!(dir.stats().full_countries, 0);
        assert_eq!(dir.stats().full_subdivisions, 0);
    }

    #[test]
    fn repeated_lookups_are_stable() {
        let dir = colliding();
        let first = dir.subdivision("XT-CD", None).unwrap();
        let second = dir.subdivision("XT", Some("Alpha")).unwrap();
        assert_eq!(first, second);

        let country_first = dir.country("XT").unwrap();
        let country_second = dir.country("XT").unwrap();
        assert_eq!(country_first, country_second);
        assert!(country_second.sub[&first.region_code].is_full());
    }

    #[test]
    fn stats_track_promotion() {
        let dir = colliding();
        let before = dir.stats();
        assert_eq!(
            before,
            DirectoryStats {
                countries: 2,
                subdivisions: 4,
                alpha3_codes: 2,
                full_countries: 0,
                full_subdivisions: 0,
            }
        );
        dir.subdivision("XT-AB", None);
        dir.subdivision("XT-CD", None);
        dir.country("XU");
        let after = dir.stats();
        assert_eq!(after.full_countries, 2);
        assert_eq!(after.full_subdivisions, 2);
    }

    #[test]
    fn alpha2_and_codes() {
        let dir = colliding();
        assert_eq!(dir.alpha2("xtt").unwrap().as_str(), "XT");
        assert!(dir.alpha2("XT").is_none());
        assert!(dir.alpha2("QQQ").is_none());
        assert_eq!(dir.codes().len(), 2);
        assert_eq!(dir.len(), 2);
        assert!(!dir.is_empty());
    }

    #[test]
    fn directory_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Directory>();
    }
}
