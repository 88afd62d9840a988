//! # regiondir-core — ISO 3166 Region Directory
//!
//! An in-memory reference table of countries (ISO 3166-1) and their
//! subdivisions (ISO 3166-2), with an alpha-3 → alpha-2 index.
//!
//! ```no_run
//! use regiondir_core::Directory;
//!
//! let dir = Directory::bundled()?;
//! let us = dir.country("United States").expect("bundled");
//! assert_eq!(us.code.as_str(), "US");
//!
//! let ca = dir.subdivision("US-CA", None).expect("bundled");
//! assert_eq!(ca.region_code.as_str(), "US-CA");
//! assert_eq!(dir.subdivision("usa", Some("California")), Some(ca));
//! # Ok::<(), regiondir_core::DatasetError>(())
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **Partial/Full records.** Entries load in Partial form and are promoted
//!    to Full in place by the first lookup that returns them. Promotion is
//!    one-way and independent per entry.
//!
//! 2. **Misses are `None`.** Lookups never fail. Only dataset loading
//!    returns errors.
//!
//! 3. **Newtype codes.** [`CountryCode`], [`Alpha3Code`], [`RegionCode`] are
//!    validated at construction and at deserialization.
//!
//! 4. **No global instance.** A [`Directory`] is built once and passed to
//!    its consumers. It is `Send + Sync`.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Ordered maps everywhere, so iteration and output are deterministic.

pub mod config;
pub mod dataset;
pub mod directory;
pub mod error;
pub mod identity;
pub mod record;
pub mod text;

// Re-export primary types for ergonomic imports.
pub use config::{DatasetSource, DATASET_ENV_VAR};
pub use dataset::{Alpha3Index, Dataset, DatasetFormat};
pub use directory::{Directory, DirectoryStats};
pub use error::{DatasetError, ValidationError};
pub use identity::{Alpha3Code, CountryCode, RegionCode};
pub use record::{
    CountryEntry, CountryInfo, CountryMap, CountryPartial, SubdivisionEntry, SubdivisionInfo,
    SubdivisionMap, SubdivisionPartial,
};
