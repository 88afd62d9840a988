//! # regiondir-cli — Region Directory Command-Line Interface
//!
//! A clap front-end over `regiondir-core`. Lookup results go to stdout as
//! JSON; diagnostics go to stderr through `tracing`.
//!
//! ## Subcommands
//!
//! - `country` — country by alpha-2, alpha-3, or name
//! - `subdivision` — subdivision by region code, or country + code/name
//! - `codes` — the alpha-3 index, or one alpha-3 → alpha-2 resolution
//! - `stats` — directory counts
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers take a built
//!   `Directory` and a writer so they can be tested without a process.
//! - No lookup logic here. Everything delegates to `regiondir-core`.

pub mod lookup;
