//! # Lookup Subcommands
//!
//! `country`, `subdivision`, `codes`, and `stats`. Each handler writes JSON
//! to the given writer and returns the process exit code: `0` on a hit,
//! [`EXIT_MISS`] when the lookup finds nothing.
//!
//! ## Usage
//!
//! ```bash
//! regiondir country "United States" --no-subdivisions
//! regiondir subdivision US-CA
//! regiondir subdivision usa California
//! regiondir codes DEU
//! regiondir stats
//! ```

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use regiondir_core::Directory;

/// Exit code for a lookup that matched nothing.
pub const EXIT_MISS: u8 = 2;

/// Arguments for the country subcommand.
#[derive(Args, Debug)]
pub struct CountryArgs {
    /// Alpha-2 code, alpha-3 code, or display name.
    pub query: String,

    /// Omit the subdivision map from the output.
    #[arg(long)]
    pub no_subdivisions: bool,
}

/// Arguments for the subdivision subcommand.
#[derive(Args, Debug)]
pub struct SubdivisionArgs {
    /// Composite region code (`US-CA`), or a country code/name when a
    /// second argument is given.
    pub country_or_region: String,

    /// Subdivision code (`CA`, `US-CA`) or display name.
    pub subdivision: Option<String>,
}

/// Arguments for the codes subcommand.
#[derive(Args, Debug)]
pub struct CodesArgs {
    /// Print only the alpha-2 code for this alpha-3 code.
    pub alpha3: Option<String>,
}

/// Serialize `value` as JSON followed by a newline.
pub fn emit<T: Serialize>(out: &mut impl Write, value: &T, compact: bool) -> Result<()> {
    let written = if compact {
        serde_json::to_writer(&mut *out, value)
    } else {
        serde_json::to_writer_pretty(&mut *out, value)
    };
    written.context("failed to serialize output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}

/// Execute the country subcommand.
pub fn run_country(
    args: &CountryArgs,
    dir: &Directory,
    out: &mut impl Write,
    compact: bool,
) -> Result<u8> {
    let Some(mut info) = dir.country(&args.query) else {
        tracing::warn!(query = %args.query, "no matching country");
        return Ok(EXIT_MISS);
    };
    if args.no_subdivisions {
        info.sub.clear();
    }
    emit(out, &info, compact)?;
    Ok(0)
}

/// Execute the subdivision subcommand.
pub fn run_subdivision(
    args: &SubdivisionArgs,
    dir: &Directory,
    out: &mut impl Write,
    compact: bool,
) -> Result<u8> {
    let Some(info) = dir.subdivision(&args.country_or_region, args.subdivision.as_deref()) else {
        tracing::warn!(
            country_or_region = %args.country_or_region,
            subdivision = ?args.subdivision,
            "no matching subdivision"
        );
        return Ok(EXIT_MISS);
    };
    emit(out, &info, compact)?;
    Ok(0)
}

/// Execute the codes subcommand.
pub fn run_codes(
    args: &CodesArgs,
    dir: &Directory,
    out: &mut impl Write,
    compact: bool,
) -> Result<u8> {
    match &args.alpha3 {
        None => emit(out, dir.codes(), compact)?,
        Some(alpha3) => {
            let Some(alpha2) = dir.alpha2(alpha3) else {
                tracing::warn!(%alpha3, "unknown alpha-3 code");
                return Ok(EXIT_MISS);
            };
            emit(out, &alpha2, compact)?;
        }
    }
    Ok(0)
}

/// Execute the stats subcommand.
pub fn run_stats(dir: &Directory, out: &mut impl Write, compact: bool) -> Result<u8> {
    emit(out, &dir.stats(), compact)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> Directory {
        Directory::bundled().unwrap()
    }

    fn output(buf: Vec<u8>) -> serde_json::Value {
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn country_hit_prints_full_record() {
        let dir = bundled();
        let args = CountryArgs {
            query: "PAK".into(),
            no_subdivisions: false,
        };
        let mut buf = Vec::new();
        assert_eq!(run_country(&args, &dir, &mut buf, true).unwrap(), 0);

        let json = output(buf);
        assert_eq!(json["code"], "PK");
        assert_eq!(json["name"], "Pakistan");
        assert_eq!(json["sub"]["PK-SD"]["name"], "Sindh");
        assert!(json["sub"]["PK-SD"].get("regionCode").is_none());
    }

    #[test]
    fn country_without_subdivisions() {
        let dir = bundled();
        let args = CountryArgs {
            query: "Pakistan".into(),
            no_subdivisions: true,
        };
        let mut buf = Vec::new();
        run_country(&args, &dir, &mut buf, true).unwrap();
        assert_eq!(output(buf)["sub"], serde_json::json!({}));
        // The directory itself keeps its subdivisions.
        assert_eq!(dir.country("PK").unwrap().sub.len(), 7);
    }

    #[test]
    fn country_miss_writes_nothing() {
        let dir = bundled();
        let args = CountryArgs {
            query: "ZZ".into(),
            no_subdivisions: false,
        };
        let mut buf = Vec::new();
        assert_eq!(run_country(&args, &dir, &mut buf, false).unwrap(), EXIT_MISS);
        assert!(buf.is_empty());
    }

    #[test]
    fn subdivision_both_shapes() {
        let dir = bundled();
        let composite = SubdivisionArgs {
            country_or_region: "AE-DU".into(),
            subdivision: None,
        };
        let mut buf = Vec::new();
        assert_eq!(run_subdivision(&composite, &dir, &mut buf, true).unwrap(), 0);
        let json = output(buf);
        assert_eq!(json["regionCode"], "AE-DU");
        assert_eq!(json["countryCode"], "AE");
        assert_eq!(json["countryName"], "United Arab Emirates");
        assert_eq!(json["type"], "emirate");

        let split = SubdivisionArgs {
            country_or_region: "AE".into(),
            subdivision: Some("du".into()),
        };
        let mut buf = Vec::new();
        run_subdivision(&split, &dir, &mut buf, true).unwrap();
        assert_eq!(output(buf), json);
    }

    #[test]
    fn subdivision_miss() {
        let dir = bundled();
        let args = SubdivisionArgs {
            country_or_region: "US".into(),
            subdivision: Some("Atlantis".into()),
        };
        let mut buf = Vec::new();
        assert_eq!(run_subdivision(&args, &dir, &mut buf, true).unwrap(), EXIT_MISS);
        assert!(buf.is_empty());
    }

    #[test]
    fn codes_full_index_and_single() {
        let dir = bundled();
        let mut buf = Vec::new();
        run_codes(&CodesArgs { alpha3: None }, &dir, &mut buf, true).unwrap();
        let index = output(buf);
        assert_eq!(index.as_object().unwrap().len(), 249);
        assert_eq!(index["DEU"], "DE");

        let mut buf = Vec::new();
        let args = CodesArgs {
            alpha3: Some("sgp".into()),
        };
        assert_eq!(run_codes(&args, &dir, &mut buf, true).unwrap(), 0);
        assert_eq!(output(buf), serde_json::json!("SG"));

        let mut buf = Vec::new();
        let args = CodesArgs {
            alpha3: Some("QQQ".into()),
        };
        assert_eq!(run_codes(&args, &dir, &mut buf, true).unwrap(), EXIT_MISS);
    }

    #[test]
    fn stats_reflect_lookups() {
        let dir = bundled();
        dir.subdivision("US-NY", None).unwrap();
        let mut buf = Vec::new();
        run_stats(&dir, &mut buf, false).unwrap();
        let json = output(buf);
        assert_eq!(json["countries"], 249);
        assert_eq!(json["full_countries"], 1);
        assert_eq!(json["full_subdivisions"], 1);
    }

    #[test]
    fn pretty_output_is_multiline() {
        let mut buf = Vec::new();
        emit(&mut buf, &serde_json::json!({"a": 1}), false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "{\n  \"a\": 1\n}\n");
    }
}
