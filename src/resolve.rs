//! Tiered candidate search for a driver's statistics file.
//!
//! The search is first-match-wins across a fixed tier order, and within each
//! tier the stats directories are scanned in priority order before the next
//! tier is tried:
//!
//! 1. `<canonical slug>.json` (explicit roster slug, else name-derived slug)
//! 2. `<name-derived slug>.json`, only when an explicit slug was used in
//!    step 1 and the two disagree
//! 3. `<number>.json`
//! 4. `<lowercased code>.json`
//!
//! Candidates are read directly rather than existence-checked first; a
//! `NotFound` read is a normal miss, any other read error means the file is
//! there but unusable and is surfaced to the validator as-is.

use crate::roster::Driver;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Which rung of the search ladder produced the hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Canonical `<slug>.json` (step 1). Never repaired, even when the hit
    /// came from a secondary stats directory.
    Slug,
    /// Any fallback name (steps 2-4). Repair candidates.
    Alternate,
}

/// A located candidate file together with its raw contents (or the read error
/// that proves it exists but cannot be used).
#[derive(Debug)]
pub struct Located {
    pub path: PathBuf,
    pub tier: Tier,
    pub raw: io::Result<String>,
}

/// Find the first statistics file matching any of the driver's identity
/// fields, or `None` when no tier yields a candidate.
pub fn locate(driver: &Driver, stats_dirs: &[PathBuf]) -> Option<Located> {
    let canonical = driver.canonical_slug();

    if !canonical.is_empty() {
        if let Some(hit) = scan(stats_dirs, &canonical, Tier::Slug) {
            return Some(hit);
        }
    }

    // Roster slugs drift from name-derived slugs; retry with the name variant
    // when an explicit slug lost tier 1.
    if driver.has_explicit_slug() {
        let variant = driver.name_slug();
        if !variant.is_empty() && variant != canonical {
            if let Some(hit) = scan(stats_dirs, &variant, Tier::Alternate) {
                return Some(hit);
            }
        }
    }

    if let Some(number) = driver.number_token() {
        if let Some(hit) = scan(stats_dirs, number, Tier::Alternate) {
            return Some(hit);
        }
    }

    if let Some(code) = driver.code_token() {
        if let Some(hit) = scan(stats_dirs, &code, Tier::Alternate) {
            return Some(hit);
        }
    }

    None
}

/// Scan every stats directory, in order, for `<stem>.json`.
fn scan(stats_dirs: &[PathBuf], stem: &str, tier: Tier) -> Option<Located> {
    for dir in stats_dirs {
        let path = dir.join(format!("{stem}.json"));
        match fs::read_to_string(&path) {
            Ok(raw) => {
                return Some(Located {
                    path,
                    tier,
                    raw: Ok(raw),
                });
            }
            Err(err) if err.kind() == ErrorKind::NotFound => continue,
            Err(err) => {
                return Some(Located {
                    path,
                    tier,
                    raw: Err(err),
                });
            }
        }
    }
    None
}

/// Canonical destination for a driver's statistics under a stats directory.
pub fn canonical_path(stats_dir: &Path, slug: &str) -> PathBuf {
    stats_dir.join(format!("{slug}.json"))
}
