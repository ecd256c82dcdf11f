//! One audit pass over the roster: locate, validate, and optionally repair
//! each driver's statistics file, then print the tally.
//!
//! The pass is sequential and single-shot. Per-driver failures are recorded
//! and the loop moves on; only the caller's preconditions (roster, stats
//! directory set) can abort a run.

use crate::resolve::{Tier, canonical_path, locate};
use crate::roster::Driver;
use crate::stats::parse_stats;
use anyhow::{Context, Result, bail};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Report-only or apply-repairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Check,
    Fix,
}

impl Mode {
    pub fn is_fix(self) -> bool {
        matches!(self, Mode::Fix)
    }
}

/// Per-driver result of one audit pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Canonical file present and valid.
    Ok,
    /// Valid alternate copied to its canonical name (fix mode only).
    Fixed,
    /// Valid alternate discovered but not copied (dry run, or copy failed).
    AltFound,
    /// No candidate at any tier across any stats directory.
    Missing,
    /// A candidate was found but failed parse or structure checks.
    Invalid,
}

/// Aggregate counters for the summary block. `alt_found` and `copy_failed`
/// are informational; the summary proper reports the first four.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub ok: usize,
    pub fixed: usize,
    pub missing: usize,
    pub invalid: usize,
    pub alt_found: usize,
    pub copy_failed: usize,
}

impl Tally {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Ok => self.ok += 1,
            Outcome::Fixed => self.fixed += 1,
            Outcome::AltFound => self.alt_found += 1,
            Outcome::Missing => self.missing += 1,
            Outcome::Invalid => self.invalid += 1,
        }
    }
}

/// Everything a caller can learn from one pass: counters, the per-driver
/// trail, and the destination directory repairs target.
#[derive(Debug)]
pub struct AuditReport {
    pub tally: Tally,
    pub outcomes: Vec<(String, Outcome)>,
    pub dest_dir: PathBuf,
}

/// Run one audit pass over `drivers`, printing the per-driver trail and the
/// final summary to `out`.
///
/// In fix mode the destination stats directory is created up front (first
/// creatable directory wins, primary first); in dry-run mode nothing on disk
/// is touched and the primary directory is reported as the destination.
pub fn run_audit(
    drivers: &[Driver],
    stats_dirs: &[PathBuf],
    mode: Mode,
    out: &mut dyn Write,
) -> Result<AuditReport> {
    let dest_dir = if mode.is_fix() {
        ensure_stats_dir(stats_dirs)?
    } else {
        match stats_dirs.first() {
            Some(dir) => dir.clone(),
            None => bail!("no stats directories configured"),
        }
    };

    writeln!(
        out,
        "auditing {} driver(s), stats dir: {}",
        drivers.len(),
        dest_dir.display()
    )?;

    let mut tally = Tally::default();
    let mut outcomes = Vec::with_capacity(drivers.len());
    for driver in drivers {
        let outcome = audit_driver(driver, stats_dirs, &dest_dir, mode, &mut tally, out)?;
        tally.record(outcome);
        outcomes.push((driver.label(), outcome));
    }

    print_summary(&tally, mode, out)?;
    Ok(AuditReport {
        tally,
        outcomes,
        dest_dir,
    })
}

fn audit_driver(
    driver: &Driver,
    stats_dirs: &[PathBuf],
    dest_dir: &Path,
    mode: Mode,
    tally: &mut Tally,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let slug = driver.canonical_slug();

    let Some(hit) = locate(driver, stats_dirs) else {
        let wanted = if slug.is_empty() {
            driver.label()
        } else {
            slug.clone()
        };
        writeln!(
            out,
            "MISSING: {} (code:{}, no:{}) - no stats/{}.json at any root",
            driver.label(),
            driver.code_token().as_deref().unwrap_or("-"),
            driver.number_token().unwrap_or("-"),
            wanted,
        )?;
        return Ok(Outcome::Missing);
    };

    let file = file_name(&hit.path);
    let parsed = hit
        .raw
        .map_err(anyhow::Error::from)
        .and_then(|raw| parse_stats(&raw));
    if let Err(err) = parsed {
        let slug_display = if slug.is_empty() { "-" } else { slug.as_str() };
        writeln!(out, "INVALID: {} (slug={}) - {err:#}", file, slug_display)?;
        return Ok(Outcome::Invalid);
    }

    // A record with no canonical identity cannot be filed anywhere better
    // than where its number/code file already lives.
    if hit.tier == Tier::Slug || slug.is_empty() {
        return Ok(Outcome::Ok);
    }

    let target = canonical_path(dest_dir, &slug);
    if hit.path == target {
        return Ok(Outcome::Ok);
    }

    if !mode.is_fix() {
        writeln!(
            out,
            "ALT: {} -> {}.json (run with --fix to copy)",
            file, slug
        )?;
        return Ok(Outcome::AltFound);
    }

    match fs::copy(&hit.path, &target) {
        Ok(_) => {
            writeln!(out, "FIXED: {} -> {}", file, target.display())?;
            Ok(Outcome::Fixed)
        }
        Err(err) => {
            // Non-fatal: logged immediately, counted outside the summary
            // tallies, and the resolution outcome stays alt-found.
            tally.copy_failed += 1;
            writeln!(
                out,
                "COPY FAILED: {} -> {}: {}",
                file,
                target.display(),
                err
            )?;
            Ok(Outcome::AltFound)
        }
    }
}

fn print_summary(tally: &Tally, mode: Mode, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\n=== summary ===")?;
    writeln!(out, "OK:      {}", tally.ok)?;
    writeln!(out, "FIXED:   {}", tally.fixed)?;
    writeln!(out, "MISSING: {}", tally.missing)?;
    writeln!(out, "INVALID: {}", tally.invalid)?;
    if tally.copy_failed > 0 {
        writeln!(out, "copy failures: {}", tally.copy_failed)?;
    }
    if !mode.is_fix() {
        if tally.alt_found > 0 {
            writeln!(
                out,
                "{} alternate file(s) found; re-run with --fix to copy them to their canonical names",
                tally.alt_found
            )?;
        } else {
            writeln!(out, "re-run with --fix to repair alternate files automatically")?;
        }
    }
    Ok(())
}

/// First stats directory that exists or can be created, primary first.
fn ensure_stats_dir(stats_dirs: &[PathBuf]) -> Result<PathBuf> {
    let mut last_err = None;
    for dir in stats_dirs {
        match fs::create_dir_all(dir) {
            Ok(()) => return Ok(dir.clone()),
            Err(err) => last_err = Some((dir.clone(), err)),
        }
    }
    match last_err {
        Some((dir, err)) => {
            Err(err).with_context(|| format!("creating stats directory {}", dir.display()))
        }
        None => bail!("no stats directories configured"),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
