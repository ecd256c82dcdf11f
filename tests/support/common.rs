#![allow(dead_code)]

// Shared fixture tree for audit and binary tests: a temp project root with
// the site's data layout (public/data primary, data secondary).

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const VALID_DOC: &str = r#"{"season":{"wins":1},"career":{"starts":10}}"#;
pub const SEASON_ONLY_DOC: &str = r#"{"season":{"wins":1}}"#;

pub struct SiteFixture {
    pub root: TempDir,
}

impl SiteFixture {
    pub fn new() -> Result<Self> {
        let root = TempDir::new().context("allocating fixture root")?;
        Ok(Self { root })
    }

    pub fn bases(&self) -> Vec<PathBuf> {
        stats_doctor::data_bases(self.root.path())
    }

    pub fn stats_dirs(&self) -> Vec<PathBuf> {
        stats_doctor::stats_dirs(&self.bases())
    }

    pub fn primary_stats(&self) -> PathBuf {
        self.stats_dirs()[0].clone()
    }

    pub fn secondary_stats(&self) -> PathBuf {
        self.stats_dirs()[1].clone()
    }

    /// Write `drivers.json` into the primary base directory.
    pub fn write_roster(&self, json: &str) -> Result<()> {
        let base = &self.bases()[0];
        fs::create_dir_all(base)?;
        fs::write(base.join(stats_doctor::roster::ROSTER_FILE), json)?;
        Ok(())
    }

    /// Write a stats file into the primary (index 0) or secondary (index 1)
    /// stats directory, creating it as needed.
    pub fn write_stats(&self, dir_index: usize, file: &str, contents: &str) -> Result<PathBuf> {
        let dir = &self.stats_dirs()[dir_index];
        fs::create_dir_all(dir)?;
        let path = dir.join(file);
        fs::write(&path, contents)?;
        Ok(path)
    }
}
