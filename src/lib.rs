//! Driver statistics resolution and repair engine.
//!
//! The site renders per-driver statistics from one JSON file per driver,
//! keyed by slug under a stats directory. Datasets arrive with inconsistent
//! names (car numbers, three-letter codes, alternate slugs); this crate
//! resolves each roster entry to its file through a tiered fallback search,
//! validates the file's structure, and can materialize misnamed files under
//! their canonical name.
//!
//! The engine takes its inputs explicitly: a loaded roster and an ordered set
//! of base directories, both scoped to a single [`audit::run_audit`] pass.

pub mod audit;
pub mod resolve;
pub mod roster;
pub mod slug;
pub mod stats;

pub use audit::{AuditReport, Mode, Outcome, Tally, run_audit};
pub use resolve::{Located, Tier, locate};
pub use roster::{Driver, load_roster};
pub use slug::slugify;
pub use stats::parse_stats;

use std::path::{Path, PathBuf};

/// Subdirectory of each base data directory holding per-driver stats files.
pub const STATS_SUBDIR: &str = "stats";

/// Ordered base data directories under a project root. The first entry is the
/// primary root: it wins ties at every search tier and receives repairs.
pub fn data_bases(root: &Path) -> Vec<PathBuf> {
    vec![root.join("public").join("data"), root.join("data")]
}

/// The stats directory set derived from the base directories, order preserved.
pub fn stats_dirs(bases: &[PathBuf]) -> Vec<PathBuf> {
    bases.iter().map(|base| base.join(STATS_SUBDIR)).collect()
}
