//! Audit (and optionally repair) per-driver statistics files.
//!
//! Usage:
//!   stats-doctor          # report only
//!   stats-doctor --fix    # copy valid alternate files to <slug>.json

use anyhow::{Context, Result};
use clap::Parser;
use stats_doctor::{Mode, data_bases, load_roster, run_audit, stats_dirs};
use std::env;
use std::io::stdout;

#[derive(Parser, Debug)]
#[command(name = "stats-doctor")]
#[command(about = "Audit per-driver statistics files against the roster")]
struct Cli {
    /// Copy valid alternate files to their canonical <slug>.json name.
    #[arg(long)]
    fix: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let root = env::current_dir().context("resolving current directory")?;
    let bases = data_bases(&root);

    let (drivers, _roster_path) = load_roster(&bases).context("loading roster")?;

    let mode = if cli.fix { Mode::Fix } else { Mode::Check };
    run_audit(&drivers, &stats_dirs(&bases), mode, &mut stdout().lock())?;
    Ok(())
}
