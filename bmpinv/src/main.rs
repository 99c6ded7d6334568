use bmpinv::{collect_inputs, run};
use std::path::PathBuf;
use tracing::Level;

use anyhow::{bail, Result};
use clap::Parser;

#[cfg(not(debug_assertions))]
const DEFAULT_DEBUG_LEVEL: u8 = 1;
#[cfg(debug_assertions)]
const DEFAULT_DEBUG_LEVEL: u8 = 99;

/// Inverts the colors of 32-bit BMP images
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Turn debugging information on
    #[arg(short, long, default_value_t = DEFAULT_DEBUG_LEVEL, action = clap::ArgAction::Count)]
    verbosity: u8,

    /// BMP files to invert, in addition to those found in the input directory
    files: Vec<PathBuf>,

    /// Directory of input files
    #[arg(long, default_value = "samples")]
    inpdir: PathBuf,

    /// Inverted BMP save directory
    #[arg(long, default_value = "invbmp")]
    savedir: PathBuf,

    /// Number of files converted in parallel (0 = one per CPU)
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(true)
        .with_line_number(true)
        .init();

    let inputs = collect_inputs(cli.files, &cli.inpdir)?;
    let summary = run(&inputs, &cli.savedir, cli.jobs)?;
    if summary.converted == 0 {
        bail!("None of the {} input files could be converted", summary.failed);
    }
    Ok(())
}
