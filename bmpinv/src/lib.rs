use std::{
    collections::HashMap,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use glob::{glob, Pattern};
use libbmp::BmpImage;
use rayon::prelude::*;
use tracing::{debug, error, info, instrument, warn};

/// Files converted and skipped by [`run`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub converted: usize,
    pub failed: usize,
}

/// Appends every `*.bmp` file directly inside `inpdir` to `files`
///
/// A missing `inpdir` simply contributes no files.
pub fn collect_inputs(mut files: Vec<PathBuf>, inpdir: &Path) -> Result<Vec<PathBuf>> {
    let Some(dir) = inpdir.to_str() else {
        bail!("Invalid input directory {}", inpdir.display());
    };
    let pattern = format!("{}/*.bmp", Pattern::escape(dir));
    debug!("Globbing {pattern}");
    for entry in glob(&pattern)? {
        match entry {
            Ok(path) => files.push(path),
            Err(e) => warn!("Unreadable entry in {}: {e}", inpdir.display()),
        }
    }
    Ok(files)
}

/// Decodes `input`, inverts it and writes it to `savedir` under the same file name
#[instrument]
pub fn invert_file(input: &Path, savedir: &Path) -> Result<PathBuf> {
    info!("Converting file {}", input.display());
    if !input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bmp"))
    {
        warn!("File is not in bmp format");
    }
    let Some(filename) = input.file_name() else {
        bail!("Invalid bmp file");
    };
    let output = savedir.join(filename);

    let img = BmpImage::from_file(input).context("Could not decode file")?;
    debug!("Decoded {}x{} image", img.width(), img.height());

    img.invert()
        .into_file(&output)
        .with_context(|| format!("Could not write {}", output.display()))?;
    info!("Wrote inverted image to {}", output.display());
    Ok(output)
}

/// Inverts every file of `inputs` into `savedir` on `jobs` worker threads
///
/// A file that fails is logged and counted, the others are still converted. `jobs == 0` uses one
/// thread per CPU.
///
/// Inputs sharing a file name would write the same output file, so they are converted one after
/// the other, in input order, once the rest of the batch is done: the last one wins.
pub fn run(inputs: &[PathBuf], savedir: &Path, jobs: usize) -> Result<Summary> {
    if inputs.is_empty() {
        bail!("No input files provided");
    }
    fs::create_dir_all(savedir)
        .with_context(|| format!("Could not create {}", savedir.display()))?;

    let (shared, unique): (Vec<_>, Vec<_>) = {
        let mut names: HashMap<&OsStr, usize> = HashMap::new();
        for name in inputs.iter().filter_map(|input| input.file_name()) {
            *names.entry(name).or_default() += 1;
        }
        inputs.iter().partition(|input| {
            input
                .file_name()
                .is_some_and(|name| names.get(name).is_some_and(|&n| n > 1))
        })
    };
    if !shared.is_empty() {
        warn!(
            "{} inputs share a file name and overwrite each other in {}",
            shared.len(),
            savedir.display()
        );
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    let mut results: Vec<_> = pool.install(|| {
        unique
            .par_iter()
            .map(|&input| (input, invert_file(input, savedir)))
            .collect()
    });
    results.extend(
        shared
            .into_iter()
            .map(|input| (input, invert_file(input, savedir))),
    );

    let mut summary = Summary::default();
    for (input, result) in results {
        match result {
            Ok(_) => summary.converted += 1,
            Err(e) => {
                error!("Skipping {}: {e:#}", input.display());
                summary.failed += 1;
            }
        }
    }
    info!(
        "Converted {} of {} files",
        summary.converted,
        inputs.len()
    );
    Ok(summary)
}
