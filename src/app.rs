// Declare modules
pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod identifier;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use self::builder::{LogProgress, ManifestBuilder, ProgressObserver};
use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::identifier::{IdentifierSource, UuidSource};
use self::models::{BuilderConfig, Manifest};
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Resolve Configuration (preset keyed by the project folder name)
    let project_name = args
        .project_dir
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()));
    let config = resolve_config(project_name.as_deref())?;

    // 3. Walk, classify, render
    let manifest = build_manifest(
        &args.project_dir,
        &config,
        &mut UuidSource,
        &mut LogProgress,
    )?;

    // 4. Write
    OutputGenerator::write_to(&manifest, &args.filters_file)
        .with_context(|| format!("Failed to update {}", args.filters_file.display()))?;

    println!(
        "Filters file '{}' has been updated.",
        args.filters_file.display()
    );

    Ok(())
}

/// One full pass over `project_dir`. Fails without producing anything if the
/// walk fails anywhere.
pub fn build_manifest(
    project_dir: &Path,
    config: &BuilderConfig,
    ids: &mut dyn IdentifierSource,
    progress: &mut dyn ProgressObserver,
) -> Result<Manifest> {
    let scanner = Scanner::new(project_dir.to_path_buf(), &config.exclusions);
    let folders = scanner
        .scan()
        .with_context(|| format!("Failed to scan {}", project_dir.display()))?;

    log::debug!("Visited {} folders", folders.len());

    Ok(ManifestBuilder::new(config, ids, progress).build(&folders))
}
