/// Convert an HTML page or zipped site into a SCORM 1.2 package
///
/// Run with: cargo run --example convert -- <input> [output-dir] [config.toml]
///
/// Set RUST_LOG=scorm_pack=debug to see per-entry decisions.
use anyhow::{bail, Context};
use scorm_pack::{ConversionSession, InputArtifact, PackagerConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(input_path) = args.next().map(PathBuf::from) else {
        bail!("usage: convert <input.html|input.zip> [output-dir] [config.toml]");
    };
    let output_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let config = match args.next() {
        Some(path) => PackagerConfig::load(&path)
            .with_context(|| format!("loading configuration from {}", path))?,
        None => PackagerConfig::default(),
    };

    println!("=== HTML to SCORM 1.2 ===\n");

    let input = InputArtifact::from_path(&input_path)
        .with_context(|| format!("reading {}", input_path.display()))?;
    println!(
        "Input:  {} ({}, {:.2} KB)",
        input.name(),
        input.kind(),
        input.len() as f64 / 1024.0
    );

    let mut session = ConversionSession::new(config).context("invalid configuration")?;
    session.select(input);

    let package = match session.convert() {
        Ok(package) => package,
        Err(err) => {
            eprintln!("Error: {}", err.user_message());
            return Err(err).context("conversion failed");
        }
    };

    println!("Entry:  {}", package.entry_path);
    println!("Title:  {}", package.manifest.title);
    println!("Files:  {}", package.paths.len());

    let written = package
        .write_to_dir(&output_dir)
        .with_context(|| format!("writing package to {}", output_dir.display()))?;
    println!("\n✓ Package created: {}", written.display());

    Ok(())
}
