//! CLI front end: verb dispatch over the library core, mirroring the shape
//! of the teacher's own `main.rs::run()`. All path and directory handling
//! lives in `yi_fwtool::fileio`; nothing in here touches container bytes
//! directly except to hand them to and from that module.

pub mod args;
pub mod constants;

use anyhow::{Context, Result};

pub use args::{Cli, Command};
use constants::Level;

use crate::logmsg;

use yi_fwtool::config::{RepackOptions, UnpackOptions};
use yi_fwtool::{fileio, orchestrator, StaticCatalog};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Unpack { input, out_dir } => run_unpack(&input, UnpackOptions { out_dir }),
        Command::Repack { manifest, output, recompute_split } => {
            run_repack(&manifest, RepackOptions { output, recompute_split })
        }
        Command::FlipRegion { input, output } => run_flip_region(&input, &output),
        Command::SelfTest { input } => run_self_test(&input),
    }
}

fn run_unpack(input: &std::path::Path, options: UnpackOptions) -> Result<()> {
    let bytes = fileio::read_input(input).with_context(|| format!("reading {}", input.display()))?;
    let catalog = StaticCatalog;
    let (manifest, files, warnings) = orchestrator::unpack(&bytes, &catalog)?;

    for warning in &warnings {
        logmsg!(Level::Warn, "warning: {warning}");
    }

    let section_count = manifest.sections.len();
    fileio::write_unpacked(&options.out_dir, input, manifest, &files)
        .with_context(|| format!("writing unpacked output to {}", options.out_dir.display()))?;

    logmsg!(
        Level::Info,
        "unpacked {} section(s), {} file(s), into {}",
        section_count,
        files.len(),
        options.out_dir.display()
    );
    Ok(())
}

fn run_repack(manifest_path: &std::path::Path, options: RepackOptions) -> Result<()> {
    let manifest = fileio::read_manifest(manifest_path)
        .with_context(|| format!("reading manifest {}", manifest_path.display()))?;
    let manifest_dir = manifest_path.parent().unwrap_or_else(|| std::path::Path::new("."));
    let files = fileio::read_referenced_files(manifest_dir, &manifest)
        .with_context(|| format!("reading section files under {}", manifest_dir.display()))?;

    let rebuilt = orchestrator::repack(&manifest, &files)?;

    if options.recompute_split {
        verify_recomputed_split(&manifest, &rebuilt);
    }

    fileio::write_output(&options.output, &rebuilt)
        .with_context(|| format!("writing {}", options.output.display()))?;

    logmsg!(Level::Info, "repacked {} section(s) into {}", manifest.sections.len(), options.output.display());
    Ok(())
}

/// Re-run the splitter heuristic on the rebuilt image's own section 0 and
/// warn if it disagrees with the manifest's stored sub-section count,
/// instead of silently trusting the manifest (the default behaviour).
fn verify_recomputed_split(manifest: &yi_fwtool::Manifest, rebuilt: &[u8]) {
    let catalog = StaticCatalog;
    match orchestrator::unpack(rebuilt, &catalog) {
        Ok((recomputed, _files, _warnings)) => {
            let expected = manifest.sections.first().map(|s| s.subsections.len()).unwrap_or(0);
            let actual = recomputed.sections.first().map(|s| s.subsections.len()).unwrap_or(0);
            if expected != actual {
                logmsg!(
                    Level::Warn,
                    "recomputed sub-section split disagrees with the manifest: {expected} vs {actual}"
                );
            }
        }
        Err(err) => logmsg!(Level::Warn, "could not recompute the sub-section split: {err}"),
    }
}

fn run_flip_region(input: &std::path::Path, output: &std::path::Path) -> Result<()> {
    let bytes = fileio::read_input(input).with_context(|| format!("reading {}", input.display()))?;
    let flipped = orchestrator::flip_region(&bytes)?;
    fileio::write_output(output, &flipped).with_context(|| format!("writing {}", output.display()))?;
    logmsg!(Level::Info, "region-flipped {} into {}", input.display(), output.display());
    Ok(())
}

fn run_self_test(input: &std::path::Path) -> Result<()> {
    let bytes = fileio::read_input(input).with_context(|| format!("reading {}", input.display()))?;
    let catalog = StaticCatalog;
    let (report, warnings) = orchestrator::self_test(&bytes, &catalog)?;

    for warning in &warnings {
        logmsg!(Level::Warn, "warning: {warning}");
    }

    logmsg!(
        Level::Info,
        "checked {} section(s), {} sub-section(s), {} mismatch(es)",
        report.sections_checked,
        report.subsections_checked,
        report.mismatches.len()
    );
    for mismatch in &report.mismatches {
        logmsg!(Level::Error, "mismatch: {mismatch}");
    }

    if report.all_match() {
        Ok(())
    } else {
        anyhow::bail!("{} sub-section(s) failed the round-trip self-test", report.mismatches.len());
    }
}
