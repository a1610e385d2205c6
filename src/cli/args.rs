use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "yi-fwtool", about = "Unpack, inspect, region-flip, and repack YI M1 / X-A10 firmware images")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a firmware image into a manifest plus section/sub-section files.
    Unpack {
        #[arg(long)]
        input: PathBuf,
        #[arg(long = "out-dir")]
        out_dir: PathBuf,
    },
    /// Reassemble a firmware image from a manifest and its files.
    Repack {
        #[arg(long)]
        manifest: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Re-run the sub-section splitter on the rebuilt output and warn if
        /// it disagrees with the manifest, instead of just trusting it.
        #[arg(long)]
        recompute_split: bool,
    },
    /// Swap the M1INT/M1CN region token in every section header.
    FlipRegion {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Unpack and verify that every compressed sub-block round-trips.
    SelfTest {
        #[arg(long)]
        input: PathBuf,
    },
}
