//! CLI for installing the pinned shfmt release.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use shfmt_dist_core::{config, PlatformKey};
use std::path::PathBuf;

use commands::{run_checksum, run_fetch, run_install, run_resolve, run_targets, run_version};

/// Top-level CLI for shfmt-dist.
#[derive(Debug, Parser)]
#[command(name = "shfmt-dist")]
#[command(about = "Download, verify and install the pinned shfmt binary", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides the detected host platform. Both flags must be given together.
#[derive(Debug, Clone, Default, Args)]
pub struct PlatformArgs {
    /// Operating system identifier (linux, darwin, win32, cygwin).
    #[arg(long, requires = "arch")]
    pub os: Option<String>,
    /// CPU architecture identifier (x86_64, aarch64, arm64, armv6hf, armv7l, AMD64, x86).
    #[arg(long, requires = "os")]
    pub arch: Option<String>,
}

impl PlatformArgs {
    pub fn key(&self) -> PlatformKey {
        match (&self.os, &self.arch) {
            (Some(os), Some(arch)) => PlatformKey::new(os.as_str(), arch.as_str()),
            _ => PlatformKey::host(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Build step: download and verify shfmt into a scratch directory.
    Fetch {
        /// Scratch/build directory to write the executable into.
        build_dir: PathBuf,
        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// Install step: copy the build directory into the install directory.
    Install {
        /// Directory previously filled by `fetch`.
        build_dir: PathBuf,
        /// Final directory for executables.
        install_dir: PathBuf,
    },

    /// Print the download URL and expected sha256 without downloading.
    Resolve {
        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// List every supported platform with its URL and sha256.
    Targets,

    /// Compute SHA-256 of a file (e.g. an installed executable).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// Print the packaged version (upstream version plus packaging revision).
    Version,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                build_dir,
                platform,
            } => run_fetch(&cfg, &platform.key(), &build_dir)?,
            CliCommand::Install {
                build_dir,
                install_dir,
            } => run_install(&build_dir, &install_dir)?,
            CliCommand::Resolve { platform } => run_resolve(&cfg, &platform.key())?,
            CliCommand::Targets => run_targets(&cfg)?,
            CliCommand::Checksum { path } => run_checksum(&path)?,
            CliCommand::Version => run_version(),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
