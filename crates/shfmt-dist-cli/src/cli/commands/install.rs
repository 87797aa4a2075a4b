//! Install command: the install-step hook.

use anyhow::{Context, Result};
use shfmt_dist_core::install_binaries;
use std::path::Path;

/// Copy the build output into `install_dir` and print each installed path.
pub fn run_install(build_dir: &Path, install_dir: &Path) -> Result<()> {
    let outputs = install_binaries(build_dir, install_dir)
        .with_context(|| format!("install from {}", build_dir.display()))?;
    for path in outputs {
        println!("{}", path.display());
    }
    Ok(())
}
