//! Fetch command: the build-step hook.

use anyhow::{Context, Result};
use shfmt_dist_core::config::DistConfig;
use shfmt_dist_core::{fetch_binaries, CurlTransport, PlatformKey};
use std::path::Path;

/// Download, verify and write the executable into `build_dir`.
pub fn run_fetch(cfg: &DistConfig, key: &PlatformKey, build_dir: &Path) -> Result<()> {
    let locator = cfg.locator()?;
    let transport = CurlTransport::new(cfg.curl_options());
    let path = fetch_binaries(key, &locator, &transport, build_dir)
        .with_context(|| format!("fetch shfmt {} for {}", locator.version(), key))?;
    println!("{}", path.display());
    Ok(())
}
