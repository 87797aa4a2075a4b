//! Targets command: list the locator table.

use anyhow::Result;
use shfmt_dist_core::config::DistConfig;

/// Print one line per supported platform (aliases included).
pub fn run_targets(cfg: &DistConfig) -> Result<()> {
    let locator = cfg.locator()?;
    println!("{:<16} {:<64}  URL", "PLATFORM", "SHA256");
    for key in locator.keys() {
        let target = locator.resolve(&key)?;
        println!("{:<16} {}  {}", key.to_string(), target.sha256, target.url);
    }
    Ok(())
}
