use anyhow::Result;
use shfmt_dist_core::config::DistConfig;
use shfmt_dist_core::PlatformKey;

/// Print URL and expected digest for `key`. No network access.
pub fn run_resolve(cfg: &DistConfig, key: &PlatformKey) -> Result<()> {
    let target = cfg.locator()?.resolve(key)?;
    println!("platform {}", key);
    println!("url      {}", target.url);
    println!("sha256   {}", target.sha256);
    Ok(())
}
