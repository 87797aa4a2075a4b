use crate::locator::{ArtifactLocator, DEFAULT_RELEASE_BASE};
use crate::transport::CurlOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "SHFMT_DIST_CONFIG";

/// Global configuration loaded from `~/.config/shfmt-dist/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistConfig {
    /// Release download root; `v<version>/<file>` is appended.
    pub release_base_url: String,
    /// Overall transfer timeout in seconds. Unset means wait as long as the server does.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Connect timeout in seconds. Unset leaves libcurl's default.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Redirect limit for the release host.
    #[serde(default = "default_max_redirections")]
    pub max_redirections: u32,
}

fn default_max_redirections() -> u32 {
    10
}

impl Default for DistConfig {
    fn default() -> Self {
        Self {
            release_base_url: DEFAULT_RELEASE_BASE.to_string(),
            timeout_secs: None,
            connect_timeout_secs: None,
            max_redirections: default_max_redirections(),
        }
    }
}

impl DistConfig {
    pub fn curl_options(&self) -> CurlOptions {
        CurlOptions {
            timeout: self.timeout_secs.map(Duration::from_secs),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            max_redirections: self.max_redirections,
        }
    }

    /// The embedded locator, pointed at the configured release root.
    pub fn locator(&self) -> Result<ArtifactLocator> {
        Ok(ArtifactLocator::pinned().with_base_url(&self.release_base_url)?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(p));
    }
    let xdg_dirs = xdg::BaseDirectories::new().context("locate config file")?;
    Ok(xdg_dirs
        .get_config_home()
        .join("shfmt-dist")
        .join("config.toml"))
}

/// Load configuration from disk, creating a default file if none exists.
///
/// A config location that cannot be found or written falls back to the
/// defaults; only an existing file that fails to read or parse is an error.
pub fn load_or_init() -> Result<DistConfig> {
    match config_path() {
        Ok(path) => load_or_init_at(&path),
        Err(e) => {
            tracing::warn!("using default config: {:#}", e);
            Ok(DistConfig::default())
        }
    }
}

pub fn load_or_init_at(path: &Path) -> Result<DistConfig> {
    if !path.exists() {
        let default_cfg = DistConfig::default();
        if let Err(e) = write_default(path, &default_cfg) {
            tracing::warn!("using default config, could not create it: {:#}", e);
        } else {
            tracing::info!("created default config at {}", path.display());
        }
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DistConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

fn write_default(path: &Path, cfg: &DistConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir {}", parent.display()))?;
    }
    fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = DistConfig::default();
        assert_eq!(cfg.release_base_url, DEFAULT_RELEASE_BASE);
        assert!(cfg.timeout_secs.is_none());
        assert!(cfg.connect_timeout_secs.is_none());
        assert_eq!(cfg.max_redirections, 10);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = DistConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: DistConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.release_base_url, cfg.release_base_url);
        assert_eq!(parsed.max_redirections, cfg.max_redirections);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            release_base_url = "https://mirror.example.com/sh"
            timeout_secs = 120
            connect_timeout_secs = 10
        "#;
        let cfg: DistConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.timeout_secs, Some(120));
        assert_eq!(cfg.max_redirections, 10);
        let opts = cfg.curl_options();
        assert_eq!(opts.timeout, Some(Duration::from_secs(120)));
        assert_eq!(opts.connect_timeout, Some(Duration::from_secs(10)));
        assert_eq!(cfg.locator().unwrap().base_url(), "https://mirror.example.com/sh");
    }

    #[test]
    fn bad_base_url_fails_locator() {
        let cfg = DistConfig {
            release_base_url: "::nope".into(),
            ..DistConfig::default()
        };
        assert!(cfg.locator().is_err());
    }

    #[test]
    fn load_or_init_writes_default_then_reads_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let first = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        let second = load_or_init_at(&path).unwrap();
        assert_eq!(first.release_base_url, second.release_base_url);
    }

    #[test]
    fn load_or_init_unwritable_location_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        // Parent is a regular file, so the config dir cannot be created.
        let path = blocker.join("shfmt-dist").join("config.toml");

        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg.release_base_url, DEFAULT_RELEASE_BASE);
        assert!(cfg.timeout_secs.is_none());
        assert!(!path.exists());
    }

    #[test]
    fn load_or_init_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = \"soon\"").unwrap();
        assert!(load_or_init_at(&path).is_err());
    }
}
