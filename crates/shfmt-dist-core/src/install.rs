//! Fetch-and-install pipeline: resolve → fetch → verify → persist → chmod.
//!
//! Nothing touches the destination before `verify` succeeds. A crash
//! mid-write leaves at most a stray `<name>.tmp` that the next run overwrites.

use crate::checksum;
use crate::error::InstallError;
use crate::locator::ArtifactLocator;
use crate::platform::PlatformKey;
use crate::transport::Transport;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Pipeline position, reported in logs as each step completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Resolved,
    Downloaded,
    Verified,
    Persisted,
    Executable,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Idle => "idle",
            Stage::Resolved => "resolved",
            Stage::Downloaded => "downloaded",
            Stage::Verified => "verified",
            Stage::Persisted => "persisted",
            Stage::Executable => "executable",
        };
        f.write_str(s)
    }
}

/// Writes `data` to `<dir>/<name>`, creating `dir` and its parents.
///
/// The bytes land in `<name>.tmp` first and are renamed into place, so a
/// failed write never truncates an existing executable.
pub fn persist(data: &[u8], dir: &Path, name: &str) -> Result<PathBuf, InstallError> {
    fs::create_dir_all(dir).map_err(|e| InstallError::write_failed(dir, e))?;
    let path = dir.join(name);
    let temp_path = dir.join(format!("{}.tmp", name));
    if let Err(e) = fs::write(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(InstallError::write_failed(&temp_path, e));
    }
    if let Err(e) = fs::rename(&temp_path, &path) {
        let _ = fs::remove_file(&temp_path);
        return Err(InstallError::write_failed(&path, e));
    }
    Ok(path)
}

/// Adds execute permission for user, group and other, keeping existing bits.
#[cfg(unix)]
pub fn mark_executable(path: &Path) -> Result<(), InstallError> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .map_err(|e| InstallError::write_failed(path, e))?
        .permissions();
    let mode = perms.mode() | 0o111;
    if mode != perms.mode() {
        perms.set_mode(mode);
        fs::set_permissions(path, perms).map_err(|e| InstallError::write_failed(path, e))?;
    }
    Ok(())
}

/// No permission-bit model here; the `.exe` suffix is what makes it runnable.
#[cfg(not(unix))]
pub fn mark_executable(path: &Path) -> Result<(), InstallError> {
    fs::metadata(path).map_err(|e| InstallError::write_failed(path, e))?;
    Ok(())
}

/// Runs the whole pipeline for `key` and returns the installed executable path.
pub fn install(
    key: &PlatformKey,
    locator: &ArtifactLocator,
    transport: &dyn Transport,
    dest_dir: &Path,
) -> Result<PathBuf, InstallError> {
    let mut stage = Stage::Idle;
    let result = run_stages(key, locator, transport, dest_dir, &mut stage);
    match &result {
        Ok(path) => tracing::info!(
            "installed shfmt {} for {} at {}",
            locator.version(),
            key,
            path.display()
        ),
        Err(e) => tracing::error!(stage = e.stage(), last_ok = %stage, "install failed: {}", e),
    }
    result
}

fn run_stages(
    key: &PlatformKey,
    locator: &ArtifactLocator,
    transport: &dyn Transport,
    dest_dir: &Path,
    stage: &mut Stage,
) -> Result<PathBuf, InstallError> {
    let target = locator.resolve(key)?;
    advance(stage, Stage::Resolved);
    tracing::info!("{}", target.url);

    let data = transport.get(&target.url)?;
    advance(stage, Stage::Downloaded);

    let data = checksum::verify(data, &target.sha256)?;
    advance(stage, Stage::Verified);

    let path = persist(&data, dest_dir, key.executable_name())?;
    advance(stage, Stage::Persisted);

    mark_executable(&path)?;
    advance(stage, Stage::Executable);
    Ok(path)
}

fn advance(stage: &mut Stage, next: Stage) {
    tracing::debug!("{} -> {}", stage, next);
    *stage = next;
}

/// Build hook: fetch and verify the executable into a scratch directory.
pub fn fetch_binaries(
    key: &PlatformKey,
    locator: &ArtifactLocator,
    transport: &dyn Transport,
    build_dir: &Path,
) -> Result<PathBuf, InstallError> {
    install(key, locator, transport, build_dir)
}

/// Install hook: copy everything under `build_dir` into `install_dir`.
/// Returns the installed file paths, sorted.
pub fn install_binaries(build_dir: &Path, install_dir: &Path) -> Result<Vec<PathBuf>, InstallError> {
    let mut out = Vec::new();
    copy_tree(build_dir, install_dir, &mut out)?;
    out.sort();
    tracing::info!("installed {} file(s) into {}", out.len(), install_dir.display());
    Ok(out)
}

fn copy_tree(src: &Path, dst: &Path, out: &mut Vec<PathBuf>) -> Result<(), InstallError> {
    let entries = fs::read_dir(src).map_err(|e| InstallError::write_failed(src, e))?;
    fs::create_dir_all(dst).map_err(|e| InstallError::write_failed(dst, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| InstallError::write_failed(src, e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .map_err(|e| InstallError::write_failed(&from, e))?;
        if file_type.is_dir() {
            copy_tree(&from, &to, out)?;
        } else if file_type.is_file() {
            // fs::copy carries the permission bits over.
            fs::copy(&from, &to).map_err(|e| InstallError::write_failed(&to, e))?;
            tracing::debug!("copied {} -> {}", from.display(), to.display());
            out.push(to);
        }
    }
    Ok(())
}
