//! Platform keys: (operating system, CPU architecture) pairs.
//!
//! Identifiers follow the packaging ecosystem the shim plugs into
//! (`linux`, `darwin`, `win32`, `cygwin`; `x86_64`, `aarch64`, `arm64`,
//! `armv6hf`, `armv7l`, `AMD64`, `x86`), not Rust target names.

use std::fmt;

/// Lookup key into the artifact locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformKey {
    os: String,
    arch: String,
}

impl PlatformKey {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Key for the platform this binary was compiled for.
    ///
    /// Targets without a counterpart keep their Rust names, so they resolve
    /// to `UnsupportedPlatform` rather than failing here.
    pub fn host() -> Self {
        Self::from_target(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Maps a Rust `(target_os, target_arch)` pair to a platform key.
    pub fn from_target(os: &str, arch: &str) -> Self {
        let (os, arch) = match (os, arch) {
            ("linux", "x86_64") => ("linux", "x86_64"),
            ("linux", "aarch64") => ("linux", "aarch64"),
            ("linux", "arm") => ("linux", "armv7l"),
            ("macos", "x86_64") => ("darwin", "x86_64"),
            ("macos", "aarch64") => ("darwin", "arm64"),
            ("windows", "x86_64") => ("win32", "AMD64"),
            ("windows", "x86") => ("win32", "x86"),
            other => other,
        };
        Self::new(os, arch)
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// File name of the installed executable. Only `win32` gets `.exe`;
    /// cygwin runs the Windows binary under a plain name.
    pub fn executable_name(&self) -> &'static str {
        if self.os == "win32" {
            "shfmt.exe"
        } else {
            "shfmt"
        }
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}
