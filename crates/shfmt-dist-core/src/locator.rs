//! Artifact locator: platform key → (release file suffix, sha256).
//!
//! The embedded table is valid for [`PINNED_VERSION`] only. Aliased keys
//! reuse the entry of the key they point at.

use crate::error::InstallError;
use crate::platform::PlatformKey;
use std::collections::BTreeMap;

/// Upstream release the embedded digests belong to.
pub const PINNED_VERSION: &str = "3.7.0";

/// Bumped when packaging changes without a new upstream release.
pub const PACKAGING_REVISION: u32 = 1;

/// Release download root; `v<version>/<file>` is appended.
pub const DEFAULT_RELEASE_BASE: &str = "https://github.com/mvdan/sh/releases/download";

const LINUX_ARM: &str = "3d1f5a1aede8161293bc42007af5b983f16d62857736c789f062346ed839f299";
const LINUX_ARM64: &str = "111612560d15bd53d8e8f8f85731176ce12f3b418ec473d39a40ed6bbec772de";
const LINUX_AMD64: &str = "0264c424278b18e22453fe523ec01a19805ce3b8ebf18eaf3aadc1edc23f42e3";
const DARWIN_AMD64: &str = "ae1d1ab961c113fb3dc2ff1150f33c3548983550d91da889b3171a5bcfaab14f";
const DARWIN_ARM64: &str = "ad7ff6f666adba3d801eb17365a15539f07296718d39fb62cc2fde6b527178aa";
const WINDOWS_AMD64_EXE: &str = "2807b4af91fbbd961b68716de06c044f1b4f897457fc89fba216e5e2e351c64f";
const WINDOWS_386_EXE: &str = "8bd0422554dd6ce5e07d9d17d020d89254b5c056009005df824e39a8cbdcf6aa";

/// (os, arch, suffix, sha256)
const PINNED_TABLE: &[(&str, &str, &str, &str)] = &[
    ("linux", "armv6hf", "linux_arm", LINUX_ARM),
    ("linux", "aarch64", "linux_arm64", LINUX_ARM64),
    ("linux", "x86_64", "linux_amd64", LINUX_AMD64),
    ("darwin", "x86_64", "darwin_amd64", DARWIN_AMD64),
    ("darwin", "arm64", "darwin_arm64", DARWIN_ARM64),
    ("win32", "AMD64", "windows_amd64.exe", WINDOWS_AMD64_EXE),
    ("win32", "x86", "windows_386.exe", WINDOWS_386_EXE),
];

/// alias key → target key
const PINNED_ALIASES: &[((&str, &str), (&str, &str))] = &[
    (("cygwin", "x86_64"), ("win32", "AMD64")),
    (("linux", "armv7l"), ("linux", "armv6hf")),
];

/// `<pinned>.<revision>`, e.g. `3.7.0.1`.
pub fn packaged_version() -> String {
    format!("{}.{}", PINNED_VERSION, PACKAGING_REVISION)
}

/// One release artifact: file name suffix and its expected digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorEntry {
    pub suffix: String,
    pub sha256: String,
}

/// Result of resolving a platform key: where to download and what to expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub url: String,
    pub sha256: String,
    pub suffix: String,
}

/// Immutable lookup table for one upstream version.
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    version: String,
    base_url: String,
    entries: BTreeMap<PlatformKey, LocatorEntry>,
    aliases: BTreeMap<PlatformKey, PlatformKey>,
}

impl ArtifactLocator {
    /// The embedded table for [`PINNED_VERSION`].
    pub fn pinned() -> Self {
        let entries = PINNED_TABLE
            .iter()
            .map(|&(os, arch, suffix, sha256)| {
                (
                    PlatformKey::new(os, arch),
                    LocatorEntry {
                        suffix: suffix.to_string(),
                        sha256: sha256.to_string(),
                    },
                )
            })
            .collect();
        let aliases = PINNED_ALIASES
            .iter()
            .map(|&((os, arch), (to_os, to_arch))| {
                (PlatformKey::new(os, arch), PlatformKey::new(to_os, to_arch))
            })
            .collect();
        Self {
            version: PINNED_VERSION.to_string(),
            base_url: DEFAULT_RELEASE_BASE.to_string(),
            entries,
            aliases,
        }
    }

    /// Builds a locator for another version from explicit entries.
    /// Digests must be 64 hex characters (either case).
    pub fn from_entries<I>(version: &str, entries: I) -> Result<Self, InstallError>
    where
        I: IntoIterator<Item = (PlatformKey, LocatorEntry)>,
    {
        let mut map = BTreeMap::new();
        for (key, entry) in entries {
            if !is_sha256_hex(&entry.sha256) {
                return Err(InstallError::InvalidDigest {
                    suffix: entry.suffix,
                    digest: entry.sha256,
                });
            }
            map.insert(key, entry);
        }
        Ok(Self {
            version: version.to_string(),
            base_url: DEFAULT_RELEASE_BASE.to_string(),
            entries: map,
            aliases: BTreeMap::new(),
        })
    }

    /// Adds an alias; `alias` resolves to whatever `target` resolves to.
    pub fn with_alias(mut self, alias: PlatformKey, target: PlatformKey) -> Self {
        self.aliases.insert(alias, target);
        self
    }

    /// Replaces the release download root (mirrors, local test servers).
    pub fn with_base_url(mut self, base: &str) -> Result<Self, InstallError> {
        let parsed = url::Url::parse(base).map_err(|source| InstallError::InvalidUrl {
            base: base.to_string(),
            source,
        })?;
        if parsed.cannot_be_a_base() {
            return Err(InstallError::InvalidUrl {
                base: base.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }
        self.base_url = base.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Looks up the entry for `key`, following one alias hop.
    pub fn entry(&self, key: &PlatformKey) -> Option<&LocatorEntry> {
        let key = self.aliases.get(key).unwrap_or(key);
        self.entries.get(key)
    }

    /// Resolves download URL and expected digest. Pure; no network access.
    pub fn resolve(&self, key: &PlatformKey) -> Result<ResolvedTarget, InstallError> {
        let entry = self
            .entry(key)
            .ok_or_else(|| InstallError::UnsupportedPlatform {
                os: key.os().to_string(),
                arch: key.arch().to_string(),
            })?;
        let url = format!(
            "{base}/v{v}/shfmt_v{v}_{suffix}",
            base = self.base_url,
            v = self.version,
            suffix = entry.suffix
        );
        Ok(ResolvedTarget {
            url,
            sha256: entry.sha256.clone(),
            suffix: entry.suffix.clone(),
        })
    }

    /// Every resolvable key, direct entries and aliases, in sorted order.
    pub fn keys(&self) -> Vec<PlatformKey> {
        let mut keys: Vec<PlatformKey> = self
            .entries
            .keys()
            .chain(self.aliases.keys().filter(|k| self.entry(k).is_some()))
            .cloned()
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}
