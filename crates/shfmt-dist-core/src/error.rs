//! Installer error taxonomy.
//!
//! Every stage of the fetch-and-install pipeline fails with one of these
//! variants. None is retried; the caller decides whether to re-run.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of one stage of the install pipeline.
#[derive(Debug, Error)]
pub enum InstallError {
    /// No locator entry (after alias resolution) for the platform.
    #[error("unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// Non-200 response (`status` is set) or transport failure (`source` is set).
    #[error("download of {url} failed: {}", describe_status(.status))]
    DownloadFailed {
        url: String,
        status: Option<u32>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Downloaded bytes do not hash to the pinned digest.
    #[error("sha256 mismatch, expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// Filesystem error while writing the artifact or changing its mode.
    #[error("write to {} failed", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Locator entry whose digest is not 64 hex characters.
    #[error("invalid sha256 digest for {suffix}: {digest:?}")]
    InvalidDigest { suffix: String, digest: String },

    /// Configured release base URL does not parse.
    #[error("invalid release base URL {base:?}")]
    InvalidUrl {
        base: String,
        #[source]
        source: url::ParseError,
    },
}

fn describe_status(status: &Option<u32>) -> String {
    match status {
        Some(code) => format!("HTTP {}", code),
        None => "transport error".to_string(),
    }
}

impl InstallError {
    /// Short name of the stage that failed, for log fields.
    pub fn stage(&self) -> &'static str {
        match self {
            InstallError::UnsupportedPlatform { .. } => "resolve",
            InstallError::DownloadFailed { .. } => "fetch",
            InstallError::ChecksumMismatch { .. } => "verify",
            InstallError::WriteFailed { .. } => "persist",
            InstallError::InvalidDigest { .. } | InstallError::InvalidUrl { .. } => "locator",
        }
    }

    pub(crate) fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InstallError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}
