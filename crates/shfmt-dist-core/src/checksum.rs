//! SHA-256 verification of downloaded artifacts.
//!
//! `verify` is the only gate between the network and the filesystem: bytes
//! that fail it are dropped and never written.

use crate::error::InstallError;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// SHA-256 of an in-memory buffer as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Returns `data` unchanged if its digest equals `expected` (case-insensitive).
pub fn verify(data: Vec<u8>, expected: &str) -> Result<Vec<u8>, InstallError> {
    let actual = sha256_hex(&data);
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(InstallError::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(data)
}

/// Compute SHA-256 of a file and return the digest as lowercase hex.
/// Reads in chunks to keep memory use bounded.
pub fn sha256_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HELLO_SHA256: &str = "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03";

    #[test]
    fn sha256_hex_known_content() {
        assert_eq!(sha256_hex(b"hello\n"), HELLO_SHA256);
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn verify_accepts_uppercase_expected() {
        let out = verify(b"hello\n".to_vec(), &HELLO_SHA256.to_uppercase()).unwrap();
        assert_eq!(out, b"hello\n");
    }

    #[test]
    fn verify_is_idempotent() {
        let first = verify(b"hello\n".to_vec(), HELLO_SHA256).unwrap();
        let second = verify(first.clone(), HELLO_SHA256).unwrap();
        assert_eq!(first, second);

        let bad = "0".repeat(64);
        assert!(verify(b"hello\n".to_vec(), &bad).is_err());
        assert!(verify(b"hello\n".to_vec(), &bad).is_err());
    }

    #[test]
    fn verify_rejects_single_character_change() {
        let mut wrong = HELLO_SHA256.to_string();
        wrong.replace_range(0..1, "6");
        match verify(b"hello\n".to_vec(), &wrong) {
            Err(InstallError::ChecksumMismatch { expected, actual }) => {
                assert_eq!(expected, wrong);
                assert_eq!(actual, HELLO_SHA256);
            }
            other => panic!("expected ChecksumMismatch, got {other:?}"),
        }
    }

    #[test]
    fn sha256_path_matches_in_memory_digest() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hello\n").unwrap();
        f.flush().unwrap();
        assert_eq!(sha256_path(f.path()).unwrap(), HELLO_SHA256);
    }

    #[test]
    fn sha256_path_missing_file_errors() {
        assert!(sha256_path(Path::new("/nonexistent/shfmt")).is_err());
    }
}
