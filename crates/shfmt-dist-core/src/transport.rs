//! Single-shot HTTP GET.
//!
//! One attempt, no retry. A response counts as success only when the final
//! status (after redirects) is exactly 200.

use crate::error::InstallError;
use std::time::Duration;

/// Fetches a URL into memory. Implemented by [`CurlTransport`]; tests supply stubs.
pub trait Transport {
    fn get(&self, url: &str) -> Result<Vec<u8>, InstallError>;
}

/// libcurl options for the download. Timeouts are unset unless configured.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub max_redirections: u32,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            max_redirections: 10,
        }
    }
}

/// Blocking transport over a libcurl easy handle.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    opts: CurlOptions,
}

impl CurlTransport {
    pub fn new(opts: CurlOptions) -> Self {
        Self { opts }
    }

    fn perform(&self, url: &str, body: &mut Vec<u8>) -> Result<u32, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.opts.max_redirections)?;
        if let Some(t) = self.opts.connect_timeout {
            easy.connect_timeout(t)?;
        }
        if let Some(t) = self.opts.timeout {
            easy.timeout(t)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        easy.response_code()
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, InstallError> {
        let mut body = Vec::new();
        let code = self
            .perform(url, &mut body)
            .map_err(|e| InstallError::DownloadFailed {
                url: url.to_string(),
                status: None,
                source: Some(Box::new(e)),
            })?;
        if code != 200 {
            return Err(InstallError::DownloadFailed {
                url: url.to_string(),
                status: Some(code),
                source: None,
            });
        }
        tracing::debug!("GET {} returned {} bytes", url, body.len());
        Ok(body)
    }
}
