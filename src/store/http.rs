use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, PRAGMA};

use super::{IndexSource, LoadError};

/// Fetches the index over HTTP, always asking for a fresh copy.
pub struct HttpSource {
    timeout: Duration,
}

impl HttpSource {
    pub fn new(timeout_secs: u64) -> Self {
        HttpSource {
            timeout: Duration::from_secs(timeout_secs.max(1)),
        }
    }
}

impl IndexSource for HttpSource {
    fn fetch(&self, location: &str) -> Result<String, LoadError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| LoadError::Fetch(format!("HTTP client error: {}", e)))?;

        let resp = client
            .get(location)
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .map_err(|e| LoadError::Fetch(format!("request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(LoadError::Fetch(format!("HTTP {}", resp.status())));
        }

        resp.text()
            .map_err(|e| LoadError::Fetch(format!("reading body failed: {}", e)))
    }
}
