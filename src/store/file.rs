use std::fs;
use std::path::PathBuf;

use url::Url;

use super::{IndexSource, LoadError};

/// Reads the index from disk. Accepts plain paths and `file://` URLs, for
/// browsing a checkout of the site without a web server.
pub struct FileSource;

impl IndexSource for FileSource {
    fn fetch(&self, location: &str) -> Result<String, LoadError> {
        let path: PathBuf = if location.starts_with("file://") {
            Url::parse(location)
                .ok()
                .and_then(|u| u.to_file_path().ok())
                .ok_or_else(|| LoadError::Fetch(format!("invalid file URL: {}", location)))?
        } else {
            location.into()
        };

        fs::read_to_string(&path)
            .map_err(|e| LoadError::Fetch(format!("{}: {}", path.display(), e)))
    }
}
