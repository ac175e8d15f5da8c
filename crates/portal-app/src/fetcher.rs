//! File-backed resource fetcher: one `<name>.json` per resource.

use std::path::PathBuf;

use portal_core::JsonFetcher;
use portal_types::{PortalError, Result};

pub struct FileFetcher {
    dir: PathBuf,
}

impl FileFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl JsonFetcher for FileFetcher {
    fn fetch(&self, name: &str) -> Result<String> {
        let path = self.dir.join(format!("{name}.json"));
        std::fs::read_to_string(&path)
            .map_err(|e| PortalError::Data(format!("{name}.json is unavailable ({e})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_named_resources() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("news.json"), "[]").unwrap();

        let fetcher = FileFetcher::new(dir.path());
        assert_eq!(fetcher.fetch("news").unwrap(), "[]");
    }

    #[test]
    fn missing_resource_is_a_presentable_error() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FileFetcher::new(dir.path());
        let err = fetcher.fetch("live").unwrap_err();
        assert!(format!("{err}").contains("live.json is unavailable"));
    }
}
