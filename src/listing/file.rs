//! Listing stored on the local file system.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};

use crate::package::PackageConfig;
use crate::runtime::Runtime;

use super::{Listing, ListingDocument};

/// Listing read from a JSON file.
pub struct FileListing<R: Runtime> {
    runtime: R,
    path: PathBuf,
    location: String,
}

impl<R: Runtime> FileListing<R> {
    pub fn new(runtime: R, path: PathBuf) -> Self {
        let location = path.display().to_string();
        Self {
            runtime,
            path,
            location,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<R: Runtime> Listing for FileListing<R> {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> Result<Vec<PackageConfig>> {
        if !self.runtime.exists(&self.path) {
            bail!("Listing file {:?} does not exist", self.path);
        }
        if self.runtime.is_dir(&self.path) {
            bail!("Listing path {:?} is a directory", self.path);
        }

        debug!("Reading listing from {:?}", self.path);
        let content = self.runtime.read_to_string(&self.path)?;
        let document = ListingDocument::parse(&content)
            .with_context(|| format!("Failed to parse listing {:?}", self.path))?;

        Ok(document.into_packages())
    }
}
