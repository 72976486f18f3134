//! Package loading from JSON definitions.
//!
//! A definition mirrors the entries of a `packages.json` listing:
//!
//! ```json
//! {
//!   "name": "vendor/lib",
//!   "version": "dev-main",
//!   "source": { "type": "git", "url": "https://example.com/lib.git", "reference": "abc123" },
//!   "extra": { "branch-alias": { "dev-main": "1.0.x-dev" } }
//! }
//! ```

use anyhow::{Context, Result, bail};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::repository::PackageProvider;

use super::{MemoryPackage, PackageHandle, PackageSource, VersionNormalizer, VersionParser};

/// A package definition as found in a listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PackageConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PackageSource>,
    #[serde(default, skip_serializing_if = "ExtraConfig::is_empty")]
    pub extra: ExtraConfig,
}

/// Free-form `extra` section; only branch aliases are interpreted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ExtraConfig {
    /// Maps a pretty version to the alias it is also known as
    #[serde(rename = "branch-alias", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub branch_alias: BTreeMap<String, String>,
}

impl ExtraConfig {
    pub fn is_empty(&self) -> bool {
        self.branch_alias.is_empty()
    }
}

/// Turns package definitions into [`MemoryPackage`] records.
pub struct ArrayLoader<N: VersionNormalizer = VersionParser> {
    normalizer: N,
}

impl ArrayLoader {
    pub fn new() -> Self {
        Self::with_normalizer(VersionParser::new())
    }
}

impl Default for ArrayLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: VersionNormalizer> ArrayLoader<N> {
    pub fn with_normalizer(normalizer: N) -> Self {
        Self { normalizer }
    }

    /// Load a single definition.
    ///
    /// The version is normalized; a branch alias keyed by the pretty
    /// version becomes the package alias.
    pub fn load(&self, config: &PackageConfig) -> Result<MemoryPackage> {
        if config.name.trim().is_empty() {
            bail!("Package definition is missing a name");
        }
        if config.version.trim().is_empty() {
            bail!("Package {} is missing a version", config.name);
        }

        let version = self
            .normalizer
            .normalize(&config.version)
            .with_context(|| format!("Invalid version for package {}", config.name))?;

        let mut package = MemoryPackage::new(&config.name, version, &config.version);

        if let Some(description) = &config.description {
            package = package.with_description(description);
        }
        if let Some(source) = &config.source {
            package = package.with_source(source.clone());
        }

        if let Some(alias) = config.extra.branch_alias.get(&config.version) {
            let normalized = self.normalizer.normalize(alias).with_context(|| {
                format!("Invalid branch alias {} for package {}", alias, config.name)
            })?;
            debug!("{} {} is aliased as {}", config.name, config.version, alias);
            package = package.with_alias(normalized, alias);
        }

        Ok(package)
    }

    /// Load every definition, stopping at the first invalid one.
    pub fn load_all(&self, configs: &[PackageConfig]) -> Result<Vec<PackageHandle>> {
        configs
            .iter()
            .map(|config| self.load(config).map(|p| Rc::new(p) as PackageHandle))
            .collect()
    }
}

/// Package definitions ready to seed a repository.
pub struct LoadedPackages<N: VersionNormalizer = VersionParser> {
    configs: Vec<PackageConfig>,
    loader: ArrayLoader<N>,
}

impl LoadedPackages {
    pub fn new(configs: Vec<PackageConfig>) -> Self {
        Self {
            configs,
            loader: ArrayLoader::new(),
        }
    }
}

impl<N: VersionNormalizer> LoadedPackages<N> {
    pub fn with_loader(configs: Vec<PackageConfig>, loader: ArrayLoader<N>) -> Self {
        Self { configs, loader }
    }
}

impl<N: VersionNormalizer> PackageProvider for LoadedPackages<N> {
    fn packages(&self) -> Result<Vec<PackageHandle>> {
        self.loader.load_all(&self.configs)
    }
}
