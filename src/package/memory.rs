use std::cell::Cell;

use crate::repository::RepositoryId;

use super::{Package, PackageSource};

/// Package record held entirely in memory.
///
/// The name is lower-cased on construction. The version must already be
/// normalized (see [`VersionParser`](super::VersionParser)).
#[derive(Debug, Clone)]
pub struct MemoryPackage {
    name: String,
    pretty_name: String,
    version: String,
    pretty_version: String,
    alias: Option<String>,
    pretty_alias: Option<String>,
    source: Option<PackageSource>,
    description: Option<String>,
    repository: Cell<Option<RepositoryId>>,
}

impl MemoryPackage {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        pretty_version: impl Into<String>,
    ) -> Self {
        let pretty_name = name.into();
        Self {
            name: pretty_name.to_lowercase(),
            pretty_name,
            version: version.into(),
            pretty_version: pretty_version.into(),
            alias: None,
            pretty_alias: None,
            source: None,
            description: None,
            repository: Cell::new(None),
        }
    }

    /// Declare a version alias (normalized and pretty forms).
    pub fn with_alias(mut self, alias: impl Into<String>, pretty_alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self.pretty_alias = Some(pretty_alias.into());
        self
    }

    pub fn with_source(mut self, source: PackageSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Package for MemoryPackage {
    fn name(&self) -> &str {
        &self.name
    }

    fn pretty_name(&self) -> &str {
        &self.pretty_name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn pretty_version(&self) -> &str {
        &self.pretty_version
    }

    fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    fn pretty_alias(&self) -> Option<&str> {
        self.pretty_alias.as_deref()
    }

    fn source(&self) -> Option<&PackageSource> {
        self.source.as_ref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn repository(&self) -> Option<RepositoryId> {
        self.repository.get()
    }

    fn set_repository(&self, repository: RepositoryId) {
        self.repository.set(Some(repository));
    }
}
