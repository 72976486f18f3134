use std::cell::Cell;

use crate::repository::RepositoryId;

use super::{Package, PackageHandle, PackageSource};

/// Presents an existing package under an alternate version.
///
/// Name, source and description come from the aliased package. The alias
/// never declares an alias of its own, which keeps repository insertion
/// from recursing further.
#[derive(Debug)]
pub struct AliasPackage {
    alias_of: PackageHandle,
    version: String,
    pretty_version: String,
    repository: Cell<Option<RepositoryId>>,
}

impl AliasPackage {
    pub fn new(
        alias_of: PackageHandle,
        version: impl Into<String>,
        pretty_version: impl Into<String>,
    ) -> Self {
        Self {
            alias_of,
            version: version.into(),
            pretty_version: pretty_version.into(),
            repository: Cell::new(None),
        }
    }
}

impl Package for AliasPackage {
    fn name(&self) -> &str {
        self.alias_of.name()
    }

    fn pretty_name(&self) -> &str {
        self.alias_of.pretty_name()
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn pretty_version(&self) -> &str {
        &self.pretty_version
    }

    fn alias(&self) -> Option<&str> {
        None
    }

    fn pretty_alias(&self) -> Option<&str> {
        None
    }

    fn source(&self) -> Option<&PackageSource> {
        self.alias_of.source()
    }

    fn description(&self) -> Option<&str> {
        self.alias_of.description()
    }

    fn repository(&self) -> Option<RepositoryId> {
        self.repository.get()
    }

    fn set_repository(&self, repository: RepositoryId) {
        self.repository.set(Some(repository));
    }

    fn alias_of(&self) -> Option<&PackageHandle> {
        Some(&self.alias_of)
    }
}
