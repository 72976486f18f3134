//! Package records
//!
//! This module defines the package contract read by repositories, the
//! concrete record types, version normalization and the JSON loader.

mod alias;
mod loader;
mod memory;
pub mod version;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use crate::repository::RepositoryId;

pub use alias::AliasPackage;
pub use loader::{ArrayLoader, ExtraConfig, LoadedPackages, PackageConfig};
pub use memory::MemoryPackage;
pub use version::{VersionNormalizer, VersionParser};

/// Shared handle to a package. Repositories and callers hold clones of the same record.
pub type PackageHandle = Rc<dyn Package>;

/// Where a package's sources can be obtained from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PackageSource {
    /// VCS or archive type (e.g., "git")
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    /// Commit, tag or branch the package was built from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Identity and version accessors every package exposes to a repository.
pub trait Package: fmt::Debug {
    /// Lower-cased package name.
    fn name(&self) -> &str;

    /// Name as originally written.
    fn pretty_name(&self) -> &str;

    /// Normalized version.
    fn version(&self) -> &str;

    /// Version as originally written.
    fn pretty_version(&self) -> &str;

    /// Normalized alias version, if the package declares one.
    fn alias(&self) -> Option<&str>;

    /// Alias version as originally written.
    fn pretty_alias(&self) -> Option<&str>;

    fn source(&self) -> Option<&PackageSource>;

    fn description(&self) -> Option<&str>;

    /// Repository currently holding this package.
    fn repository(&self) -> Option<RepositoryId>;

    /// Record the repository holding this package. The package never owns it.
    fn set_repository(&self, repository: RepositoryId);

    /// The aliased package, when this package is an alias.
    fn alias_of(&self) -> Option<&PackageHandle> {
        None
    }

    /// Identity used for existence checks and removal.
    ///
    /// Format: `<name>-<version>`, followed by `#<reference>` when the
    /// package source pins a reference.
    fn unique_name(&self) -> String {
        match self.source().and_then(|s| s.reference.as_deref()) {
            Some(reference) if !reference.is_empty() => {
                format!("{}-{}#{}", self.name(), self.version(), reference)
            }
            _ => format!("{}-{}", self.name(), self.version()),
        }
    }

    /// Whether the alias fields are set and non-empty.
    fn has_alias(&self) -> bool {
        self.alias().is_some_and(|alias| !alias.is_empty())
    }
}

impl fmt::Display for dyn Package + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pretty_name(), self.pretty_version())
    }
}
