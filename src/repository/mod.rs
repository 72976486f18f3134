//! Package repositories.
//!
//! A repository is any source of packages that can be queried by name and
//! version. [`ArrayRepository`] keeps its packages in memory and is the
//! reference implementation of the contract.

mod array;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::VersionParseError;
use crate::package::{Package, PackageHandle};

pub use array::{AliasBuilder, ArrayRepository};

/// Identifier a package uses to refer back to the repository holding it.
///
/// Unique for the life of the process. Holding one never keeps a repository alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepositoryId(u64);

impl RepositoryId {
    /// Allocate a fresh identifier.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "repository#{}", self.0)
    }
}

/// Query contract shared by every package source.
pub trait Repository {
    /// Find the first package matching `name` and `version`.
    ///
    /// The name is compared case-insensitively, the version after
    /// normalization. Malformed versions are reported, never swallowed.
    fn find_package(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<PackageHandle>, VersionParseError>;

    /// Find every package named `name`, optionally restricted to `version`.
    ///
    /// Results keep repository order; no match yields an empty list.
    fn find_packages(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> Result<Vec<PackageHandle>, VersionParseError>;

    /// Check whether a package with the same unique name is present.
    fn has_package(&self, package: &dyn Package) -> bool;

    /// All packages in insertion order.
    fn packages(&self) -> &[PackageHandle];

    /// Number of packages held.
    fn count(&self) -> usize {
        self.packages().len()
    }
}

/// Supplies the initial contents of a repository.
#[cfg_attr(test, mockall::automock)]
pub trait PackageProvider {
    fn packages(&self) -> anyhow::Result<Vec<PackageHandle>>;
}
