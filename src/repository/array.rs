//! In-memory package repository.
//!
//! Packages are kept in insertion order and every lookup is a linear scan,
//! so the first match is always the earliest inserted one.

use anyhow::Result;
use log::debug;
use std::fmt;
use std::rc::Rc;

use crate::error::VersionParseError;
use crate::package::{AliasPackage, Package, PackageHandle, VersionNormalizer, VersionParser};

use super::{PackageProvider, Repository, RepositoryId};

/// Builds the alias entry for a package from `(package, alias, pretty_alias)`.
pub type AliasBuilder = Box<dyn Fn(PackageHandle, &str, &str) -> PackageHandle>;

/// Repository holding packages in memory.
///
/// Inserting a package that declares an alias also inserts an alias entry
/// right after it. Insertion never deduplicates; use
/// [`has_package`](Repository::has_package) first when duplicates matter.
///
/// The alias builder must return packages without alias fields of their
/// own, otherwise insertion does not terminate.
pub struct ArrayRepository {
    id: RepositoryId,
    packages: Vec<PackageHandle>,
    normalizer: Box<dyn VersionNormalizer>,
    alias_builder: AliasBuilder,
}

impl ArrayRepository {
    /// Create an empty repository with the default normalizer and alias builder.
    pub fn empty() -> Self {
        Self {
            id: RepositoryId::next(),
            packages: Vec::new(),
            normalizer: Box::new(VersionParser::new()),
            alias_builder: Box::new(wrap_in_alias),
        }
    }

    /// Create a repository seeded with `packages`, each inserted via [`add_package`](Self::add_package).
    pub fn new(packages: impl IntoIterator<Item = PackageHandle>) -> Self {
        Self::empty().with_packages(packages)
    }

    /// Create a repository filled from a provider.
    pub fn from_provider(provider: &dyn PackageProvider) -> Result<Self> {
        Self::empty().load_from(provider)
    }

    /// Replace the version normalizer used by lookups.
    pub fn with_normalizer(mut self, normalizer: impl VersionNormalizer + 'static) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    /// Replace the alias builder. Applies to packages inserted afterwards.
    pub fn with_alias_builder(
        mut self,
        builder: impl Fn(PackageHandle, &str, &str) -> PackageHandle + 'static,
    ) -> Self {
        self.alias_builder = Box::new(builder);
        self
    }

    /// Insert `packages` in order.
    pub fn with_packages(mut self, packages: impl IntoIterator<Item = PackageHandle>) -> Self {
        for package in packages {
            self.add_package(package);
        }
        self
    }

    /// Insert everything the provider supplies, in order.
    pub fn load_from(self, provider: &dyn PackageProvider) -> Result<Self> {
        let packages = provider.packages()?;
        debug!("Loading {} package(s) into {}", packages.len(), self.id);
        Ok(self.with_packages(packages))
    }

    /// Identifier packages receive as their back-reference.
    pub fn id(&self) -> RepositoryId {
        self.id
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Normalize a version with the same rules lookups use.
    pub fn normalize_version(&self, version: &str) -> Result<String, VersionParseError> {
        self.normalizer.normalize(version)
    }

    /// Append a package, followed by its alias entry when it declares one.
    pub fn add_package(&mut self, package: PackageHandle) {
        package.set_repository(self.id);
        debug!("Adding {} to {}", package.unique_name(), self.id);

        let alias = package
            .has_alias()
            .then(|| self.create_alias_package(&package, None, None));
        self.packages.push(package);

        if let Some(alias) = alias {
            self.add_package(alias);
        }
    }

    /// Build the alias entry for `package`.
    ///
    /// `alias` and `pretty_alias` override the package's own alias fields;
    /// empty overrides fall back to them.
    pub fn create_alias_package(
        &self,
        package: &PackageHandle,
        alias: Option<&str>,
        pretty_alias: Option<&str>,
    ) -> PackageHandle {
        let alias = alias
            .filter(|a| !a.is_empty())
            .or_else(|| package.alias())
            .unwrap_or_default();
        let pretty_alias = pretty_alias
            .filter(|a| !a.is_empty())
            .or_else(|| package.pretty_alias())
            .unwrap_or_default();

        (self.alias_builder)(Rc::clone(package), alias, pretty_alias)
    }

    /// Remove the first package whose unique name matches `package`.
    ///
    /// Returns the removed handle; removing a package that is not present
    /// leaves the repository untouched.
    pub fn remove_package(&mut self, package: &dyn Package) -> Option<PackageHandle> {
        let unique_name = package.unique_name();
        let index = self
            .packages
            .iter()
            .position(|p| p.unique_name() == unique_name)?;

        debug!("Removing {} from {}", unique_name, self.id);
        Some(self.packages.remove(index))
    }

    fn matches(package: &dyn Package, name: &str, version: Option<&str>) -> bool {
        package.name() == name && version.is_none_or(|v| package.version() == v)
    }
}

fn wrap_in_alias(package: PackageHandle, alias: &str, pretty_alias: &str) -> PackageHandle {
    Rc::new(AliasPackage::new(package, alias, pretty_alias))
}

impl Repository for ArrayRepository {
    #[tracing::instrument(skip(self))]
    fn find_package(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<PackageHandle>, VersionParseError> {
        let version = self.normalizer.normalize(version)?;
        let name = name.to_lowercase();

        Ok(self
            .packages
            .iter()
            .find(|p| Self::matches(p.as_ref(), &name, Some(version.as_str())))
            .cloned())
    }

    #[tracing::instrument(skip(self))]
    fn find_packages(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> Result<Vec<PackageHandle>, VersionParseError> {
        let version = version.map(|v| self.normalizer.normalize(v)).transpose()?;
        let name = name.to_lowercase();

        Ok(self
            .packages
            .iter()
            .filter(|p| Self::matches(p.as_ref(), &name, version.as_deref()))
            .cloned()
            .collect())
    }

    fn has_package(&self, package: &dyn Package) -> bool {
        let unique_name = package.unique_name();
        self.packages.iter().any(|p| p.unique_name() == unique_name)
    }

    fn packages(&self) -> &[PackageHandle] {
        &self.packages
    }

    fn count(&self) -> usize {
        self.packages.len()
    }
}

impl Default for ArrayRepository {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<PackageHandle> for ArrayRepository {
    fn from_iter<I: IntoIterator<Item = PackageHandle>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Debug for ArrayRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayRepository")
            .field("id", &self.id)
            .field("packages", &self.packages)
            .finish_non_exhaustive()
    }
}
