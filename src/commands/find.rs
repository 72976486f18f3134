use anyhow::{Context, Result};
use log::debug;

use crate::package::PackageHandle;
use crate::repository::Repository;

/// Print the unique name of the first package matching `name` and `version`
#[tracing::instrument(skip(repository))]
pub fn find(repository: &dyn Repository, name: &str, version: &str) -> Result<()> {
    let package = lookup(repository, name, version)?;
    debug!("Matched {}", package.unique_name());
    println!("{}", package.unique_name());
    Ok(())
}

fn lookup(repository: &dyn Repository, name: &str, version: &str) -> Result<PackageHandle> {
    repository
        .find_package(name, version)
        .with_context(|| format!("Cannot look up {} {}", name, version))?
        .with_context(|| format!("No package {} matches version {}", name, version))
}
