use anyhow::Result;
use log::debug;

use crate::package::Package;
use crate::repository::Repository;

/// List every package in repository order
#[tracing::instrument(skip(repository))]
pub fn list(repository: &dyn Repository) -> Result<()> {
    let packages = repository.packages();
    if packages.is_empty() {
        println!("No packages.");
        return Ok(());
    }

    debug!("Found {} package(s)", packages.len());

    for package in packages {
        println!("{}", describe(package.as_ref()));
    }

    Ok(())
}

/// One-line summary: `name version`, with the base version for aliases.
pub(crate) fn describe(package: &dyn Package) -> String {
    match package.alias_of() {
        Some(base) => format!("{} (alias of {})", package, base.pretty_version()),
        None => package.to_string(),
    }
}
