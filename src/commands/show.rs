use anyhow::{Context, Result, bail};
use log::debug;

use crate::package::Package;
use crate::repository::Repository;

use super::list::describe;

/// Show detailed information about every package matching `name` and `version`
#[tracing::instrument(skip(repository))]
pub fn show(repository: &dyn Repository, name: &str, version: Option<&str>) -> Result<()> {
    let packages = repository
        .find_packages(name, version)
        .with_context(|| format!("Cannot look up {}", name))?;

    if packages.is_empty() {
        match version {
            Some(version) => bail!("No package {} matches version {}", name, version),
            None => bail!("No package named {}", name),
        }
    }

    debug!("{} package(s) match {}", packages.len(), name);

    for (i, package) in packages.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for line in details(package.as_ref()) {
            println!("{}", line);
        }
    }

    Ok(())
}

fn details(package: &dyn Package) -> Vec<String> {
    let mut lines = vec![
        format!("Package: {}", describe(package)),
        format!("Version: {}", package.version()),
        format!("Unique name: {}", package.unique_name()),
    ];

    if let Some(pretty_alias) = package.pretty_alias()
        && package.has_alias()
    {
        lines.push(format!("Alias: {}", pretty_alias));
    }
    if let Some(description) = package.description() {
        lines.push(format!("Description: {}", description));
    }
    if let Some(source) = package.source() {
        match source.reference.as_deref().filter(|r| !r.is_empty()) {
            Some(reference) => {
                lines.push(format!("Source: {} {} ({})", source.kind, source.url, reference))
            }
            None => lines.push(format!("Source: {} {}", source.kind, source.url)),
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{MemoryPackage, PackageHandle, PackageSource};
    use crate::repository::ArrayRepository;
    use std::rc::Rc;

    fn repository() -> ArrayRepository {
        let lib = MemoryPackage::new("vendor/lib", "dev-main", "dev-main")
            .with_alias("1.0.9999999.9999999-dev", "1.0.x-dev")
            .with_description("A library")
            .with_source(PackageSource {
                kind: "git".into(),
                url: "https://example.com/lib.git".into(),
                reference: Some("abc123".into()),
            });
        ArrayRepository::new([
            Rc::new(lib) as PackageHandle,
            Rc::new(MemoryPackage::new("vendor/other", "2.0.0.0", "2.0.0")) as PackageHandle,
        ])
    }

    #[test]
    fn test_show_all_versions() {
        assert!(show(&repository(), "vendor/lib", None).is_ok());
    }

    #[test]
    fn test_show_specific_version() {
        assert!(show(&repository(), "Vendor/Lib", Some("1.0.x-dev")).is_ok());
    }

    #[test]
    fn test_show_unknown_package_fails() {
        let err = show(&repository(), "vendor/missing", None).unwrap_err();
        assert!(err.to_string().contains("vendor/missing"));
    }

    #[test]
    fn test_show_unmatched_version_fails() {
        assert!(show(&repository(), "vendor/lib", Some("3.0.0")).is_err());
    }

    #[test]
    fn test_show_malformed_version_fails() {
        let err = show(&repository(), "vendor/lib", Some("not a version")).unwrap_err();
        assert!(
            err.downcast_ref::<crate::error::VersionParseError>()
                .is_some()
        );
    }

    #[test]
    fn test_details_of_full_package() {
        let repo = repository();
        let lines = details(repo.packages()[0].as_ref());
        assert_eq!(
            lines,
            vec![
                "Package: vendor/lib dev-main",
                "Version: dev-main",
                "Unique name: vendor/lib-dev-main#abc123",
                "Alias: 1.0.x-dev",
                "Description: A library",
                "Source: git https://example.com/lib.git (abc123)",
            ]
        );
    }

    #[test]
    fn test_details_of_alias_entry() {
        let repo = repository();
        let lines = details(repo.packages()[1].as_ref());
        assert_eq!(lines[0], "Package: vendor/lib 1.0.x-dev (alias of dev-main)");
        assert_eq!(lines[1], "Version: 1.0.9999999.9999999-dev");
        assert!(lines.contains(&"Description: A library".to_string()));
    }

    #[test]
    fn test_details_of_bare_package() {
        let package = MemoryPackage::new("vendor/other", "2.0.0.0", "2.0.0");
        assert_eq!(details(&package).len(), 3);
    }
}
