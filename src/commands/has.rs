use anyhow::{Context, Result};

use crate::package::{MemoryPackage, PackageSource};
use crate::repository::{ArrayRepository, Repository};

/// Print whether a package with this identity is present.
///
/// Identity is the unique name, so a `reference` is needed to match packages
/// whose source pins one. The version is normalized by the repository's own
/// normalizer, as for lookups.
#[tracing::instrument(skip(repository))]
pub fn has(
    repository: &ArrayRepository,
    name: &str,
    version: &str,
    reference: Option<&str>,
) -> Result<bool> {
    let found = contains(repository, name, version, reference)?;
    println!("{}", if found { "yes" } else { "no" });
    Ok(found)
}

fn contains(
    repository: &ArrayRepository,
    name: &str,
    version: &str,
    reference: Option<&str>,
) -> Result<bool> {
    let normalized = repository
        .normalize_version(version)
        .with_context(|| format!("Cannot look up {} {}", name, version))?;

    let mut candidate = MemoryPackage::new(name, normalized, version);
    if let Some(reference) = reference {
        candidate = candidate.with_source(PackageSource {
            reference: Some(reference.to_string()),
            ..Default::default()
        });
    }

    Ok(repository.has_package(&candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::PackageHandle;
    use crate::package::version::MockVersionNormalizer;
    use mockall::predicate::eq;
    use std::rc::Rc;

    fn repository() -> ArrayRepository {
        let pinned = MemoryPackage::new("vendor/app", "dev-main", "dev-main").with_source(
            PackageSource {
                kind: "git".into(),
                url: "https://example.com/app.git".into(),
                reference: Some("abc123".into()),
            },
        );
        ArrayRepository::new([
            Rc::new(MemoryPackage::new("vendor/lib", "1.0.0.0", "1.0.0")) as PackageHandle,
            Rc::new(pinned) as PackageHandle,
        ])
    }

    #[test]
    fn test_has_present_package() {
        assert!(has(&repository(), "Vendor/Lib", "v1.0", None).unwrap());
    }

    #[test]
    fn test_has_absent_package() {
        assert!(!has(&repository(), "vendor/lib", "2.0", None).unwrap());
        assert!(!has(&repository(), "vendor/missing", "1.0", None).unwrap());
    }

    #[test]
    fn test_has_requires_reference_for_pinned_sources() {
        let repo = repository();
        assert!(!contains(&repo, "vendor/app", "dev-main", None).unwrap());
        assert!(contains(&repo, "vendor/app", "dev-main", Some("abc123")).unwrap());
        assert!(!contains(&repo, "vendor/app", "dev-main", Some("def456")).unwrap());
    }

    #[test]
    fn test_has_rejects_malformed_version() {
        assert!(has(&repository(), "vendor/lib", "not a version", None).is_err());
    }

    #[test]
    fn test_has_uses_repository_normalizer() {
        let mut normalizer = MockVersionNormalizer::new();
        normalizer
            .expect_normalize()
            .with(eq("stable"))
            .times(1)
            .returning(|_| Ok("1.0.0.0".to_string()));

        let repo = repository().with_normalizer(normalizer);
        assert!(contains(&repo, "vendor/lib", "stable", None).unwrap());
    }
}
