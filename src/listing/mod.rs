//! Listing abstraction for package definitions.
//!
//! A listing is a JSON document enumerating package definitions. It can live
//! on the local file system or behind an HTTP URL; either way it is fetched
//! once and used to seed an [`ArrayRepository`].

mod file;
mod remote;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};

use crate::package::{LoadedPackages, PackageConfig};
use crate::repository::ArrayRepository;

pub use file::FileListing;
pub use remote::HttpListing;

/// Accepted listing layouts: a bare array, or an object with a `packages` array.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ListingDocument {
    Bare(Vec<PackageConfig>),
    Wrapped { packages: Vec<PackageConfig> },
}

impl ListingDocument {
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .context("Listing is neither a package array nor a {\"packages\": [...]} object")
    }

    pub fn into_packages(self) -> Vec<PackageConfig> {
        match self {
            ListingDocument::Bare(packages) => packages,
            ListingDocument::Wrapped { packages } => packages,
        }
    }
}

/// Trait for package listings (local file, remote URL).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Listing: Send + Sync {
    /// Human-readable location of the listing.
    fn location(&self) -> &str;

    /// Fetch every package definition in the listing.
    async fn fetch(&self) -> Result<Vec<PackageConfig>>;
}

/// Fetch a listing and build a repository from it.
#[tracing::instrument(skip(listing))]
pub async fn load_repository(listing: &dyn Listing) -> Result<ArrayRepository> {
    let configs = listing
        .fetch()
        .await
        .with_context(|| format!("Failed to fetch listing {}", listing.location()))?;

    info!(
        "Fetched {} package definition(s) from {}",
        configs.len(),
        listing.location()
    );

    ArrayRepository::from_provider(&LoadedPackages::new(configs))
        .with_context(|| format!("Invalid package definition in {}", listing.location()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;

    #[test]
    fn test_parse_bare_array() {
        let doc = ListingDocument::parse(r#"[{"name": "a/b", "version": "1.0"}]"#).unwrap();
        let packages = doc.into_packages();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "a/b");
    }

    #[test]
    fn test_parse_wrapped_object() {
        let doc = ListingDocument::parse(
            r#"{"packages": [{"name": "a/b", "version": "1.0"}, {"name": "c/d", "version": "2.0"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.into_packages().len(), 2);
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(ListingDocument::parse(r#"{"name": "a/b"}"#).is_err());
        assert!(ListingDocument::parse("not json").is_err());
    }

    #[tokio::test]
    async fn test_load_repository_from_listing() {
        let mut listing = MockListing::new();
        listing
            .expect_location()
            .return_const("memory".to_string());
        listing.expect_fetch().returning(|| {
            Ok(vec![PackageConfig {
                name: "vendor/lib".into(),
                version: "1.0.0".into(),
                ..Default::default()
            }])
        });

        let repo = load_repository(&listing).await.unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.find_package("vendor/lib", "1.0").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_load_repository_reports_location_on_failure() {
        let mut listing = MockListing::new();
        listing
            .expect_location()
            .return_const("https://example.com/packages.json".to_string());
        listing
            .expect_fetch()
            .returning(|| Err(anyhow::anyhow!("connection refused")));

        let err = load_repository(&listing).await.unwrap_err();
        assert!(err.to_string().contains("https://example.com/packages.json"));
    }

    #[tokio::test]
    async fn test_load_repository_rejects_invalid_definition() {
        let mut listing = MockListing::new();
        listing
            .expect_location()
            .return_const("memory".to_string());
        listing.expect_fetch().returning(|| {
            Ok(vec![PackageConfig {
                name: "vendor/lib".into(),
                version: "garbage".into(),
                ..Default::default()
            }])
        });

        assert!(load_repository(&listing).await.is_err());
    }
}
