//! Listing served over HTTP.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::http::HttpClient;
use crate::package::PackageConfig;

use super::{Listing, ListingDocument};

/// Listing fetched from a URL.
pub struct HttpListing {
    http_client: HttpClient,
    url: String,
}

impl HttpListing {
    pub fn new(http_client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Listing for HttpListing {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<PackageConfig>> {
        debug!("Fetching listing from {}...", self.url);
        let document: ListingDocument = self.http_client.get_json(&self.url).await?;
        Ok(document.into_packages())
    }
}
