use anyhow::{Context, Result};
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::http::HttpClient;
use crate::listing::{FileListing, HttpListing, Listing};
use crate::runtime::Runtime;

/// Environment variable naming the listing to load.
pub const LISTING_ENV: &str = "PKGREPO_LISTING";

/// Environment variable holding a bearer token for remote listings.
pub const TOKEN_ENV: &str = "PKGREPO_TOKEN";

/// Where the package listing lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingLocation {
    File(PathBuf),
    Url(String),
}

impl FromStr for ListingLocation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            anyhow::bail!("Listing location must not be empty");
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(ListingLocation::Url(s.to_string()))
        } else {
            Ok(ListingLocation::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for ListingLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingLocation::File(path) => write!(f, "{}", path.display()),
            ListingLocation::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Resolved command-line configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub listing: ListingLocation,
    pub token: Option<String>,
}

impl Config {
    /// Resolve the configuration from explicit values, falling back to the
    /// environment and then to the default listing path.
    #[tracing::instrument(skip(runtime, token))]
    pub fn resolve<R: Runtime>(
        runtime: &R,
        listing: Option<String>,
        token: Option<String>,
    ) -> Result<Self> {
        let listing = match listing {
            Some(location) => location.parse()?,
            None => ListingLocation::File(default_listing_path(runtime)?),
        };

        let token = token
            .or_else(|| runtime.env_var(TOKEN_ENV).ok())
            .filter(|t| !t.trim().is_empty());

        debug!("Using listing {}", listing);
        Ok(Self { listing, token })
    }

    /// Build the HTTP client, authenticating with the token when one is set.
    pub fn http_client(&self) -> Result<HttpClient> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("Token contains characters not allowed in a header")?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using {} for authentication: {}", TOKEN_ENV, mask_token(token));
        }

        let client = Client::builder()
            .user_agent("pkgrepo-cli")
            .default_headers(headers)
            .build()?;

        Ok(HttpClient::new(client))
    }

    /// Create the listing this configuration points at.
    pub fn listing<R: Runtime + 'static>(&self, runtime: R) -> Result<Box<dyn Listing>> {
        Ok(match &self.listing {
            ListingLocation::File(path) => Box::new(FileListing::new(runtime, path.clone())),
            ListingLocation::Url(url) => Box::new(HttpListing::new(self.http_client()?, url)),
        })
    }
}

/// Default listing path: `<config_dir>/pkgrepo/packages.json`.
#[tracing::instrument(skip(runtime))]
pub fn default_listing_path<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let config_dir = runtime
        .config_dir()
        .context("Could not find configuration directory")?;
    Ok(config_dir.join("pkgrepo").join("packages.json"))
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("*********{}", tail)
}
