//! CLI commands operating on a loaded repository.

mod find;
mod has;
mod list;
mod show;

use anyhow::Result;

use crate::config::Config;
use crate::listing::load_repository;
use crate::repository::ArrayRepository;
use crate::runtime::Runtime;

pub use find::find;
pub use has::has;
pub use list::list;
pub use show::show;

/// Fetch the configured listing and build the repository commands run against.
#[tracing::instrument(skip(runtime, config))]
pub async fn open_repository<R: Runtime + 'static>(
    runtime: R,
    config: &Config,
) -> Result<ArrayRepository> {
    let listing = config.listing(runtime)?;
    load_repository(listing.as_ref()).await
}
