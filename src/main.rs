use anyhow::Result;
use clap::Parser;
use pkgrepo::commands;
use pkgrepo::config::{Config, LISTING_ENV};

/// pkgrepo - query a package listing
///
/// Loads package definitions from a JSON listing (a local file or an HTTP
/// URL) into an in-memory repository and answers lookups against it.
///
/// If the PKGREPO_TOKEN environment variable is set, it is sent as a bearer
/// token when fetching remote listings.
///
/// Examples:
///   pkgrepo list
///   pkgrepo find vendor/lib 1.0.x-dev
///   pkgrepo --listing https://example.com/packages.json show vendor/lib
#[derive(Parser, Debug)]
#[command(author, version = env!("PKGREPO_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Listing file or URL (defaults to <config dir>/pkgrepo/packages.json)
    #[arg(
        long = "listing",
        short = 'l',
        env = LISTING_ENV,
        value_name = "PATH_OR_URL",
        global = true
    )]
    pub listing: Option<String>,

    /// Bearer token for remote listings (also via PKGREPO_TOKEN)
    #[arg(long = "token", value_name = "TOKEN", global = true)]
    pub token: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List every package, including alias entries
    List,

    /// Show details of the packages matching a name and optional version
    Show(ShowArgs),

    /// Print the unique name of the first package matching a name and version
    Find(LookupArgs),

    /// Print whether a package with the given identity exists
    Has(HasArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Package name, e.g. "vendor/lib"
    pub name: String,

    /// Version constraint, compared after normalization
    pub version: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct LookupArgs {
    /// Package name, e.g. "vendor/lib"
    pub name: String,

    /// Version, compared after normalization
    pub version: String,
}

#[derive(clap::Args, Debug)]
pub struct HasArgs {
    #[command(flatten)]
    pub lookup: LookupArgs,

    /// Source reference the package is pinned to
    #[arg(long = "reference", value_name = "REF")]
    pub reference: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = pkgrepo::runtime::RealRuntime;

    let config = Config::resolve(&runtime, cli.listing, cli.token)?;
    let repository = commands::open_repository(runtime, &config).await?;

    match cli.command {
        Commands::List => commands::list(&repository)?,
        Commands::Show(args) => commands::show(&repository, &args.name, args.version.as_deref())?,
        Commands::Find(args) => commands::find(&repository, &args.name, &args.version)?,
        Commands::Has(args) => {
            commands::has(
                &repository,
                &args.lookup.name,
                &args.lookup.version,
                args.reference.as_deref(),
            )?;
        }
    }
    Ok(())
}
