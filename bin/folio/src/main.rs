//! Folio CLI
//!
//! Query, validate and serve a folder of blog posts and homelab write-ups.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use folio::{ContentKind, Facet};
use folio_store::Filter;

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Slug-indexed markdown content for a portfolio site"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// List the slugs of a collection
    Slugs {
        /// Collection (blog or homelabs)
        kind: ContentKind,
    },
    /// List documents, newest first
    List {
        /// Collection (blog or homelabs)
        kind: ContentKind,
        /// Case-insensitive text to find in title or description
        #[arg(short, long)]
        search: Option<String>,
        /// Only this category
        #[arg(long)]
        category: Option<String>,
        /// Only this focus area (homelabs)
        #[arg(long)]
        focus: Option<String>,
        /// Only this difficulty (homelabs)
        #[arg(long)]
        difficulty: Option<String>,
        /// Leave out the featured document
        #[arg(long)]
        exclude_featured: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the newest documents
    Recent {
        /// Collection (blog or homelabs)
        kind: ContentKind,
        /// Number of documents
        #[arg(short = 'n', long, default_value_t = 3)]
        count: usize,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the featured document
    Featured {
        /// Collection (blog or homelabs)
        kind: ContentKind,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the distinct values of a facet
    Facets {
        /// Collection (blog or homelabs)
        kind: ContentKind,
        /// Facet (category, focus-area, difficulty, status, tag, tool)
        facet: Facet,
    },
    /// Print one document
    Show {
        /// Collection (blog or homelabs)
        kind: ContentKind,
        /// Document slug
        slug: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Write sitemap.xml
    Sitemap {
        /// Output file
        #[arg(short, long, default_value = "public/sitemap.xml")]
        output: std::path::PathBuf,
    },
    /// Serve the JSON API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    let site = || folio::open_site(&cli.config);

    let output = match cli.command {
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, strict)?;
            return Ok(());
        }
        Commands::Slugs { kind } => folio::cmd::query::slugs(&site()?, kind),
        Commands::List {
            kind,
            search,
            category,
            focus,
            difficulty,
            exclude_featured,
            json,
        } => {
            let filter = Filter {
                search,
                category,
                focus_area: focus,
                difficulty,
                exclude_featured,
            };
            folio::cmd::query::list(&site()?, kind, &filter, json)?
        }
        Commands::Recent { kind, count, json } => {
            folio::cmd::query::recent(&site()?, kind, count, json)?
        }
        Commands::Featured { kind, json } => folio::cmd::query::featured(&site()?, kind, json)?,
        Commands::Facets { kind, facet } => folio::cmd::query::facets(&site()?, kind, facet),
        Commands::Show { kind, slug, json } => {
            folio::cmd::query::show(&site()?, kind, &slug, json)?
        }
        Commands::Sitemap { output } => {
            folio::cmd::sitemap::run(&site()?, &output)?;
            return Ok(());
        }
        Commands::Serve { port } => {
            folio::cmd::serve::run(site()?, port).await?;
            return Ok(());
        }
    };

    print!("{output}");
    Ok(())
}
