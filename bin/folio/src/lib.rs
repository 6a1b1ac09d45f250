//! Folio CLI Library
//!
//! Command implementations and the JSON API behind the `folio` binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (query, check, sitemap, serve)
//! - [`server`] - Read-only JSON API over the content repositories
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folio::cmd;
//!
//! // Validate configuration and content
//! cmd::check::run(Path::new("folio.toml"), false).unwrap();
//! ```

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};

/// Run `$body` with `$repo` bound to the repository of `$kind`.
///
/// Both arms must produce the same type.
#[macro_export]
macro_rules! with_repository {
    ($site:expr, $kind:expr, |$repo:ident| $body:expr) => {
        match $kind {
            $crate::ContentKind::Blog => {
                let $repo = $site.blog();
                $body
            }
            $crate::ContentKind::Homelab => {
                let $repo = $site.homelabs();
                $body
            }
        }
    };
}

pub mod cmd;
pub mod server;

// Re-export core types for convenience
pub use folio_core::{Config, ContentKind, Facet};
pub use folio_site::{Site, SitemapGenerator};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// folio::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Load configuration, falling back to defaults when the file is absent.
///
/// `FOLIO__SECTION__KEY` environment overrides are layered over the file.
pub fn load_config(path: &Path) -> Result<Arc<Config>> {
    let config = if path.exists() {
        Config::load_with_env(path).wrap_err("Failed to load configuration")?
    } else {
        tracing::info!(?path, "configuration file not found, using defaults");
        Config::default()
    };
    tracing::debug!(?config, "Loaded configuration");
    Ok(Arc::new(config))
}

/// Open the site described by the configuration at `path`.
pub fn open_site(path: &Path) -> Result<Site> {
    Ok(Site::open(load_config(path)?))
}
