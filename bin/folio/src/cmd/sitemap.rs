//! Sitemap command - write sitemap.xml for the whole site

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use folio_site::{Site, SitemapGenerator};

/// Run the sitemap command.
pub fn run(site: &Site, output: &Path) -> Result<()> {
    tracing::info!(?output, "Generating sitemap");

    SitemapGenerator::write(site, output)
        .wrap_err_with(|| format!("Failed to write {}", output.display()))?;

    let count = SitemapGenerator::urls(site).len();
    println!("  ✓ Wrote {count} URLs to {}", output.display());

    Ok(())
}
