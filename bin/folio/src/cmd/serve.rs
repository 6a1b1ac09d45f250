//! Serve command - read-only JSON API over the content

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use folio_site::Site;
use tokio::net::TcpListener;

use crate::server::create_router;

/// Run the serve command.
///
/// Serves until the process is interrupted.
pub async fn run(site: Site, port: u16) -> Result<()> {
    let site = Arc::new(site);
    warm(Arc::clone(&site)).await?;

    let app = create_router(site);
    let addr = format!("127.0.0.1:{port}");

    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  API server running at http://{addr}");
    println!("  Press Ctrl+C to stop");
    println!();

    tracing::info!(%addr, "serving content API");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    Ok(())
}

/// Parse both collections on the blocking pool.
///
/// Listing routes then answer from the memoized listings without touching disk.
pub async fn warm(site: Arc<Site>) -> Result<()> {
    tokio::task::spawn_blocking(move || {
        let posts = site.blog().list_all().len();
        let homelabs = site.homelabs().list_all().len();
        tracing::info!(posts, homelabs, "content cache warmed");
    })
    .await
    .wrap_err("Content warm-up failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
