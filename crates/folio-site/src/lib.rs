//! Folio Site Library
//!
//! Bundles the per-kind repositories behind one handle and generates
//! site-wide artifacts from them.
//!
//! # Modules
//!
//! - [`site`] - Shared handle over the blog and homelab repositories
//! - [`sitemap`] - XML sitemap generation

pub mod site;
pub mod sitemap;

pub use site::Site;
pub use sitemap::{ChangeFreq, STATIC_ROUTES, SitemapError, SitemapGenerator, SitemapUrl};
