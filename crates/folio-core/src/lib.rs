//! Folio Core Library
//!
//! Core types, configuration, and error handling for the Folio content store.

pub mod config;
pub mod content;
pub mod date;
pub mod error;
pub mod frontmatter;
pub mod read_time;
pub mod slug;

pub use config::Config;
pub use content::{Blog, Collection, ContentKind, Document, Facet, Homelab, Lab, Listing, Post};
pub use error::{CoreError, Result};
pub use frontmatter::RawFrontmatter;
