//! Folio Store Library
//!
//! File-backed document repository and metadata projections.
//!
//! # Modules
//!
//! - [`repository`] - Slug-addressed, cached document lookup
//! - [`projector`] - Pure sorting, filtering and facet extraction
//! - [`source`] - Filesystem seam used by the repository
//! - [`error`] - Lookup failure taxonomy

pub mod error;
pub mod projector;
pub mod repository;
pub mod source;

pub use error::ContentError;
pub use projector::Filter;
pub use repository::Repository;
pub use source::{ContentSource, FsSource};
