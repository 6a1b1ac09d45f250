//! Lookup failures.
//!
//! Messages name the content kind and slug only; filesystem paths never
//! appear, so errors can be shown to end users as-is.

use folio_core::{ContentKind, CoreError};
use thiserror::Error;

/// Why a document or listing could not be produced.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Slug fails the kebab-case grammar.
    #[error("invalid {} slug {slug:?}", .kind.label())]
    InvalidIdentifier { kind: ContentKind, slug: String },

    /// Resolved path falls outside the content directory.
    #[error("{} slug {slug:?} resolves outside the content directory", .kind.label())]
    PathEscape { kind: ContentKind, slug: String },

    /// Well-formed slug with no backing file.
    #[error("{} not found: {slug}", .kind.label())]
    NotFound { kind: ContentKind, slug: String },

    /// File present but unreadable, malformed or missing required fields.
    #[error("failed to parse {} {slug}", .kind.label())]
    Parse {
        kind: ContentKind,
        slug: String,
        #[source]
        source: CoreError,
    },

    /// The content directory itself cannot be listed.
    #[error("failed to read {kind} directory")]
    Enumeration {
        kind: ContentKind,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, ContentError>;
