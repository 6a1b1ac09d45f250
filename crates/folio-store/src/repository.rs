//! Slug-addressed document repository.
//!
//! A [`Repository`] owns one content directory. Documents are parsed on
//! first lookup and cached for the life of the repository; the sorted
//! listing is computed once. Source files are treated as immutable while
//! the process runs, so there is no invalidation apart from [`clear`].
//!
//! Lookups are safe under concurrent first access: each slug gets a
//! compute-once cell, so a document is parsed at most once even when many
//! callers ask for it at the same time.
//!
//! [`clear`]: Repository::clear

use std::{collections::HashMap, marker::PhantomData, path::PathBuf, sync::Arc};

use folio_core::{
    Collection, Config, ContentKind, CoreError, Document, Facet, Listing,
    date::parse_publish_date,
    frontmatter::parse_document,
    slug::{is_valid_slug, resolve_document_path, slug_from_file_name},
};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use rayon::prelude::*;
use tracing::{debug, error, info, warn};

use crate::{
    error::{ContentError, Result},
    projector::{self, Filter},
    source::{ContentSource, FsSource},
};

type Slot<M> = Arc<OnceCell<Arc<Document<M>>>>;

/// Cached document collection backed by a [`ContentSource`].
pub struct Repository<C: Collection, S = FsSource> {
    dir: PathBuf,
    config: Arc<Config>,
    source: S,
    documents: RwLock<HashMap<String, Slot<C::Metadata>>>,
    listing: OnceCell<Arc<[C::Metadata]>>,
    _collection: PhantomData<fn() -> C>,
}

impl<C: Collection> Repository<C> {
    /// Repository over `config.content.root/<kind dir>` on the local disk.
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        let dir = config.content_dir(C::KIND);
        Self::with_source(dir, config, FsSource)
    }
}

impl<C: Collection, S: ContentSource> Repository<C, S> {
    /// Repository over an explicit directory and source.
    #[must_use]
    pub fn with_source(dir: impl Into<PathBuf>, config: Arc<Config>, source: S) -> Self {
        Self {
            dir: dir.into(),
            config,
            source,
            documents: RwLock::new(HashMap::new()),
            listing: OnceCell::new(),
            _collection: PhantomData,
        }
    }

    /// Which collection this repository serves.
    pub fn kind(&self) -> ContentKind {
        C::KIND
    }

    /// Content directory.
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    /// Shared configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    fn extension(&self) -> &str {
        &self.config.content.extension
    }

    /// Slugs of every document file, sorted.
    ///
    /// Files whose stem fails the slug grammar are skipped, since no lookup
    /// could ever reach them.
    pub fn try_list_slugs(&self) -> Result<Vec<String>> {
        let names = self
            .source
            .file_names(&self.dir)
            .map_err(|source| ContentError::Enumeration {
                kind: C::KIND,
                source,
            })?;

        let mut slugs: Vec<String> = names
            .iter()
            .filter_map(|name| slug_from_file_name(name, self.extension()))
            .filter(|slug| {
                let valid = is_valid_slug(slug);
                if !valid {
                    warn!(kind = %C::KIND, slug = %slug, "skipping document with invalid slug");
                }
                valid
            })
            .map(str::to_string)
            .collect();
        slugs.sort();
        Ok(slugs)
    }

    /// Slugs of every document file; empty when the directory is unreadable.
    pub fn list_slugs(&self) -> Vec<String> {
        self.try_list_slugs().unwrap_or_else(|e| {
            error!(kind = %C::KIND, error = %e, "failed to enumerate documents");
            Vec::new()
        })
    }

    /// Look up a document, reporting why it could not be produced.
    ///
    /// Every failure is logged with the kind and slug before it is returned.
    pub fn try_get(&self, slug: &str) -> Result<Arc<Document<C::Metadata>>> {
        self.lookup(slug).inspect_err(|e| log_failure(slug, e))
    }

    /// Look up a document; `None` on any failure.
    pub fn get(&self, slug: &str) -> Option<Arc<Document<C::Metadata>>> {
        self.try_get(slug).ok()
    }

    fn lookup(&self, slug: &str) -> Result<Arc<Document<C::Metadata>>> {
        if !is_valid_slug(slug) {
            return Err(ContentError::InvalidIdentifier {
                kind: C::KIND,
                slug: slug.to_string(),
            });
        }

        let slot = self.slot(slug);
        let result = slot.get_or_try_init(|| self.load(slug).map(Arc::new));

        match result {
            Ok(document) => Ok(Arc::clone(document)),
            Err(e) => {
                // Failed lookups are not remembered, so unknown slugs cannot
                // grow the cache. Only our own slot is dropped; a replacement
                // inserted by another caller stays.
                let mut documents = self.documents.write();
                if documents
                    .get(slug)
                    .is_some_and(|entry| Arc::ptr_eq(entry, &slot) && entry.get().is_none())
                {
                    documents.remove(slug);
                }
                Err(e)
            }
        }
    }

    fn slot(&self, slug: &str) -> Slot<C::Metadata> {
        if let Some(slot) = self.documents.read().get(slug) {
            return Arc::clone(slot);
        }
        Arc::clone(
            self.documents
                .write()
                .entry(slug.to_string())
                .or_default(),
        )
    }

    fn load(&self, slug: &str) -> Result<Document<C::Metadata>> {
        let kind = C::KIND;
        let path = resolve_document_path(&self.dir, slug, self.extension()).ok_or_else(|| {
            ContentError::PathEscape {
                kind,
                slug: slug.to_string(),
            }
        })?;

        if !self.source.is_file(&path) {
            return Err(ContentError::NotFound {
                kind,
                slug: slug.to_string(),
            });
        }

        let parse_error = |source: CoreError| ContentError::Parse {
            kind,
            slug: slug.to_string(),
            source,
        };

        debug!(kind = %kind, slug = %slug, "reading document");
        let raw = self
            .source
            .read_to_string(&path)
            .map_err(|e| parse_error(e.into()))?;
        let (frontmatter, body) = parse_document(&raw).map_err(parse_error)?;
        let meta = C::normalize(slug, &frontmatter, body, &self.config).map_err(parse_error)?;

        Ok(Document {
            meta,
            content: body.to_string(),
        })
    }

    /// Metadata of every readable document, newest first. Computed once.
    pub fn list_all(&self) -> Arc<[C::Metadata]> {
        Arc::clone(self.listing.get_or_init(|| {
            let slugs = self.list_slugs();
            let loaded: Vec<C::Metadata> = slugs
                .par_iter()
                .filter_map(|slug| self.get(slug))
                .map(|document| document.meta.clone())
                .collect();

            for item in &loaded {
                if !item.date().is_empty()
                    && parse_publish_date(item.date()).is_none()
                {
                    warn!(kind = %C::KIND, slug = %item.slug(), date = %item.date(), "unparseable date sorts last");
                }
            }

            let sorted = projector::sort_by_date(loaded);
            info!(kind = %C::KIND, count = sorted.len(), "indexed documents");
            sorted.into()
        }))
    }

    /// The `n` newest documents.
    pub fn recent(&self, n: usize) -> Vec<C::Metadata> {
        let all = self.list_all();
        projector::recent(&all[..], n).to_vec()
    }

    /// First featured document in listing order.
    pub fn featured(&self) -> Option<C::Metadata> {
        let all = self.list_all();
        projector::featured(&all[..]).cloned()
    }

    /// Distinct values of a facet across the listing.
    pub fn facets(&self, facet: Facet) -> Vec<String> {
        projector::facets(&self.list_all()[..], facet)
    }

    /// Listing narrowed by a [`Filter`].
    pub fn query(&self, filter: &Filter) -> Vec<C::Metadata> {
        projector::filter(&self.list_all()[..], filter)
    }

    /// Number of documents currently cached.
    pub fn cached_len(&self) -> usize {
        self.documents
            .read()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    /// Drop every cached document and the memoized listing.
    pub fn clear(&mut self) {
        self.documents.get_mut().clear();
        self.listing.take();
    }
}

fn log_failure(slug: &str, err: &ContentError) {
    match err {
        ContentError::InvalidIdentifier { kind, .. } | ContentError::PathEscape { kind, .. } => {
            warn!(kind = %kind, slug = %slug.escape_debug(), error = %err, "rejected document lookup");
        }
        ContentError::NotFound { kind, .. } => {
            debug!(kind = %kind, slug = %slug, error = %err, "document not found");
        }
        ContentError::Parse { kind, .. } | ContentError::Enumeration { kind, .. } => {
            error!(kind = %kind, slug = %slug, error = %err, "failed to load document");
        }
    }
}

impl<C: Collection, S> std::fmt::Debug for Repository<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("kind", &C::KIND)
            .field("dir", &self.dir)
            .field("cached", &self.documents.read().len())
            .field("indexed", &self.listing.get().is_some())
            .finish()
    }
}
