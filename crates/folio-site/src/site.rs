//! Shared handle over every content repository.

use std::sync::Arc;

use folio_core::{Blog, Config, ContentKind, Homelab};
use folio_store::Repository;
use tracing::info;

/// Both content collections of the portfolio, sharing one configuration.
#[derive(Debug)]
pub struct Site {
    config: Arc<Config>,
    blog: Repository<Blog>,
    homelabs: Repository<Homelab>,
}

impl Site {
    /// Open the repositories under `config.content.root`.
    #[must_use]
    pub fn open(config: Arc<Config>) -> Self {
        info!(root = %config.content.root.display(), "opening content repositories");
        Self {
            blog: Repository::new(Arc::clone(&config)),
            homelabs: Repository::new(Arc::clone(&config)),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn blog(&self) -> &Repository<Blog> {
        &self.blog
    }

    pub fn homelabs(&self) -> &Repository<Homelab> {
        &self.homelabs
    }

    /// Slugs of one collection, for route generation.
    pub fn slugs(&self, kind: ContentKind) -> Vec<String> {
        match kind {
            ContentKind::Blog => self.blog.list_slugs(),
            ContentKind::Homelab => self.homelabs.list_slugs(),
        }
    }

    /// Public URL of a document.
    pub fn document_url(&self, kind: ContentKind, slug: &str) -> String {
        self.config
            .url_for(&format!("{}/{slug}", kind.route_prefix()))
    }

    /// Drop every cached document and listing.
    pub fn clear(&mut self) {
        self.blog.clear();
        self.homelabs.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn site_with_content() -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path().to_path_buf();
        fs::create_dir_all(root.join("blog")).expect("mkdir");
        fs::create_dir_all(root.join("homelabs")).expect("mkdir");
        fs::write(
            root.join("blog/hello-world.mdx"),
            "---\ntitle: Hello\ndescription: D\ndate: 2024-01-01\n---\nBody",
        )
        .expect("write");
        fs::write(
            root.join("homelabs/soc-lab.mdx"),
            "---\ntitle: SOC\ndescription: D\ndate: 2024-02-01\n---\nBody",
        )
        .expect("write");

        let mut config = Config::default();
        config.content.root = root;
        config.site.base_url = "https://example.com".to_string();
        (dir, Site::open(Arc::new(config)))
    }

    #[test]
    fn test_site_routes_kinds_to_directories() {
        let (_dir, site) = site_with_content();

        assert_eq!(site.slugs(ContentKind::Blog), vec!["hello-world"]);
        assert_eq!(site.slugs(ContentKind::Homelab), vec!["soc-lab"]);
        assert!(site.blog().get("soc-lab").is_none());
        assert_eq!(site.homelabs().get("soc-lab").expect("lab").meta.title, "SOC");
    }

    #[test]
    fn test_document_url() {
        let (_dir, site) = site_with_content();
        assert_eq!(
            site.document_url(ContentKind::Homelab, "soc-lab"),
            "https://example.com/homelabs/soc-lab"
        );
    }

    #[test]
    fn test_clear() {
        let (_dir, mut site) = site_with_content();
        assert_eq!(site.blog().list_all().len(), 1);
        site.clear();
        assert_eq!(site.blog().cached_len(), 0);
    }
}
