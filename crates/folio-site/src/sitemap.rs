//! Sitemap generation.
//!
//! Lists the fixed portfolio pages followed by every blog post and homelab
//! write-up.

use std::{fs, io::Write, path::Path};

use folio_core::{ContentKind, Listing, date::sitemap_date};
use thiserror::Error;
use tracing::{debug, info};

use crate::Site;

/// Sitemap generation errors.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Change frequency for sitemap entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

/// Fixed pages of the portfolio with their priority and change frequency.
pub const STATIC_ROUTES: [(&str, f32, ChangeFreq); 8] = [
    ("/", 1.0, ChangeFreq::Weekly),
    ("/about", 0.8, ChangeFreq::Monthly),
    ("/projects", 0.9, ChangeFreq::Weekly),
    ("/experience", 0.8, ChangeFreq::Monthly),
    ("/formation", 0.7, ChangeFreq::Monthly),
    ("/blog", 0.9, ChangeFreq::Weekly),
    ("/homelabs", 0.85, ChangeFreq::Weekly),
    ("/contact", 0.6, ChangeFreq::Yearly),
];

const DOCUMENT_PRIORITY: f32 = 0.7;
const DOCUMENT_CHANGEFREQ: ChangeFreq = ChangeFreq::Monthly;

/// A sitemap URL entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapUrl {
    /// Absolute URL.
    pub loc: String,

    /// ISO 8601 timestamp, when known.
    pub lastmod: Option<String>,

    pub changefreq: ChangeFreq,

    /// Priority (0.0 to 1.0).
    pub priority: f32,
}

/// Sitemap generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SitemapGenerator;

impl SitemapGenerator {
    /// Collect every URL of the site, static routes first.
    pub fn urls(site: &Site) -> Vec<SitemapUrl> {
        let config = site.config();
        let mut urls: Vec<SitemapUrl> = STATIC_ROUTES
            .iter()
            .map(|&(path, priority, changefreq)| SitemapUrl {
                loc: config.url_for(path),
                lastmod: None,
                changefreq,
                priority,
            })
            .collect();

        for kind in ContentKind::ALL {
            for slug in site.slugs(kind) {
                let date = match kind {
                    ContentKind::Blog => site.blog().get(&slug).map(|doc| doc.meta.date().to_string()),
                    ContentKind::Homelab => site
                        .homelabs()
                        .get(&slug)
                        .map(|doc| doc.meta.date().to_string()),
                };
                urls.push(SitemapUrl {
                    loc: site.document_url(kind, &slug),
                    lastmod: date.as_deref().and_then(sitemap_date),
                    changefreq: DOCUMENT_CHANGEFREQ,
                    priority: DOCUMENT_PRIORITY,
                });
            }
        }

        urls
    }

    /// Generate sitemap XML for the whole site.
    pub fn generate(site: &Site) -> String {
        let urls = Self::urls(site);
        debug!(count = urls.len(), "generating sitemap");

        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for url in &urls {
            xml.push_str(&url_to_xml(url));
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap XML to a writer.
    pub fn write_to<W: Write>(site: &Site, writer: &mut W) -> Result<()> {
        writer.write_all(Self::generate(site).as_bytes())?;
        Ok(())
    }

    /// Write sitemap XML to `path`, creating parent directories.
    pub fn write(site: &Site, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        Self::write_to(site, &mut file)?;
        info!(path = %path.display(), "sitemap written");
        Ok(())
    }
}

fn url_to_xml(url: &SitemapUrl) -> String {
    let mut xml = String::from("  <url>\n");

    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url.loc)));

    if let Some(lastmod) = &url.lastmod {
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape_xml(lastmod)));
    }

    xml.push_str(&format!(
        "    <changefreq>{}</changefreq>\n",
        url.changefreq.as_str()
    ));
    xml.push_str(&format!(
        "    <priority>{}</priority>\n",
        format_priority(url.priority)
    ));

    xml.push_str("  </url>\n");
    xml
}

/// `1.0`, `0.85`, `0.7`: two decimals at most, one at least.
fn format_priority(priority: f32) -> String {
    let mut s = format!("{priority:.2}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.push('0');
    }
    s
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc};

    use folio_core::Config;

    use super::*;

    fn test_site(base_url: &str) -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path().to_path_buf();
        fs::create_dir_all(root.join("blog")).expect("mkdir");
        fs::create_dir_all(root.join("homelabs")).expect("mkdir");
        fs::write(
            root.join("blog/first-post.mdx"),
            "---\ntitle: First\ndescription: D\ndate: 2024-01-15\n---\nBody",
        )
        .expect("write");
        fs::write(
            root.join("blog/undated.mdx"),
            "---\ntitle: Undated\ndescription: D\n---\nBody",
        )
        .expect("write");
        fs::write(
            root.join("homelabs/siem-setup.mdx"),
            "---\ntitle: SIEM\ndescription: D\ndate: 2024-03-01\n---\nBody",
        )
        .expect("write");

        let mut config = Config::default();
        config.content.root = root;
        config.site.base_url = base_url.to_string();
        (dir, Site::open(Arc::new(config)))
    }

    #[test]
    fn test_generate_sitemap() {
        let (_dir, site) = test_site("https://example.com");
        let xml = SitemapGenerator::generate(&site);

        assert!(xml.starts_with(r#"<?xml version="1.0""#));
        assert!(xml.contains("<urlset"));
        assert!(xml.contains("<loc>https://example.com</loc>"));
        assert!(xml.contains("<loc>https://example.com/about</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog/first-post</loc>"));
        assert!(xml.contains("<loc>https://example.com/homelabs/siem-setup</loc>"));
        assert!(xml.contains("<lastmod>2024-01-15T00:00:00.000Z</lastmod>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_static_routes_come_first() {
        let (_dir, site) = test_site("https://example.com");
        let urls = SitemapGenerator::urls(&site);

        assert_eq!(urls.len(), STATIC_ROUTES.len() + 3);
        assert_eq!(urls[0].priority, 1.0);
        assert_eq!(urls[0].changefreq, ChangeFreq::Weekly);
        assert_eq!(urls[6].loc, "https://example.com/homelabs");
        assert_eq!(urls[6].priority, 0.85);
        assert_eq!(urls[7].changefreq, ChangeFreq::Yearly);
    }

    #[test]
    fn test_document_entries() {
        let (_dir, site) = test_site("https://example.com");
        let urls = SitemapGenerator::urls(&site);
        let documents = &urls[STATIC_ROUTES.len()..];

        let undated = documents
            .iter()
            .find(|url| url.loc.ends_with("/blog/undated"))
            .expect("undated entry");
        assert_eq!(undated.lastmod, None);
        assert_eq!(undated.priority, 0.7);
        assert_eq!(undated.changefreq, ChangeFreq::Monthly);

        assert!(documents.last().expect("entry").loc.ends_with("/homelabs/siem-setup"));
    }

    #[test]
    fn test_base_url_is_escaped() {
        let (_dir, site) = test_site("https://example.com/?a=1&b=2");
        let xml = SitemapGenerator::generate(&site);
        assert!(xml.contains("a=1&amp;b=2"));
        assert!(!xml.contains("a=1&b=2"));
    }

    #[test]
    fn test_write() {
        let (dir, site) = test_site("https://example.com");
        let path = dir.path().join("public/sitemap.xml");

        SitemapGenerator::write(&site, &path).expect("write sitemap");

        let written = fs::read_to_string(&path).expect("read sitemap");
        assert_eq!(written, SitemapGenerator::generate(&site));
    }

    #[test]
    fn test_format_priority() {
        assert_eq!(format_priority(1.0), "1.0");
        assert_eq!(format_priority(0.85), "0.85");
        assert_eq!(format_priority(0.7), "0.7");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
    }
}
