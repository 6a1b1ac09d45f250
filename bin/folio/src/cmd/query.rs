//! Query commands - read-only views over one content collection

use std::fmt::Write as _;

use color_eyre::eyre::{Result, WrapErr};
use folio_core::{
    ContentKind, Document, Facet, Listing,
    date::{DateStyle, format_date},
};
use folio_site::Site;
use folio_store::Filter;
use serde::Serialize;

use crate::with_repository;

/// One slug per line, sorted.
pub fn slugs(site: &Site, kind: ContentKind) -> String {
    let mut out = String::new();
    for slug in site.slugs(kind) {
        out.push_str(&slug);
        out.push('\n');
    }
    out
}

/// Filtered catalog, newest first.
pub fn list(site: &Site, kind: ContentKind, filter: &Filter, json: bool) -> Result<String> {
    with_repository!(site, kind, |repo| {
        let items = repo.query(filter);
        if json {
            to_json(&items)
        } else {
            Ok(render_table(&items))
        }
    })
}

/// The `n` newest documents.
pub fn recent(site: &Site, kind: ContentKind, n: usize, json: bool) -> Result<String> {
    with_repository!(site, kind, |repo| {
        let items = repo.recent(n);
        if json {
            to_json(&items)
        } else {
            Ok(render_table(&items))
        }
    })
}

/// The newest featured document, if any.
pub fn featured(site: &Site, kind: ContentKind, json: bool) -> Result<String> {
    with_repository!(site, kind, |repo| {
        match repo.featured() {
            Some(item) if json => to_json(&item),
            Some(item) => Ok(render_table(std::slice::from_ref(&item))),
            None if json => Ok("null\n".to_string()),
            None => Ok(format!("No featured {}\n", kind.label())),
        }
    })
}

/// Distinct values of a facet, first-seen order.
pub fn facets(site: &Site, kind: ContentKind, facet: Facet) -> String {
    let values = with_repository!(site, kind, |repo| repo.facets(facet));
    let mut out = String::new();
    for value in values {
        out.push_str(&value);
        out.push('\n');
    }
    out
}

/// A single document with its body.
///
/// Fails when the slug does not resolve; the error names the slug only.
pub fn show(site: &Site, kind: ContentKind, slug: &str, json: bool) -> Result<String> {
    with_repository!(site, kind, |repo| {
        let document = repo.try_get(slug)?;
        if json {
            to_json(&*document)
        } else {
            Ok(render_document(&document))
        }
    })
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).wrap_err("Failed to serialize output")?;
    out.push('\n');
    Ok(out)
}

fn display_date(raw: &str) -> String {
    format_date(raw, DateStyle::Short).unwrap_or_else(|| {
        if raw.is_empty() {
            "undated".to_string()
        } else {
            raw.to_string()
        }
    })
}

fn render_table<M: Listing>(items: &[M]) -> String {
    if items.is_empty() {
        return "No documents\n".to_string();
    }

    let width = items.iter().map(|item| item.slug().len()).max().unwrap_or(0);
    let mut out = String::new();
    for item in items {
        let marker = if item.is_featured() { "*" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {:<12}  {:<width$}  {} ({})",
            display_date(item.date()),
            item.slug(),
            item.title(),
            item.read_time(),
        );
    }
    out
}

fn render_document<M: Listing>(document: &Document<M>) -> String {
    let meta = &document.meta;
    let mut out = String::new();
    let _ = writeln!(out, "{}", meta.title());
    let _ = writeln!(out, "{}", meta.description());
    let _ = writeln!(
        out,
        "{} · {}",
        display_date(meta.date()),
        meta.read_time()
    );
    out.push('\n');
    out.push_str(document.content.trim());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc};

    use folio_core::Config;

    use super::*;

    fn test_site() -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path().to_path_buf();
        fs::create_dir_all(root.join("blog")).expect("mkdir");
        fs::create_dir_all(root.join("homelabs")).expect("mkdir");
        fs::write(
            root.join("blog/rust-intro.mdx"),
            "---\ntitle: Rust Intro\ndescription: Getting started\ndate: 2024-03-15\nfeatured: true\n---\nHello Rust",
        )
        .expect("write");
        fs::write(
            root.join("blog/older.mdx"),
            "---\ntitle: Older\ndescription: Earlier notes\ndate: 2023-01-01\ncategory: Notes\n---\nOld",
        )
        .expect("write");
        fs::write(
            root.join("homelabs/ad-lab.mdx"),
            "---\ntitle: AD Lab\ndescription: Active Directory\ndate: 2024-02-01\ndifficulty: Advanced\n---\nLab",
        )
        .expect("write");

        let mut config = Config::default();
        config.content.root = root;
        (dir, Site::open(Arc::new(config)))
    }

    #[test]
    fn test_slugs() {
        let (_dir, site) = test_site();
        assert_eq!(slugs(&site, ContentKind::Blog), "older\nrust-intro\n");
        assert_eq!(slugs(&site, ContentKind::Homelab), "ad-lab\n");
    }

    #[test]
    fn test_list_table() {
        let (_dir, site) = test_site();
        let out = list(&site, ContentKind::Blog, &Filter::default(), false).expect("list");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("* Mar 15, 2024"));
        assert!(lines[0].contains("Rust Intro (1 min read)"));
        assert!(lines[1].contains("older"));
    }

    #[test]
    fn test_list_json_with_filter() {
        let (_dir, site) = test_site();
        let filter = Filter {
            category: Some("Notes".to_string()),
            ..Filter::default()
        };
        let out = list(&site, ContentKind::Blog, &filter, true).expect("list");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");

        let items = value.as_array().expect("array");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["slug"], "older");
        assert!(items[0].get("content").is_none());
    }

    #[test]
    fn test_featured() {
        let (_dir, site) = test_site();
        let out = featured(&site, ContentKind::Blog, false).expect("featured");
        assert!(out.contains("rust-intro"));

        let none = featured(&site, ContentKind::Homelab, false).expect("featured");
        assert_eq!(none, "No featured homelab\n");
        assert_eq!(
            featured(&site, ContentKind::Homelab, true).expect("featured"),
            "null\n"
        );
    }

    #[test]
    fn test_facets() {
        let (_dir, site) = test_site();
        assert_eq!(
            facets(&site, ContentKind::Blog, Facet::Category),
            "General\nNotes\n"
        );
        assert_eq!(
            facets(&site, ContentKind::Homelab, Facet::Difficulty),
            "Advanced\n"
        );
    }

    #[test]
    fn test_show() {
        let (_dir, site) = test_site();
        let out = show(&site, ContentKind::Blog, "rust-intro", false).expect("show");
        assert!(out.starts_with("Rust Intro\nGetting started\nMar 15, 2024"));
        assert!(out.ends_with("Hello Rust\n"));

        let json = show(&site, ContentKind::Blog, "rust-intro", true).expect("show");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert_eq!(value["content"], "Hello Rust");
    }

    #[test]
    fn test_show_missing() {
        let (dir, site) = test_site();
        let err = show(&site, ContentKind::Blog, "missing", false).expect_err("missing");
        let message = err.to_string();
        assert_eq!(message, "post not found: missing");
        assert!(!message.contains(&*dir.path().to_string_lossy()));

        assert!(show(&site, ContentKind::Blog, "../etc/passwd", false).is_err());
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2024-03-15"), "Mar 15, 2024");
        assert_eq!(display_date(""), "undated");
        assert_eq!(display_date("soon"), "soon");
    }
}
