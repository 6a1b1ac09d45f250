//! Check command - validate configuration and content

use std::path::Path;

use chrono::Utc;
use color_eyre::eyre::{Result, bail};
use folio_core::{
    Collection, Config, Listing,
    date::{is_past, parse_publish_date},
    slug::{is_valid_slug, slug_from_file_name},
};
use folio_site::Site;
use folio_store::Repository;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and every content file of both collections.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = if config_path.exists() {
        match Config::load_with_env(config_path) {
            Ok(c) => {
                println!("  ✓ Configuration valid");
                c
            }
            Err(e) => {
                println!("  ✗ Configuration invalid: {e}");
                result.add_error(format!("Configuration error: {e}"));
                print_summary(&result);
                bail!("Validation failed with {} error(s)", result.errors.len());
            }
        }
    } else {
        result.add_warning(format!(
            "Configuration file {} not found, using defaults",
            config_path.display()
        ));
        println!("  ⚠ Configuration file missing, using defaults");
        Config::default()
    };

    check_config_values(&config, &mut result);

    let site = Site::open(std::sync::Arc::new(config));
    check_site(&site, &mut result);

    print_summary(&result);

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Validate both collections of an opened site.
pub fn check_site(site: &Site, result: &mut ValidationResult) {
    println!("\nChecking blog posts...");
    check_collection(site.blog(), result);

    println!("\nChecking homelabs...");
    check_collection(site.homelabs(), result);
}

fn print_summary(result: &ValidationResult) {
    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }
}

/// Validate the files of one collection.
fn check_collection<C: Collection>(repo: &Repository<C>, result: &mut ValidationResult) {
    let kind = repo.kind();
    let dir = repo.dir();
    let extension = &repo.config().content.extension;

    if !dir.is_dir() {
        result.add_warning(format!("{kind}/ directory does not exist"));
        println!("  ⚠ {kind}/ missing");
        return;
    }

    let mut checked = 0;
    let mut failed = 0;

    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let relative = entry
            .path()
            .strip_prefix(dir)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .to_string();

        if entry.depth() > 1 {
            result.add_warning(format!("{kind}/{relative}: nested files are not served"));
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let Some(stem) = slug_from_file_name(&file_name, extension) else {
            result.add_warning(format!(
                "{kind}/{relative}: not a .{extension} file, ignored"
            ));
            continue;
        };

        if !is_valid_slug(stem) {
            result.add_warning(format!(
                "{kind}/{relative}: file name is not a valid slug (lowercase letters, digits and single hyphens)"
            ));
            continue;
        }

        checked += 1;

        if let Err(e) = repo.try_get(stem) {
            let reason = std::error::Error::source(&e)
                .map(|source| format!(": {source}"))
                .unwrap_or_default();
            result.add_error(format!("{kind}/{relative}: {e}{reason}"));
            failed += 1;
        }
    }

    let all = repo.list_all();
    let now = Utc::now();
    let mut featured = Vec::new();
    let mut scheduled = 0;

    for item in all.iter() {
        if item.date().is_empty() {
            result.add_warning(format!("{kind}/{}: missing date", item.slug()));
        } else if parse_publish_date(item.date()).is_none() {
            result.add_warning(format!(
                "{kind}/{}: unparseable date {:?}, sorted last",
                item.slug(),
                item.date()
            ));
        } else if !is_past(item.date(), now) {
            scheduled += 1;
        }

        if item.is_featured() {
            featured.push(item.slug().to_string());
        }
    }

    if featured.len() > 1 {
        result.add_warning(format!(
            "{kind}/: {} documents are featured ({}), only the newest is shown",
            featured.len(),
            featured.join(", ")
        ));
    }

    if failed == 0 {
        println!("  ✓ All {checked} {kind} files valid");
    } else {
        println!("  ✗ {failed}/{checked} {kind} files have errors");
    }

    if scheduled > 0 {
        println!("  ℹ {scheduled} {kind} document(s) dated in the future");
    }
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    if config.site.base_url.ends_with('/') {
        result.add_warning("site.base_url should not have a trailing slash");
    }

    if config.site.author.is_none() {
        result.add_warning("site.author is not set, posts without an author stay anonymous");
    }

    let root = &config.content.root;
    if root.exists() && !root.is_dir() {
        result.add_error(format!(
            "Content root exists but is not a directory: {}",
            root.display()
        ));
    }

    println!("  ✓ Configuration values checked");
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc};

    use super::*;

    fn site_at(root: &Path) -> Site {
        let mut config = Config::default();
        config.content.root = root.to_path_buf();
        Site::open(Arc::new(config))
    }

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, contents).expect("write");
    }

    #[test]
    fn test_clean_site() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write(
            dir.path(),
            "blog/hello.mdx",
            "---\ntitle: Hello\ndescription: D\ndate: 2024-01-01\n---\nBody",
        );
        write(
            dir.path(),
            "homelabs/lab.mdx",
            "---\ntitle: Lab\ndescription: D\ndate: 2024-01-01\n---\nBody",
        );

        let mut result = ValidationResult::default();
        check_site(&site_at(dir.path()), &mut result);

        assert!(!result.has_errors(), "{:?}", result.errors);
        assert!(!result.has_warnings(), "{:?}", result.warnings);
    }

    #[test]
    fn test_reports_problems() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write(dir.path(), "blog/broken.mdx", "---\ntitle: Broken\n---\nBody");
        write(dir.path(), "blog/Bad_Name.mdx", "---\ntitle: X\ndescription: D\n---\n");
        write(dir.path(), "blog/notes.txt", "plain");
        write(
            dir.path(),
            "blog/undated.mdx",
            "---\ntitle: Undated\ndescription: D\n---\nBody",
        );
        write(
            dir.path(),
            "blog/a.mdx",
            "---\ntitle: A\ndescription: D\ndate: 2024-01-01\nfeatured: true\n---\n",
        );
        write(
            dir.path(),
            "blog/b.mdx",
            "---\ntitle: B\ndescription: D\ndate: 2024-02-01\nfeatured: true\n---\n",
        );

        let mut result = ValidationResult::default();
        check_site(&site_at(dir.path()), &mut result);

        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0],
            "blog/broken.mdx: failed to parse post broken: Missing required field: description"
        );

        let warnings = result.warnings.join("\n");
        assert!(warnings.contains("blog/Bad_Name.mdx: file name is not a valid slug"));
        assert!(warnings.contains("blog/notes.txt: not a .mdx file"));
        assert!(warnings.contains("blog/undated: missing date"));
        assert!(warnings.contains("2 documents are featured (b, a)"));
        assert!(warnings.contains("homelabs/ directory does not exist"));
    }

    #[test]
    fn test_config_values() {
        let mut config = Config::default();
        config.site.base_url = "example.com/".to_string();

        let mut result = ValidationResult::default();
        check_config_values(&config, &mut result);

        assert_eq!(result.warnings.len(), 3);
        assert!(!result.has_errors());
    }
}
