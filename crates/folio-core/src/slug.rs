//! Slug grammar and document path resolution.
//!
//! Two independent guards stand between an untrusted slug and the
//! filesystem: the kebab-case grammar, and a lexical containment check on
//! the resolved path. Both must pass.

use std::{
    path::{Component, Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is a valid regex")
});

/// Whether `slug` is lowercase kebab-case.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Strip `.{extension}` from a file name, returning the stem.
pub fn slug_from_file_name<'a>(file_name: &'a str, extension: &str) -> Option<&'a str> {
    file_name
        .strip_suffix(extension)?
        .strip_suffix('.')
        .filter(|stem| !stem.is_empty())
}

/// Resolve `dir/{slug}.{extension}` and confirm it stays inside `dir`.
///
/// This does not consult the slug grammar and does not touch the
/// filesystem; both paths are normalized lexically and compared
/// component-wise, so `blog-evil/x` is never considered inside `blog`.
pub fn resolve_document_path(dir: &Path, slug: &str, extension: &str) -> Option<PathBuf> {
    let candidate = normalize_lexically(&dir.join(format!("{slug}.{extension}")));
    let dir = normalize_lexically(dir);

    let inside = candidate.starts_with(&dir) && candidate.parent() == Some(dir.as_path());
    inside.then_some(candidate)
}

/// Resolve `.` and `..` components without consulting the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
