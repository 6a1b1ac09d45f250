//! Frontmatter splitting and loosely-typed parsing.
//!
//! Headers are parsed into a [`RawFrontmatter`] record without any schema.
//! Typed documents are produced from it by [`Collection::normalize`], which
//! is where every default lives.
//!
//! [`Collection::normalize`]: crate::content::Collection::normalize

use serde_json::{Map, Value};

use crate::error::{CoreError, Result};

/// Key under which the `toml` crate encodes bare datetimes.
const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
///
/// The opening delimiter must be the first line and the closing delimiter
/// must sit on a line of its own. Returns `None` when the content has no
/// header at all, and an error when the header is never closed.
pub fn split_frontmatter(content: &str) -> Result<Option<(FrontmatterFormat, &str, &str)>> {
    let content = content.trim_start_matches('\u{feff}');

    let (first_line, rest) = match content.split_once('\n') {
        Some((line, rest)) => (line, rest),
        None => (content, ""),
    };

    let format = match first_line.trim_end() {
        "---" => FrontmatterFormat::Yaml,
        "+++" => FrontmatterFormat::Toml,
        _ => return Ok(None),
    };
    let delimiter = format.delimiter();

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let header = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok(Some((format, header, body)));
        }
        offset += line.len();
    }

    Err(CoreError::frontmatter(format!(
        "missing closing `{delimiter}` delimiter"
    )))
}

/// Parse a document into its raw header and body.
pub fn parse_document(content: &str) -> Result<(RawFrontmatter, &str)> {
    let Some((format, header, body)) = split_frontmatter(content)? else {
        return Ok((RawFrontmatter::default(), content));
    };

    let raw = RawFrontmatter::parse(format, header)?;
    Ok((raw, body))
}

/// Schema-free key/value header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFrontmatter {
    fields: Map<String, Value>,
}

impl RawFrontmatter {
    /// Parse a header in the given format.
    pub fn parse(format: FrontmatterFormat, header: &str) -> Result<Self> {
        if header.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = match format {
            FrontmatterFormat::Yaml => serde_yaml::from_str(header)?,
            FrontmatterFormat::Toml => toml::from_str(header)?,
        };

        match value {
            Value::Object(fields) => Ok(Self { fields }),
            Value::Null => Ok(Self::default()),
            other => Err(CoreError::frontmatter(format!(
                "expected a key/value mapping, found {}",
                value_kind(&other)
            ))),
        }
    }

    /// Whether the key is present at all.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Scalar value as a string, or `None` when absent, null or empty.
    ///
    /// Numbers and booleans are stringified.
    pub fn string(&self, key: &str) -> Option<String> {
        let value = match self.fields.get(key)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Object(map) => match map.get(TOML_DATETIME_KEY) {
                Some(Value::String(s)) if map.len() == 1 => s.clone(),
                _ => return None,
            },
            Value::Null | Value::Array(_) => return None,
        };
        (!value.is_empty()).then_some(value)
    }

    /// Required string field.
    pub fn required(&self, key: &'static str) -> Result<String> {
        self.string(key).ok_or(CoreError::MissingField(key))
    }

    /// Boolean flag; anything that is not a boolean reads as `false`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.fields.get(key), Some(Value::Bool(true)))
    }

    /// List of strings. Non-list values read as empty and non-string items
    /// are dropped.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.fields.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_yaml_frontmatter() {
        let content = r#"---
title: "Hello World"
date: 2024-01-14
---

This is the body content."#;

        let (format, fm, body) = split_frontmatter(content).expect("split").expect("header");
        assert_eq!(format, FrontmatterFormat::Yaml);
        assert!(fm.contains("title:"));
        assert_eq!(body, "\nThis is the body content.");
    }

    #[test]
    fn test_split_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello World\"\n+++\nBody";

        let (format, fm, body) = split_frontmatter(content).expect("split").expect("header");
        assert_eq!(format, FrontmatterFormat::Toml);
        assert!(fm.contains("title ="));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_ignores_inline_dashes() {
        let content = "---\ntitle: a---b\n---\nBody";

        let (_, fm, body) = split_frontmatter(content).expect("split").expect("header");
        assert_eq!(fm, "title: a---b\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_crlf_line_endings() {
        let content = "---\r\ntitle: Hi\r\n---\r\nBody";

        let (_, fm, body) = split_frontmatter(content).expect("split").expect("header");
        assert_eq!(fm, "title: Hi\r\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just some content without frontmatter.";
        assert!(split_frontmatter(content).expect("split").is_none());
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let content = "---\ntitle: Never closed\n\nBody";
        let err = split_frontmatter(content).unwrap_err();
        assert!(err.to_string().contains("closing"));
    }

    #[test]
    fn test_parse_yaml_document() {
        let content = r#"---
title: "Test Post"
description: A short one
date: 2024-01-14
featured: true
readTime: 7 min read
tags:
  - rust
  - test
---
Content here."#;

        let (fm, body) = parse_document(content).expect("parse");

        assert_eq!(fm.string("title").as_deref(), Some("Test Post"));
        assert_eq!(fm.string("date").as_deref(), Some("2024-01-14"));
        assert_eq!(fm.string("readTime").as_deref(), Some("7 min read"));
        assert!(fm.flag("featured"));
        assert_eq!(fm.list("tags"), vec!["rust", "test"]);
        assert_eq!(body, "Content here.");
    }

    #[test]
    fn test_parse_toml_document_with_bare_date() {
        let content = "+++\ntitle = \"Test\"\ndate = 2024-01-14\ntags = [\"a\"]\n+++\nBody";

        let (fm, body) = parse_document(content).expect("parse");

        assert_eq!(fm.string("title").as_deref(), Some("Test"));
        assert_eq!(fm.string("date").as_deref(), Some("2024-01-14"));
        assert_eq!(fm.list("tags"), vec!["a"]);
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_loose_field_access() {
        let content = "---\ntitle: 2024\nfeatured: \"yes\"\ntags: rust\ntools: [nmap, 3, wireshark]\nempty: \"\"\n---\n";

        let (fm, _) = parse_document(content).expect("parse");

        assert_eq!(fm.string("title").as_deref(), Some("2024"));
        assert!(!fm.flag("featured"));
        assert!(fm.list("tags").is_empty());
        assert_eq!(fm.list("tools"), vec!["nmap", "wireshark"]);
        assert!(fm.string("empty").is_none());
        assert!(fm.contains("empty"));
        assert!(fm.string("missing").is_none());
    }

    #[test]
    fn test_required_field() {
        let (fm, _) = parse_document("---\ndescription: x\n---\n").expect("parse");
        let err = fm.required("title").unwrap_err();
        assert!(matches!(err, CoreError::MissingField("title")));
    }

    #[test]
    fn test_empty_header() {
        let (fm, body) = parse_document("---\n---\nBody").expect("parse");
        assert_eq!(fm, RawFrontmatter::default());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_non_mapping_header_is_rejected() {
        let err = parse_document("---\n- a\n- b\n---\nBody").unwrap_err();
        assert!(err.to_string().contains("mapping"));
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        assert!(parse_document("---\ntitle: [unclosed\n---\nBody").is_err());
    }
}
