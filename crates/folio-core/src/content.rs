//! Content types and structures.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::Result,
    frontmatter::RawFrontmatter,
    read_time::calculate_read_time,
};

/// Kind of document collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    /// Blog posts.
    #[serde(rename = "blog")]
    Blog,
    /// Homelab write-ups.
    #[serde(rename = "homelabs", alias = "homelab")]
    Homelab,
}

impl ContentKind {
    /// Every kind, in display order.
    pub const ALL: [ContentKind; 2] = [Self::Blog, Self::Homelab];

    /// Subdirectory of the content root holding this kind.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Homelab => "homelabs",
        }
    }

    /// URL prefix under which documents of this kind are served.
    pub fn route_prefix(&self) -> &'static str {
        match self {
            Self::Blog => "/blog",
            Self::Homelab => "/homelabs",
        }
    }

    /// Singular label used in logs and messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Blog => "post",
            Self::Homelab => "homelab",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blog" | "post" | "posts" => Ok(Self::Blog),
            "homelab" | "homelabs" | "lab" | "labs" => Ok(Self::Homelab),
            other => Err(format!(
                "unknown content kind `{other}` (expected `blog` or `homelabs`)"
            )),
        }
    }
}

/// Classification field used for filtering and facet listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Category,
    FocusArea,
    Difficulty,
    Status,
    Tag,
    Tool,
}

impl FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "category" | "categories" => Ok(Self::Category),
            "focus-area" | "focusarea" | "focus" => Ok(Self::FocusArea),
            "difficulty" | "difficulties" => Ok(Self::Difficulty),
            "status" => Ok(Self::Status),
            "tag" | "tags" => Ok(Self::Tag),
            "tool" | "tools" => Ok(Self::Tool),
            other => Err(format!("unknown facet `{other}`")),
        }
    }
}

/// Read-only view shared by every metadata projection.
pub trait Listing {
    fn slug(&self) -> &str;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    /// Publish date exactly as written in frontmatter.
    fn date(&self) -> &str;
    fn read_time(&self) -> &str;
    fn is_featured(&self) -> bool;

    /// Values of a classification field; empty when the kind has no such
    /// field.
    fn facet_values(&self, facet: Facet) -> Vec<&str>;
}

/// A document collection: the metadata shape and the single place where
/// frontmatter defaults are applied.
pub trait Collection: Send + Sync + 'static {
    /// Metadata projection; never carries the body.
    type Metadata: Listing + Clone + fmt::Debug + Serialize + Send + Sync + 'static;

    /// Which collection this is.
    const KIND: ContentKind;

    /// Build typed metadata from a raw header and the document body.
    fn normalize(
        slug: &str,
        raw: &RawFrontmatter,
        body: &str,
        config: &Config,
    ) -> Result<Self::Metadata>;
}

/// A parsed document: metadata plus raw markdown body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document<M> {
    #[serde(flatten)]
    pub meta: M,

    /// Markdown body, without the frontmatter header.
    pub content: String,
}

impl<M: Listing> Document<M> {
    pub fn slug(&self) -> &str {
        self.meta.slug()
    }
}

/// Blog post metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub read_time: String,
    pub category: String,
    pub author: String,
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Homelab write-up metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lab {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub difficulty: String,
    pub duration: String,
    pub status: String,
    pub focus_area: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub featured: bool,
    pub read_time: String,
}

impl Listing for Post {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn read_time(&self) -> &str {
        &self.read_time
    }

    fn is_featured(&self) -> bool {
        self.featured
    }

    fn facet_values(&self, facet: Facet) -> Vec<&str> {
        match facet {
            Facet::Category => vec![self.category.as_str()],
            Facet::Tag => self.tags.iter().map(String::as_str).collect(),
            Facet::FocusArea | Facet::Difficulty | Facet::Status | Facet::Tool => Vec::new(),
        }
    }
}

impl Listing for Lab {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn read_time(&self) -> &str {
        &self.read_time
    }

    fn is_featured(&self) -> bool {
        self.featured
    }

    fn facet_values(&self, facet: Facet) -> Vec<&str> {
        match facet {
            Facet::Category => vec![self.category.as_str()],
            Facet::FocusArea => vec![self.focus_area.as_str()],
            Facet::Difficulty => vec![self.difficulty.as_str()],
            Facet::Status => vec![self.status.as_str()],
            Facet::Tag => self.tags.iter().map(String::as_str).collect(),
            Facet::Tool => self.tools.iter().map(String::as_str).collect(),
        }
    }
}

/// The blog collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blog;

/// The homelab collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Homelab;

/// Frontmatter read time, or one derived from the body.
fn read_time_for(raw: &RawFrontmatter, body: &str, config: &Config) -> String {
    raw.string("readTime")
        .unwrap_or_else(|| calculate_read_time(body, config.content.words_per_minute))
}

impl Collection for Blog {
    type Metadata = Post;

    const KIND: ContentKind = ContentKind::Blog;

    fn normalize(slug: &str, raw: &RawFrontmatter, body: &str, config: &Config) -> Result<Post> {
        Ok(Post {
            slug: slug.to_string(),
            title: raw.required("title")?,
            description: raw.required("description")?,
            date: raw.string("date").unwrap_or_default(),
            read_time: read_time_for(raw, body, config),
            category: raw
                .string("category")
                .unwrap_or_else(|| config.defaults.post_category.clone()),
            author: raw
                .string("author")
                .or_else(|| config.site.author.clone())
                .unwrap_or_default(),
            featured: raw.flag("featured"),
            cover_image: raw.string("coverImage"),
            tags: raw.list("tags"),
        })
    }
}

impl Collection for Homelab {
    type Metadata = Lab;

    const KIND: ContentKind = ContentKind::Homelab;

    fn normalize(slug: &str, raw: &RawFrontmatter, body: &str, config: &Config) -> Result<Lab> {
        let defaults = &config.defaults;
        let read_time = read_time_for(raw, body, config);
        let category = raw.string("category");

        Ok(Lab {
            slug: slug.to_string(),
            title: raw.required("title")?,
            description: raw.required("description")?,
            date: raw.string("date").unwrap_or_default(),
            difficulty: raw
                .string("difficulty")
                .unwrap_or_else(|| defaults.lab_difficulty.clone()),
            duration: raw.string("duration").unwrap_or_else(|| read_time.clone()),
            status: raw
                .string("status")
                .unwrap_or_else(|| defaults.lab_status.clone()),
            focus_area: raw
                .string("focusArea")
                .or_else(|| category.clone())
                .unwrap_or_else(|| defaults.lab_category.clone()),
            category: category.unwrap_or_else(|| defaults.lab_category.clone()),
            cover_image: raw.string("coverImage"),
            tools: raw.list("tools"),
            objectives: raw.list("objectives"),
            requirements: raw.list("requirements"),
            tags: raw.list("tags"),
            featured: raw.flag("featured"),
            read_time,
        })
    }
}
