//! Page record types - the wire contract consumed by downstream renderers.
//!
//! `PageRecord` is the **single output artifact** per page: an immutable
//! key/value document produced once per build and regenerated wholesale on
//! the next one. Field names and nullability are stable; renderers depend on
//! them byte-for-byte.
//!
//! # Field map
//!
//! | Field          | Example                         | Notes                     |
//! |----------------|---------------------------------|---------------------------|
//! | `pagePath`     | `posts/2020/hello.md`           | source-relative           |
//! | `outputPath`   | `posts/2020/hello.html`         | derived from pagePath     |
//! | `layoutPath`   | `posts/_layout.html`            | nearest-ancestor layout   |
//! | `content`      | `<h1>…</h1><p>…</p>`            | trusted HTML, full        |
//! | `contentBody`  | `<p>…</p>`                      | trusted HTML, no heading  |
//! | `toc`          | `<nav class="toc">…</nav>`      | anchors match heading ids |
//! | `blog.posts`   | reverse-chronological summaries | snapshot, same per build  |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Raw Markup
// ============================================================================

/// A string known to contain pre-rendered, already-escaped HTML.
///
/// Emitted verbatim by consumers; never re-escaped or re-parsed. Serialized
/// transparently as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMarkup(String);

impl RawMarkup {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RawMarkup {
    fn from(html: String) -> Self {
        Self(html)
    }
}

impl From<&str> for RawMarkup {
    fn from(html: &str) -> Self {
        Self(html.to_owned())
    }
}

impl std::fmt::Display for RawMarkup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Page Record
// ============================================================================

/// The complete, immutable per-page output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageRecord {
    /// Site-wide configuration merged with the `root` override.
    pub config: Map<String, Value>,

    /// Source-relative path of the content file.
    pub page_path: String,

    /// Path of the layout the renderer should apply.
    pub layout_path: String,

    /// Destination-relative path, derived from `page_path` and `config.root`.
    pub output_path: String,

    /// Display title.
    pub title: String,

    /// `title` wrapped as a heading element for in-page rendering.
    pub content_title: RawMarkup,

    /// Full article markup, including the leading heading.
    pub content: RawMarkup,

    /// Article body markup, without the leading heading.
    pub content_body: RawMarkup,

    /// Markup fragments for the head region, in load order.
    pub head: Vec<RawMarkup>,

    /// Markup fragments for the script region, in load order.
    pub script: Vec<RawMarkup>,

    /// Table-of-contents fragment; `None` when the page has no headings.
    pub toc: Option<RawMarkup>,

    pub author: String,

    /// Non-empty ordered set; defaults to `[author]`.
    pub contributors: Vec<String>,

    pub date: String,

    /// Never earlier than `date` when present.
    pub updated: Option<String>,

    /// Plain-text summary truncated from the body.
    pub excerpt: String,

    pub cover: Option<String>,

    pub categories: Vec<String>,

    pub tags: Vec<String>,

    /// Site-wide blog snapshot, identical for every record of one build.
    pub blog: BlogIndex,
}

impl PageRecord {
    /// Reduce this record to its listing form.
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            page_path: self.page_path.clone(),
            title: self.title.clone(),
            link: self.output_path.clone(),
            date: self.date.clone(),
            updated: self.updated.clone(),
            author: self.author.clone(),
            contributors: self.contributors.clone(),
            categories: self.categories.clone(),
            tags: self.tags.clone(),
            excerpt: self.excerpt.clone(),
            cover: self.cover.clone(),
        }
    }
}

// ============================================================================
// Blog Index
// ============================================================================

/// Aggregated view over all posts, attached to every record as a read-only
/// snapshot. Computed in one pass per build, never mutated incrementally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BlogIndex {
    /// Whether the owning page lives under the posts directory.
    pub is_post: bool,

    /// Post summaries, reverse-chronological (ties broken by `pagePath`).
    pub posts: Vec<PostSummary>,

    /// Category name to occurrence count, unique by name.
    pub categories: Vec<NameCount>,

    /// Tag name to occurrence count, unique by name.
    pub tags: Vec<NameCount>,
}

/// A reduced `PageRecord` used only for listing purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PostSummary {
    pub page_path: String,
    pub title: String,
    /// Equal to the post's `outputPath`.
    pub link: String,
    pub date: String,
    pub updated: Option<String>,
    pub author: String,
    pub contributors: Vec<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub cover: Option<String>,
}

/// Occurrence count for one category or tag name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NameCount {
    pub name: String,
    pub count: usize,
}

// ============================================================================
// Tests
// ============================================================================
