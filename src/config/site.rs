//! `[site]` section configuration.
//!
//! Contains basic site information like title, author, description, etc.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in papyr.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [site]
/// title = "My Blog"
/// description = "A personal blog about Rust"
/// author = "Alice"
/// url = "https://myblog.com"
/// root = "/"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    /// Site title displayed in browser tab and headers.
    pub title: String,

    /// Author name used when a page's front matter has none.
    #[serde(default = "defaults::site::author")]
    #[educe(Default = defaults::site::author())]
    pub author: String,

    /// Author contact email.
    #[serde(default = "defaults::site::email")]
    #[educe(Default = defaults::site::email())]
    pub email: String,

    /// Site description for SEO meta tags.
    pub description: String,

    /// Base URL for absolute links.
    #[serde(default = "defaults::site::url")]
    #[educe(Default = defaults::site::url())]
    pub url: Option<String>,

    /// URL root prefix for output path derivation. Must start with `/`.
    #[serde(default = "defaults::site::root")]
    #[educe(Default = defaults::site::root())]
    pub root: String,

    /// BCP 47 language code (e.g., "zh-Hans", "en-US").
    #[serde(default = "defaults::site::language")]
    #[educe(Default = defaults::site::language())]
    pub language: String,

    /// Copyright notice for site footer.
    #[serde(default)]
    pub copyright: String,

    /// Markup fragments injected into the page head region, in load order.
    #[serde(default)]
    pub head: Vec<String>,

    /// Markup fragments injected into the page script region, in load order.
    #[serde(default)]
    pub script: Vec<String>,
}
