//! `[build]` section configuration.
//!
//! Paths and knobs for the page-record assembly pass.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Heading-id slug strategy.
///
/// | Mode     | Behavior                                              |
/// |----------|-------------------------------------------------------|
/// | `encode` | lowercase, spaces to `-`, percent-encode non-ASCII    |
/// | `ascii`  | transliterate to ASCII (deunicode), lowercase dashes  |
/// | `no`     | heading text used as-is (minus forbidden characters)  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    #[default]
    Encode,
    Ascii,
    No,
}

/// `[build]` section in papyr.toml.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"
/// output = "public"
/// posts = "posts"
/// excerpt_length = 210
/// slug = "encode"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    /// Project root directory (set from CLI, not the config file).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content directory containing markdown sources.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Output directory for serialized page records.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Subdirectory of `content` whose pages are blog posts.
    #[serde(default = "defaults::build::posts")]
    #[educe(Default = defaults::build::posts())]
    pub posts: String,

    /// Layout file name resolved per directory, nearest-ancestor-wins.
    #[serde(default = "defaults::build::layout")]
    #[educe(Default = defaults::build::layout())]
    pub layout: String,

    /// Excerpt length in characters (plain text, after tag stripping).
    #[serde(default = "defaults::build::excerpt_length")]
    #[educe(Default = defaults::build::excerpt_length())]
    pub excerpt_length: usize,

    /// Include pages marked `draft: true`.
    #[serde(default)]
    pub drafts: bool,

    /// Clean the output directory before building (set from CLI).
    #[serde(skip)]
    pub clean: bool,

    /// Heading-id slug strategy.
    #[serde(default = "defaults::build::slug")]
    #[educe(Default = defaults::build::slug())]
    pub slug: SlugMode,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_build_section_defaults() {
        let config = r#"
            [site]
            title = "Test"
            description = "Test"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.posts, "posts");
        assert_eq!(config.build.layout, "_layout.html");
        assert_eq!(config.build.excerpt_length, 210);
        assert!(!config.build.drafts);
        assert_eq!(config.build.slug, SlugMode::Encode);
    }

    #[test]
    fn test_build_section_full() {
        let config = r#"
            [site]
            title = "Test"
            description = "Test"

            [build]
            content = "src"
            output = "dist"
            posts = "articles"
            layout = "_page.html"
            excerpt_length = 120
            drafts = true
            slug = "ascii"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.content, PathBuf::from("src"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(config.build.posts, "articles");
        assert_eq!(config.build.layout, "_page.html");
        assert_eq!(config.build.excerpt_length, 120);
        assert!(config.build.drafts);
        assert_eq!(config.build.slug, SlugMode::Ascii);
    }

    #[test]
    fn test_slug_mode_parsing() {
        for (text, mode) in [
            ("encode", SlugMode::Encode),
            ("ascii", SlugMode::Ascii),
            ("no", SlugMode::No),
        ] {
            let config = format!(
                r#"
                [site]
                title = "Test"
                description = "Test"
                [build]
                slug = "{text}"
                "#
            );
            let config: SiteConfig = toml::from_str(&config).unwrap();
            assert_eq!(config.build.slug, mode);
        }
    }

    #[test]
    fn test_slug_mode_invalid() {
        let config = r#"
            [site]
            title = "Test"
            description = "Test"
            [build]
            slug = "kebab"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
