//! Page record assembly.
//!
//! `assemble_page` turns one markdown source plus the site configuration
//! into a complete [`PageRecord`]:
//!
//! ```text
//! assemble_page()
//!     │
//!     ├── front_matter::parse() ──► FrontMatter + markdown body
//!     ├── markdown::render()    ──► body HTML + title + headings
//!     ├── toc::build_toc()      ──► toc fragment (anchors match ids)
//!     ├── paths::*              ──► pagePath / outputPath / layoutPath
//!     └── config.merged()       ──► record `config` object
//! ```
//!
//! The produced record has exactly one state: valid and immutable. The blog
//! snapshot is attached afterwards by the build's aggregation pass, since it
//! spans all posts.

pub mod front_matter;
pub mod markdown;
pub mod paths;
pub mod toc;

use crate::config::{ConfigError, SiteConfig};
use crate::record::{PageRecord, RawMarkup};
use crate::utils::{date, text};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Per-page assembly failures. Fatal to the page being built, never to the
/// build as a whole.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("content path cannot be resolved: `{path}`")]
    ContentResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config merge failed")]
    ConfigMerge(#[from] ConfigError),

    #[error("invalid front matter in `{path}`: {reason}")]
    FrontMatter { path: PathBuf, reason: String },
}

/// Assemble the page record for one content source.
///
/// The returned record satisfies the cross-reference invariants: every toc
/// anchor matches a heading id in `content`, and `outputPath` is derived
/// from `pagePath` and the configured root. Its `blog` field is an empty
/// snapshot apart from `isPost`; the build pass fills it in.
///
/// Returns `Ok(None)` for drafts when draft building is disabled.
pub fn assemble_page(
    source: &Path,
    config: &SiteConfig,
) -> Result<Option<PageRecord>, AssembleError> {
    let raw = fs::read_to_string(source).map_err(|err| AssembleError::ContentResolution {
        path: source.to_path_buf(),
        source: err,
    })?;

    let (front, body) = front_matter::parse(&raw, source)?;
    if front.draft && !config.build.drafts {
        return Ok(None);
    }

    let rendered = markdown::render(&body, config.build.slug);

    let page_path = paths::page_path(source, &config.build.content)?;
    let output_path = paths::output_path(&page_path, &config.site.root);
    let layout_path = paths::layout_path(&page_path, &config.build.content, &config.build.layout);

    // Title: front matter wins, then the first heading, then the file stem
    let title = front
        .title
        .or(rendered.title)
        .unwrap_or_else(|| file_stem(&page_path));
    let content_title = RawMarkup::new(format!("<h1>{}</h1>", text::html_escape(&title)));
    let content = RawMarkup::new(format!("{content_title}\n{}", rendered.body));

    let author = front.author.unwrap_or_else(|| config.site.author.clone());
    let contributors = {
        let deduped = front_matter::dedup(front.contributors);
        if deduped.is_empty() {
            vec![author.clone()]
        } else {
            deduped
        }
    };

    // Date falls back to the source file's modification time
    let date = match front.date {
        Some(date) => date,
        None => {
            let modified = fs::metadata(source).and_then(|m| m.modified()).map_err(
                |err| AssembleError::ContentResolution {
                    path: source.to_path_buf(),
                    source: err,
                },
            )?;
            date::from_system_time(modified)
        }
    };

    let excerpt = text::excerpt(
        &text::strip_tags(&rendered.body),
        config.build.excerpt_length,
    );

    let is_post = page_path.starts_with(&config.posts_prefix());

    Ok(Some(PageRecord {
        config: config.merged()?,
        page_path,
        layout_path,
        output_path,
        title,
        content_title,
        content,
        content_body: RawMarkup::new(rendered.body),
        head: config.site.head.iter().map(RawMarkup::new).collect(),
        script: config.site.script.iter().map(RawMarkup::new).collect(),
        toc: toc::build_toc(&rendered.headings),
        author,
        contributors,
        date,
        updated: front.updated,
        excerpt,
        cover: front.cover,
        categories: front_matter::dedup(front.categories),
        tags: front_matter::dedup(front.tags),
        blog: crate::record::BlogIndex {
            is_post,
            ..Default::default()
        },
    }))
}

/// Last path segment without its extension, as a title of last resort.
fn file_stem(page_path: &str) -> String {
    let file = page_path.rsplit_once('/').map_or(page_path, |(_, f)| f);
    file.rsplit_once('.').map_or(file, |(stem, _)| stem).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn test_config(root: &Path) -> &'static SiteConfig {
        let mut config = SiteConfig::default();
        config.site.title = "Test Blog".into();
        config.site.author = "alice".into();
        config.build.content = root.join("content");
        config.build.output = root.join("public");
        // Tests need 'static for parity with the binary's Box::leak pattern
        Box::leak(Box::new(config))
    }

    fn write_page(content_dir: &Path, rel: &str, body: &str) -> PathBuf {
        let path = content_dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_assemble_minimal_page() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let source = write_page(
            &config.build.content,
            "posts/2020/x.md",
            "---\ntitle: Hello\ndate: 2020/11/11\n---\n# Hello\n\nBody text.\n",
        );

        let record = assemble_page(&source, config).unwrap().unwrap();

        assert_eq!(record.page_path, "posts/2020/x.md");
        assert_eq!(record.output_path, "posts/2020/x.html");
        assert_eq!(record.title, "Hello");
        assert_eq!(record.content_title.as_str(), "<h1>Hello</h1>");
        assert_eq!(record.author, "alice");
        assert_eq!(record.contributors, vec!["alice"]);
        assert_eq!(record.date, "2020/11/11");
        assert!(record.blog.is_post);
        assert!(record.blog.posts.is_empty());
    }

    #[test]
    fn test_assemble_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        let result = assemble_page(&config.build.content.join("nope.md"), config);
        assert!(matches!(
            result,
            Err(AssembleError::ContentResolution { .. })
        ));
    }

    #[test]
    fn test_assemble_draft_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let source = write_page(
            &config.build.content,
            "posts/wip.md",
            "---\ntitle: WIP\ndraft: true\n---\ntext\n",
        );

        assert!(assemble_page(&source, config).unwrap().is_none());
    }

    #[test]
    fn test_assemble_draft_included_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = {
            let mut config = SiteConfig::default();
            config.build.content = dir.path().join("content");
            config.build.output = dir.path().join("public");
            config.build.drafts = true;
            Box::leak(Box::new(config))
        };
        let source = write_page(
            &config.build.content,
            "posts/wip.md",
            "---\ntitle: WIP\ndraft: true\n---\ntext\n",
        );

        assert!(assemble_page(&source, config).unwrap().is_some());
    }

    #[test]
    fn test_assemble_toc_anchors_match_content_ids() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let source = write_page(
            &config.build.content,
            "posts/long.md",
            "---\ntitle: Long\ndate: 2020/01/01\n---\n\
             # Long\n\n## 编译入口\n\ntext\n\n## render 优化\n\ntext\n",
        );

        let record = assemble_page(&source, config).unwrap().unwrap();
        let toc = record.toc.as_ref().unwrap().as_str();

        for anchor in ["#%E7%BC%96%E8%AF%91%E5%85%A5%E5%8F%A3", "#render-%E4%BC%98%E5%8C%96"] {
            let id = &anchor[1..];
            assert!(toc.contains(&format!("href=\"{anchor}\"")));
            assert!(record
                .content
                .as_str()
                .contains(&format!("id=\"{id}\"")));
        }
    }

    #[test]
    fn test_assemble_content_includes_title_body_excludes() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let source = write_page(
            &config.build.content,
            "about.md",
            "# About Me\n\nSome text.\n",
        );

        let record = assemble_page(&source, config).unwrap().unwrap();

        assert_eq!(record.title, "About Me");
        assert!(record.content.as_str().starts_with("<h1>About Me</h1>"));
        assert!(!record.content_body.as_str().contains("<h1>"));
        assert!(!record.blog.is_post);
    }

    #[test]
    fn test_assemble_title_falls_back_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let source = write_page(&config.build.content, "notes/scratch.md", "plain text\n");

        let record = assemble_page(&source, config).unwrap().unwrap();
        assert_eq!(record.title, "scratch");
    }

    #[test]
    fn test_assemble_date_falls_back_to_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let source = write_page(&config.build.content, "posts/undated.md", "# Undated\n");

        let record = assemble_page(&source, config).unwrap().unwrap();
        // Fresh file: mtime is now, so the date must parse
        assert!(crate::utils::date::parse_date(&record.date).is_ok());
    }

    #[test]
    fn test_assemble_dedups_tags_and_contributors() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let source = write_page(
            &config.build.content,
            "posts/dup.md",
            "---\ntitle: Dup\ndate: 2020/01/01\ncontributors: [bob, bob]\ntags: [a, b, a]\n---\ntext\n",
        );

        let record = assemble_page(&source, config).unwrap().unwrap();
        assert_eq!(record.contributors, vec!["bob"]);
        assert_eq!(record.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_assemble_excerpt_is_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let source = write_page(
            &config.build.content,
            "posts/fmt.md",
            "---\ntitle: Fmt\ndate: 2020/01/01\n---\nSome **bold** and [link](https://x) text.\n",
        );

        let record = assemble_page(&source, config).unwrap().unwrap();
        assert_eq!(record.excerpt, "Some bold and link text.");
    }

    #[test]
    fn test_assemble_invalid_updated_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let source = write_page(
            &config.build.content,
            "posts/bad.md",
            "---\ntitle: Bad\ndate: 2020/11/11\nupdated: 2020/01/01\n---\ntext\n",
        );

        assert!(matches!(
            assemble_page(&source, config),
            Err(AssembleError::FrontMatter { .. })
        ));
    }

    #[test]
    fn test_assemble_head_and_script_order_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let config = {
            let mut config = SiteConfig::default();
            config.build.content = dir.path().join("content");
            config.build.output = dir.path().join("public");
            config.site.head = vec!["<link a>".into(), "<link b>".into()];
            config.site.script = vec!["<script a>".into(), "<script b>".into()];
            Box::leak(Box::new(config))
        };
        let source = write_page(&config.build.content, "index.md", "# Home\n");

        let record = assemble_page(&source, config).unwrap().unwrap();
        assert_eq!(record.head[0].as_str(), "<link a>");
        assert_eq!(record.head[1].as_str(), "<link b>");
        assert_eq!(record.script[0].as_str(), "<script a>");
        assert_eq!(record.script[1].as_str(), "<script b>");
    }

    #[test]
    fn test_assemble_config_object_has_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let source = write_page(&config.build.content, "index.md", "# Home\n");

        let record = assemble_page(&source, config).unwrap().unwrap();
        assert_eq!(
            record.config.get("root").and_then(|v| v.as_str()),
            Some("/")
        );
        assert_eq!(
            record.config.get("title").and_then(|v| v.as_str()),
            Some("Test Blog")
        );
    }
}
