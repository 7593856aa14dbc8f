//! YAML front matter extraction and validation.
//!
//! Front matter is the structured metadata block at the top of a markdown
//! source:
//!
//! ```markdown
//! ---
//! title: Vue3 模板编译优化
//! date: 2020/11/11
//! categories: [前端]
//! tags: [Vue.js, 编译]
//! ---
//! ```

use super::AssembleError;
use crate::utils::date::parse_date;
use gray_matter::{Matter, engine::YAML};
use serde::Deserialize;
use std::path::Path;

/// Parsed front matter fields. All optional; defaults are resolved during
/// assembly (author from config, date from file mtime, and so on).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub updated: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub contributors: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub cover: Option<String>,
    #[serde(default)]
    pub draft: bool,
}

/// Split front matter from the markdown body.
///
/// A source without a front matter block yields `FrontMatter::default()`
/// and the body unchanged.
pub fn parse(raw: &str, source: &Path) -> Result<(FrontMatter, String), AssembleError> {
    let matter = Matter::<YAML>::new();
    let parsed = matter
        .parse::<FrontMatter>(raw)
        .map_err(|err| AssembleError::FrontMatter {
            path: source.to_path_buf(),
            reason: err.to_string(),
        })?;

    let front = parsed.data.unwrap_or_default();
    front.validate(source)?;

    Ok((front, parsed.content))
}

impl FrontMatter {
    /// Check date fields: both must parse, and `updated` must not be
    /// earlier than `date`.
    fn validate(&self, source: &Path) -> Result<(), AssembleError> {
        let err = |reason: String| AssembleError::FrontMatter {
            path: source.to_path_buf(),
            reason,
        };

        let date = self
            .date
            .as_deref()
            .map(|text| parse_date(text).map_err(|e| err(e.to_string())))
            .transpose()?;

        let updated = self
            .updated
            .as_deref()
            .map(|text| parse_date(text).map_err(|e| err(e.to_string())))
            .transpose()?;

        if let (Some(date), Some(updated)) = (date, updated)
            && updated < date
        {
            return Err(err(format!(
                "`updated` ({updated}) is earlier than `date` ({date})"
            )));
        }

        Ok(())
    }
}

/// Deduplicate while preserving first-seen order.
pub fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(raw: &str) -> (FrontMatter, String) {
        parse(raw, Path::new("test.md")).unwrap()
    }

    #[test]
    fn test_parse_full_front_matter() {
        let raw = "---\n\
            title: Vue3 模板编译优化\n\
            date: 2020/11/11\n\
            author: shenfq\n\
            contributors: [Shenfq]\n\
            categories: [前端]\n\
            tags: [前端框架, Vue.js, 编译, 模板]\n\
            cover: https://file.shenfq.com/pic/20201109144930.png\n\
            ---\n\
            body text\n";
        let (front, body) = parse_ok(raw);

        assert_eq!(front.title.as_deref(), Some("Vue3 模板编译优化"));
        assert_eq!(front.date.as_deref(), Some("2020/11/11"));
        assert_eq!(front.author.as_deref(), Some("shenfq"));
        assert_eq!(front.contributors, vec!["Shenfq"]);
        assert_eq!(front.categories, vec!["前端"]);
        assert_eq!(front.tags.len(), 4);
        assert!(front.cover.as_deref().unwrap().starts_with("https://"));
        assert!(!front.draft);
        assert_eq!(body.trim(), "body text");
    }

    #[test]
    fn test_parse_no_front_matter() {
        let (front, body) = parse_ok("# Just a heading\n\nsome text\n");

        assert!(front.title.is_none());
        assert!(front.date.is_none());
        assert!(body.contains("# Just a heading"));
    }

    #[test]
    fn test_parse_draft_flag() {
        let (front, _) = parse_ok("---\ntitle: WIP\ndraft: true\n---\nbody\n");
        assert!(front.draft);
    }

    #[test]
    fn test_parse_updated_after_date_ok() {
        let raw = "---\ndate: 2020/11/11\nupdated: 2020/12/01\n---\nbody\n";
        assert!(parse(raw, Path::new("t.md")).is_ok());
    }

    #[test]
    fn test_parse_updated_equal_to_date_ok() {
        let raw = "---\ndate: 2020/11/11\nupdated: 2020/11/11\n---\nbody\n";
        assert!(parse(raw, Path::new("t.md")).is_ok());
    }

    #[test]
    fn test_parse_updated_before_date_rejected() {
        let raw = "---\ndate: 2020/11/11\nupdated: 2020/10/01\n---\nbody\n";
        let err = parse(raw, Path::new("t.md")).unwrap_err();

        match err {
            AssembleError::FrontMatter { path, reason } => {
                assert_eq!(path, Path::new("t.md"));
                assert!(reason.contains("earlier than"));
            }
            other => panic!("expected front matter error, got {other}"),
        }
    }

    #[test]
    fn test_parse_invalid_date_rejected() {
        let raw = "---\ndate: someday\n---\nbody\n";
        assert!(matches!(
            parse(raw, Path::new("t.md")),
            Err(AssembleError::FrontMatter { .. })
        ));
    }

    #[test]
    fn test_dedup_preserves_order() {
        let values = vec![
            "Vue.js".to_owned(),
            "编译".to_owned(),
            "Vue.js".to_owned(),
            "模板".to_owned(),
        ];
        assert_eq!(dedup(values), vec!["Vue.js", "编译", "模板"]);
    }

    #[test]
    fn test_dedup_drops_blank_entries() {
        let values = vec!["a".to_owned(), "  ".to_owned(), "b".to_owned()];
        assert_eq!(dedup(values), vec!["a", "b"]);
    }
}
