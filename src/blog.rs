//! Blog index aggregation.
//!
//! One pass over the assembled records produces the site-wide snapshot
//! (post list plus category and tag counts); the same snapshot is then
//! attached to every record, so renderers can build listing pages from any
//! page's data alone.

use crate::record::{BlogIndex, NameCount, PageRecord};
use crate::utils::date;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Compute the blog snapshot and attach it to every record.
///
/// Posts are records whose `blog.isPost` was set during assembly. The post
/// list is reverse-chronological, ties broken by `pagePath` ascending, so
/// the order is stable across builds. Counts satisfy `count(name)` equals
/// the number of posts carrying `name`.
pub fn attach_index(records: &mut [PageRecord]) {
    let mut posts: Vec<&PageRecord> = records.iter().filter(|r| r.blog.is_post).collect();
    posts.sort_by_key(|r| (Reverse(date::sort_key(&r.date)), r.page_path.clone()));

    let mut categories: BTreeMap<&str, usize> = BTreeMap::new();
    let mut tags: BTreeMap<&str, usize> = BTreeMap::new();
    for post in &posts {
        for name in &post.categories {
            *categories.entry(name).or_insert(0) += 1;
        }
        for name in &post.tags {
            *tags.entry(name).or_insert(0) += 1;
        }
    }

    let index = BlogIndex {
        is_post: false,
        posts: posts.iter().map(|r| r.summary()).collect(),
        categories: into_counts(categories),
        tags: into_counts(tags),
    };

    for record in records.iter_mut() {
        record.blog = BlogIndex {
            is_post: record.blog.is_post,
            ..index.clone()
        };
    }
}

/// Counts ordered by count descending, then name ascending.
fn into_counts(map: BTreeMap<&str, usize>) -> Vec<NameCount> {
    let mut counts: Vec<NameCount> = map
        .into_iter()
        .map(|(name, count)| NameCount {
            name: name.to_owned(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    counts
}
