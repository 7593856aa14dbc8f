//! Table-of-contents fragment generation.
//!
//! Produces the pre-rendered navigation fragment stored in the record's
//! `toc` field. Anchors reference the heading ids assigned during markdown
//! rendering, so every `href` resolves inside `content` by construction.

use super::markdown::Heading;
use crate::record::RawMarkup;
use crate::utils::text::html_escape;

/// Heading level listed in the toc.
const TOC_LEVEL: u8 = 2;

/// Build the toc fragment from the page's headings.
///
/// Returns `None` when the page has no level-2 headings; the record then
/// carries a null `toc`.
pub fn build_toc(headings: &[Heading]) -> Option<RawMarkup> {
    let entries: Vec<&Heading> = headings.iter().filter(|h| h.level == TOC_LEVEL).collect();
    if entries.is_empty() {
        return None;
    }

    let mut toc = String::from("<nav class=\"toc\"><ol>");
    for heading in entries {
        toc.push_str("<li><a href=\"#");
        toc.push_str(&heading.id);
        toc.push_str("\">");
        toc.push_str(&html_escape(&heading.text));
        toc.push_str("</a></li>");
    }
    toc.push_str("</ol></nav>");

    Some(RawMarkup::new(toc))
}
