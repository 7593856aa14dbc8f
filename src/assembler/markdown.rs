//! Markdown rendering with heading anchors.
//!
//! Renders the article body to HTML (pulldown-cmark), assigning each heading
//! below level 1 a stable `id` and an in-heading anchor link:
//!
//! ```html
//! <h2 id="%E7%BC%96%E8%AF%91%E5%85%A5%E5%8F%A3">编译入口<a class="anchor" href="#%E7%BC%96%E8%AF%91%E5%85%A5%E5%8F%A3">§</a></h2>
//! ```
//!
//! The first level-1 heading is the page title and is excluded from the body;
//! assembly re-attaches it as `contentTitle`.

use crate::config::SlugMode;
use crate::utils::slug::slugify_fragment;
use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use std::collections::HashMap;

/// Fallback id for headings whose text slugifies to nothing.
const EMPTY_HEADING_ID: &str = "section";

/// A heading below level 1, with its assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub id: String,
    pub text: String,
}

/// Result of rendering one markdown body.
#[derive(Debug)]
pub struct Rendered {
    /// Article HTML without the leading level-1 heading.
    pub body: String,
    /// Text of the first level-1 heading, if any.
    pub title: Option<String>,
    /// Headings below level 1, in document order, ids unique.
    pub headings: Vec<Heading>,
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options
}

/// Render a markdown body to HTML with identified headings.
pub fn render(markdown: &str, slug: SlugMode) -> Rendered {
    let raw_headings = collect_headings(markdown);

    // Assign unique ids; level-1 headings get none (the first becomes the title)
    let mut used: HashMap<String, usize> = HashMap::new();
    let mut title: Option<String> = None;
    let mut headings = Vec::new();

    let ids: Vec<Option<String>> = raw_headings
        .iter()
        .map(|(level, text)| {
            if *level == 1 {
                if title.is_none() {
                    title = Some(text.trim().to_owned());
                }
                return None;
            }

            let mut base = slugify_fragment(text, slug);
            if base.is_empty() {
                base = EMPTY_HEADING_ID.to_owned();
            }
            let seen = used.entry(base.clone()).or_insert(0);
            let id = if *seen == 0 {
                base
            } else {
                format!("{base}-{seen}")
            };
            *seen += 1;

            headings.push(Heading {
                level: *level,
                id: id.clone(),
                text: text.trim().to_owned(),
            });
            Some(id)
        })
        .collect();

    let body = render_body(markdown, &ids);

    Rendered {
        body,
        title,
        headings,
    }
}

/// First pass: heading levels and flattened text, in document order.
fn collect_headings(markdown: &str) -> Vec<(u8, String)> {
    let mut headings = Vec::new();
    let mut current: Option<(u8, String)> = None;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level as u8, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = current.take() {
                    headings.push(heading);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            _ => {}
        }
    }

    headings
}

/// Second pass: emit HTML, rewriting heading tags and dropping the first
/// level-1 heading entirely.
fn render_body(markdown: &str, ids: &[Option<String>]) -> String {
    let mut events: Vec<Event> = Vec::new();
    let mut index = 0usize;
    let mut title_dropped = false;
    let mut skipping_title = false;
    let mut open_heading: Option<(u8, String)> = None;

    for event in Parser::new_ext(markdown, options()) {
        if skipping_title {
            if matches!(event, Event::End(TagEnd::Heading(HeadingLevel::H1))) {
                skipping_title = false;
            }
            continue;
        }

        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let id = ids.get(index).cloned().flatten();
                index += 1;

                if level == HeadingLevel::H1 && !title_dropped {
                    title_dropped = true;
                    skipping_title = true;
                    continue;
                }

                match id {
                    Some(id) => {
                        let n = level as u8;
                        events.push(Event::Html(CowStr::from(format!(
                            "<h{n} id=\"{id}\">"
                        ))));
                        open_heading = Some((n, id));
                    }
                    // Repeated level-1 headings keep their plain form
                    None => events.push(Event::Start(Tag::Heading {
                        level,
                        id: None,
                        classes: vec![],
                        attrs: vec![],
                    })),
                }
            }
            Event::End(TagEnd::Heading(level)) => match open_heading.take() {
                Some((n, id)) => {
                    events.push(Event::Html(CowStr::from(format!(
                        "<a class=\"anchor\" href=\"#{id}\">\u{00a7}</a></h{n}>"
                    ))));
                }
                None => events.push(Event::End(TagEnd::Heading(level))),
            },
            other => events.push(other),
        }
    }

    let mut body = String::new();
    html::push_html(&mut body, events.into_iter());
    body
}
