//! Heading fragment slugification.
//!
//! Converts heading text to URL-safe `id` values. The produced slug is used
//! both as the heading `id` attribute and as the toc anchor `href`, so the
//! two always match by construction.

use crate::config::SlugMode;
use deunicode::deunicode;

/// Characters forbidden in fragments
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '"', '(', ')', '[', ']', '\t', '\r', '\n',
];

/// Convert heading text to a URL-safe fragment based on config.
pub fn slugify_fragment(text: &str, mode: SlugMode) -> String {
    let sanitized = sanitize_text(text);
    match mode {
        SlugMode::Encode => urlencoding::encode(&sanitized).into_owned(),
        SlugMode::Ascii => ascii_slug(&sanitized),
        SlugMode::No => sanitized,
    }
}

/// Remove forbidden characters, lowercase, and replace whitespace with dashes
fn sanitize_text(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Transliterate to a lowercase ASCII slug with dash separators
fn ascii_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut prev_dash = true;

    for c in deunicode(text).chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }

    slug.trim_end_matches('-').to_owned()
}
