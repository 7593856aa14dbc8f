//! Text processing: escaping, tag stripping, excerpt truncation.

use std::borrow::Cow;

/// Escape HTML special characters.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn html_escape(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['<', '>', '&', '"']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Strip tags from an HTML fragment, decoding the basic entities and
/// collapsing whitespace runs to single spaces.
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len() / 2);
    let mut chars = html.chars().peekable();
    let mut in_tag = false;
    let mut last_was_space = true;

    while let Some(c) = chars.next() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                // Tag boundaries separate words ("<li>a</li><li>b</li>")
                if !last_was_space {
                    text.push(' ');
                    last_was_space = true;
                }
            }
            _ if in_tag => {}
            '&' => {
                let decoded = decode_entity(&mut chars);
                if !decoded.is_empty() {
                    text.push_str(&decoded);
                    last_was_space = false;
                }
            }
            c if c.is_whitespace() => {
                if !last_was_space {
                    text.push(' ');
                    last_was_space = true;
                }
            }
            c => {
                text.push(c);
                last_was_space = false;
            }
        }
    }

    text.trim_end().to_owned()
}

/// Decode one entity after a consumed `&`. Unknown entities pass through.
fn decode_entity(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c == ';' {
            chars.next();
            break;
        }
        if !c.is_ascii_alphanumeric() && c != '#' || name.len() > 8 {
            // Not an entity after all; emit literally
            return format!("&{name}");
        }
        name.push(c);
        chars.next();
    }

    match name.as_str() {
        "lt" => "<".into(),
        "gt" => ">".into(),
        "amp" => "&".into(),
        "quot" => "\"".into(),
        "apos" | "#39" => "'".into(),
        "nbsp" => " ".into(),
        _ => name
            .strip_prefix('#')
            .and_then(|digits| digits.parse::<u32>().ok())
            .and_then(char::from_u32)
            .map_or_else(|| format!("&{name};"), String::from),
    }
}

/// Truncate plain text to `max_chars` characters, appending `...` when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut indices = text.char_indices();
    match indices.nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", text[..byte_idx].trim_end()),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // html_escape tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_html_escape_plain() {
        assert_eq!(html_escape("hello world"), "hello world");
    }

    #[test]
    fn test_html_escape_special_chars() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn test_html_escape_borrows_when_clean() {
        assert!(matches!(html_escape("clean"), Cow::Borrowed(_)));
        assert!(matches!(html_escape("a < b"), Cow::Owned(_)));
    }

    // ------------------------------------------------------------------------
    // strip_tags tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_strip_tags_simple() {
        assert_eq!(strip_tags("<p>hello</p>"), "hello");
    }

    #[test]
    fn test_strip_tags_nested() {
        assert_eq!(
            strip_tags("<p>Vue3 <a href=\"#\">正式发布</a> 已经</p>"),
            "Vue3 正式发布 已经"
        );
    }

    #[test]
    fn test_strip_tags_block_boundaries_become_spaces() {
        assert_eq!(strip_tags("<li>one</li><li>two</li>"), "one two");
        assert_eq!(strip_tags("<p>a</p>\n<p>b</p>"), "a b");
    }

    #[test]
    fn test_strip_tags_decodes_entities() {
        assert_eq!(strip_tags("<p>a &amp; b &lt;c&gt;</p>"), "a & b <c>");
        assert_eq!(strip_tags("it&#39;s"), "it's");
    }

    #[test]
    fn test_strip_tags_unknown_entity_passes_through() {
        assert_eq!(strip_tags("&unknown;"), "&unknown;");
    }

    #[test]
    fn test_strip_tags_collapses_whitespace() {
        assert_eq!(strip_tags("<p>a\n   b\t c</p>"), "a b c");
    }

    #[test]
    fn test_strip_tags_empty() {
        assert_eq!(strip_tags(""), "");
        assert_eq!(strip_tags("<br/>"), "");
    }

    // ------------------------------------------------------------------------
    // excerpt tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_excerpt_short_text_untouched() {
        assert_eq!(excerpt("short text", 210), "short text");
    }

    #[test]
    fn test_excerpt_exact_length_untouched() {
        assert_eq!(excerpt("abcde", 5), "abcde");
    }

    #[test]
    fn test_excerpt_truncates_with_ellipsis() {
        assert_eq!(excerpt("abcdefgh", 5), "abcde...");
    }

    #[test]
    fn test_excerpt_counts_chars_not_bytes() {
        // Four CJK chars, truncate at 2 chars
        assert_eq!(excerpt("编译入口", 2), "编译...");
    }

    #[test]
    fn test_excerpt_trims_trailing_space_before_ellipsis() {
        assert_eq!(excerpt("ab cd ef", 6), "ab cd...");
    }
}
