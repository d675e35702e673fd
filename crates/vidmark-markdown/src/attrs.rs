//! Directive attribute parsing.
//!
//! Parses the inside of `{#id .class key="value"}` into an attribute map.

use std::collections::BTreeMap;

/// Parse an attribute string (without braces) into a map.
///
/// `#id` becomes `id`; every `.class` is collected into a space-separated
/// `class`, appended after an explicit `class=` value if one is present.
/// Values may be double-quoted, single-quoted or bare (until whitespace).
/// Later keys overwrite earlier ones.
pub(crate) fn parse_attributes(attrs_str: &str) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();
    let mut classes: Vec<&str> = Vec::new();
    let mut remaining = attrs_str;

    loop {
        remaining = remaining.trim_start();
        if remaining.is_empty() {
            break;
        }

        if let Some(rest) = remaining.strip_prefix('#') {
            let end = shorthand_end(rest);
            attributes.insert("id".to_owned(), rest[..end].to_owned());
            remaining = &rest[end..];
        } else if let Some(rest) = remaining.strip_prefix('.') {
            let end = shorthand_end(rest);
            if end > 0 {
                classes.push(&rest[..end]);
            }
            remaining = &rest[end..];
        } else if let Some((key, value, rest)) = parse_key_value(remaining) {
            attributes.insert(key.to_owned(), value.to_owned());
            remaining = rest;
        } else {
            // Skip one unrecognized character
            let skip = remaining.chars().next().map_or(1, char::len_utf8);
            remaining = &remaining[skip..];
        }
    }

    if !classes.is_empty() {
        let shorthand = classes.join(" ");
        attributes
            .entry("class".to_owned())
            .and_modify(|class: &mut String| {
                class.push(' ');
                class.push_str(&shorthand);
            })
            .or_insert(shorthand);
    }

    attributes
}

/// End of a `#id` or `.class` token.
fn shorthand_end(s: &str) -> usize {
    s.find(|c: char| c.is_whitespace() || c == '.' || c == '#')
        .unwrap_or(s.len())
}

/// Parse a key-value pair: `key="value"`, `key='value'` or `key=value`.
///
/// Returns `(key, value, rest)`.
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let eq_pos = s.find('=')?;
    let key = &s[..eq_pos];

    if !is_attribute_name(key) {
        return None;
    }

    let after_eq = &s[eq_pos + 1..];

    for quote in ['"', '\''] {
        if let Some(stripped) = after_eq.strip_prefix(quote) {
            let end_quote = stripped.find(quote)?;
            return Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]));
        }
    }

    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
    Some((key, &after_eq[..end], &after_eq[end..]))
}

/// HTML attribute name: non-empty, no whitespace, controls, quotes, `<`, `>`, `/` or `=`.
pub(crate) fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_empty() {
        assert!(parse_attributes("").is_empty());
        assert!(parse_attributes("   ").is_empty());
    }

    #[test]
    fn test_unquoted_src() {
        assert_eq!(
            parse_attributes("src=/videos/sample.mp4"),
            attrs(&[("src", "/videos/sample.mp4")])
        );
    }

    #[test]
    fn test_quoted_values() {
        assert_eq!(
            parse_attributes(r#"src="/a b.mp4" title='My Clip'"#),
            attrs(&[("src", "/a b.mp4"), ("title", "My Clip")])
        );
    }

    #[test]
    fn test_empty_quoted_value() {
        assert_eq!(parse_attributes(r#"class="""#), attrs(&[("class", "")]));
    }

    #[test]
    fn test_id_and_classes() {
        assert_eq!(
            parse_attributes("#intro .wide.dark src=/a.mp4"),
            attrs(&[("class", "wide dark"), ("id", "intro"), ("src", "/a.mp4")])
        );
    }

    #[test]
    fn test_explicit_class_merged_with_shorthand() {
        assert_eq!(
            parse_attributes(r#"class="base" .extra"#),
            attrs(&[("class", "base extra")])
        );
    }

    #[test]
    fn test_unclosed_quote_skipped() {
        // The key is dropped; parsing continues after it
        let parsed = parse_attributes(r#"title="open src=/a.mp4"#);
        assert_eq!(parsed.get("title"), None);
    }

    #[test]
    fn test_markup_in_key_rejected() {
        assert_eq!(
            parse_attributes(r#"x"><script>alert(1)</script><i=1"#),
            attrs(&[("i", "1")])
        );
    }

    #[test]
    fn test_attribute_name() {
        assert!(is_attribute_name("data-start"));
        assert!(is_attribute_name("aria-label"));
        assert!(!is_attribute_name(""));
        assert!(!is_attribute_name("a b"));
        assert!(!is_attribute_name("x\"y"));
        assert!(!is_attribute_name("a/b"));
        assert!(!is_attribute_name("a\u{7}"));
    }

    #[test]
    fn test_later_key_wins() {
        assert_eq!(
            parse_attributes("src=/a.mp4 src=/b.mp4"),
            attrs(&[("src", "/b.mp4")])
        );
    }
}
