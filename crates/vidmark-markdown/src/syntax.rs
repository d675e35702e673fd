//! Block directive syntax: `::name[label]{attrs}`, `:::name[label]{attrs}`, `:::`.

use std::collections::BTreeMap;

use crate::attrs::parse_attributes;

/// Directive recognized on a whole line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BlockDirective {
    /// Leaf directive: `::name[label]{attrs}`
    Leaf {
        name: String,
        label: String,
        attributes: BTreeMap<String, String>,
    },
    /// Container opening: `:::name[label]{attrs}`
    ContainerStart {
        name: String,
        label: String,
        attributes: BTreeMap<String, String>,
        colon_count: usize,
    },
    /// Container closing: `:::`
    ContainerEnd { colon_count: usize },
}

/// Parse a line as a block directive.
///
/// The directive must occupy the whole line (surrounding whitespace aside).
/// Returns `None` for anything else.
pub(crate) fn parse_block_line(line: &str) -> Option<BlockDirective> {
    let trimmed = line.trim();
    let colon_count = trimmed.chars().take_while(|&c| c == ':').count();
    if colon_count < 2 {
        return None;
    }

    let after_colons = &trimmed[colon_count..];

    if after_colons.is_empty() {
        return (colon_count >= 3).then_some(BlockDirective::ContainerEnd { colon_count });
    }

    // Containers allow a space before the name (`::: video`), leaves do not
    let after_colons = if colon_count >= 3 {
        after_colons.trim_start()
    } else {
        after_colons
    };

    let name_end = after_colons
        .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(after_colons.len());
    let name = &after_colons[..name_end];
    if !is_valid_directive_name(name) {
        return None;
    }

    let rest = &after_colons[name_end..];
    let (label, label_len) = parse_brackets(rest);
    let rest = &rest[label_len..];
    let (attrs_str, attrs_len) = parse_braces(rest);
    let rest = &rest[attrs_len..];

    if !rest.trim().is_empty() {
        return None;
    }

    let name = name.to_owned();
    let attributes = parse_attributes(&attrs_str);

    Some(if colon_count == 2 {
        BlockDirective::Leaf {
            name,
            label,
            attributes,
        }
    } else {
        BlockDirective::ContainerStart {
            name,
            label,
            attributes,
            colon_count,
        }
    })
}

/// Valid names start with a letter and contain alphanumerics, hyphens and underscores.
fn is_valid_directive_name(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_alphabetic)
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Parse `[label]`, handling nested brackets.
///
/// Returns (label, `bytes_consumed`).
fn parse_brackets(s: &str) -> (String, usize) {
    parse_delimited(s, '[', ']')
}

/// Parse `{attrs}`, handling nested braces.
///
/// Returns (`attrs_str` without braces, `bytes_consumed`).
fn parse_braces(s: &str) -> (String, usize) {
    parse_delimited(s, '{', '}')
}

fn parse_delimited(s: &str, open: char, close: char) -> (String, usize) {
    if !s.starts_with(open) {
        return (String::new(), 0);
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return (s[1..i].to_owned(), i + 1);
            }
        }
    }

    (String::new(), 0)
}
