//! Lenient placeholder parser.
//!
//! Never fails: a prefix with no matching suffix stays literal text, and
//! `parse(raw).render(syntax) == raw` holds for every input.
//!
//! Prefixes are paired with suffixes in a single left-to-right pass before
//! any segment is built, so unterminated prefixes cost no rescanning.

use hashbrown::HashMap;

use crate::config::PlaceholderSyntax;
use super::ast::{Expression, Reference, Segment};

/// Defaults nested deeper than this are kept as literal text.
pub const MAX_DEFAULT_NESTING: usize = 64;

/// Parse with the default `${key:default}` syntax.
pub fn parse(raw: &str) -> Expression {
    parse_with(raw, &PlaceholderSyntax::default())
}

/// Parse with a custom syntax.
pub fn parse_with(raw: &str, syntax: &PlaceholderSyntax) -> Expression {
    let parser = Parser {
        raw,
        syntax,
        closing: match_suffixes(raw, syntax),
    };
    parser.expression(0, raw.len(), 0)
}

/// Offset of every prefix that has a matching suffix → offset of that suffix.
///
/// A suffix closes the most recent open prefix. Suffixes with nothing open
/// and prefixes never closed get no entry.
fn match_suffixes(raw: &str, syntax: &PlaceholderSyntax) -> HashMap<usize, usize> {
    let prefix = syntax.prefix.as_str();
    let suffix = syntax.suffix.as_str();
    let mut open = Vec::new();
    let mut closing = HashMap::new();
    let mut i = 0;
    while i < raw.len() {
        let rest = &raw[i..];
        if rest.starts_with(prefix) {
            open.push(i);
            i += prefix.len();
        } else if rest.starts_with(suffix) {
            if let Some(start) = open.pop() {
                closing.insert(start, i);
            }
            i += suffix.len();
        } else {
            i += next_char_len(rest);
        }
    }
    closing
}

struct Parser<'a> {
    raw: &'a str,
    syntax: &'a PlaceholderSyntax,
    closing: HashMap<usize, usize>,
}

impl Parser<'_> {
    /// Segments of `raw[start..end]`.
    fn expression(&self, start: usize, end: usize, depth: usize) -> Expression {
        let prefix = self.syntax.prefix.as_str();
        let suffix = self.syntax.suffix.as_str();

        let mut segments = Vec::new();
        let mut literal_start = start;
        let mut pos = start;

        while let Some(offset) = self.raw[pos..end].find(prefix) {
            let open = pos + offset;
            let body_start = open + prefix.len();
            match self.closing_suffix(open, end) {
                Some(close) => {
                    push_literal(&mut segments, &self.raw[literal_start..open]);
                    let reference = self.reference(body_start, close, depth);
                    segments.push(Segment::Reference(reference));
                    pos = close + suffix.len();
                    literal_start = pos;
                }
                // Unterminated: the prefix is literal, keep scanning after it.
                None => pos = body_start,
            }
        }

        push_literal(&mut segments, &self.raw[literal_start..end]);
        Expression { segments }
    }

    fn reference(&self, body_start: usize, body_end: usize, depth: usize) -> Reference {
        let Some(at) = self.separator(body_start, body_end) else {
            return Reference {
                key: self.raw[body_start..body_end].to_string(),
                default: None,
            };
        };
        let default_start = at + self.syntax.separator.len();
        let default = if depth + 1 >= MAX_DEFAULT_NESTING {
            let mut segments = Vec::new();
            push_literal(&mut segments, &self.raw[default_start..body_end]);
            Expression { segments }
        } else {
            self.expression(default_start, body_end, depth + 1)
        };
        Reference {
            key: self.raw[body_start..at].to_string(),
            default: Some(default),
        }
    }

    /// Suffix offset closing the prefix at `open`, if it closes before `end`.
    fn closing_suffix(&self, open: usize, end: usize) -> Option<usize> {
        self.closing
            .get(&open)
            .copied()
            .filter(|&close| close + self.syntax.suffix.len() <= end)
    }

    /// First separator in `raw[start..end]` outside nested references.
    fn separator(&self, start: usize, end: usize) -> Option<usize> {
        let separator = self.syntax.separator.as_str();
        if separator.is_empty() {
            return None;
        }
        let mut i = start;
        while i < end {
            if let Some(close) = self.closing_suffix(i, end) {
                i = close + self.syntax.suffix.len();
                continue;
            }
            let rest = &self.raw[i..end];
            if rest.starts_with(separator) {
                return Some(i);
            }
            i += next_char_len(rest);
        }
        None
    }
}

fn next_char_len(rest: &str) -> usize {
    rest.chars().next().map_or(1, char::len_utf8)
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Literal(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Literal(text.to_string()));
    }
}

// ============================================================================
// Tests
// ============================================================================
