//! Parsed form of a raw property value.

use serde::{Deserialize, Serialize};

use crate::config::PlaceholderSyntax;

/// Ordered literal text and references making up one raw value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub segments: Vec<Segment>,
}

/// One piece of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Literal(String),
    Reference(Reference),
}

/// `${key}` or `${key:default}`.
///
/// The default is itself an expression; its references are only resolved
/// when the default is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub key: String,
    pub default: Option<Expression>,
}

impl Expression {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Top-level references, defaults not descended into.
    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Reference(r) => Some(r),
            Segment::Literal(_) => None,
        })
    }

    /// Every referenced key in source order, including those nested in
    /// defaults. Duplicates are kept.
    pub fn referenced_keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, keys: &mut Vec<&'a str>) {
        for reference in self.references() {
            keys.push(&reference.key);
            if let Some(default) = &reference.default {
                default.collect_keys(keys);
            }
        }
    }

    /// Reconstruct source text in the given syntax.
    pub fn render(&self, syntax: &PlaceholderSyntax) -> String {
        let mut out = String::new();
        self.render_into(syntax, &mut out);
        out
    }

    fn render_into(&self, syntax: &PlaceholderSyntax, out: &mut String) {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Reference(reference) => {
                    out.push_str(&syntax.prefix);
                    out.push_str(&reference.key);
                    if let Some(default) = &reference.default {
                        out.push_str(&syntax.separator);
                        default.render_into(syntax, out);
                    }
                    out.push_str(&syntax.suffix);
                }
            }
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(&PlaceholderSyntax::default()))
    }
}
