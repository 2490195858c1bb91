//! Tag name classification.
//!
//! The raw name written after `<pop:` carries three pieces of information:
//!
//! - an optional extension namespace (`ext:title` - namespace `ext`)
//! - a `.`-separated path that nests tags (`content.author.name`)
//! - an optional `no_` negation prefix on the final segment
//!
//! Structural tags (`include`, `layout`, ...) are dispatched by the
//! evaluator to dedicated handlers instead of ordinary scope lookup.

use std::fmt;

/// The reserved prefix every template tag starts with.
pub const TAG_PREFIX: &str = "pop:";

/// Prefix turning a tag into an absence test for the un-prefixed name.
pub const NEGATION_PREFIX: &str = "no_";

/// A parsed `<pop:...>` tag name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagName {
    /// Extension namespace, if the name was written `ns:name`.
    pub namespace: Option<String>,
    /// Dotted path segments; never empty for a valid name.
    pub segments: Vec<String>,
}

impl TagName {
    /// Split a raw tag name (the text between `pop:` and the attributes).
    ///
    /// Returns `None` when the name is empty or has an empty namespace or
    /// path segment (`ext:`, `a..b`, `.title`).
    pub fn parse(raw: &str) -> Option<TagName> {
        let (namespace, path) = match raw.split_once(':') {
            Some((ns, rest)) => (Some(ns), rest),
            None => (None, raw),
        };
        if namespace.is_some_and(str::is_empty) || path.is_empty() {
            return None;
        }
        let segments: Vec<String> = path.split('.').map(str::to_owned).collect();
        if segments.iter().any(String::is_empty) {
            return None;
        }
        Some(TagName {
            namespace: namespace.map(str::to_owned),
            segments,
        })
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ns) = &self.namespace {
            write!(f, "{ns}:")?;
        }
        write!(f, "{}", self.segments.join("."))
    }
}

/// Tags with dedicated evaluation semantics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StructuralTag {
    /// `<pop:include template="NAME"/>` - render another template here.
    Include,
    /// `<pop:layout name="NAME"/>` - render through `layouts/NAME`.
    Layout,
    /// `<pop:block region="R">` - capture content for a layout region.
    Block,
    /// `<pop:region name="R">` - placeholder filled by a block.
    Region,
    /// `<pop:first>` - children only on the first repetition.
    First,
    /// `<pop:last>` - children only on the last repetition.
    Last,
    /// `<pop:value/>` - the current repetition's element.
    Value,
    /// `<pop:values/>` - the whole collection under `repeat="false"`.
    Values,
}

impl StructuralTag {
    /// Classify a plain (un-namespaced) tag name.
    pub fn from_name(name: &str) -> Option<StructuralTag> {
        Some(match name {
            "include" => StructuralTag::Include,
            "layout" => StructuralTag::Layout,
            "block" => StructuralTag::Block,
            "region" => StructuralTag::Region,
            "first" => StructuralTag::First,
            "last" => StructuralTag::Last,
            "value" => StructuralTag::Value,
            "values" => StructuralTag::Values,
            _ => return None,
        })
    }
}
