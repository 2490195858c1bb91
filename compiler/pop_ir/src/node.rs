//! Node tree produced by the parser.

use smallvec::SmallVec;

use crate::span::Span;
use crate::tag_name::{StructuralTag, NEGATION_PREFIX};

/// A compiled template: the top-level node list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub nodes: Vec<Node>,
}

/// One node of the compiled tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Literal output, passed through verbatim.
    Text(String),
    /// A `<pop:...>` element.
    Tag(Tag),
}

/// A `<pop:...>` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    /// Final path segment, including a `no_` prefix if written.
    pub name: String,
    /// Extension namespace (`ext` in `pop:ext:title`).
    pub namespace: Option<String>,
    pub attributes: Attributes,
    pub children: Vec<Node>,
    /// Written as `<pop:name ... />`.
    pub self_closing: bool,
    /// Span of the opening tag in the source.
    pub span: Span,
}

impl Tag {
    /// The dedicated handler for this tag, if it is a structural tag.
    ///
    /// Namespaced tags are never structural: `ext:include` is an ordinary
    /// lookup of `include` on the extension object.
    pub fn structural(&self) -> Option<StructuralTag> {
        if self.namespace.is_some() {
            return None;
        }
        StructuralTag::from_name(&self.name)
    }

    /// For `no_title` returns `Some("title")`.
    pub fn negated_name(&self) -> Option<&str> {
        self.name
            .strip_prefix(NEGATION_PREFIX)
            .filter(|rest| !rest.is_empty())
    }
}

/// Value of a tag attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeValue {
    /// Plain text, used as-is.
    Literal(String),
    /// Text containing tags; rendered against the tag's scope at render time.
    Nodes(Vec<Node>),
}

impl AttributeValue {
    /// The literal text, if this value contains no tags.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            AttributeValue::Literal(text) => Some(text),
            AttributeValue::Nodes(_) => None,
        }
    }
}

/// Ordered attribute list of a tag.
///
/// Most tags carry zero to three attributes, so storage is inline. Setting
/// an attribute that already exists replaces its value in place, keeping
/// the position of the first occurrence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(SmallVec<[(String, AttributeValue); 4]>);

impl Attributes {
    pub fn new() -> Self {
        Attributes(SmallVec::new())
    }

    /// Set `name` to `value`.
    pub fn insert(&mut self, name: String, value: AttributeValue) {
        if let Some(slot) = self.0.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Document { nodes }
    }

    /// Visit every tag in document order, including tags nested in children
    /// and in dynamic attribute values.
    pub fn walk_tags<'a>(&'a self, visit: &mut dyn FnMut(&'a Tag)) {
        walk_nodes(&self.nodes, visit);
    }

    /// Literal (statically known) names referenced by structural tags of
    /// kind `kind` through attribute `attribute`, in document order.
    ///
    /// Computed names (`template="<pop:which/>"`) are skipped.
    pub fn static_references(&self, kind: StructuralTag, attribute: &str) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk_tags(&mut |tag| {
            if tag.structural() == Some(kind) {
                if let Some(name) = tag.attributes.get(attribute).and_then(AttributeValue::as_literal) {
                    names.push(name);
                }
            }
        });
        names
    }
}

fn walk_nodes<'a>(nodes: &'a [Node], visit: &mut dyn FnMut(&'a Tag)) {
    for node in nodes {
        if let Node::Tag(tag) = node {
            visit(tag);
            for (_, value) in tag.attributes.iter() {
                if let AttributeValue::Nodes(inner) = value {
                    walk_nodes(inner, visit);
                }
            }
            walk_nodes(&tag.children, visit);
        }
    }
}
