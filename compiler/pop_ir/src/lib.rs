//! Pop IR - the compiled representation of a pop template.
//!
//! A template compiles to a [`Document`]: an immutable list of [`Node`]s.
//! Literal text becomes [`Node::Text`]; every `<pop:...>` element becomes a
//! [`Tag`] carrying its name, optional extension namespace, attributes and
//! children.
//!
//! The tree is read-only once built. It is `Send + Sync` and may be rendered
//! any number of times, from any thread, against different content.
//!
//! # Attribute values
//!
//! An attribute value may itself contain tags (`name='<pop:the_layout/>'`),
//! so [`AttributeValue`] is either a literal string or a nested node list
//! that the evaluator renders lazily against the scope of the owning tag.

mod node;
mod span;
mod tag_name;

pub use node::{AttributeValue, Attributes, Document, Node, Tag};
pub use span::Span;
pub use tag_name::{StructuralTag, TagName, NEGATION_PREFIX, TAG_PREFIX};
