//! Pop Parse - builds the node tree for a pop template.
//!
//! The parser consumes the token stream from `pop_lexer` and maintains a
//! stack of open tags. Each closing tag must match the innermost open tag
//! by its raw name; anything left open at end of input is an error.
//!
//! Two pieces of sugar are resolved here so the evaluator never sees them:
//!
//! - dotted names nest: `<pop:content.title/>` compiles exactly like
//!   `<pop:content><pop:title/></pop:content>`; attributes and children
//!   belong to the innermost tag
//! - attribute values containing tags are compiled into node lists
//!
//! Comments come through as text, so nothing inside them is a tag.

mod error;

pub use error::{CompileError, ErrorCode};

use pop_ir::{AttributeValue, Attributes, Document, Node, Span, Tag, TagName, TAG_PREFIX};
use pop_lexer::{Lexer, OpenTag, RawAttribute, TokenKind};
use pop_stack::ensure_sufficient_stack;
use tracing::trace;

/// Compile template source into a [`Document`].
pub fn compile(source: &str) -> Result<Document, CompileError> {
    let nodes = Parser::new(source).parse_range(0..source.len())?;
    trace!(nodes = nodes.len(), "compiled template");
    Ok(Document::new(nodes))
}

/// A tag whose closing tag has not been seen yet.
struct OpenFrame {
    /// Name as written, for matching the closing tag.
    raw_name: String,
    name: TagName,
    attributes: Attributes,
    span: Span,
    children: Vec<Node>,
}

struct Parser<'src> {
    source: &'src str,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> Self {
        Parser { source }
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>, span: Span) -> CompileError {
        CompileError::new(code, message, span, self.source)
    }

    /// Parse `source[range]` into a node list.
    fn parse_range(&self, range: std::ops::Range<usize>) -> Result<Vec<Node>, CompileError> {
        let mut root: Vec<Node> = Vec::new();
        let mut stack: Vec<OpenFrame> = Vec::new();

        for token in Lexer::with_range(self.source, range) {
            let token = token.map_err(|err| CompileError::from_lex(err, self.source))?;
            let siblings = match stack.last_mut() {
                Some(frame) => &mut frame.children,
                None => &mut root,
            };
            match token.kind {
                TokenKind::Text(text) | TokenKind::Comment(text) => push_text(siblings, text),
                TokenKind::TagOpen(open) => {
                    let name = self.tag_name(open.name, token.span)?;
                    let attributes = self.compile_attributes(&open)?;
                    if open.self_closing {
                        siblings.push(build_tag(name, attributes, Vec::new(), true, token.span));
                    } else {
                        stack.push(OpenFrame {
                            raw_name: open.name.to_owned(),
                            name,
                            attributes,
                            span: token.span,
                            children: Vec::new(),
                        });
                    }
                }
                TokenKind::TagClose { name } => {
                    let Some(frame) = stack.pop() else {
                        return Err(self.error(
                            ErrorCode::E1005,
                            format!("closing tag `{TAG_PREFIX}{name}` has no opening tag"),
                            token.span,
                        ));
                    };
                    if frame.raw_name != name {
                        return Err(self.error(
                            ErrorCode::E1004,
                            format!(
                                "expected `</{TAG_PREFIX}{}>` but found `</{TAG_PREFIX}{name}>`",
                                frame.raw_name
                            ),
                            token.span,
                        ));
                    }
                    let node = build_tag(frame.name, frame.attributes, frame.children, false, frame.span);
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None => root.push(node),
                    }
                }
            }
        }

        if let Some(frame) = stack.pop() {
            return Err(self.error(
                ErrorCode::E1003,
                format!("`{TAG_PREFIX}{}` is never closed", frame.raw_name),
                frame.span,
            ));
        }
        Ok(root)
    }

    fn tag_name(&self, raw: &str, span: Span) -> Result<TagName, CompileError> {
        TagName::parse(raw).ok_or_else(|| {
            self.error(
                ErrorCode::E1006,
                format!("`{raw}` is not a valid tag name"),
                span,
            )
        })
    }

    fn compile_attributes(&self, open: &OpenTag<'_>) -> Result<Attributes, CompileError> {
        let mut attributes = Attributes::new();
        for raw in &open.attributes {
            let value = self.compile_attribute_value(raw)?;
            attributes.insert(raw.name.to_owned(), value);
        }
        Ok(attributes)
    }

    /// Values mentioning tags compile into nodes, evaluated at render time.
    fn compile_attribute_value(&self, raw: &RawAttribute<'_>) -> Result<AttributeValue, CompileError> {
        if !raw.value.contains("<pop:") && !raw.value.contains("</pop:") {
            return Ok(AttributeValue::Literal(raw.value.to_owned()));
        }
        let nodes = ensure_sufficient_stack(|| self.parse_range(raw.value_span.range()))?;
        Ok(AttributeValue::Nodes(nodes))
    }
}

/// Append text, merging with a preceding text node.
fn push_text(siblings: &mut Vec<Node>, text: &str) {
    if let Some(Node::Text(prev)) = siblings.last_mut() {
        prev.push_str(text);
    } else {
        siblings.push(Node::Text(text.to_owned()));
    }
}

/// Build the node for a (possibly dotted) tag name.
///
/// `a.b.c` becomes `a > b > c`: the namespace stays on the outermost tag,
/// attributes, children and self-closing-ness go to the innermost one.
fn build_tag(
    name: TagName,
    attributes: Attributes,
    children: Vec<Node>,
    self_closing: bool,
    span: Span,
) -> Node {
    let TagName {
        namespace,
        mut segments,
    } = name;
    let innermost_name = segments.pop().unwrap_or_default();
    let depth = segments.len();

    let mut node = Tag {
        name: innermost_name,
        namespace: if depth == 0 { namespace.clone() } else { None },
        attributes,
        children,
        self_closing,
        span,
    };
    for (index, segment) in segments.into_iter().enumerate().rev() {
        node = Tag {
            name: segment,
            namespace: if index == 0 { namespace.clone() } else { None },
            attributes: Attributes::new(),
            children: vec![Node::Tag(node)],
            self_closing: false,
            span,
        };
    }
    Node::Tag(node)
}

#[cfg(test)]
mod tests;
