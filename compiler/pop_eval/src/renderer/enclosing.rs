//! The `enclosing` handle passed to host callables.

use std::fmt;

use pop_ir::Node;

use crate::scope::Scope;

/// Renders a tag's children on demand.
pub(crate) trait ChildRenderer {
    fn render_children(&self, nodes: &[Node], scope: &Scope) -> String;
}

/// The children of the tag a callable was invoked for.
///
/// A callable may ignore them (a computed value) or render them and
/// post-process the output (a filter).
pub struct Enclosing<'a> {
    renderer: &'a dyn ChildRenderer,
    nodes: &'a [Node],
    scope: &'a Scope,
}

impl<'a> Enclosing<'a> {
    pub(crate) fn new(renderer: &'a dyn ChildRenderer, nodes: &'a [Node], scope: &'a Scope) -> Self {
        Enclosing {
            renderer,
            nodes,
            scope,
        }
    }

    /// Render the children against the tag's own scope.
    pub fn render(&self) -> String {
        self.renderer.render_children(self.nodes, self.scope)
    }

    /// Render the children against `scope`, typically a child of the
    /// callable's scope carrying a computed value.
    pub fn render_in(&self, scope: &Scope) -> String {
        self.renderer.render_children(self.nodes, scope)
    }

    /// True for self-closing tags.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl fmt::Debug for Enclosing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enclosing")
            .field("nodes", &self.nodes.len())
            .field("scope", self.scope)
            .finish_non_exhaustive()
    }
}
