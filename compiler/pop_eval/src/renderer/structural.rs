//! Handlers for the reserved tags.

use std::rc::Rc;

use pop_ir::{StructuralTag, Tag};
use tracing::debug;

use super::Renderer;
use crate::errors::{RenderError, ResolutionKind};
use crate::layout::CapturedBlock;
use crate::options::Options;
use crate::scope::{Iteration, Scope, VALUE_BINDING};

impl Renderer<'_> {
    pub(super) fn render_structural(
        &self,
        kind: StructuralTag,
        tag: &Tag,
        options: &Options,
        scope: &Scope,
    ) -> Result<String, RenderError> {
        match kind {
            StructuralTag::First => self.render_marker(tag, scope, Iteration::is_first),
            StructuralTag::Last => self.render_marker(tag, scope, Iteration::is_last),
            StructuralTag::Value => self.render_value(tag, options, scope),
            StructuralTag::Values => self.render_values(tag, options, scope),
            StructuralTag::Include => {
                let out = self.render_include(options, scope)?;
                Ok(self.finish(out, options))
            }
            StructuralTag::Layout => {
                self.choose_layout(options);
                Ok(String::new())
            }
            StructuralTag::Block => {
                self.capture_block(tag, options, scope);
                Ok(String::new())
            }
            StructuralTag::Region => {
                let out = self.render_region(tag, options, scope)?;
                Ok(self.finish(out, options))
            }
        }
    }

    /// `first`/`last`: children only at the matching position of the
    /// nearest repetition.
    fn render_marker(
        &self,
        tag: &Tag,
        scope: &Scope,
        at: fn(Iteration) -> bool,
    ) -> Result<String, RenderError> {
        match scope.iteration() {
            Some(iteration) if at(iteration) => self.render_nodes(&tag.children, scope),
            _ => Ok(String::new()),
        }
    }

    /// `value`: the current element. A `repeat="false"` body has no
    /// current element, even when an outer repetition does.
    fn render_value(&self, tag: &Tag, options: &Options, scope: &Scope) -> Result<String, RenderError> {
        if scope.in_collection_body() {
            return Ok(String::new());
        }
        let subject = scope.lookup(VALUE_BINDING);
        let out = self.render_subject(subject, &tag.children, options, scope)?;
        Ok(self.finish(out, options))
    }

    /// `values`: the array of the enclosing `repeat="false"` body.
    fn render_values(&self, tag: &Tag, options: &Options, scope: &Scope) -> Result<String, RenderError> {
        let Some(items) = scope.nearest_collection() else {
            return Ok(String::new());
        };
        let out = self.render_collection(&items, &tag.children, options, scope)?;
        Ok(self.finish(out, options))
    }

    /// `include`: another template, rendered against the current scope.
    ///
    /// Each include counts one level against the recursion limit.
    fn render_include(&self, options: &Options, scope: &Scope) -> Result<String, RenderError> {
        let Some(name) = options.get("template").filter(|name| !name.is_empty()) else {
            debug!("include without a template name");
            return Ok(String::new());
        };
        let Some(doc) = self.load(name, ResolutionKind::Template)? else {
            return Ok(String::new());
        };
        let _guard = self.enter()?;
        self.render_nodes(&doc.nodes, scope)
    }

    /// `layout`: the first one outside the layout pass wins.
    fn choose_layout(&self, options: &Options) {
        if self.in_layout.get() {
            return;
        }
        let Some(name) = options.get("name").filter(|name| !name.is_empty()) else {
            debug!("layout without a name");
            return;
        };
        let mut layout = self.layout.borrow_mut();
        if layout.is_none() {
            *layout = Some(name.to_owned());
        }
    }

    fn capture_block(&self, tag: &Tag, options: &Options, scope: &Scope) {
        let Some(region) = options.get("region") else {
            debug!("block without a region name");
            return;
        };
        let block = CapturedBlock {
            nodes: Rc::from(tag.children.as_slice()),
            scope: scope.clone(),
        };
        self.blocks.borrow_mut().register(region.to_owned(), block);
    }

    /// `region`: the captured block, or the region's own children.
    fn render_region(&self, tag: &Tag, options: &Options, scope: &Scope) -> Result<String, RenderError> {
        let captured = options
            .get("name")
            .and_then(|name| self.blocks.borrow().get(name).cloned());
        match captured {
            Some(block) => self.render_nodes(&block.nodes, &block.scope),
            None => self.render_nodes(&tag.children, scope),
        }
    }
}
