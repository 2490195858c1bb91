//! Tree evaluation.
//!
//! One [`Renderer`] lives for exactly one top-level render. It owns the
//! per-render state: the extension cache, compiled includes, the block
//! registry and the chosen layout. None of it outlives the call, so
//! concurrent renders of one compiled template never share anything
//! mutable.
//!
//! # Passes
//!
//! The entry document renders first. If it recorded a `layout`, the layout
//! template `layouts/NAME` then renders against the same root scope and
//! its output replaces the first pass; its `region` tags expand the blocks
//! captured during the first pass.
//!
//! # Errors
//!
//! Rendering is infallible except for two conditions: an include or
//! layout that fails to compile, and includes nested past the recursion
//! limit. Tag nesting within one template is bounded by its source and
//! only needs stack growth.
//! Host callables cannot return errors, so a failure inside
//! [`Enclosing::render`] is parked in `pending` and re-raised as soon as
//! the callable returns.

mod collection;
mod dispatch;
mod enclosing;
mod structural;

pub use enclosing::Enclosing;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pop_ir::{AttributeValue, Document, Node, Tag};
use pop_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::environment::RenderEnv;
use crate::errors::{RecursionError, RenderError, ResolutionError, ResolutionKind};
use crate::extension::ExtensionCache;
use crate::layout::BlockRegistry;
use crate::options::Options;
use crate::scope::Scope;
use crate::value::ContentValue;

use self::enclosing::ChildRenderer;

/// Directory layouts are read from.
pub const LAYOUT_PREFIX: &str = "layouts/";

pub(crate) struct Renderer<'env> {
    env: &'env RenderEnv,
    extensions: RefCell<ExtensionCache>,
    /// Included templates by name; `None` records a failed read.
    templates: RefCell<FxHashMap<String, Option<Rc<Document>>>>,
    blocks: RefCell<BlockRegistry>,
    layout: RefCell<Option<String>>,
    in_layout: Cell<bool>,
    depth: Cell<usize>,
    pending: RefCell<Option<RenderError>>,
}

/// Restores the include depth when an include finishes, including on unwind.
struct DepthGuard<'r> {
    depth: &'r Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

impl<'env> Renderer<'env> {
    pub(crate) fn new(env: &'env RenderEnv) -> Self {
        Renderer {
            env,
            extensions: RefCell::default(),
            templates: RefCell::default(),
            blocks: RefCell::default(),
            layout: RefCell::new(None),
            in_layout: Cell::new(false),
            depth: Cell::new(0),
            pending: RefCell::new(None),
        }
    }

    /// Render `doc` against `content`, then its layout if one was chosen.
    pub(crate) fn render_document(
        &self,
        doc: &Document,
        content: ContentValue,
    ) -> Result<String, RenderError> {
        let root = Scope::root(content);
        let body = self.render_nodes(&doc.nodes, &root)?;

        let Some(name) = self.layout.borrow_mut().take() else {
            return Ok(body);
        };
        let path = format!("{LAYOUT_PREFIX}{name}");
        let Some(layout) = self.load(&path, ResolutionKind::Layout)? else {
            return Ok(body);
        };
        trace!(layout = %path, "rendering layout");
        self.in_layout.set(true);
        self.render_nodes(&layout.nodes, &root)
    }

    fn enter(&self) -> Result<DepthGuard<'_>, RecursionError> {
        let depth = self.depth.get();
        let limit = self.env.recursion_limit();
        if depth >= limit {
            return Err(RecursionError { limit });
        }
        self.depth.set(depth + 1);
        Ok(DepthGuard { depth: &self.depth })
    }

    pub(crate) fn render_nodes(&self, nodes: &[Node], scope: &Scope) -> Result<String, RenderError> {
        let mut out = String::new();
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Tag(tag) => out.push_str(&self.render_tag(tag, scope)?),
            }
        }
        Ok(out)
    }

    fn render_tag(&self, tag: &Tag, scope: &Scope) -> Result<String, RenderError> {
        ensure_sufficient_stack(|| self.render_tag_inner(tag, scope))
    }

    fn render_tag_inner(&self, tag: &Tag, scope: &Scope) -> Result<String, RenderError> {
        trace!(tag = %tag.name, namespace = ?tag.namespace, "render tag");
        let options = self.resolve_options(tag, scope)?;

        if let Some(kind) = tag.structural() {
            return self.render_structural(kind, tag, &options, scope);
        }

        if let Some(name) = tag.negated_name() {
            let subject = self.lookup(tag, name, scope);
            let subject = self.resolve(subject, &tag.children, &options, scope)?;
            if subject.is_present() {
                return Ok(String::new());
            }
            let out = self.render_nodes(&tag.children, scope)?;
            return Ok(self.finish(out, &options));
        }

        let subject = self.lookup(tag, &tag.name, scope);
        let out = self.render_subject(subject, &tag.children, &options, scope)?;
        Ok(self.finish(out, &options))
    }

    /// Render dynamic attribute values against `scope`.
    fn resolve_options(&self, tag: &Tag, scope: &Scope) -> Result<Options, RenderError> {
        let mut options = Options::new();
        for (name, value) in tag.attributes.iter() {
            let text = match value {
                AttributeValue::Literal(text) => text.clone(),
                AttributeValue::Nodes(nodes) => self.render_nodes(nodes, scope)?,
            };
            options.insert(name, text);
        }
        Ok(options)
    }

    /// Resolve `name` for `tag`: through the extension for namespaced
    /// tags, through the scope chain otherwise.
    fn lookup(&self, tag: &Tag, name: &str, scope: &Scope) -> ContentValue {
        let Some(namespace) = &tag.namespace else {
            return scope.lookup(name);
        };
        let extension = self.extensions.borrow_mut().scope(self.env, namespace);
        extension.map_or(ContentValue::Missing, |root| root.lookup(name))
    }

    /// Fetch and compile template `name`, once per render.
    fn load(&self, name: &str, kind: ResolutionKind) -> Result<Option<Rc<Document>>, RenderError> {
        if let Some(cached) = self.templates.borrow().get(name) {
            return Ok(cached.clone());
        }
        let doc = match self.env.read(name) {
            Some(source) => {
                let doc = pop_parse::compile(&source).map_err(|source| RenderError::Compile {
                    template: name.to_owned(),
                    source,
                })?;
                Some(Rc::new(doc))
            }
            None => {
                let err = ResolutionError::new(kind, name);
                debug!(%err, "rendering nothing in its place");
                None
            }
        };
        self.templates
            .borrow_mut()
            .insert(name.to_owned(), doc.clone());
        Ok(doc)
    }
}

impl ChildRenderer for Renderer<'_> {
    fn render_children(&self, nodes: &[Node], scope: &Scope) -> String {
        if self.pending.borrow().is_some() {
            return String::new();
        }
        match self.render_nodes(nodes, scope) {
            Ok(out) => out,
            Err(err) => {
                *self.pending.borrow_mut() = Some(err);
                String::new()
            }
        }
    }
}

/// Render a compiled document against `content`.
///
/// Includes and layouts are fetched through `env`.
pub fn render(
    doc: &Document,
    content: impl Into<ContentValue>,
    env: &RenderEnv,
) -> Result<String, RenderError> {
    Renderer::new(env).render_document(doc, content.into())
}
