//! Compiled-on-demand templates.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use pop_eval::{ContentValue, RenderEnv, ResolutionError, ResolutionKind, LAYOUT_PREFIX};
use pop_ir::{Document, StructuralTag};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::builder::TemplateBuilder;
use crate::error::TemplateError;

/// Name reported for templates built from literal source without a name.
pub const INLINE_NAME: &str = "(inline)";

/// A template and its configuration.
///
/// Construction never fails: the source is compiled on the first
/// [`compile`](Self::compile) or [`render`](Self::render) and the tree is
/// reused afterwards. A `Template` is `Send + Sync`; one instance can
/// serve renders on any number of threads.
pub struct Template {
    source: Option<String>,
    name: Option<String>,
    env: RenderEnv,
    compiled: RwLock<Option<Arc<Document>>>,
}

impl Template {
    /// A template over literal `source` with no callbacks.
    pub fn new(source: impl Into<String>) -> Self {
        TemplateBuilder::new().template(source).build()
    }

    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::new()
    }

    pub(crate) fn from_parts(source: Option<String>, name: Option<String>, env: RenderEnv) -> Self {
        Template {
            source,
            name,
            env,
            compiled: RwLock::new(None),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Compile the template and validate what it statically references.
    ///
    /// Layouts and includes named by literal attributes are fetched and
    /// compiled too, each name once. References `read` cannot supply are
    /// skipped; only malformed ones fail.
    pub fn compile(&self) -> Result<(), TemplateError> {
        let entry = self.document()?;

        let mut seen: FxHashSet<String> = self.name.iter().cloned().collect();
        let mut pending = vec![entry];
        while let Some(doc) = pending.pop() {
            for name in references(&doc) {
                if !seen.insert(name.clone()) {
                    continue;
                }
                let Some(source) = self.env.read(&name) else {
                    debug!(template = %name, "referenced template not found; skipped");
                    continue;
                };
                let nested = pop_parse::compile(&source).map_err(|source| TemplateError::Compile {
                    template: name.clone(),
                    source,
                })?;
                trace!(template = %name, "validated referenced template");
                pending.push(Arc::new(nested));
            }
        }
        Ok(())
    }

    /// Render against `content`, compiling first if needed.
    pub fn render(&self, content: impl Into<ContentValue>) -> Result<String, TemplateError> {
        let doc = self.document()?;
        Ok(pop_eval::render(&doc, content, &self.env)?)
    }

    /// The compiled entry document.
    fn document(&self) -> Result<Arc<Document>, TemplateError> {
        if let Some(doc) = self.compiled.read().as_ref() {
            return Ok(Arc::clone(doc));
        }
        let source = self.entry_source()?;
        let doc = pop_parse::compile(&source).map_err(|source| TemplateError::Compile {
            template: self.display_name().to_owned(),
            source,
        })?;
        let doc = Arc::new(doc);
        // Two threads may both compile; the trees are identical.
        *self.compiled.write() = Some(Arc::clone(&doc));
        Ok(doc)
    }

    fn entry_source(&self) -> Result<Cow<'_, str>, TemplateError> {
        if let Some(source) = &self.source {
            return Ok(Cow::Borrowed(source));
        }
        let Some(name) = &self.name else {
            return Err(TemplateError::MissingSource);
        };
        self.env
            .read(name)
            .map(Cow::Owned)
            .ok_or_else(|| ResolutionError::new(ResolutionKind::Template, name.as_str()).into())
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(INLINE_NAME)
    }
}

/// Statically named layouts (as `layouts/NAME`) and includes of `doc`.
fn references(doc: &Document) -> Vec<String> {
    let layouts = doc
        .static_references(StructuralTag::Layout, "name")
        .into_iter()
        .map(|name| format!("{LAYOUT_PREFIX}{name}"));
    let includes = doc
        .static_references(StructuralTag::Include, "template")
        .into_iter()
        .map(str::to_owned);
    layouts.chain(includes).collect()
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.display_name())
            .field("compiled", &self.compiled.read().is_some())
            .field("env", &self.env)
            .finish()
    }
}
