//! Rendering a resolved subject by variant.

use std::panic::{self, AssertUnwindSafe};

use pop_ir::Node;
use tracing::{trace, warn};

use super::{Enclosing, Renderer};
use crate::errors::RenderError;
use crate::escape::escape_html;
use crate::options::Options;
use crate::scope::Scope;
use crate::value::{Callable, ContentValue, ObjectValue};

impl Renderer<'_> {
    /// Render `subject` for a tag with `children`.
    pub(super) fn render_subject(
        &self,
        subject: ContentValue,
        children: &[Node],
        options: &Options,
        scope: &Scope,
    ) -> Result<String, RenderError> {
        match subject {
            ContentValue::Missing | ContentValue::Null => Ok(String::new()),
            ContentValue::Bool(flag) => {
                if children.is_empty() {
                    Ok(flag.to_string())
                } else if flag {
                    self.render_nodes(children, scope)
                } else {
                    Ok(String::new())
                }
            }
            ContentValue::String(_) | ContentValue::Number(_) => {
                if children.is_empty() {
                    Ok(text(&subject, options))
                } else {
                    self.render_nodes(children, &scope.child(subject))
                }
            }
            ContentValue::Callable(callable) => {
                let result = self.call(&callable, children, options, scope)?;
                match result {
                    // Children post-processed by the callable: already markup.
                    ContentValue::String(_) | ContentValue::Number(_) if !children.is_empty() => {
                        Ok(result.as_text().unwrap_or_default())
                    }
                    ContentValue::Callable(_) => {
                        trace!("callable returned a callable; rendering nothing");
                        Ok(String::new())
                    }
                    other => self.render_subject(other, children, options, scope),
                }
            }
            ContentValue::Array(items) => self.render_collection(&items, children, options, scope),
            ContentValue::Object(object) => {
                if children.is_empty() {
                    Ok(produce_html(&object, options))
                } else {
                    self.render_nodes(children, &scope.child(ContentValue::Object(object)))
                }
            }
        }
    }

    /// Invoke `callable` for a tag, surfacing any error raised while it
    /// rendered its children.
    pub(super) fn call(
        &self,
        callable: &Callable,
        children: &[Node],
        options: &Options,
        scope: &Scope,
    ) -> Result<ContentValue, RenderError> {
        let enclosing = Enclosing::new(self, children, scope);
        let value = callable.call(options, &enclosing, scope);
        if let Some(err) = self.pending.borrow_mut().take() {
            return Err(err);
        }
        Ok(value)
    }

    /// Replace a callable by its result; other values pass through.
    pub(super) fn resolve(
        &self,
        value: ContentValue,
        children: &[Node],
        options: &Options,
        scope: &Scope,
    ) -> Result<ContentValue, RenderError> {
        match value {
            ContentValue::Callable(callable) => self.call(&callable, children, options, scope),
            other => Ok(other),
        }
    }

    /// Default, filters, then the `wrap` element.
    pub(super) fn finish(&self, mut out: String, options: &Options) -> String {
        if out.is_empty() {
            if let Some(default) = options.get("default") {
                out = default.to_owned();
            }
        }
        if !self.env.filters().is_empty() {
            out = self.env.filters().apply(out, options);
        }
        if out.is_empty() {
            return out;
        }
        match options.get("wrap") {
            Some(element) => wrap(element, options.get("class"), &out),
            None => out,
        }
    }
}

/// Scalar text, escaped unless `escape="false"`.
fn text(value: &ContentValue, options: &Options) -> String {
    let raw = value.as_text().unwrap_or_default();
    if options.flag("escape") == Some(false) {
        raw
    } else {
        escape_html(&raw).into_owned()
    }
}

/// Call the object's `html` producer. A missing producer, a `None`
/// result, or a panic all render nothing.
fn produce_html(object: &ObjectValue, options: &Options) -> String {
    let Some(html) = object.html() else {
        return String::new();
    };
    match panic::catch_unwind(AssertUnwindSafe(|| html(options))) {
        Ok(produced) => produced.unwrap_or_default(),
        Err(_) => {
            warn!("html producer panicked; rendering nothing");
            String::new()
        }
    }
}

fn wrap(element: &str, class: Option<&str>, inner: &str) -> String {
    match class {
        Some(class) => format!(
            "<{element} class=\"{}\">{inner}</{element}>",
            escape_html(class)
        ),
        None => format!("<{element}>{inner}</{element}>"),
    }
}
