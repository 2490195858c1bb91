//! Repetition over arrays: slicing, per-element scopes and separators.

use std::sync::Arc;

use pop_ir::Node;

use super::Renderer;
use crate::errors::RenderError;
use crate::escape::{is_container_element, is_void_element};
use crate::options::Options;
use crate::scope::{Iteration, Scope};
use crate::value::ContentValue;

impl Renderer<'_> {
    /// Render an array subject.
    ///
    /// With `repeat="false"` the children render once against the array
    /// itself; otherwise once per element, joined per `break` and `last`.
    /// An empty array renders nothing at all.
    pub(super) fn render_collection(
        &self,
        items: &Arc<[ContentValue]>,
        children: &[Node],
        options: &Options,
        scope: &Scope,
    ) -> Result<String, RenderError> {
        let items = window(items, options);
        if items.is_empty() {
            return Ok(String::new());
        }
        if options.flag("repeat") == Some(false) && !children.is_empty() {
            return self.render_nodes(children, &scope.child(ContentValue::Array(items)));
        }

        let len = items.len();
        let mut parts = Vec::with_capacity(len);
        for (index, element) in items.iter().enumerate() {
            let element = self.resolve(element.clone(), children, options, scope)?;
            let part = if children.is_empty() {
                self.render_subject(element, children, options, scope)?
            } else {
                let iteration = Iteration { index, len };
                self.render_nodes(children, &scope.iteration_child(element, iteration))?
            };
            parts.push(part);
        }
        Ok(join(parts, options))
    }
}

/// Apply `skip` then `limit`.
fn window(items: &Arc<[ContentValue]>, options: &Options) -> Arc<[ContentValue]> {
    let skip = options.count("skip").unwrap_or(0);
    let limit = options.count("limit");
    if skip == 0 && limit.map_or(true, |limit| limit >= items.len()) {
        return Arc::clone(items);
    }
    items
        .iter()
        .skip(skip)
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

/// Join repetitions.
///
/// `break` naming a container element wraps each part in it, a void
/// element goes between parts as `<br />`, anything else is a literal
/// separator. `last` replaces the separator before the final part.
fn join(parts: Vec<String>, options: &Options) -> String {
    let (element, separator) = match options.get("break") {
        Some(name) if is_container_element(name) => (Some(name), String::new()),
        Some(name) if is_void_element(name) => (None, format!("<{name} />")),
        Some(literal) => (None, literal.to_owned()),
        None => (None, String::new()),
    };
    let last = options.get("last");
    let count = parts.len();

    let mut out = String::new();
    for (index, part) in parts.into_iter().enumerate() {
        if index > 0 {
            match last {
                Some(last) if index + 1 == count => out.push_str(last),
                _ => out.push_str(&separator),
            }
        }
        match element {
            Some(element) => {
                out.push('<');
                out.push_str(element);
                out.push('>');
                out.push_str(&part);
                out.push_str("</");
                out.push_str(element);
                out.push('>');
            }
            None => out.push_str(&part),
        }
    }
    out
}
