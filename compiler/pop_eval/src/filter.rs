//! Attribute-keyed output filters.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::options::Options;

/// `fn(current, options) -> replacement`; `None` keeps the current value.
pub type FilterFn = dyn Fn(&str, &Options) -> Option<String> + Send + Sync;

/// Ordered filters, each triggered by the presence of one attribute.
#[derive(Clone, Default)]
pub struct FilterPipeline {
    filters: Vec<(String, Arc<FilterFn>)>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter run whenever a tag carries `attribute`.
    pub fn push(
        &mut self,
        attribute: impl Into<String>,
        filter: impl Fn(&str, &Options) -> Option<String> + Send + Sync + 'static,
    ) {
        self.filters.push((attribute.into(), Arc::new(filter)));
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every filter whose attribute is present, in registration order.
    pub fn apply(&self, value: String, options: &Options) -> String {
        self.filters
            .iter()
            .filter(|(attribute, _)| options.contains(attribute))
            .fold(value, |current, (attribute, filter)| {
                match filter(&current, options) {
                    Some(replaced) => {
                        trace!(%attribute, "filter replaced value");
                        replaced
                    }
                    None => current,
                }
            })
    }
}

impl fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.filters.iter().map(|(attribute, _)| attribute))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pipeline() -> FilterPipeline {
        let mut filters = FilterPipeline::new();
        filters.push("format", |value, options| {
            (options.get("format") == Some("uppercase")).then(|| value.to_uppercase())
        });
        filters.push("suffix", |value, options| {
            options.get("suffix").map(|suffix| format!("{value}{suffix}"))
        });
        filters
    }

    #[test]
    fn runs_only_present_filters_in_order() {
        let options = Options::new().with("suffix", "!").with("format", "uppercase");
        assert_eq!(pipeline().apply("hi".into(), &options), "HI!");
    }

    #[test]
    fn none_keeps_value() {
        let options = Options::new().with("format", "lowercase");
        assert_eq!(pipeline().apply("Hi".into(), &options), "Hi");
    }

    #[test]
    fn absent_attributes_skip_filters() {
        assert_eq!(pipeline().apply("Hi".into(), &Options::new()), "Hi");
    }
}
