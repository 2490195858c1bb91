//! `TemplateBuilder` for configuring templates.

use std::sync::Arc;

use pop_eval::{ContentValue, FilterPipeline, Options, RenderEnv, DEFAULT_RECURSION_LIMIT};

use crate::template::Template;

/// Builder for [`Template`].
///
/// A template takes its source either literally ([`template`](Self::template))
/// or by name through `read` ([`name`](Self::name)). When both are given the
/// literal source wins and the name is only used in messages.
pub struct TemplateBuilder {
    source: Option<String>,
    name: Option<String>,
    env: RenderEnv,
    filters: FilterPipeline,
    recursion_limit: usize,
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self {
            source: None,
            name: None,
            env: RenderEnv::new(),
            filters: FilterPipeline::new(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Use `source` as the template text.
    #[must_use]
    pub fn template(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the logical name. Without literal source, the text is fetched
    /// with `read(name)`.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Source for includes, layouts and named templates. `None` means
    /// not found.
    #[must_use]
    pub fn read(mut self, read: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        self.env = self.env.with_read(Arc::new(read));
        self
    }

    /// Source for extension namespaces (`<pop:ext:title/>`).
    #[must_use]
    pub fn require(
        mut self,
        require: impl Fn(&str) -> Option<ContentValue> + Send + Sync + 'static,
    ) -> Self {
        self.env = self.env.with_require(Arc::new(require));
        self
    }

    /// Register a filter run on tags carrying `attribute`.
    ///
    /// Filters run in registration order after the value is rendered and
    /// before it is wrapped. Returning `None` leaves the value unchanged.
    #[must_use]
    pub fn filter(
        mut self,
        attribute: impl Into<String>,
        filter: impl Fn(&str, &Options) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.filters.push(attribute, filter);
        self
    }

    /// Maximum nesting of tags and includes within one render.
    ///
    /// Default is [`DEFAULT_RECURSION_LIMIT`].
    #[must_use]
    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn build(self) -> Template {
        let env = self
            .env
            .with_filters(self.filters)
            .with_recursion_limit(self.recursion_limit);
        Template::from_parts(self.source, self.name, env)
    }
}
