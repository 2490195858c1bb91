//! Host callbacks and per-template configuration shared by every render.

use std::fmt;
use std::sync::Arc;

use crate::filter::FilterPipeline;
use crate::value::ContentValue;

/// Fetch template source by logical name.
pub type ReadFn = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Fetch an extension's exported value by name.
pub type RequireFn = dyn Fn(&str) -> Option<ContentValue> + Send + Sync;

/// Default ceiling on nested include depth.
pub const DEFAULT_RECURSION_LIMIT: usize = 512;

/// Everything a render needs besides the tree and the content.
#[derive(Clone)]
pub struct RenderEnv {
    read: Option<Arc<ReadFn>>,
    require: Option<Arc<RequireFn>>,
    filters: FilterPipeline,
    recursion_limit: usize,
}

impl Default for RenderEnv {
    fn default() -> Self {
        RenderEnv {
            read: None,
            require: None,
            filters: FilterPipeline::new(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl RenderEnv {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_read(mut self, read: Arc<ReadFn>) -> Self {
        self.read = Some(read);
        self
    }

    #[must_use]
    pub fn with_require(mut self, require: Arc<RequireFn>) -> Self {
        self.require = Some(require);
        self
    }

    #[must_use]
    pub fn with_filters(mut self, filters: FilterPipeline) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// `read(name)`, or `None` when no reader is configured.
    pub fn read(&self, name: &str) -> Option<String> {
        self.read.as_ref().and_then(|read| read(name))
    }

    /// `require(name)`, or `None` when no resolver is configured.
    pub fn require(&self, name: &str) -> Option<ContentValue> {
        self.require.as_ref().and_then(|require| require(name))
    }

    pub fn filters(&self) -> &FilterPipeline {
        &self.filters
    }

    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }
}

impl fmt::Debug for RenderEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderEnv")
            .field("read", &self.read.is_some())
            .field("require", &self.require.is_some())
            .field("filters", &self.filters)
            .field("recursion_limit", &self.recursion_limit)
            .finish()
    }
}
