//! Per-render cache of resolved extensions.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::environment::RenderEnv;
use crate::errors::{ResolutionError, ResolutionKind};
use crate::scope::Scope;
use crate::value::ContentValue;

/// Extensions resolved so far, keyed by namespace.
///
/// Misses are cached too, so `require` runs at most once per name per render.
#[derive(Default)]
pub(crate) struct ExtensionCache {
    resolved: FxHashMap<String, Option<ContentValue>>,
}

impl ExtensionCache {
    /// The root scope for tags in namespace `name`, or `None` if the host
    /// does not know the extension.
    pub(crate) fn scope(&mut self, env: &RenderEnv, name: &str) -> Option<Scope> {
        let value = self
            .resolved
            .entry(name.to_owned())
            .or_insert_with(|| {
                let value = env.require(name);
                if value.is_none() {
                    let err = ResolutionError::new(ResolutionKind::Extension, name);
                    debug!(%err, "extension renders empty");
                }
                value
            })
            .clone()?;
        Some(Scope::root(value))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::value::ObjectValue;

    #[test]
    fn require_runs_once_per_name() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let env = RenderEnv::new().with_require(Arc::new(move |name: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            (name == "ext").then(|| ContentValue::from(ObjectValue::new().with_field("title", "x")))
        }));
        let mut cache = ExtensionCache::default();

        assert!(cache.scope(&env, "ext").is_some());
        assert!(cache.scope(&env, "ext").is_some());
        assert!(cache.scope(&env, "missing").is_none());
        assert!(cache.scope(&env, "missing").is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
