//! Block capture for layout regions.

use std::rc::Rc;

use pop_ir::Node;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::scope::Scope;

/// A `block`'s children together with the scope they were written in.
#[derive(Clone, Debug)]
pub(crate) struct CapturedBlock {
    pub(crate) nodes: Rc<[Node]>,
    pub(crate) scope: Scope,
}

/// Region name to captured block, filled during the entry pass and read
/// while rendering the layout.
#[derive(Default, Debug)]
pub(crate) struct BlockRegistry {
    blocks: FxHashMap<String, CapturedBlock>,
}

impl BlockRegistry {
    /// Register `block` for `region` unless one is already there.
    pub(crate) fn register(&mut self, region: String, block: CapturedBlock) {
        if self.blocks.contains_key(&region) {
            trace!(%region, "duplicate block ignored");
            return;
        }
        self.blocks.insert(region, block);
    }

    pub(crate) fn get(&self, region: &str) -> Option<&CapturedBlock> {
        self.blocks.get(region)
    }
}
