//! Lexical lookup context for rendering.
//!
//! A [`Scope`] is one frame of a singly linked chain: a content value, a
//! few extra bindings, and a parent. Frames are immutable and shared, so
//! pushing a child is one allocation and captured scopes (blocks, enclosing
//! thunks) stay valid for as long as anyone holds them.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::value::{ContentValue, Property};

/// Name bound to the current element inside a repetition.
pub const VALUE_BINDING: &str = "value";

/// Position of the current element within its repetition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Iteration {
    pub index: usize,
    pub len: usize,
}

impl Iteration {
    pub fn is_first(self) -> bool {
        self.index == 0
    }

    pub fn is_last(self) -> bool {
        self.index + 1 == self.len
    }
}

struct Frame {
    value: ContentValue,
    parent: Option<Scope>,
    bindings: SmallVec<[(String, ContentValue); 1]>,
    iteration: Option<Iteration>,
}

/// A lookup context chaining a content value to its parent context.
#[derive(Clone)]
pub struct Scope(Rc<Frame>);

impl Scope {
    /// The outermost scope of a render.
    pub fn root(value: ContentValue) -> Self {
        Scope(Rc::new(Frame {
            value,
            parent: None,
            bindings: SmallVec::new(),
            iteration: None,
        }))
    }

    /// A nested scope whose value is `value`.
    #[must_use]
    pub fn child(&self, value: ContentValue) -> Self {
        Scope(Rc::new(Frame {
            value,
            parent: Some(self.clone()),
            bindings: SmallVec::new(),
            iteration: None,
        }))
    }

    /// The scope for element `iteration.index` of a repetition.
    ///
    /// Scalar elements have no properties of their own, so they are also
    /// bound as `value`.
    #[must_use]
    pub fn iteration_child(&self, element: ContentValue, iteration: Iteration) -> Self {
        let mut bindings = SmallVec::new();
        if element.is_scalar() {
            bindings.push((VALUE_BINDING.to_owned(), element.clone()));
        }
        Scope(Rc::new(Frame {
            value: element,
            parent: Some(self.clone()),
            bindings,
            iteration: Some(iteration),
        }))
    }

    /// This frame's value.
    pub fn value(&self) -> &ContentValue {
        &self.0.value
    }

    pub fn parent(&self) -> Option<&Scope> {
        self.0.parent.as_ref()
    }

    /// Resolve `name`: extra bindings, then the value's own properties,
    /// then the parent, up to the root.
    ///
    /// A name the value only inherits stops the crawl as [`ContentValue::Missing`].
    pub fn lookup(&self, name: &str) -> ContentValue {
        let mut scope = Some(self);
        while let Some(current) = scope {
            let frame = &current.0;
            if let Some((_, value)) = frame.bindings.iter().find(|(n, _)| n == name) {
                return value.clone();
            }
            match frame.value.property(name) {
                Property::Found(value) => return value,
                Property::Shadowed => return ContentValue::Missing,
                Property::Absent => {}
            }
            scope = frame.parent.as_ref();
        }
        ContentValue::Missing
    }

    /// The innermost repetition this scope is inside, if any.
    pub fn iteration(&self) -> Option<Iteration> {
        self.frames().find_map(|scope| scope.0.iteration)
    }

    /// Whether the innermost repetition around this scope is a
    /// `repeat="false"` body, which has no current element.
    pub fn in_collection_body(&self) -> bool {
        self.frames()
            .find(|scope| {
                scope.0.iteration.is_some() || matches!(scope.0.value, ContentValue::Array(_))
            })
            .is_some_and(|scope| scope.0.iteration.is_none())
    }

    /// The innermost array rendered once with `repeat="false"`.
    pub fn nearest_collection(&self) -> Option<Arc<[ContentValue]>> {
        self.frames().find_map(|scope| match &scope.0.value {
            ContentValue::Array(items) if scope.0.iteration.is_none() => Some(Arc::clone(items)),
            _ => None,
        })
    }

    /// Number of frames from here to the root, inclusive.
    pub fn depth(&self) -> usize {
        self.frames().count()
    }

    fn frames(&self) -> impl Iterator<Item = &Scope> {
        std::iter::successors(Some(self), |scope| scope.parent())
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("value", &self.0.value.kind())
            .field("iteration", &self.0.iteration)
            .field("depth", &self.depth())
            .finish()
    }
}
