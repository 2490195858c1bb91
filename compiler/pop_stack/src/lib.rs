//! Stack growth for deep template recursion.
//!
//! Rendering recurses once per nested tag and once per include, and
//! self-including templates recurse as deep as the content they walk. The
//! renderer bounds that depth with an explicit limit; this crate makes sure
//! the native stack is never what gives out first.
//!
//! - **Native targets**: `stacker` grows the stack when the red zone is hit.
//! - **WASM targets**: passthrough (the engine manages its own stack).

/// Grow when less than this much stack remains (128KB).
///
/// A single tag render keeps several `String`s and a scope frame live, so
/// the red zone is a little larger than a pure expression evaluator needs.
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the
/// red zone.
///
/// ```text
/// fn render_tag(&self, tag: &Tag, scope: &Scope) -> Result<String, RenderError> {
///     ensure_sufficient_stack(|| self.render_tag_inner(tag, scope))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
