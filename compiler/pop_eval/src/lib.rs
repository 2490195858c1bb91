//! Pop Eval - renders compiled pop templates against content.
//!
//! # Architecture
//!
//! - [`ContentValue`]: the closed variant every piece of host content is
//!   normalized into
//! - [`Scope`]: linked lookup frames; crawling to the parent implements
//!   "own properties first, then the enclosing context"
//! - [`render`]: walks a [`Document`](pop_ir::Document) against a root
//!   scope, with includes, extensions, layouts and filters supplied by a
//!   [`RenderEnv`]
//!
//! # Failure policy
//!
//! Absent content never fails a render. Missing values, missing includes,
//! missing extensions and broken `html` producers all render as nothing.
//! Only a [`RenderError`] (an include that does not compile, or runaway
//! nesting) aborts.

mod environment;
mod errors;
mod escape;
mod extension;
mod filter;
mod layout;
mod options;
mod renderer;
mod scope;
mod value;

pub use environment::{ReadFn, RenderEnv, RequireFn, DEFAULT_RECURSION_LIMIT};
pub use errors::{RecursionError, RenderError, ResolutionError, ResolutionKind};
pub use escape::escape_html;
pub use filter::{FilterFn, FilterPipeline};
pub use options::Options;
pub use renderer::{render, Enclosing, LAYOUT_PREFIX};
pub use scope::{Iteration, Scope, VALUE_BINDING};
pub use value::{format_number, Callable, CallableFn, ContentValue, HtmlFn, LookupFn, ObjectValue, Property};
