//! Poptags - `<pop:...>` tag templates.
//!
//! A template is markup with `<pop:...>` tags. Compiling it yields an
//! immutable node tree; rendering walks that tree against host content.
//!
//! ```text
//! let template = Template::new("<h1><pop:title/></h1>");
//! let html = template.render(json!({ "title": "Hello" }))?;
//! assert_eq!(html, "<h1>Hello</h1>");
//! ```
//!
//! Templates that include others, use layouts or pull values from
//! extensions are configured through [`TemplateBuilder`] with `read` and
//! `require` callbacks.

mod builder;
mod error;
mod template;

pub use builder::TemplateBuilder;
pub use error::TemplateError;
pub use template::{Template, INLINE_NAME};

pub use pop_eval::{
    Callable, ContentValue, Enclosing, FilterPipeline, Iteration, ObjectValue, Options, Property,
    RecursionError, RenderEnv, RenderError, ResolutionError, ResolutionKind, Scope,
    DEFAULT_RECURSION_LIMIT, LAYOUT_PREFIX,
};
pub use pop_ir::Document;
pub use pop_parse::{compile, CompileError, ErrorCode};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set,
/// e.g. `RUST_LOG=pop_eval=debug` to see missing includes and extensions.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // A host may already own the global subscriber.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
