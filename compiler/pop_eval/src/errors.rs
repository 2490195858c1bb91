//! Render error types.
//!
//! Only two things abort a render: a template that fails to compile, and
//! nesting past the recursion limit. Everything else (missing content,
//! missing includes, layouts and extensions) degrades to empty output and
//! is reported through `tracing` as a [`ResolutionError`].

use std::fmt;

use pop_parse::CompileError;

/// A fatal render failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// An included template or layout did not compile.
    #[error("template `{template}` failed to compile: {source}")]
    Compile {
        template: String,
        #[source]
        source: CompileError,
    },
    #[error(transparent)]
    Recursion(#[from] RecursionError),
}

/// Nesting of tags and includes went deeper than the configured limit.
///
/// Typically a content graph with a cycle driving a self-including
/// template.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("render nesting exceeded the limit of {limit} levels")]
pub struct RecursionError {
    pub limit: usize,
}

/// What kind of external reference failed to resolve.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResolutionKind {
    Template,
    Layout,
    Extension,
}

impl fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResolutionKind::Template => "template",
            ResolutionKind::Layout => "layout",
            ResolutionKind::Extension => "extension",
        })
    }
}

/// A `read` or `require` callback returned nothing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} `{name}` could not be resolved")]
pub struct ResolutionError {
    pub kind: ResolutionKind,
    pub name: String,
}

impl ResolutionError {
    pub fn new(kind: ResolutionKind, name: impl Into<String>) -> Self {
        ResolutionError {
            kind,
            name: name.into(),
        }
    }
}
