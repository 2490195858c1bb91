//! Errors surfaced to template users.

use pop_eval::{RecursionError, RenderError, ResolutionError};
use pop_parse::CompileError;

/// Why a template could not be compiled or rendered.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// The template, or a layout or include it references, is malformed.
    #[error("template `{template}` failed to compile: {source}")]
    Compile {
        template: String,
        #[source]
        source: CompileError,
    },
    /// A name-based template whose source `read` could not supply.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Recursion(#[from] RecursionError),
    #[error("template has neither source text nor a name")]
    MissingSource,
}

impl TemplateError {
    /// The underlying compile error, if this is one.
    pub fn compile_error(&self) -> Option<&CompileError> {
        match self {
            TemplateError::Compile { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<RenderError> for TemplateError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Compile { template, source } => TemplateError::Compile { template, source },
            RenderError::Recursion(err) => TemplateError::Recursion(err),
        }
    }
}
