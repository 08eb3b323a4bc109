//! Error types for the generator.
//!
//! Every error is fatal: generation stops at the first one and no output is
//! written. Degraded validator clauses are not errors; they are logged and
//! skipped.

use proc_macro2::Span;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generator operations.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Error raised while scanning definitions or rendering output.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The definition source is not valid Rust.
    #[error("Syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// A routing payload could not be decoded.
    #[error("Malformed annotation on `{item}` at line {line}: {message}")]
    MalformedAnnotation {
        item: String,
        line: usize,
        message: String,
    },

    /// A validated field has a type the generator cannot read from a request.
    #[error("Unsupported type `{type_name}` for field `{owner}.{field}` at line {line}")]
    UnsupportedType {
        owner: String,
        field: String,
        type_name: String,
        line: usize,
    },

    /// An annotation sits on a declaration that cannot carry it.
    #[error("Unsupported item `{item}` at line {line}: {message}")]
    UnsupportedItem {
        item: String,
        line: usize,
        message: String,
    },

    /// The generated token stream is not a valid Rust file.
    #[error("Failed to render generated code: {message}")]
    Render { message: String },

    /// Reading the definition file or writing the output failed.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CodegenError {
    /// Create a syntax error from a `syn` parse failure.
    pub fn syntax(err: &syn::Error) -> Self {
        let start = err.span().start();
        Self::Syntax {
            line: start.line,
            column: start.column + 1,
            message: err.to_string(),
        }
    }

    /// Create a malformed annotation error.
    pub fn malformed(item: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self::MalformedAnnotation {
            item: item.into(),
            line: line_of(span),
            message: message.into(),
        }
    }

    /// Create an unsupported type error.
    pub fn unsupported_type(
        owner: impl Into<String>,
        field: impl Into<String>,
        type_name: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::UnsupportedType {
            owner: owner.into(),
            field: field.into(),
            type_name: type_name.into(),
            line: line_of(span),
        }
    }

    /// Create an unsupported item error.
    pub fn unsupported_item(item: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self::UnsupportedItem {
            item: item.into(),
            line: line_of(span),
            message: message.into(),
        }
    }

    /// Create a render error.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Create an IO error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Source line the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. }
            | Self::MalformedAnnotation { line, .. }
            | Self::UnsupportedType { line, .. }
            | Self::UnsupportedItem { line, .. } => Some(*line),
            Self::Render { .. } | Self::Io { .. } => None,
        }
    }
}

/// 1-indexed line of a span in the parsed definition source.
pub(crate) fn line_of(span: Span) -> usize {
    span.start().line
}
