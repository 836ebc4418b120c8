//! Formatting utilities for list output.
//!
//! List commands print either a default table or the rendering of a
//! user supplied `--format` template; see [`crate::template`].

use crate::template::{Template, TABLE_DIRECTIVE};
use serde::Serialize;

/// Error types that can occur during formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    /// The template has no text and no placeholders
    #[error("the format template is empty")]
    EmptyTemplate,
    /// A placeholder names a field the row does not have
    #[error("unknown field '{0}' in format template")]
    UnknownField(String),
    /// A placeholder is neither a field reference nor a JSON function
    #[error("unsupported template expression '{{{{ {0} }}}}'")]
    UnsupportedTemplateExpression(String),

    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),
}

/// Data that can be printed by a list command.
pub trait Formattable {
    /// Template used when the caller does not supply one.
    const DEFAULT_TABLE_FORMAT: &'static str;

    /// The rows printed, one per line (or one per table row).
    type Row: Serialize;

    fn rows(&self) -> &[Self::Row];

    /// Render with the given template, or the default table when `format` is
    /// `None`, empty, or just the `table` directive.
    fn format(&self, format: Option<&str>) -> Result<String, FormattingError> {
        let source = match format {
            Some(f) if !f.trim().is_empty() && f.trim() != TABLE_DIRECTIVE => f,
            _ => Self::DEFAULT_TABLE_FORMAT,
        };
        Template::parse(source)?.render(self.rows())
    }
}
