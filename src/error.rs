//! Error types for strict handle validation and catalog loading

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::handle::grammar::Lexeme;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Strict handle identifier failures.
///
/// Only the strict entry points (`str::parse::<HandleId>`, `HandleId::new`,
/// persisted edge validation) produce this; the lenient core operations
/// degrade to `None` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleIdError {
    #[error("invalid handle id at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("handle index must be between 1 and {max}, got {index}", max = crate::handle::MAX_INDEX)]
    IndexOutOfRange { index: u64 },
}

impl HandleIdError {
    pub(crate) fn syntax(span: Span, message: impl Into<String>, expected: &[&str]) -> Self {
        Self::Syntax {
            span,
            message: message.into(),
            expected: expected.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::Syntax { span, .. } => Some(span),
            Self::IndexOutOfRange { .. } => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (span, message, expected) = match self {
            HandleIdError::Syntax {
                span,
                message,
                expected,
            } => (span.clone(), message.clone(), expected.as_slice()),
            HandleIdError::IndexOutOfRange { .. } => (0..source.len(), self.to_string(), &[][..]),
        };

        let expected_str = if expected.is_empty() {
            String::new()
        } else {
            format!("\nExpected: {}", expected.join(", "))
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(format!("{}{}", message, expected_str))
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: {}", filename, self),
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, Lexeme>> for HandleIdError {
    fn from(err: chumsky::error::Rich<'a, Lexeme>) -> Self {
        use chumsky::error::RichPattern;

        let message = match err.found() {
            Some(Some(tok)) => format!("unexpected {}", tok),
            Some(None) => "unrecognized input".to_string(),
            None => "unexpected end of input".to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                RichPattern::Token(tok) => Some(format_lexeme(tok)),
                RichPattern::Label(label) => Some(label.to_string()),
                RichPattern::EndOfInput => Some("end of input".to_string()),
                _ => None,
            })
            .collect();

        HandleIdError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

fn format_lexeme(lexeme: &Lexeme) -> String {
    match lexeme {
        Some(tok) => tok.to_string(),
        None => "unrecognized input".to_string(),
    }
}

/// Errors that can occur when loading or parsing a handle catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse catalog TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A persisted edge carries a handle reference outside the grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field} '{value}': {source}")]
pub struct EdgeHandleError {
    pub field: &'static str,
    pub value: String,
    #[source]
    pub source: HandleIdError,
}
