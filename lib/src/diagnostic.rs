use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::error::Error;

/// A problem found while compiling a document that was recovered from.
///
/// Compilation never fails. Instead, anything surprising enough to be worth
/// reporting is recorded as a `Diagnostic` on the compiled template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Byte range in the raw document text the diagnostic refers to.
    pub span: Option<Range<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// The header region could not be parsed and was treated as body text.
    MalformedHeader,
    /// A block was never closed and was written back out as text.
    UnclosedBlock,
}

impl Diagnostic {
    pub(crate) fn malformed_header(error: &Error, span: Range<usize>) -> Self {
        let detail = error.to_string()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("; ");

        Diagnostic {
            kind: DiagnosticKind::MalformedHeader,
            message: format!("header ignored: {detail}"),
            span: Some(span),
        }
    }

    pub(crate) fn unclosed_block(marker: &str, span: Range<usize>) -> Self {
        Diagnostic {
            kind: DiagnosticKind::UnclosedBlock,
            message: format!("block `{marker}` is never closed and was kept as text"),
            span: Some(span),
        }
    }

    /// Moves the span forward by `offset` bytes.
    pub(crate) fn shifted(mut self, offset: usize) -> Self {
        self.span = self.span.map(|span| (span.start + offset)..(span.end + offset));
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some(span) => write!(f, "{} (at {}..{})", self.message, span.start, span.end),
            None => self.message.fmt(f),
        }
    }
}
