//! Diagnostics for rtf2rtf.
//!
//! Every problem the formatter recovers from is reported as a
//! [`Diagnostic`]: one of the [`codes`], a message, and the [`Span`] of the
//! offending bytes in the input stream. None of them stop formatting.

#![warn(missing_docs)]

/// Diagnostic ID constants generated from the diagnostics table.
pub mod codes;

use std::fmt;

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// The input was repaired or kept in escaped form.
    Warn,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warn => f.write_str("warn"),
        }
    }
}

/// Byte span in the input stream.
///
/// Offsets are absolute positions in the stream, not in any one buffer
/// window, so they stay meaningful across refills.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first byte (0-based).
    pub start: usize,
    /// Byte offset one past the last byte.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Zero-width span at `pos`.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "byte {}", self.start)
        } else {
            write!(f, "bytes {}..{}", self.start, self.end)
        }
    }
}

/// A problem found while reformatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Diagnostic code, one of [`codes`] (e.g. `"RTF1001"`).
    pub id: &'static str,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Input bytes the diagnostic is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Diagnostic {
    /// Report `id` with `message` at `span`.
    pub fn for_code(id: &'static str, message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            id,
            severity: Severity::Warn,
            message: message.into(),
            span,
        }
    }

    /// Long description of this diagnostic's code, if known.
    pub fn explain(&self) -> Option<&'static str> {
        explain(self.id)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Long description of a diagnostic code, from `tables/diagnostics.jsonc`.
pub fn explain(id: &str) -> Option<&'static str> {
    include!(concat!(env!("OUT_DIR"), "/generated_explain.rs"))
}
