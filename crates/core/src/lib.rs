//! rtf2rtf core library.
//!
//! Streaming RTF pretty-printer: puts one control word group or text run
//! on each line and decodes `\'xx` hex-escape runs from the document's
//! declared codepage into UTF-8 text. Input is read through a fixed-size
//! window, so documents of any length are formatted in bounded memory.
//!
//! The main entry points are [`format_stream`] for readers and writers and
//! [`format_bytes`] for in-memory input.

#![warn(missing_docs)]

/// Byte-to-Unicode converters and the service that opens them.
pub mod charset;
/// Active codepage tracking driven by control words.
pub mod codepage;
/// Formatting configuration.
pub mod config;
/// Hex-escape run decoding.
pub mod decode;
/// Fatal error types.
pub mod error;
/// RTF grammar: input buffer, tokenizer, emitter, and diagnostics.
pub mod grammar;
/// `\'xx` hex-escape encoding and decoding.
pub mod hex_escape;
/// Diagnostic sinks.
pub mod report;
/// Formatting session driver.
pub mod session;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Driver
pub use session::{FormatResult, Session, format_bytes, format_stream, format_stream_with_service};

// Configuration and errors
pub use config::{DEFAULT_PAGE_SIZE, FormatConfig};
pub use error::FormatError;

// Charsets
pub use charset::{Charset, CharsetError, Conversion, Converter, ConverterService, EncodingService};

// Diagnostics (re-exported from the diagnostics crate)
pub use grammar::diag::{Diagnostic, Severity, Span, codes};
pub use report::DiagnosticSink;
