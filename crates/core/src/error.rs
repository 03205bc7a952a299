//! Fatal errors for a formatting session.

use std::io;

/// Errors that stop a formatting session.
///
/// Problems in the input itself are never fatal; they are reported through
/// a [`DiagnosticSink`](crate::DiagnosticSink) instead.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Writing formatted output failed.
    #[error("write failed: {0}")]
    Write(#[from] io::Error),

    /// The configured page size cannot hold a complete hex escape.
    #[error("page size {size} is below the minimum of {min}")]
    PageTooSmall {
        /// The rejected page size.
        size: usize,
        /// Smallest accepted page size.
        min: usize,
    },
}
