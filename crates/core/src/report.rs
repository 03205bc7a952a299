//! Where recoverable problems go.

use crate::grammar::diag::Diagnostic;

/// Receives diagnostics as soon as they are found.
///
/// Reporting never stops the stream: every condition that produces a
/// diagnostic has already been recovered from.
pub trait DiagnosticSink {
    /// Accept one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
