pub use rtf2rtf_diagnostics::{Diagnostic, Severity, Span, codes};
