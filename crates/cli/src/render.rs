//! Diagnostic rendering on stderr.
//!
//! Diagnostics are printed as soon as they are reported, interleaved with
//! output progress, either as one human-readable line each or as one JSON
//! object per line.

use anyhow::{Result, bail};
use rtf2rtf_core::DiagnosticSink;
use rtf2rtf_diagnostics::Diagnostic;

// ── Output format ───────────────────────────────────────────────────────

/// Output format for diagnostic rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Format {
    /// One line per diagnostic plus a count summary.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl Format {
    /// Parse the value of the diagnostics format variable. Unset means
    /// [`Format::Pretty`].
    pub(crate) fn from_setting(value: Option<&str>) -> Result<Self> {
        match value {
            None | Some("pretty") => Ok(Format::Pretty),
            Some("json") => Ok(Format::Json),
            Some(other) => bail!("invalid diagnostics format '{other}' (expected pretty or json)"),
        }
    }
}

// ── Reporter ────────────────────────────────────────────────────────────

/// Writes each diagnostic to stderr as it arrives and counts them.
#[derive(Debug, Default)]
pub(crate) struct StderrReporter {
    format: Format,
    warnings: usize,
}

impl StderrReporter {
    pub(crate) fn new(format: Format) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Print the count summary (pretty format only, and only when something
    /// was reported).
    pub(crate) fn finish(&self) {
        if self.format == Format::Pretty
            && let Some(summary) = summary(self.warnings)
        {
            eprintln!("rtf2rtf: {summary}");
        }
    }
}

impl DiagnosticSink for StderrReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.warnings += 1;
        match self.format {
            Format::Pretty => eprintln!("rtf2rtf: {}", pretty_line(&diagnostic)),
            Format::Json => match serde_json::to_string(&diagnostic) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("rtf2rtf: {}", pretty_line(&diagnostic)),
            },
        }
    }
}

fn pretty_line(diag: &Diagnostic) -> String {
    match diag.span {
        Some(span) => format!("{diag} ({span})"),
        None => diag.to_string(),
    }
}

/// Count summary, e.g. `2 warnings`.
fn summary(warnings: usize) -> Option<String> {
    match warnings {
        0 => None,
        1 => Some("1 warning".to_owned()),
        n => Some(format!("{n} warnings")),
    }
}
