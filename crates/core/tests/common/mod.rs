//! Shared test helpers for `rtf2rtf_core` integration tests.

#![allow(unreachable_pub)]

use std::io::{self, Read};

use rtf2rtf_core::{Diagnostic, FormatConfig, format_stream};

/// Source that hands out at most `step` bytes per read.
pub struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl<'a> Trickle<'a> {
    pub fn new(data: &'a [u8], step: usize) -> Self {
        Self { data, step }
    }
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Format `input` with the default configuration.
#[allow(dead_code)]
pub fn format_str(input: &[u8]) -> (String, Vec<Diagnostic>) {
    format_with(input, FormatConfig::default().page_size, usize::MAX)
}

/// Format `input` with the given page size, reading `step` bytes at a time.
#[allow(dead_code)]
pub fn format_with(input: &[u8], page: usize, step: usize) -> (String, Vec<Diagnostic>) {
    let config = FormatConfig::with_page_size(page)
        .unwrap_or_else(|e| panic!("page size {page}: {e}"));
    let mut diagnostics = Vec::new();
    let out = format_stream(Trickle::new(input, step), Vec::new(), &config, &mut diagnostics)
        .unwrap_or_else(|e| panic!("format failed: {e}"));
    let text = String::from_utf8(out).unwrap_or_else(|e| panic!("output is not UTF-8: {e}"));
    (text, diagnostics)
}

/// Diagnostic codes, in order.
#[allow(dead_code)]
pub fn codes_of(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(|d| d.id.to_string()).collect()
}
