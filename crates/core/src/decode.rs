//! Hex-escape run decoding.
//!
//! Consecutive `\'xx` escapes are collected into one run and converted in
//! a single call, so multi-byte characters split across escapes decode
//! correctly. Bytes the converter rejects are kept as `\'xx` tags.

use std::io::{self, Write};

use crate::charset::{Charset, Conversion, Converter};
use crate::grammar::diag::{Diagnostic, Span, codes};
use crate::grammar::emit::OutputFormatter;
use crate::hex_escape::encode_hex_escape;
use crate::report::DiagnosticSink;

/// Accumulates one run of hex-escaped bytes.
#[derive(Debug, Default)]
pub struct Decoder {
    run: Vec<u8>,
    spans: Vec<Span>,
    decoded: String,
}

impl Decoder {
    /// Empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no bytes are pending.
    pub fn is_empty(&self) -> bool {
        self.run.is_empty()
    }

    /// Append one decoded escape and the span of its lexeme.
    pub fn push(&mut self, byte: u8, span: Span) {
        self.run.push(byte);
        self.spans.push(span);
    }

    /// Convert the pending run and emit it, leaving the decoder empty.
    ///
    /// The whole run goes to `converter` in one finalizing call. When a
    /// byte is rejected, the text before it is emitted, the byte becomes a
    /// `\'xx` tag, and conversion resumes after it. An empty run still
    /// finalizes the converter once.
    ///
    /// In the header (`in_header`), text that lands where a control word
    /// parameter is expected is emitted as parameter bytes, the same way
    /// the raw UTF-8 would be laid out when read back.
    pub fn flush<W: Write>(
        &mut self,
        converter: &mut dyn Converter,
        charset: Charset,
        in_header: bool,
        out: &mut OutputFormatter<W>,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> io::Result<()> {
        let mut pos = 0;
        loop {
            self.decoded.clear();
            let rest = self.run.get(pos..).unwrap_or_default();
            let result = converter.convert(rest, &mut self.decoded, true);
            emit_decoded(&self.decoded, in_header, out)?;

            let Conversion::Unconvertible { offset } = result else {
                break;
            };
            let at = pos + offset;
            let Some(&byte) = self.run.get(at) else {
                break;
            };
            out.tag(&encode_hex_escape(byte))?;
            diagnostics.report(Diagnostic::for_code(
                codes::UNCONVERTIBLE_BYTE,
                format!("cannot convert byte 0x{byte:02x} from {charset}"),
                self.spans.get(at).copied(),
            ));
            pos = at + 1;
        }
        self.run.clear();
        self.spans.clear();
        Ok(())
    }
}

/// Emit decoded text, turning control characters into `\'xx` tags.
fn emit_decoded<W: Write>(
    text: &str,
    in_header: bool,
    out: &mut OutputFormatter<W>,
) -> io::Result<()> {
    let mut rest = text;
    while !rest.is_empty() {
        let split = rest.find(|c: char| c < ' ').unwrap_or(rest.len());
        let (plain, tail) = rest.split_at(split);
        if !plain.is_empty() {
            if in_header && out.state().expects_param() {
                out.param(plain.as_bytes())?;
            } else {
                out.text(plain.as_bytes())?;
            }
        }
        let mut chars = tail.chars();
        if let Some(c) = chars.next() {
            out.tag(&encode_hex_escape(c as u8))?;
        }
        rest = chars.as_str();
    }
    Ok(())
}
