//! Formatting session: drives tokens from input to output.

use std::borrow::Cow;
use std::io::{Read, Write};

use crate::charset::{CharsetError, ConverterService, EncodingService};
use crate::codepage::{CodepageManager, is_codepage_switch};
use crate::config::FormatConfig;
use crate::decode::Decoder;
use crate::error::FormatError;
use crate::grammar::diag::{Diagnostic, Span, codes};
use crate::grammar::emit::OutputFormatter;
use crate::grammar::lexer::{Lexeme, Token, Tokenizer};
use crate::hex_escape::decode_hex_escape;
use crate::report::DiagnosticSink;

/// Output and diagnostics from [`format_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResult {
    /// Formatted RTF.
    pub output: Vec<u8>,
    /// Diagnostics in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
}

impl FormatResult {
    /// Output as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }
}

/// Reformat an in-memory document with the default converter service.
pub fn format_bytes(input: &[u8], config: &FormatConfig) -> Result<FormatResult, FormatError> {
    let mut diagnostics = Vec::new();
    let output = format_stream(input, Vec::new(), config, &mut diagnostics)?;
    Ok(FormatResult {
        output,
        diagnostics,
    })
}

/// Reformat `source` into `sink` with the default converter service.
///
/// Returns the sink once everything has been written and flushed.
pub fn format_stream<R: Read, W: Write>(
    source: R,
    sink: W,
    config: &FormatConfig,
    diagnostics: &mut dyn DiagnosticSink,
) -> Result<W, FormatError> {
    format_stream_with_service(source, sink, EncodingService, config, diagnostics)
}

/// Reformat `source` into `sink`, opening converters through `service`.
pub fn format_stream_with_service<R: Read, W: Write, S: ConverterService>(
    source: R,
    sink: W,
    service: S,
    config: &FormatConfig,
    diagnostics: &mut dyn DiagnosticSink,
) -> Result<W, FormatError> {
    Session::new(source, sink, service, config)?.run(diagnostics)
}

/// All state for one pass over one input stream.
pub struct Session<R, W: Write, S> {
    tokenizer: Tokenizer<R>,
    codepages: CodepageManager<S>,
    decoder: Decoder,
    out: OutputFormatter<W>,
}

impl<R: Read, W: Write, S: ConverterService> Session<R, W, S> {
    /// Set up a session; nothing is read or written yet.
    pub fn new(source: R, sink: W, service: S, config: &FormatConfig) -> Result<Self, FormatError> {
        config.validate()?;
        Ok(Self {
            tokenizer: Tokenizer::new(source, config.page_size),
            codepages: CodepageManager::new(service),
            decoder: Decoder::new(),
            out: OutputFormatter::new(sink),
        })
    }

    /// Format the whole stream, then terminate the last line and flush.
    ///
    /// A read error ends the input early and is reported as a diagnostic;
    /// only write failures are returned as errors.
    pub fn run(mut self, diagnostics: &mut dyn DiagnosticSink) -> Result<W, FormatError> {
        self.pump(diagnostics)?;
        if let Some(err) = self.tokenizer.take_read_error() {
            diagnostics.report(Diagnostic::for_code(
                codes::INPUT_READ_FAILED,
                format!("read failed: {err}"),
                Some(Span::empty(self.tokenizer.offset())),
            ));
        }
        Ok(self.out.finish()?)
    }

    fn pump(&mut self, diagnostics: &mut dyn DiagnosticSink) -> Result<(), FormatError> {
        let Self {
            tokenizer,
            codepages,
            decoder,
            out,
        } = self;

        while let Some(token) = tokenizer.next_token() {
            match token {
                Token::HexEscape(first) => {
                    let mut more = accept_hex(first, decoder, codepages, out, diagnostics)?;
                    while more {
                        tokenizer.skip_line_feeds();
                        let Some(lexeme) = tokenizer.take_hex_escape() else {
                            break;
                        };
                        more = accept_hex(lexeme, decoder, codepages, out, diagnostics)?;
                    }
                    if !decoder.is_empty() {
                        flush_run(decoder, codepages, out, diagnostics)?;
                    }
                }
                Token::Tag(lexeme) => {
                    if is_codepage_switch(lexeme.text) {
                        let charset = codepages.charset();
                        let in_header = !codepages.body_started();
                        if let Some(converter) = codepages.active_mut() {
                            decoder.flush(converter, charset, in_header, out, diagnostics)?;
                        }
                    }
                    if let Err(err) = codepages.on_tag(lexeme.text) {
                        diagnostics.report(charset_diagnostic(&err, lexeme.span));
                    }
                    out.tag(lexeme.text)?;
                }
                Token::Escaped(b'\n') => out.escaped_newline()?,
                Token::Escaped(b) => out.text(&[b'\\', b])?,
                Token::OpenBrace => out.open_brace()?,
                Token::CloseBrace => out.close_brace()?,
                Token::Newline => {}
                Token::Raw(b) => {
                    if !codepages.body_started() && out.state().expects_param() {
                        out.param(&[b])?;
                    } else {
                        out.text(&[b])?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Add one hex escape to the pending run.
///
/// Returns `false` when the escape was malformed: the run so far has been
/// flushed and the lexeme echoed as a tag, so the run ends here.
fn accept_hex<W: Write, S: ConverterService>(
    lexeme: Lexeme<'_>,
    decoder: &mut Decoder,
    codepages: &mut CodepageManager<S>,
    out: &mut OutputFormatter<W>,
    diagnostics: &mut dyn DiagnosticSink,
) -> Result<bool, FormatError> {
    if let Some(byte) = decode_hex_escape(lexeme.text) {
        decoder.push(byte, lexeme.span);
        return Ok(true);
    }
    if !decoder.is_empty() {
        flush_run(decoder, codepages, out, diagnostics)?;
    }
    diagnostics.report(Diagnostic::for_code(
        codes::MALFORMED_HEX_ESCAPE,
        format!("invalid hex escape: {}", String::from_utf8_lossy(lexeme.text)),
        Some(lexeme.span),
    ));
    out.tag(lexeme.text)?;
    Ok(false)
}

/// Convert and emit the pending run with the current converter.
fn flush_run<W: Write, S: ConverterService>(
    decoder: &mut Decoder,
    codepages: &mut CodepageManager<S>,
    out: &mut OutputFormatter<W>,
    diagnostics: &mut dyn DiagnosticSink,
) -> Result<(), FormatError> {
    let charset = codepages.charset();
    let in_header = !codepages.body_started();
    decoder.flush(codepages.converter_mut(), charset, in_header, out, diagnostics)?;
    Ok(())
}

fn charset_diagnostic(err: &CharsetError, span: Span) -> Diagnostic {
    let code = match err {
        CharsetError::MalformedTag { .. } => codes::MALFORMED_ANSICPG,
        CharsetError::Unsupported { .. } => codes::UNSUPPORTED_CODEPAGE,
    };
    Diagnostic::for_code(code, err.to_string(), Some(span))
}
