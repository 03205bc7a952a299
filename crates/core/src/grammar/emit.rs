//! RTF emitter: decides line breaks and spacing for each emission.
//!
//! Layout is driven entirely by the kind of the previous emission: one
//! control word group per line, text runs on their own lines, braces
//! breaking lines around text. The decision is a pure function
//! ([`FormatState::transition`]); [`OutputFormatter`] applies it to a byte
//! sink.

use std::io::{self, BufWriter, Write};

// ── State machine ───────────────────────────────────────────────────────

/// Kind of the most recent emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatState {
    /// Nothing on the current line yet.
    #[default]
    Initial,
    /// Last emission was `{`.
    AfterOpenBrace,
    /// Last emission was `}`.
    AfterCloseBrace,
    /// Last emission was a control word or hex tag.
    AfterTag,
    /// Last emission was a control-word parameter byte.
    AfterParam,
    /// Last emission was document text.
    AfterText,
}

/// What is about to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// A control word or hex tag.
    Tag,
    /// Document text.
    Text,
    /// A control-word parameter byte; `semicolon` is true for `;`.
    Param {
        /// Whether the byte is `;`.
        semicolon: bool,
    },
    /// A structural `{`.
    OpenBrace,
    /// A structural `}`.
    CloseBrace,
}

/// Separator written before an emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// Nothing.
    None,
    /// A single space.
    Space,
    /// A line feed.
    Newline,
}

impl Separator {
    fn as_bytes(self) -> &'static [u8] {
        match self {
            Separator::None => b"",
            Separator::Space => b" ",
            Separator::Newline => b"\n",
        }
    }
}

impl FormatState {
    /// Separator to write before `emission`, and the state afterwards.
    ///
    /// `text_run_open` is true while the current text run has not been
    /// ended by a brace or a forced line break.
    pub fn transition(self, emission: Emission, text_run_open: bool) -> (Separator, FormatState) {
        use Emission as E;
        use FormatState as S;
        use Separator::{Newline, None, Space};

        let sep = match (self, emission) {
            (S::Initial, _) => None,

            (S::AfterTag, E::Tag) => Space,
            (S::AfterTag, E::Text) if text_run_open => Space,
            (S::AfterTag, E::Text) => Newline,
            (S::AfterTag, E::Param { semicolon: true }) => None,
            (S::AfterTag, E::Param { semicolon: false }) => Space,
            (S::AfterTag, E::OpenBrace | E::CloseBrace) => Newline,

            (S::AfterParam, E::OpenBrace | E::CloseBrace) => Newline,
            (S::AfterParam, _) => None,

            (S::AfterText, E::Tag | E::OpenBrace | E::CloseBrace) => Newline,
            (S::AfterText, _) => None,

            (S::AfterOpenBrace, E::Text) => Newline,
            (S::AfterOpenBrace, _) => None,

            (S::AfterCloseBrace, E::Tag | E::Text) => Newline,
            (S::AfterCloseBrace, _) => None,
        };

        let next = match emission {
            E::Tag => S::AfterTag,
            E::Text => S::AfterText,
            E::Param { .. } => S::AfterParam,
            E::OpenBrace => S::AfterOpenBrace,
            E::CloseBrace => S::AfterCloseBrace,
        };
        (sep, next)
    }

    /// Whether a raw byte here would continue a control word's parameter
    /// (before the document body starts).
    pub fn expects_param(self) -> bool {
        matches!(self, FormatState::AfterTag | FormatState::AfterParam)
    }
}

// ── Writer ──────────────────────────────────────────────────────────────

/// Applies [`FormatState::transition`] to a buffered byte sink.
pub struct OutputFormatter<W: Write> {
    out: BufWriter<W>,
    state: FormatState,
    text_run_open: bool,
}

impl<W: Write> OutputFormatter<W> {
    /// Wrap `sink`; nothing is written until the first emission.
    pub fn new(sink: W) -> Self {
        Self {
            out: BufWriter::new(sink),
            state: FormatState::Initial,
            text_run_open: false,
        }
    }

    /// Current state.
    pub fn state(&self) -> FormatState {
        self.state
    }

    /// Emit a control word or hex tag.
    pub fn tag(&mut self, tag: &[u8]) -> io::Result<()> {
        self.emit(Emission::Tag, tag)
    }

    /// Emit document text.
    pub fn text(&mut self, text: &[u8]) -> io::Result<()> {
        self.emit(Emission::Text, text)?;
        self.text_run_open = true;
        Ok(())
    }

    /// Emit control-word parameter bytes. Only the first byte decides the
    /// separator, so a multi-byte parameter lays out like its bytes sent
    /// one at a time.
    pub fn param(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.emit(
            Emission::Param {
                semicolon: bytes.first() == Some(&b';'),
            },
            bytes,
        )
    }

    /// Emit a structural `{`.
    pub fn open_brace(&mut self) -> io::Result<()> {
        self.emit(Emission::OpenBrace, b"{")?;
        self.text_run_open = false;
        Ok(())
    }

    /// Emit a structural `}`.
    pub fn close_brace(&mut self) -> io::Result<()> {
        self.emit(Emission::CloseBrace, b"}")?;
        self.text_run_open = false;
        Ok(())
    }

    /// Emit an escaped line feed: a literal `\` glued to the current line,
    /// then a forced line break.
    pub fn escaped_newline(&mut self) -> io::Result<()> {
        self.out.write_all(b"\\")?;
        self.state = FormatState::AfterText;
        self.line_break()
    }

    /// End the current line unless nothing has been written on it.
    pub fn line_break(&mut self) -> io::Result<()> {
        if self.state != FormatState::Initial {
            self.out.write_all(b"\n")?;
            self.state = FormatState::Initial;
        }
        self.text_run_open = false;
        Ok(())
    }

    /// Terminate the last line, flush, and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.line_break()?;
        self.out.into_inner().map_err(io::IntoInnerError::into_error)
    }

    fn emit(&mut self, emission: Emission, bytes: &[u8]) -> io::Result<()> {
        let (sep, next) = self.state.transition(emission, self.text_run_open);
        self.out.write_all(sep.as_bytes())?;
        self.out.write_all(bytes)?;
        self.state = next;
        Ok(())
    }
}
