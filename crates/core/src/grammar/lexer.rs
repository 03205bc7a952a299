use std::io::{self, Read};

use super::diag::Span;
use super::input::InputBuffer;

/// A control word or hex escape, borrowed from the tokenizer's scratch
/// buffer. Valid until the next token is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    /// The lexeme bytes, leading backslash included, absorbed blank excluded.
    pub text: &'a [u8],
    /// Position of `text` in the input stream.
    pub span: Span,
}

/// One RTF token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `\'` followed by name-class bytes (two hex digits when well formed).
    HexEscape(Lexeme<'a>),
    /// A control word: `\` followed by name-class bytes.
    Tag(Lexeme<'a>),
    /// `\` followed by one byte that starts neither a tag nor a hex escape.
    Escaped(u8),
    /// A structural `{`.
    OpenBrace,
    /// A structural `}`.
    CloseBrace,
    /// A bare line feed.
    Newline,
    /// Any other single byte.
    Raw(u8),
}

/// Whether `b` may appear in a control word name.
pub fn is_name_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-'
}

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\n'
}

/// Lazy, streaming RTF tokenizer.
///
/// Every probe re-checks lookahead through the [`InputBuffer`] before
/// deciding, so the token sequence does not depend on where refills fall.
/// Names are capped at one page; the excess is left in the stream.
pub struct Tokenizer<R> {
    input: InputBuffer<R>,
    scratch: Vec<u8>,
}

impl<R: Read> Tokenizer<R> {
    /// Create a tokenizer reading `source` through a window of `2 * page` bytes.
    pub fn new(source: R, page: usize) -> Self {
        let input = InputBuffer::new(source, page);
        let scratch = Vec::with_capacity(input.page());
        Self { input, scratch }
    }

    /// Recognize and consume the next token, or `None` at end of stream.
    ///
    /// Probes run in priority order: hex escape, control word, escaped
    /// character, single byte.
    pub fn next_token(&mut self) -> Option<Token<'_>> {
        if !self.input.ensure_available() {
            return None;
        }
        if let Some(span) = self.scan_hex_escape() {
            return Some(Token::HexEscape(self.lexeme(span)));
        }
        if let Some(span) = self.scan_tag() {
            return Some(Token::Tag(self.lexeme(span)));
        }
        if let Some(b) = self.scan_escaped() {
            return Some(Token::Escaped(b));
        }
        let b = self.input.peek(0)?;
        self.input.consume(1);
        Some(match b {
            b'{' => Token::OpenBrace,
            b'}' => Token::CloseBrace,
            b'\n' => Token::Newline,
            other => Token::Raw(other),
        })
    }

    /// Consume a hex escape if one starts at the cursor.
    ///
    /// Used to extend a run of consecutive escapes without going through
    /// the other probes.
    pub fn take_hex_escape(&mut self) -> Option<Lexeme<'_>> {
        let span = self.scan_hex_escape()?;
        Some(self.lexeme(span))
    }

    /// Drop bare line feeds at the cursor.
    ///
    /// They produce no output, so escapes separated only by line feeds
    /// belong to the same run.
    pub fn skip_line_feeds(&mut self) {
        while self.input.ensure_available() && self.input.peek(0) == Some(b'\n') {
            self.input.consume(1);
        }
    }

    /// Absolute stream offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.input.offset()
    }

    /// Take the I/O error that ended the input early, if any.
    pub fn take_read_error(&mut self) -> Option<io::Error> {
        self.input.take_read_error()
    }

    fn lexeme(&self, span: Span) -> Lexeme<'_> {
        Lexeme {
            text: &self.scratch,
            span,
        }
    }

    fn scan_hex_escape(&mut self) -> Option<Span> {
        if !(self.input.ensure(2)
            && self.input.peek(0) == Some(b'\\')
            && self.input.peek(1) == Some(b'\''))
        {
            return None;
        }
        Some(self.scan_named(2))
    }

    fn scan_tag(&mut self) -> Option<Span> {
        if !(self.input.ensure(2)
            && self.input.peek(0) == Some(b'\\')
            && self.input.peek(1).is_some_and(is_name_byte))
        {
            return None;
        }
        Some(self.scan_named(2))
    }

    fn scan_escaped(&mut self) -> Option<u8> {
        if !(self.input.ensure(2) && self.input.peek(0) == Some(b'\\')) {
            return None;
        }
        let b = self.input.peek(1)?;
        self.input.consume(2);
        Some(b)
    }

    /// Copy a `head`-byte introducer plus the name that follows it into
    /// scratch, then absorb one trailing blank.
    fn scan_named(&mut self, head: usize) -> Span {
        let start = self.input.offset();
        self.scratch.clear();
        for i in 0..head {
            if let Some(b) = self.input.peek(i) {
                self.scratch.push(b);
            }
        }
        self.input.consume(head);

        let page = self.input.page();
        while self.scratch.len() < page && self.input.ensure_available() {
            match self.input.peek(0) {
                Some(b) if is_name_byte(b) => {
                    self.scratch.push(b);
                    self.input.consume(1);
                }
                _ => break,
            }
        }
        let end = self.input.offset();

        if self.input.ensure_available() && self.input.peek(0).is_some_and(is_blank) {
            self.input.consume(1);
        }
        Span::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Owned mirror of [`Token`] so whole streams can be compared.
    #[derive(Debug, PartialEq, Eq)]
    enum Tok {
        Hex(String),
        Tag(String),
        Esc(u8),
        Open,
        Close,
        Nl,
        Raw(u8),
    }

    fn lex(input: &[u8], page: usize) -> Vec<Tok> {
        let mut tokenizer = Tokenizer::new(input, page);
        let mut out = Vec::new();
        while let Some(tok) = tokenizer.next_token() {
            out.push(match tok {
                Token::HexEscape(l) => Tok::Hex(String::from_utf8_lossy(l.text).into_owned()),
                Token::Tag(l) => Tok::Tag(String::from_utf8_lossy(l.text).into_owned()),
                Token::Escaped(b) => Tok::Esc(b),
                Token::OpenBrace => Tok::Open,
                Token::CloseBrace => Tok::Close,
                Token::Newline => Tok::Nl,
                Token::Raw(b) => Tok::Raw(b),
            });
        }
        out
    }

    fn tag(s: &str) -> Tok {
        Tok::Tag(s.to_string())
    }

    fn hex(s: &str) -> Tok {
        Tok::Hex(s.to_string())
    }

    #[test]
    fn control_words_and_braces() {
        assert_eq!(
            lex(br"{\rtf1\ansi}", 4096),
            vec![Tok::Open, tag(r"\rtf1"), tag(r"\ansi"), Tok::Close]
        );
    }

    #[test]
    fn trailing_blank_is_absorbed_once() {
        assert_eq!(
            lex(b"\\b  x\\i\ny", 4096),
            vec![
                tag(r"\b"),
                Tok::Raw(b' '),
                Tok::Raw(b'x'),
                tag(r"\i"),
                Tok::Raw(b'y'),
            ]
        );
    }

    #[test]
    fn hex_escape_takes_priority_over_escaped_char() {
        assert_eq!(
            lex(br"\'e9\'41 x", 4096),
            vec![hex(r"\'e9"), hex(r"\'41"), Tok::Raw(b'x')]
        );
    }

    #[test]
    fn hex_escape_is_greedy_over_name_bytes() {
        assert_eq!(lex(br"\'e9t", 4096), vec![hex(r"\'e9t")]);
        assert_eq!(lex(br"\'zg", 4096), vec![hex(r"\'zg")]);
    }

    #[test]
    fn uppercase_hex_is_not_part_of_the_escape() {
        assert_eq!(
            lex(br"\'E9", 4096),
            vec![hex(r"\'"), Tok::Raw(b'E'), Tok::Raw(b'9')]
        );
    }

    #[test]
    fn escaped_symbols() {
        assert_eq!(
            lex(b"\\{\\}\\\\\\\n\\A", 4096),
            vec![
                Tok::Esc(b'{'),
                Tok::Esc(b'}'),
                Tok::Esc(b'\\'),
                Tok::Esc(b'\n'),
                Tok::Esc(b'A'),
            ]
        );
    }

    #[test]
    fn lone_backslash_at_end_is_raw() {
        assert_eq!(lex(b"ab\\", 4096), vec![Tok::Raw(b'a'), Tok::Raw(b'b'), Tok::Raw(b'\\')]);
    }

    #[test]
    fn bare_newline_token() {
        assert_eq!(lex(b"a\nb", 4096), vec![Tok::Raw(b'a'), Tok::Nl, Tok::Raw(b'b')]);
    }

    #[test]
    fn names_truncate_at_page_size() {
        assert_eq!(
            lex(br"\abcdefg", 4),
            vec![tag(r"\abc"), Tok::Raw(b'd'), Tok::Raw(b'e'), Tok::Raw(b'f'), Tok::Raw(b'g')]
        );
        assert_eq!(
            lex(br"\'e9ab", 4),
            vec![hex(r"\'e9"), Tok::Raw(b'a'), Tok::Raw(b'b')]
        );
    }

    #[test]
    fn truncation_is_deterministic() {
        let input = br"\abcdefghij \'0123 x";
        assert_eq!(lex(input, 5), lex(input, 5));
        assert_eq!(lex(input, 5)[0], tag(r"\abcd"));
    }

    #[test]
    fn tokens_straddle_refills() {
        let input = br"{\rtf1\ansicpg1252\pard Caf\'e9\'e8 \{x\}}";
        let reference = lex(input, 4096);
        for page in [16, 17, 19, 23] {
            assert_eq!(lex(input, page), reference, "page size {page}");
        }
    }

    #[test]
    fn spans_are_absolute_and_exclude_blank() {
        let data = b"0123456789\\pard x\\'e9";
        let mut tokenizer = Tokenizer::new(&data[..], 8);
        let mut spans = Vec::new();
        while let Some(tok) = tokenizer.next_token() {
            if let Token::Tag(l) | Token::HexEscape(l) = tok {
                spans.push(l.span);
            }
        }
        assert_eq!(spans, vec![Span::new(10, 15), Span::new(17, 21)]);
    }

    #[test]
    fn take_hex_escape_only_matches_escapes() {
        let mut tokenizer = Tokenizer::new(&br"\'41\par"[..], 4096);
        assert_eq!(tokenizer.take_hex_escape().map(|l| l.text.to_vec()), Some(br"\'41".to_vec()));
        assert!(tokenizer.take_hex_escape().is_none());
        assert!(matches!(tokenizer.next_token(), Some(Token::Tag(l)) if l.text == br"\par"));
        assert!(tokenizer.next_token().is_none());
    }

    #[test]
    fn skip_line_feeds_stops_at_other_bytes() {
        let mut tokenizer = Tokenizer::new(&b"\n\n\\'41\n x"[..], 4);
        tokenizer.skip_line_feeds();
        assert_eq!(tokenizer.offset(), 2);
        assert!(tokenizer.take_hex_escape().is_some());
        tokenizer.skip_line_feeds();
        assert!(matches!(tokenizer.next_token(), Some(Token::Raw(b' '))));
    }
}
