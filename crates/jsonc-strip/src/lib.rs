//! JSONC comment stripping for the diagnostics table.
//!
//! The diagnostics build script keeps its table in JSONC so entries can be
//! annotated. This crate removes `//` line comments and `/* */` block
//! comments while leaving string literals (escapes included) untouched.
//! Line comments keep their terminating newline so `serde_json` error
//! positions still line up with the source file.

#![warn(missing_docs)]

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    Str,
    StrEscape,
    LineComment,
    BlockComment,
}

/// Strip `//` and `/* */` comments from JSONC input.
///
/// An unterminated block comment swallows the rest of the input.
#[must_use]
pub fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut mode = Mode::Code;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        mode = match mode {
            Mode::Code => match (c, chars.peek()) {
                ('/', Some('/')) => {
                    chars.next();
                    Mode::LineComment
                }
                ('/', Some('*')) => {
                    chars.next();
                    Mode::BlockComment
                }
                _ => {
                    out.push(c);
                    if c == '"' { Mode::Str } else { Mode::Code }
                }
            },
            Mode::Str => {
                out.push(c);
                match c {
                    '\\' => Mode::StrEscape,
                    '"' => Mode::Code,
                    _ => Mode::Str,
                }
            }
            Mode::StrEscape => {
                out.push(c);
                Mode::Str
            }
            Mode::LineComment => {
                if c == '\n' {
                    out.push(c);
                    Mode::Code
                } else {
                    Mode::LineComment
                }
            }
            Mode::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    Mode::Code
                } else {
                    Mode::BlockComment
                }
            }
        };
    }
    out
}
