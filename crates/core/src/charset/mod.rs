//! Byte-to-Unicode conversion for hex-escape runs.
//!
//! A [`ConverterService`] opens a [`Converter`] for a [`Charset`]. The
//! default service, [`EncodingService`], is backed by `encoding_rs`; the
//! 7-bit ASCII charset is always handled by the built-in
//! [`AsciiConverter`].

mod ascii;
mod encoding;

pub use ascii::AsciiConverter;
pub use encoding::{EncodingConverter, EncodingService, encoding_for_codepage};

use std::fmt;

/// Source character set of hex-escaped bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// 7-bit ASCII, active until the document declares a codepage.
    #[default]
    Ascii,
    /// A numbered codepage from `\ansicpg<N>`.
    Codepage(u32),
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Charset::Ascii => write!(f, "ASCII"),
            Charset::Codepage(n) => write!(f, "cp{n}"),
        }
    }
}

/// Codepage failures, before they are turned into diagnostics.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharsetError {
    /// No converter exists for the named charset.
    #[error("unsupported charset: {name}")]
    Unsupported {
        /// Charset name, `cp<N>` or the raw digits when they overflow.
        name: String,
    },
    /// `\ansicpg` followed by something other than decimal digits.
    #[error("invalid tag: {tag}")]
    MalformedTag {
        /// The whole tag as it appeared in the input.
        tag: String,
    },
}

/// Outcome of one [`Converter::convert`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// All of `src` was converted.
    Complete,
    /// `src[offset]` cannot be converted. Everything before it has been
    /// appended to the output and the converter has been reset.
    Unconvertible {
        /// Index of the rejected byte within `src`.
        offset: usize,
    },
}

/// A stateful byte-to-UTF-8 converter.
pub trait Converter {
    /// Convert `src`, appending the decoded text to `dst`.
    ///
    /// With `last` set, `src` ends the input: incomplete trailing
    /// sequences are reported as unconvertible and the converter is left
    /// ready for a fresh run.
    fn convert(&mut self, src: &[u8], dst: &mut String, last: bool) -> Conversion;
}

/// Opens converters by charset.
pub trait ConverterService {
    /// Open a converter from `charset` to UTF-8.
    fn open(&self, charset: Charset) -> Result<Box<dyn Converter>, CharsetError>;
}
