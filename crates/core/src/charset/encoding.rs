use encoding_rs::{Decoder, DecoderResult, Encoding};

use super::{AsciiConverter, Charset, CharsetError, Conversion, Converter, ConverterService};

/// ASCII under its Windows codepage number.
const CP_ASCII: u32 = 20127;

/// Map a Windows codepage number to an `encoding_rs` encoding.
///
/// Numbers missing from the table are retried as the labels `cp<N>` and
/// `windows-<N>`. Returns `None` for 20127, which is served by
/// [`AsciiConverter`] instead.
pub fn encoding_for_codepage(cp: u32) -> Option<&'static Encoding> {
    let known = match cp {
        866 => encoding_rs::IBM866,
        874 => encoding_rs::WINDOWS_874,
        932 => encoding_rs::SHIFT_JIS,
        936 => encoding_rs::GBK,
        949 => encoding_rs::EUC_KR,
        950 => encoding_rs::BIG5,
        1200 => encoding_rs::UTF_16LE,
        1201 => encoding_rs::UTF_16BE,
        1250 => encoding_rs::WINDOWS_1250,
        1251 => encoding_rs::WINDOWS_1251,
        1252 | 28591 => encoding_rs::WINDOWS_1252,
        1253 => encoding_rs::WINDOWS_1253,
        1254 => encoding_rs::WINDOWS_1254,
        1255 => encoding_rs::WINDOWS_1255,
        1256 => encoding_rs::WINDOWS_1256,
        1257 => encoding_rs::WINDOWS_1257,
        1258 => encoding_rs::WINDOWS_1258,
        10000 => encoding_rs::MACINTOSH,
        10007 => encoding_rs::X_MAC_CYRILLIC,
        20866 => encoding_rs::KOI8_R,
        21866 => encoding_rs::KOI8_U,
        20932 | 51932 => encoding_rs::EUC_JP,
        50220..=50222 => encoding_rs::ISO_2022_JP,
        54936 => encoding_rs::GB18030,
        28592 => encoding_rs::ISO_8859_2,
        28593 => encoding_rs::ISO_8859_3,
        28594 => encoding_rs::ISO_8859_4,
        28595 => encoding_rs::ISO_8859_5,
        28596 => encoding_rs::ISO_8859_6,
        28597 => encoding_rs::ISO_8859_7,
        28598 => encoding_rs::ISO_8859_8,
        28603 => encoding_rs::ISO_8859_13,
        28605 => encoding_rs::ISO_8859_15,
        38598 => encoding_rs::ISO_8859_8_I,
        65001 => encoding_rs::UTF_8,
        CP_ASCII => return None,
        _ => return by_label(cp),
    };
    Some(known)
}

fn by_label(cp: u32) -> Option<&'static Encoding> {
    [format!("cp{cp}"), format!("windows-{cp}")]
        .iter()
        .filter_map(|label| Encoding::for_label(label.as_bytes()))
        .find(|enc| *enc != encoding_rs::REPLACEMENT)
}

/// Default [`ConverterService`], backed by `encoding_rs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EncodingService;

impl ConverterService for EncodingService {
    fn open(&self, charset: Charset) -> Result<Box<dyn Converter>, CharsetError> {
        let cp = match charset {
            Charset::Ascii | Charset::Codepage(CP_ASCII) => return Ok(Box::new(AsciiConverter)),
            Charset::Codepage(cp) => cp,
        };
        let encoding = encoding_for_codepage(cp).ok_or_else(|| CharsetError::Unsupported {
            name: charset.to_string(),
        })?;
        Ok(Box::new(EncodingConverter::new(encoding)))
    }
}

/// [`Converter`] over an `encoding_rs` decoder.
pub struct EncodingConverter {
    encoding: &'static Encoding,
    decoder: Decoder,
}

impl EncodingConverter {
    /// Create a converter for `encoding`. Byte order marks are not
    /// interpreted.
    pub fn new(encoding: &'static Encoding) -> Self {
        Self {
            encoding,
            decoder: encoding.new_decoder_without_bom_handling(),
        }
    }

    fn reset(&mut self) {
        self.decoder = self.encoding.new_decoder_without_bom_handling();
    }
}

impl Converter for EncodingConverter {
    fn convert(&mut self, src: &[u8], dst: &mut String, last: bool) -> Conversion {
        let mut consumed = 0;
        loop {
            let rest = &src[consumed..];
            let needed = self
                .decoder
                .max_utf8_buffer_length_without_replacement(rest.len())
                .unwrap_or_else(|| rest.len().saturating_add(16));
            dst.reserve(needed);

            let (result, read) = self
                .decoder
                .decode_to_string_without_replacement(rest, dst, last);
            consumed += read;
            match result {
                DecoderResult::InputEmpty => {
                    if last {
                        self.reset();
                    }
                    return Conversion::Complete;
                }
                DecoderResult::OutputFull => {}
                DecoderResult::Malformed(bad, extra) => {
                    let offset = consumed.saturating_sub(usize::from(bad) + usize::from(extra));
                    self.reset();
                    return Conversion::Unconvertible { offset };
                }
            }
        }
    }
}
