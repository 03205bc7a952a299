use super::{Conversion, Converter};

/// Built-in 7-bit ASCII converter: bytes below `0x80` map to themselves,
/// everything else is unconvertible.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiConverter;

impl Converter for AsciiConverter {
    fn convert(&mut self, src: &[u8], dst: &mut String, _last: bool) -> Conversion {
        let end = src.iter().position(|b| !b.is_ascii()).unwrap_or(src.len());
        dst.extend(src[..end].iter().map(|&b| char::from(b)));
        if end < src.len() {
            Conversion::Unconvertible { offset: end }
        } else {
            Conversion::Complete
        }
    }
}
