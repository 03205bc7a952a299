//! RTF `\'xx` hex escapes.
//!
//! A well-formed escape is exactly `\'` followed by two hex digits. The
//! tokenizer only admits lowercase name-class bytes, so uppercase digits
//! never reach [`decode_hex_escape`] from a stream; they are accepted here
//! for callers decoding lexemes from elsewhere.

/// Decode a complete hex-escape lexeme into its byte value.
///
/// Returns `None` unless `lexeme` is exactly `\'` plus two hex digits.
pub fn decode_hex_escape(lexeme: &[u8]) -> Option<u8> {
    match lexeme {
        [b'\\', b'\'', hi, lo] => Some((hex_digit_value(*hi)? << 4) | hex_digit_value(*lo)?),
        _ => None,
    }
}

/// Encode `byte` as a `\'xx` lexeme with lowercase digits.
pub fn encode_hex_escape(byte: u8) -> [u8; 4] {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    [
        b'\\',
        b'\'',
        DIGITS[usize::from(byte >> 4)],
        DIGITS[usize::from(byte & 0x0f)],
    ]
}

/// Convert a single ASCII hex digit to its numeric value (0-15).
fn hex_digit_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}
