//! Active charset tracking: `\ansicpg<N>` switches and body detection.

use crate::charset::{AsciiConverter, Charset, CharsetError, Converter, ConverterService};

const ANSICPG: &[u8] = b"\\ansicpg";
const PARD: &[u8] = b"\\pard";

/// Whether `tag` asks for a codepage switch (`\ansicpg` plus at least one
/// byte). A bare `\ansicpg` is an ordinary tag.
pub fn is_codepage_switch(tag: &[u8]) -> bool {
    tag.len() > ANSICPG.len() && tag.starts_with(ANSICPG)
}

/// Owns the converter for the document's declared codepage.
///
/// Until a codepage is declared, or after a failed switch, hex runs are
/// decoded by an [`AsciiConverter`] opened on first use.
pub struct CodepageManager<S> {
    service: S,
    charset: Charset,
    active: Option<Box<dyn Converter>>,
    body_started: bool,
}

impl<S: ConverterService> CodepageManager<S> {
    /// Start in ASCII with no converter open.
    pub fn new(service: S) -> Self {
        Self {
            service,
            charset: Charset::Ascii,
            active: None,
            body_started: false,
        }
    }

    /// The charset hex runs are currently decoded from.
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Whether `\pard` has been seen.
    pub fn body_started(&self) -> bool {
        self.body_started
    }

    /// The open converter, if any.
    pub fn active_mut(&mut self) -> Option<&mut (dyn Converter + 'static)> {
        self.active.as_deref_mut()
    }

    /// The open converter, opening the built-in ASCII one if none is.
    pub fn converter_mut(&mut self) -> &mut dyn Converter {
        let active = self.active.get_or_insert_with(|| Box::new(AsciiConverter));
        &mut **active
    }

    /// React to a control word.
    ///
    /// `\pard` marks the start of the body. `\ansicpg<N>` releases the
    /// current converter and opens one for `cp<N>`; on failure no
    /// converter is left open and the error is returned for reporting.
    /// Every other tag is ignored.
    pub fn on_tag(&mut self, tag: &[u8]) -> Result<(), CharsetError> {
        if tag == PARD {
            self.body_started = true;
            return Ok(());
        }
        if !is_codepage_switch(tag) {
            return Ok(());
        }

        self.active = None;
        self.charset = Charset::Ascii;

        let digits = &tag[ANSICPG.len()..];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(CharsetError::MalformedTag {
                tag: String::from_utf8_lossy(tag).into_owned(),
            });
        }
        let text = String::from_utf8_lossy(digits);
        let cp: u32 = text.parse().map_err(|_| CharsetError::Unsupported {
            name: format!("cp{text}"),
        })?;

        let charset = Charset::Codepage(cp);
        self.active = Some(self.service.open(charset)?);
        self.charset = charset;
        Ok(())
    }
}
