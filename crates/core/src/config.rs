//! Formatting configuration.

use crate::error::FormatError;
use crate::grammar::input::MIN_PAGE_SIZE;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 4096;

/// Settings for one formatting session.
///
/// The page size bounds the input window (two pages) and the longest
/// control word or hex escape kept intact; longer names are split.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Input page size in bytes.
    pub page_size: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FormatConfig {
    /// Default configuration with the given page size.
    pub fn with_page_size(page_size: usize) -> Result<Self, FormatError> {
        let config = Self { page_size };
        config.validate()?;
        Ok(config)
    }

    /// Check that the page size is at least [`MIN_PAGE_SIZE`].
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.page_size < MIN_PAGE_SIZE {
            return Err(FormatError::PageTooSmall {
                size: self.page_size,
                min: MIN_PAGE_SIZE,
            });
        }
        Ok(())
    }
}
