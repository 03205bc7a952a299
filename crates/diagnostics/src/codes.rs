//! Diagnostic ID constants.
//!
//! Generated from `tables/diagnostics.jsonc` by the crate build script. Codes
//! are grouped by the stage that raises them: `RTF1xxx` hex-escape decoding,
//! `RTF2xxx` codepage selection, `RTF3xxx` input stream.

include!(concat!(env!("OUT_DIR"), "/generated_codes.rs"));
