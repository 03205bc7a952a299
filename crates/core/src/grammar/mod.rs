/// Re-exports from the diagnostics crate.
pub mod diag;
/// RTF emitter: line and spacing decisions for each emission.
pub mod emit;
/// Sliding-window input buffer over the byte source.
pub mod input;
/// RTF tokenizer: splits the buffered stream into borrowed tokens.
pub mod lexer;
