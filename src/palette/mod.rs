//! Color schemes, preset tables, and the resolution precedence.
//!
//! The preset tables are read-only data loaded once (embedded JSON or a
//! caller-supplied file) and passed by reference into [`resolver::resolve`].

/// Color precedence: artist > theme > genre > explicit triple.
pub mod resolver;
/// The `(gradient_start, gradient_end, text_color)` hex triple.
pub mod scheme;
/// Artist/genre/theme preset tables.
pub mod tables;
