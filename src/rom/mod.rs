/// ROM Module
///
/// Character ROM storage: the frozen glyph table and the text listing
/// loader that builds it.

pub mod error;
pub mod loader;
pub mod table;

pub use error::RomError;
pub use loader::parse_rom_listing;
pub use table::GlyphTable;

/// Stroke words per glyph in the original character ROM.
pub const ROM_GLYPH_LEN: usize = 22;

/// Key looked up when a character has no glyph of its own.
pub const BLANK_KEY: &str = " ";
