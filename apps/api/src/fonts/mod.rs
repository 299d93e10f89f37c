//! Font handling for PDF export: the base-font cache, glyph subsetting and
//! PDF embedding of the resulting font program.

pub mod cache;
pub mod embed;
pub mod subset;

#[cfg(test)]
pub mod test_font;

pub use cache::FontCache;
pub use embed::EmbeddedFont;
pub use subset::{subset_font, SubsetFont};
