//! Glyph subsetting for PDF embedding.
//!
//! Characters are resolved against the base font's `cmap` with `ttf-parser`,
//! the glyphs are renumbered densely through a [`GlyphRemapper`], and
//! `subsetter` cuts the font program down to those glyphs. The subset program
//! has no `cmap` of its own: [`SubsetFont::glyphs`] is its character map, and
//! the PDF carries it as the `ToUnicode` CMap.

use std::collections::{BTreeMap, BTreeSet};

use subsetter::GlyphRemapper;
use tracing::{debug, warn};
use ttf_parser::Face;

use crate::errors::ExportError;

/// Outline flavour of a font program, which decides how it is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outlines {
    /// `glyf` outlines, embedded as `FontFile2`.
    TrueType,
    /// `CFF` outlines, converted to CID-keyed CFF by the subsetter.
    Cff,
}

/// A font program reduced to the glyphs one document needs.
#[derive(Debug, Clone)]
pub struct SubsetFont {
    /// Font program addressed by the remapped glyph ids.
    pub data: Vec<u8>,
    pub outlines: Outlines,
    /// Every covered character and its glyph id in `data`.
    pub glyphs: BTreeMap<char, u16>,
    /// Glyphs in `data`, including `.notdef` and composite components.
    pub glyph_count: u16,
    /// Requested characters the base font has no glyph for.
    pub missing_chars: Vec<char>,
}

impl SubsetFont {
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.glyphs.get(&ch).copied()
    }
}

/// Distinct characters of `text`, in code point order. Control characters are
/// never drawn and are skipped.
pub fn unique_chars(text: &str) -> BTreeSet<char> {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Builds a subset of `base` that covers every character of `text`.
///
/// Characters without a glyph in the base font are skipped with a warning;
/// they render as the missing-glyph box. A corrupt base font, or one without
/// `glyf` or `CFF` outlines, is an error.
pub fn subset_font(base: &[u8], text: &str) -> Result<SubsetFont, ExportError> {
    let face = Face::parse(base, 0)
        .map_err(|e| ExportError::Font(format!("failed to parse base font: {e}")))?;
    let outlines = if face.tables().glyf.is_some() {
        Outlines::TrueType
    } else if face.tables().cff.is_some() {
        Outlines::Cff
    } else {
        return Err(ExportError::Font(
            "base font has neither glyf nor CFF outlines".to_string(),
        ));
    };

    // `.notdef` is always glyph 0.
    let mut remapper = GlyphRemapper::new();
    let mut glyphs = BTreeMap::new();
    let mut missing_chars = Vec::new();
    for ch in unique_chars(text) {
        match face.glyph_index(ch) {
            Some(glyph) => {
                glyphs.insert(ch, remapper.remap(glyph.0));
            }
            None => missing_chars.push(ch),
        }
    }
    if !missing_chars.is_empty() {
        warn!(
            "Base font has no glyph for {} character(s): {:?}",
            missing_chars.len(),
            missing_chars
        );
    }

    let data = subsetter::subset(base, 0, &remapper)
        .map_err(|e| ExportError::Font(format!("failed to subset font: {e:?}")))?;
    let glyph_count = Face::parse(&data, 0)
        .map_err(|e| ExportError::Font(format!("subsetter produced an unreadable font: {e}")))?
        .number_of_glyphs();

    debug!(
        "Subset font: {} chars, {} of {} glyphs, {} -> {} bytes",
        glyphs.len(),
        glyph_count,
        face.number_of_glyphs(),
        base.len(),
        data.len()
    );

    Ok(SubsetFont {
        data,
        outlines,
        glyphs,
        glyph_count,
        missing_chars,
    })
}
