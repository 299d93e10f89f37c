//! Embedding a subset font program into a PDF as a Type0 font.
//!
//! Text is encoded as two-byte glyph ids (`Identity-H`), so the remapped glyph
//! ids of the subset are used directly as CIDs: through an identity
//! `CIDToGIDMap` for TrueType outlines, and natively for the CID-keyed CFF the
//! subsetter writes. A `ToUnicode` CMap keeps the text extractable.

use std::collections::{BTreeMap, BTreeSet};

use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use ttf_parser::{name_id, Face, GlyphId};

use crate::errors::ExportError;
use crate::fonts::subset::{Outlines, SubsetFont};

/// Glyph width used when the font has no horizontal metrics for a glyph.
const DEFAULT_WIDTH: i64 = 1000;
/// Max entries per `beginbfchar` block.
const BFCHAR_CHUNK: usize = 100;

/// A font registered in a document, plus the encoder for its text.
#[derive(Debug, Clone)]
pub struct EmbeddedFont {
    pub font_id: ObjectId,
    glyphs: BTreeMap<char, u16>,
}

impl EmbeddedFont {
    /// Adds the font objects for `subset` to `doc`.
    ///
    /// The subset's character map drives the width table and the `ToUnicode`
    /// map. Characters outside it are encoded as glyph 0.
    pub fn embed(doc: &mut Document, subset: &SubsetFont) -> Result<Self, ExportError> {
        let program = subset.data.as_slice();
        let face = Face::parse(program, 0)
            .map_err(|e| ExportError::Render(format!("cannot embed font: {e}")))?;
        let scale = 1000.0 / f32::from(face.units_per_em());
        let to_pdf_units = |v: i16| (f32::from(v) * scale).round() as i64;

        let glyphs = subset.glyphs.clone();
        let base_font = format!(
            "{}+{}",
            subset_tag(glyphs.values().copied()),
            postscript_name(&face)
        );

        let widths = width_array(&face, glyphs.values().copied(), scale);
        let to_unicode = to_unicode_cmap(&glyphs);

        let (font_file_key, font_file_dict, cid_subtype) = match subset.outlines {
            Outlines::TrueType => (
                "FontFile2",
                dictionary! { "Length1" => program.len() as i64 },
                "CIDFontType2",
            ),
            Outlines::Cff => (
                "FontFile3",
                dictionary! { "Subtype" => "OpenType" },
                "CIDFontType0",
            ),
        };
        let font_file_id = doc.add_object(Stream::new(font_file_dict, program.to_vec()));

        let bbox = face.global_bounding_box();
        let ascent = to_pdf_units(face.ascender());
        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => Object::Name(base_font.clone().into_bytes()),
            // Symbolic: glyphs are addressed by id, not a standard encoding.
            "Flags" => 4,
            "FontBBox" => Object::Array(vec![
                to_pdf_units(bbox.x_min).into(),
                to_pdf_units(bbox.y_min).into(),
                to_pdf_units(bbox.x_max).into(),
                to_pdf_units(bbox.y_max).into(),
            ]),
            "ItalicAngle" => 0,
            "Ascent" => ascent,
            "Descent" => to_pdf_units(face.descender()),
            "CapHeight" => face.capital_height().map(to_pdf_units).unwrap_or(ascent),
            "StemV" => 80,
            font_file_key => font_file_id,
        });

        let mut cid_font = dictionary! {
            "Type" => "Font",
            "Subtype" => cid_subtype,
            "BaseFont" => Object::Name(base_font.clone().into_bytes()),
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::String(b"Adobe".to_vec(), StringFormat::Literal),
                "Ordering" => Object::String(b"Identity".to_vec(), StringFormat::Literal),
                "Supplement" => 0,
            },
            "FontDescriptor" => descriptor_id,
            "DW" => DEFAULT_WIDTH,
            "W" => widths,
        };
        if subset.outlines == Outlines::TrueType {
            cid_font.set("CIDToGIDMap", "Identity");
        }
        let cid_font_id = doc.add_object(cid_font);

        let to_unicode_id = doc.add_object(Stream::new(dictionary! {}, to_unicode.into_bytes()));

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => Object::Name(base_font.into_bytes()),
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(cid_font_id)],
            "ToUnicode" => to_unicode_id,
        });

        Ok(EmbeddedFont { font_id, glyphs })
    }

    /// Glyph id drawn for `ch`; 0 (`.notdef`) when the font lacks it.
    pub fn glyph_id(&self, ch: char) -> u16 {
        self.glyphs.get(&ch).copied().unwrap_or(0)
    }

    /// Encodes `text` as a hex string of two-byte glyph ids for `Tj`.
    pub fn encode(&self, text: &str) -> Object {
        let bytes = text
            .chars()
            .flat_map(|ch| self.glyph_id(ch).to_be_bytes())
            .collect();
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}

/// Six uppercase letters derived from the glyph set, as PDF subset fonts require.
fn subset_tag(glyphs: impl Iterator<Item = u16>) -> String {
    // FNV-1a over the glyph ids.
    let mut hash: u32 = 0x811C_9DC5;
    for glyph in glyphs {
        for byte in glyph.to_be_bytes() {
            hash ^= u32::from(byte);
            hash = hash.wrapping_mul(0x0100_0193);
        }
    }
    (0..6)
        .map(|_| {
            let letter = (b'A' + (hash % 26) as u8) as char;
            hash /= 26;
            letter
        })
        .collect()
}

/// PostScript name from the `name` table, restricted to characters legal in a PDF name.
fn postscript_name(face: &Face) -> String {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == name_id::POST_SCRIPT_NAME)
        .find_map(|name| name.to_string())
        .map(|name| {
            name.chars()
                .filter(|c| c.is_ascii_graphic() && !"()<>[]{}/%#".contains(*c))
                .collect::<String>()
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "RosterFont".to_string())
}

/// The `W` array: runs of consecutive glyph ids with their advance widths.
fn width_array(face: &Face, glyphs: impl Iterator<Item = u16>, scale: f32) -> Vec<Object> {
    let glyphs: BTreeSet<u16> = glyphs.collect();
    let mut runs: Vec<(u16, Vec<Object>)> = Vec::new();
    for glyph in glyphs {
        let width = face
            .glyph_hor_advance(GlyphId(glyph))
            .map(|w| (f32::from(w) * scale).round() as i64)
            .unwrap_or(DEFAULT_WIDTH);
        match runs.last_mut() {
            Some((start, widths)) if usize::from(*start) + widths.len() == usize::from(glyph) => {
                widths.push(width.into());
            }
            _ => runs.push((glyph, vec![width.into()])),
        }
    }
    runs.into_iter()
        .flat_map(|(start, widths)| [i64::from(start).into(), Object::Array(widths)])
        .collect()
}

/// CMap mapping each used glyph id back to its character.
fn to_unicode_cmap(glyphs: &BTreeMap<char, u16>) -> String {
    let mut by_glyph: BTreeMap<u16, char> = BTreeMap::new();
    for (&ch, &glyph) in glyphs {
        if glyph != 0 {
            by_glyph.entry(glyph).or_insert(ch);
        }
    }

    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(u16, char)> = by_glyph.into_iter().collect();
    for chunk in entries.chunks(BFCHAR_CHUNK) {
        cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for &(glyph, ch) in chunk {
            let mut units = [0u16; 2];
            let utf16: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("{unit:04X}"))
                .collect();
            cmap.push_str(&format!("<{glyph:04X}> <{utf16}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
    );
    cmap
}
