//! Synthetic TrueType fonts for tests, so no binary fixture has to be checked in.
//!
//! Every character gets its own triangle glyph; glyph 0 is `.notdef`. Glyph
//! ids follow the order in which characters are first seen. Table checksums
//! are left at zero; nothing that reads these fonts verifies them.

use std::collections::BTreeMap;

const UNITS_PER_EM: u16 = 1000;
const ADVANCE: u16 = 1000;

pub struct TestFont {
    chars: Vec<char>,
    composite: Option<(char, char)>,
    outlines: bool,
}

impl TestFont {
    pub fn new(chars: &str) -> Self {
        let mut unique = Vec::new();
        for ch in chars.chars() {
            if !unique.contains(&ch) {
                unique.push(ch);
            }
        }
        TestFont {
            chars: unique,
            composite: None,
            outlines: true,
        }
    }

    /// Adds `ch` as a composite glyph whose only component is `component`'s glyph.
    pub fn composite(mut self, ch: char, component: char) -> Self {
        self.composite = Some((ch, component));
        self
    }

    /// Drops `glyf`/`loca`, leaving a font the subsetter must reject.
    pub fn without_outlines(mut self) -> Self {
        self.outlines = false;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut mapping = BTreeMap::new();
        let mut glyphs = vec![simple_glyph()];
        for ch in &self.chars {
            mapping.insert(*ch, glyphs.len() as u16);
            glyphs.push(simple_glyph());
        }
        if let Some((ch, component)) = self.composite {
            let component_glyph = mapping[&component];
            mapping.insert(ch, glyphs.len() as u16);
            glyphs.push(composite_glyph(component_glyph));
        }
        let num_glyphs = glyphs.len() as u16;

        let mut tables = vec![
            (*b"cmap", cmap(&mapping)),
            (*b"head", head()),
            (*b"hhea", hhea(num_glyphs)),
            (*b"hmtx", hmtx(num_glyphs)),
            (*b"maxp", maxp(num_glyphs)),
            (*b"post", post()),
        ];
        if self.outlines {
            let (glyf, loca) = glyf_and_short_loca(&glyphs);
            tables.push((*b"glyf", glyf));
            tables.push((*b"loca", loca));
        }
        write_font(tables)
    }
}

fn push_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn push_i16(buf: &mut Vec<u8>, v: i16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn push_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn head() -> Vec<u8> {
    let mut t = Vec::with_capacity(54);
    push_u32(&mut t, 0x0001_0000); // version
    push_u32(&mut t, 0x0001_0000); // fontRevision
    push_u32(&mut t, 0); // checkSumAdjustment
    push_u32(&mut t, 0x5F0F_3CF5); // magicNumber
    push_u16(&mut t, 0); // flags
    push_u16(&mut t, UNITS_PER_EM);
    t.extend_from_slice(&[0; 16]); // created, modified
    for v in [0i16, -200, 1000, 800] {
        push_i16(&mut t, v); // bbox
    }
    push_u16(&mut t, 0); // macStyle
    push_u16(&mut t, 8); // lowestRecPPEM
    push_i16(&mut t, 2); // fontDirectionHint
    push_i16(&mut t, 0); // indexToLocFormat: short
    push_i16(&mut t, 0); // glyphDataFormat
    t
}

fn hhea(num_glyphs: u16) -> Vec<u8> {
    let mut t = Vec::with_capacity(36);
    push_u32(&mut t, 0x0001_0000);
    push_i16(&mut t, 800); // ascender
    push_i16(&mut t, -200); // descender
    push_i16(&mut t, 0); // lineGap
    push_u16(&mut t, ADVANCE); // advanceWidthMax
    push_i16(&mut t, 0); // minLeftSideBearing
    push_i16(&mut t, 0); // minRightSideBearing
    push_i16(&mut t, 1000); // xMaxExtent
    push_i16(&mut t, 1); // caretSlopeRise
    push_i16(&mut t, 0); // caretSlopeRun
    push_i16(&mut t, 0); // caretOffset
    t.extend_from_slice(&[0; 8]); // reserved
    push_i16(&mut t, 0); // metricDataFormat
    push_u16(&mut t, num_glyphs); // numberOfHMetrics
    t
}

fn maxp(num_glyphs: u16) -> Vec<u8> {
    let mut t = Vec::with_capacity(6);
    push_u32(&mut t, 0x0000_5000);
    push_u16(&mut t, num_glyphs);
    t
}

fn hmtx(num_glyphs: u16) -> Vec<u8> {
    let mut t = Vec::with_capacity(usize::from(num_glyphs) * 4);
    for _ in 0..num_glyphs {
        push_u16(&mut t, ADVANCE);
        push_i16(&mut t, 0);
    }
    t
}

/// Version 3.0: no glyph names.
fn post() -> Vec<u8> {
    let mut t = Vec::with_capacity(32);
    push_u32(&mut t, 0x0003_0000);
    t.extend_from_slice(&[0; 28]);
    t
}

/// A single Windows UCS-4 format-12 subtable with one group per character.
fn cmap(mapping: &BTreeMap<char, u16>) -> Vec<u8> {
    let mut t = Vec::new();
    push_u16(&mut t, 0); // version
    push_u16(&mut t, 1); // numTables
    push_u16(&mut t, 3); // platform: Windows
    push_u16(&mut t, 10); // encoding: UCS-4
    push_u32(&mut t, 12); // subtable offset

    push_u16(&mut t, 12); // format
    push_u16(&mut t, 0);
    push_u32(&mut t, 16 + 12 * mapping.len() as u32);
    push_u32(&mut t, 0); // language
    push_u32(&mut t, mapping.len() as u32);
    for (&ch, &glyph) in mapping {
        push_u32(&mut t, u32::from(ch));
        push_u32(&mut t, u32::from(ch));
        push_u32(&mut t, u32::from(glyph));
    }
    t
}

/// One closed triangle contour with on-curve points and word coordinates.
fn simple_glyph() -> Vec<u8> {
    let mut g = Vec::new();
    push_i16(&mut g, 1); // numberOfContours
    for v in [100i16, 0, 900, 700] {
        push_i16(&mut g, v);
    }
    push_u16(&mut g, 2); // endPtsOfContours[0]
    push_u16(&mut g, 0); // instructionLength
    g.extend_from_slice(&[0x01, 0x01, 0x01]); // flags: on curve
    for dx in [100i16, 800, -400] {
        push_i16(&mut g, dx);
    }
    for dy in [0i16, 0, 700] {
        push_i16(&mut g, dy);
    }
    g
}

fn composite_glyph(component: u16) -> Vec<u8> {
    let mut g = Vec::new();
    push_i16(&mut g, -1);
    for v in [100i16, 0, 900, 700] {
        push_i16(&mut g, v);
    }
    push_u16(&mut g, 0x0003); // ARG_1_AND_2_ARE_WORDS | ARGS_ARE_XY_VALUES
    push_u16(&mut g, component);
    push_i16(&mut g, 0);
    push_i16(&mut g, 0);
    g
}

fn glyf_and_short_loca(glyphs: &[Vec<u8>]) -> (Vec<u8>, Vec<u8>) {
    let mut glyf = Vec::new();
    let mut loca = Vec::new();
    for glyph in glyphs {
        push_u16(&mut loca, (glyf.len() / 2) as u16);
        glyf.extend_from_slice(glyph);
        while glyf.len() % 4 != 0 {
            glyf.push(0);
        }
    }
    push_u16(&mut loca, (glyf.len() / 2) as u16);
    (glyf, loca)
}

/// Table directory (sorted by tag) plus 4-byte aligned table data.
fn write_font(mut tables: Vec<([u8; 4], Vec<u8>)>) -> Vec<u8> {
    tables.sort_by_key(|(tag, _)| *tag);
    let num_tables = tables.len() as u16;
    let mut font = Vec::new();
    push_u32(&mut font, 0x0001_0000); // sfnt version
    push_u16(&mut font, num_tables);
    push_u16(&mut font, 0); // searchRange
    push_u16(&mut font, 0); // entrySelector
    push_u16(&mut font, 0); // rangeShift

    let mut offset = 12 + 16 * tables.len();
    for (tag, data) in &tables {
        font.extend_from_slice(tag);
        push_u32(&mut font, 0); // checksum
        push_u32(&mut font, offset as u32);
        push_u32(&mut font, data.len() as u32);
        offset += data.len().div_ceil(4) * 4;
    }
    for (_, data) in &tables {
        font.extend_from_slice(data);
        while font.len() % 4 != 0 {
            font.push(0);
        }
    }
    font
}
