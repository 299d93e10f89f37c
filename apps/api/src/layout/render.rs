//! Serializes planned pages into a PDF with `lopdf`.

use std::collections::BTreeSet;

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::warn;

use crate::errors::ExportError;
use crate::fonts::{EmbeddedFont, SubsetFont};
use crate::layout::page_plan::{DrawOp, LayoutConfig, PagePlan};

/// Resource name of the single embedded font.
const FONT_RESOURCE: &str = "F1";
const PDF_VERSION: &str = "1.7";
const PRODUCER: &str = "roster";

/// Every character drawn anywhere in `pages`.
pub fn drawn_chars(pages: &[PagePlan]) -> BTreeSet<char> {
    pages
        .iter()
        .flat_map(|page| page.texts())
        .flat_map(str::chars)
        .collect()
}

/// Writes `pages` into a new document using `font` for all text.
///
/// The document is built completely in memory; any failure discards it.
pub fn render_pages(
    pages: &[PagePlan],
    font: &SubsetFont,
    config: &LayoutConfig,
) -> Result<Vec<u8>, ExportError> {
    let uncovered: Vec<char> = drawn_chars(pages)
        .into_iter()
        .filter(|ch| font.glyph_id(*ch).is_none() && !font.missing_chars.contains(ch))
        .collect();
    if !uncovered.is_empty() {
        warn!("Drawn characters missing from the font subset: {uncovered:?}");
    }

    let mut doc = Document::with_version(PDF_VERSION);
    let font = EmbeddedFont::embed(&mut doc, font)?;

    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let page_id = write_page(&mut doc, pages_id, page, &font)?;
        kids.push(page_id.into());
    }

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font.font_id,
        },
    });
    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => Object::Array(vec![
                0.into(),
                0.into(),
                config.page_width.into(),
                config.page_height.into(),
            ]),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::String(PRODUCER.as_bytes().to_vec(), StringFormat::Literal),
        "CreationDate" => Object::String(
            Utc::now().format("D:%Y%m%d%H%M%SZ").to_string().into_bytes(),
            StringFormat::Literal,
        ),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ExportError::Render(format!("failed to serialize PDF: {e}")))?;
    Ok(buffer)
}

fn write_page(
    doc: &mut Document,
    pages_id: ObjectId,
    page: &PagePlan,
    font: &EmbeddedFont,
) -> Result<ObjectId, ExportError> {
    let mut operations = vec![
        Operation::new("g", vec![0.into()]),
        Operation::new("G", vec![0.into()]),
    ];
    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, size, text } => {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec![FONT_RESOURCE.into(), (*size).into()]));
                operations.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                operations.push(Operation::new("Tj", vec![font.encode(text)]));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::Line {
                from,
                to,
                thickness,
            } => {
                operations.push(Operation::new("w", vec![(*thickness).into()]));
                operations.push(Operation::new("m", vec![from.0.into(), from.1.into()]));
                operations.push(Operation::new("l", vec![to.0.into(), to.1.into()]));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }

    let content = Content { operations }
        .encode()
        .map_err(|e| ExportError::Render(format!("failed to encode page content: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    }))
}
