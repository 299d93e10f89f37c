//! The user-list PDF export pipeline:
//! records → text collection → subset font → layout → PDF bytes.

pub mod handlers;

use std::time::Instant;

use tracing::{debug, info};

use crate::errors::ExportError;
use crate::fonts::subset_font;
use crate::layout::{render_user_list, LayoutConfig, FIXED_LABELS};
use crate::models::employee::DisplayRecord;

/// All text the document can draw for `records`: fixed labels plus every
/// name, department name and id. Collected before subsetting so the subset
/// covers everything the layout will place.
pub fn collect_document_text(records: &[DisplayRecord]) -> String {
    let mut text: String = FIXED_LABELS.concat();
    for record in records {
        text.push_str(&record.name);
        if let Some(department) = &record.department_name {
            text.push_str(department);
        }
        text.push_str(&record.id);
    }
    text
}

/// Renders the user list for `records` with a font subset cut from `base_font`.
///
/// CPU-bound; call from a blocking context.
pub fn build_user_list_pdf(
    records: &[DisplayRecord],
    base_font: &[u8],
    layout: &LayoutConfig,
) -> Result<Vec<u8>, ExportError> {
    let started = Instant::now();

    let text = collect_document_text(records);
    let subset = subset_font(base_font, &text)?;
    info!(
        "Font subset: {} chars ({} without glyph), {} glyphs, {} -> {} bytes in {:?}",
        subset.glyphs.len(),
        subset.missing_chars.len(),
        subset.glyph_count,
        base_font.len(),
        subset.data.len(),
        started.elapsed()
    );

    let render_started = Instant::now();
    let pdf = render_user_list(records, &subset, layout)?;
    debug!("Rendered PDF in {:?}", render_started.elapsed());

    info!(
        "Generated user list PDF: {} records, {} bytes in {:?}",
        records.len(),
        pdf.len(),
        started.elapsed()
    );
    Ok(pdf)
}
