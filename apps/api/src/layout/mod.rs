// Document layout: places the roster on fixed-size pages and serializes them.
// Planning is pure; rendering is CPU-bound and must run inside spawn_blocking.

pub mod page_plan;
pub mod render;

pub use page_plan::{plan_pages, LayoutConfig, FIXED_LABELS};
pub use render::render_pages;

use crate::errors::ExportError;
use crate::fonts::SubsetFont;
use crate::models::employee::DisplayRecord;

/// Plans and renders the user list in one pass.
pub fn render_user_list(
    records: &[DisplayRecord],
    font: &SubsetFont,
    config: &LayoutConfig,
) -> Result<Vec<u8>, ExportError> {
    let pages = plan_pages(records, config)?;
    render_pages(&pages, font, config)
}
