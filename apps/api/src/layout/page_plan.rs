//! Page layout for the user-list document.
//!
//! Layout is planned into plain draw operations first and serialized later,
//! so pagination can be checked without decoding a PDF.
//!
//! # Pagination rule
//! Rows start at `rows_offset` below the page top. Before each row, if the
//! cursor is closer to the bottom edge than one row height plus the bottom
//! margin, a new page is started and the cursor returns to the row-area top.
//! Title and column headers are drawn on the first page only.

use serde::{Deserialize, Serialize};

use crate::errors::ExportError;
use crate::models::employee::DisplayRecord;

pub const TITLE: &str = "ユーザー一覧";
pub const HEADER_NAME: &str = "氏名";
pub const HEADER_DEPARTMENT: &str = "所属";
pub const HEADER_ID: &str = "ID";
/// Drawn in the department column for employees without a department.
pub const NO_DEPARTMENT: &str = "所属なし";

/// Every fixed string the document can contain, independent of the records.
pub const FIXED_LABELS: [&str; 5] = [
    TITLE,
    HEADER_NAME,
    HEADER_DEPARTMENT,
    HEADER_ID,
    NO_DEPARTMENT,
];

// ────────────────────────────────────────────────────────────────────────────
// Layout configuration
// ────────────────────────────────────────────────────────────────────────────

/// Geometry of the user-list document, in PDF points (origin bottom-left).
/// Offsets are measured down from the top edge of the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub title_offset: f32,
    pub title_size: f32,
    /// Baseline of the column headers.
    pub header_offset: f32,
    /// Baseline of the first row on every page.
    pub rows_offset: f32,
    /// X positions of the name, department and id columns.
    pub column_x: [f32; 3],
    pub font_size: f32,
    pub row_height: f32,
    pub bottom_margin: f32,
    /// Horizontal inset of the divider line from both page edges.
    pub rule_inset: f32,
    /// Distance of the divider line below the header baseline.
    pub rule_gap: f32,
    pub rule_thickness: f32,
}

impl Default for LayoutConfig {
    /// A4 portrait, 12pt rows every 20pt, 20pt title.
    fn default() -> Self {
        LayoutConfig {
            page_width: 595.28,
            page_height: 841.89,
            title_offset: 50.0,
            title_size: 20.0,
            header_offset: 100.0,
            rows_offset: 125.0,
            column_x: [50.0, 200.0, 350.0],
            font_size: 12.0,
            row_height: 20.0,
            bottom_margin: 30.0,
            rule_inset: 40.0,
            rule_gap: 5.0,
            rule_thickness: 1.0,
        }
    }
}

impl LayoutConfig {
    /// Y coordinate of the first row on each page.
    pub fn rows_top(&self) -> f32 {
        self.page_height - self.rows_offset
    }

    /// Vertical space available to rows on one page.
    pub fn usable_height(&self) -> f32 {
        self.rows_top() - self.bottom_margin
    }

    /// How many rows fit on a page: `floor(usable_height / row_height)`.
    pub fn rows_per_page(&self) -> usize {
        if self.row_height <= 0.0 || self.usable_height() <= 0.0 {
            return 0;
        }
        (self.usable_height() / self.row_height).floor() as usize
    }

    fn fits_row(&self, y: f32) -> bool {
        y >= self.row_height + self.bottom_margin
    }

    /// Rejects geometry that would paginate forever.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.row_height <= 0.0 {
            return Err(ExportError::Render(format!(
                "row height must be positive, got {}",
                self.row_height
            )));
        }
        if !self.fits_row(self.rows_top()) {
            return Err(ExportError::Render(format!(
                "page height {} leaves no room for a {}pt row",
                self.page_height, self.row_height
            )));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Draw operations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        text: String,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
    },
}

/// Everything drawn on one page, in drawing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePlan {
    pub ops: Vec<DrawOp>,
}

impl PagePlan {
    /// Strings drawn on this page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Line { .. } => None,
        })
    }

    fn text(&mut self, x: f32, y: f32, size: f32, text: &str) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            size,
            text: text.to_string(),
        });
    }
}

/// The department column text for a record.
pub fn department_label(record: &DisplayRecord) -> &str {
    record.department_name.as_deref().unwrap_or(NO_DEPARTMENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Planning
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the title, header row and one row per record, in input order.
///
/// Always yields at least one page. Continuation pages hold rows only.
pub fn plan_pages(
    records: &[DisplayRecord],
    config: &LayoutConfig,
) -> Result<Vec<PagePlan>, ExportError> {
    config.validate()?;
    let [name_x, department_x, id_x] = config.column_x;
    let top = config.page_height;

    let mut first = PagePlan::default();
    first.text(name_x, top - config.title_offset, config.title_size, TITLE);

    let header_y = top - config.header_offset;
    first.text(name_x, header_y, config.font_size, HEADER_NAME);
    first.text(department_x, header_y, config.font_size, HEADER_DEPARTMENT);
    first.text(id_x, header_y, config.font_size, HEADER_ID);

    let rule_y = header_y - config.rule_gap;
    first.ops.push(DrawOp::Line {
        from: (config.rule_inset, rule_y),
        to: (config.page_width - config.rule_inset, rule_y),
        thickness: config.rule_thickness,
    });

    let mut pages = vec![first];
    let mut y = config.rows_top();

    for record in records {
        if !config.fits_row(y) {
            pages.push(PagePlan::default());
            y = config.rows_top();
        }
        // `pages` is never empty: it starts with the first page.
        if let Some(page) = pages.last_mut() {
            page.text(name_x, y, config.font_size, &record.name);
            page.text(department_x, y, config.font_size, department_label(record));
            page.text(id_x, y, config.font_size, &record.id);
        }
        y -= config.row_height;
    }

    Ok(pages)
}
