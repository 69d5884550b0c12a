//! Page layout for the paginated report.
//!
//! Layout runs in two passes over an arena of pages:
//!
//! 1. Content: the header block, the banded table and the statistics section
//!    are placed top to bottom, opening a new page whenever the next band or
//!    line would cross the bottom margin.
//! 2. Finalize: once the page count is known, every page is stamped with a
//!    centered `Page i of N` footer.
//!
//! Vertical positions are measured from the top edge of the page. The
//! renderer converts them to PDF user space.

use chrono::{DateTime, Utc};
use log::debug;

use crate::config::{
    BAND_HEIGHT, CELL_PADDING, PAGE_HEIGHT, PAGE_MARGIN, PAGE_WIDTH, TABLE_COLUMN_WIDTHS,
};
use crate::export::projector::{Column, ProjectedRow};

use super::stats::ReportStatistics;
use super::text::{fit_text, text_width, Font};

/// Columns drawn in the table, matching `TABLE_COLUMN_WIDTHS`.
pub const TABLE_COLUMNS: [Column; 5] = [
    Column::Id,
    Column::Name,
    Column::Email,
    Column::Department,
    Column::Salary,
];

pub(crate) const REPORT_TITLE: &str = "Employee Management System";
pub(crate) const REPORT_SUBTITLE: &str = "Employee Report";

const TABLE_HEADER_SIZE: f64 = 10.0;
const TABLE_CELL_SIZE: f64 = 9.0;
const FOOTER_SIZE: f64 = 8.0;
const FOOTER_OFFSET: f64 = 8.0;
const BREAKDOWN_INDENT: f64 = 15.0;

/// Page size, margins and table geometry, in points.
#[derive(Clone, Debug, PartialEq)]
pub struct PageGeometry {
    /// Page width
    pub width: f64,
    /// Page height
    pub height: f64,
    /// Margin on every side
    pub margin: f64,
    /// Height of one table band
    pub band_height: f64,
    /// Width of each table column
    pub column_widths: [f64; 5],
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            margin: PAGE_MARGIN,
            band_height: BAND_HEIGHT,
            column_widths: TABLE_COLUMN_WIDTHS,
        }
    }
}

impl PageGeometry {
    /// Lowest y (from the top) content may reach.
    pub fn content_bottom(&self) -> f64 {
        self.height - self.margin
    }

    /// Total table width.
    pub fn table_width(&self) -> f64 {
        self.column_widths.iter().sum()
    }

    fn fits(&self, cursor: f64, extent: f64) -> bool {
        cursor + extent <= self.content_bottom()
    }
}

/// Kind of a table band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandKind {
    /// Column titles, shaded
    Header,
    /// One employee row; `shaded` alternates with row parity
    Data {
        /// Whether the alternate fill is used
        shaded: bool,
    },
    /// Placeholder row under the header when there is nothing to list
    Blank,
}

/// A full-width table slice.
#[derive(Clone, Debug, PartialEq)]
pub struct Band {
    /// What the band holds
    pub kind: BandKind,
    /// Top edge, from the top of the page
    pub top: f64,
}

/// A single line of text at a fixed position.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Text as it will be drawn
    pub text: String,
    /// Left edge
    pub x: f64,
    /// Top edge, from the top of the page
    pub top: f64,
    /// Font size
    pub size: f64,
    /// Font face
    pub font: Font,
}

/// One page of the layout arena.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    /// Table bands in drawing order
    pub bands: Vec<Band>,
    /// Text drawn on the page, including cell text
    pub text: Vec<TextRun>,
    /// `Page i of N`, set by the finalize pass
    pub footer: Option<TextRun>,
}

impl Page {
    /// Number of employee rows on this page.
    pub fn data_rows(&self) -> usize {
        self.bands
            .iter()
            .filter(|b| matches!(b.kind, BandKind::Data { .. }))
            .count()
    }
}

/// The laid out document.
#[derive(Clone, Debug, PartialEq)]
pub struct PageLayout {
    geometry: PageGeometry,
    pages: Vec<Page>,
}

impl PageLayout {
    /// Geometry every page shares.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Pages in order; index `i` is printed as page `i + 1`.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Data shown in the header block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportMetadata {
    /// Generation time
    pub generated_at: DateTime<Utc>,
    /// Number of exported employees
    pub total_employees: usize,
    /// Name of the filtered department, for department exports
    pub department: Option<String>,
}

enum Align {
    Left(f64),
    Center,
    Right,
}

struct LayoutBuilder<'a> {
    geometry: &'a PageGeometry,
    pages: Vec<Page>,
    cursor: f64,
}

impl<'a> LayoutBuilder<'a> {
    fn new(geometry: &'a PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::default()],
            cursor: geometry.margin,
        }
    }

    fn page_mut(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn open_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = self.geometry.margin;
        debug!("Opened PDF page {}", self.pages.len());
    }

    fn place_text(&mut self, text: String, font: Font, size: f64, align: Align, top: f64) {
        let g = self.geometry;
        let x = match align {
            Align::Left(x) => x,
            Align::Center => (g.width - text_width(&text, font, size)) / 2.0,
            Align::Right => g.width - g.margin - text_width(&text, font, size),
        };
        self.page_mut().text.push(TextRun {
            text,
            x,
            top,
            size,
            font,
        });
    }

    /// Places a line at the cursor, continuing on a new page if it would
    /// cross the bottom margin.
    fn line(&mut self, text: String, font: Font, size: f64, align: Align, line_height: f64) {
        if !self.geometry.fits(self.cursor, line_height) {
            self.open_page();
        }
        self.place_text(text, font, size, align, self.cursor);
        self.cursor += line_height;
    }

    fn gap(&mut self, height: f64) {
        self.cursor += height;
    }

    fn header(&mut self, metadata: &ReportMetadata) {
        self.line(REPORT_TITLE.to_string(), Font::Bold, 20.0, Align::Center, 24.0);
        self.line(
            REPORT_SUBTITLE.to_string(),
            Font::Regular,
            14.0,
            Align::Center,
            20.0,
        );
        self.gap(12.0);

        let mut meta = vec![
            format!(
                "Generated on: {}",
                metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            format!("Total Employees: {}", metadata.total_employees),
        ];
        if let Some(department) = &metadata.department {
            meta.push(format!("Department: {}", department));
        }
        for text in meta {
            self.line(text, Font::Regular, 10.0, Align::Right, 14.0);
        }
        self.gap(24.0);
    }

    fn push_band(&mut self, kind: BandKind) -> f64 {
        let top = self.cursor;
        self.page_mut().bands.push(Band { kind, top });
        self.cursor += self.geometry.band_height;
        top
    }

    fn cell_text(&mut self, column: usize, value: &str, font: Font, size: f64, band_top: f64) {
        let g = self.geometry;
        let left = g.margin + g.column_widths[..column].iter().sum::<f64>();
        let inner = (g.column_widths[column] - 2.0 * CELL_PADDING).max(0.0);
        let fitted = fit_text(value, font, size, inner).into_owned();
        let x = if TABLE_COLUMNS[column] == Column::Salary {
            left + g.column_widths[column] - CELL_PADDING - text_width(&fitted, font, size)
        } else {
            left + CELL_PADDING
        };
        let top = band_top + (g.band_height - size) / 2.0;
        self.place_text(fitted, font, size, Align::Left(x), top);
    }

    /// Emits the column title band, moving to a new page first unless it
    /// and the band after it both fit.
    fn table_header(&mut self) {
        let at_top = self.cursor <= self.geometry.margin;
        if !at_top && !self.geometry.fits(self.cursor, self.geometry.band_height * 2.0) {
            self.open_page();
        }
        let top = self.push_band(BandKind::Header);
        for (i, column) in TABLE_COLUMNS.iter().enumerate() {
            self.cell_text(i, column.title(), Font::Bold, TABLE_HEADER_SIZE, top);
        }
    }

    fn table(&mut self, rows: &[ProjectedRow]) {
        self.table_header();
        if rows.is_empty() {
            self.push_band(BandKind::Blank);
            return;
        }

        for (index, row) in rows.iter().enumerate() {
            if !self.geometry.fits(self.cursor, self.geometry.band_height) {
                self.open_page();
                self.table_header();
            }
            let top = self.push_band(BandKind::Data {
                shaded: index % 2 == 1,
            });
            for (i, column) in TABLE_COLUMNS.iter().enumerate() {
                let value = row.get(*column).unwrap_or_default();
                let value = if *column == Column::Salary {
                    format!("${}", value)
                } else {
                    value.to_string()
                };
                self.cell_text(i, &value, Font::Regular, TABLE_CELL_SIZE, top);
            }
        }
    }

    fn statistics(&mut self, stats: &ReportStatistics) {
        self.open_page();
        let left = self.geometry.margin;

        self.line(
            "Summary Statistics".to_string(),
            Font::Bold,
            16.0,
            Align::Left(left),
            28.0,
        );
        let summary = [
            format!("Total: {} employees", stats.total_employees),
            format!("Total Salary Cost: ${}", stats.total_salary),
            format!("Average Salary: ${}", stats.average_salary),
            format!("Minimum Salary: ${}", stats.min_salary),
            format!("Maximum Salary: ${}", stats.max_salary),
        ];
        for text in summary {
            self.line(text, Font::Regular, 12.0, Align::Left(left), 18.0);
        }

        self.gap(12.0);
        self.line(
            "Department Breakdown:".to_string(),
            Font::Bold,
            14.0,
            Align::Left(left),
            24.0,
        );
        for department in &stats.departments {
            self.line(
                format!(
                    "{}: {} employees, Avg Salary: ${}",
                    department.department_name,
                    department.employee_count,
                    department.average_salary()
                ),
                Font::Regular,
                11.0,
                Align::Left(left + BREAKDOWN_INDENT),
                16.0,
            );
        }
    }

    /// Second pass: stamps every page now that the total is known.
    fn finalize(mut self) -> PageLayout {
        let g = self.geometry;
        let total = self.pages.len();
        for (i, page) in self.pages.iter_mut().enumerate() {
            debug!("PDF page {} of {}: {} rows", i + 1, total, page.data_rows());
            let text = format!("Page {} of {}", i + 1, total);
            let x = (g.width - text_width(&text, Font::Regular, FOOTER_SIZE)) / 2.0;
            page.footer = Some(TextRun {
                text,
                x,
                top: g.content_bottom() + FOOTER_OFFSET,
                size: FOOTER_SIZE,
                font: Font::Regular,
            });
        }
        PageLayout {
            geometry: g.clone(),
            pages: self.pages,
        }
    }
}

/// Lays out the complete report: header block, table, statistics, footers.
pub fn lay_out(
    geometry: &PageGeometry,
    metadata: &ReportMetadata,
    rows: &[ProjectedRow],
    stats: &ReportStatistics,
) -> PageLayout {
    let mut builder = LayoutBuilder::new(geometry);
    builder.header(metadata);
    builder.table(rows);
    builder.statistics(stats);
    let layout = builder.finalize();
    debug!(
        "Laid out {} rows on {} pages",
        rows.len(),
        layout.page_count()
    );
    layout
}
