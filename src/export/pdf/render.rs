//! PDF serialization of a finished [`PageLayout`].
//!
//! Produces an uncompressed PDF 1.4 file using only the standard Helvetica
//! fonts, so no font program needs embedding.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::config::{EVEN_ROW_FILL, HEADER_FILL, ODD_ROW_FILL};

use super::layout::{BandKind, Page, PageLayout, TextRun, REPORT_SUBTITLE};
use super::text::{pdf_escape, Font};

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const BOLD_FONT_ID: usize = 3;
const REGULAR_FONT_ID: usize = 4;
const INFO_ID: usize = 5;
const FIRST_PAGE_ID: usize = 6;

// Baseline sits this far below the top of a line, as a fraction of the font size.
const ASCENT: f64 = 0.8;

/// Accumulates numbered objects and their byte offsets.
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    /// Appends object `id`. Objects must be written in id order.
    fn object(&mut self, id: usize, body: &str) {
        debug_assert_eq!(id, self.offsets.len() + 1);
        self.offsets.push(self.buf.len());
        self.buf
            .extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", id, body).as_bytes());
    }

    fn stream(&mut self, id: usize, content: &str) {
        self.object(
            id,
            &format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ),
        );
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_offset = self.buf.len();
        let size = self.offsets.len() + 1;
        let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", size);
        for offset in &self.offsets {
            let _ = writeln!(tail, "{:010} 00000 n ", offset);
        }
        let _ = write!(
            tail,
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, CATALOG_ID, INFO_ID, xref_offset
        );
        self.buf.extend_from_slice(tail.as_bytes());
        self.buf
    }
}

fn fill(kind: BandKind) -> Option<(f64, f64, f64)> {
    match kind {
        BandKind::Header => Some(HEADER_FILL),
        BandKind::Data { shaded: false } => Some(EVEN_ROW_FILL),
        BandKind::Data { shaded: true } => Some(ODD_ROW_FILL),
        BandKind::Blank => None,
    }
}

fn push_text(content: &mut String, run: &TextRun, page_height: f64) {
    let baseline = page_height - run.top - run.size * ASCENT;
    let _ = write!(
        content,
        "BT\n/{} {} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
        run.font.resource(),
        run.size,
        run.x,
        baseline,
        pdf_escape(&run.text)
    );
}

/// Content stream for one page: band fills and outlines first, then text.
fn page_content(page: &Page, layout: &PageLayout) -> String {
    let g = layout.geometry();
    let width = g.table_width();
    let mut content = String::new();

    for band in &page.bands {
        let y = g.height - band.top - g.band_height;
        if let Some((r, gr, b)) = fill(band.kind) {
            let _ = writeln!(
                content,
                "{:.3} {:.3} {:.3} rg\n{:.2} {:.2} {:.2} {:.2} re f",
                r, gr, b, g.margin, y, width, g.band_height
            );
        }
        if band.kind == BandKind::Header {
            let _ = writeln!(
                content,
                "0.6 0.6 0.6 RG\n0.5 w\n{:.2} {:.2} {:.2} {:.2} re S",
                g.margin, y, width, g.band_height
            );
        }
    }

    content.push_str("0 0 0 rg\n");
    for run in page.text.iter().chain(page.footer.iter()) {
        push_text(&mut content, run, g.height);
    }
    content
}

fn font_object(font: Font) -> String {
    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
        font.base_font()
    )
}

/// Serializes `layout` into PDF bytes.
pub fn render(layout: &PageLayout, generated_at: DateTime<Utc>) -> Vec<u8> {
    let g = layout.geometry();
    let page_ids: Vec<usize> = (0..layout.page_count())
        .map(|i| FIRST_PAGE_ID + 2 * i)
        .collect();
    let kids = page_ids
        .iter()
        .map(|id| format!("{} 0 R", id))
        .collect::<Vec<_>>()
        .join(" ");

    let mut pdf = PdfWriter::new();
    pdf.object(
        CATALOG_ID,
        &format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID),
    );
    pdf.object(
        PAGES_ID,
        &format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_ids.len()
        ),
    );
    pdf.object(BOLD_FONT_ID, &font_object(Font::Bold));
    pdf.object(REGULAR_FONT_ID, &font_object(Font::Regular));
    pdf.object(
        INFO_ID,
        &format!(
            "<< /Title ({}) /Producer (employee_reports) /CreationDate (D:{}Z) >>",
            pdf_escape(REPORT_SUBTITLE),
            generated_at.format("%Y%m%d%H%M%S")
        ),
    );

    for (page, id) in layout.pages().iter().zip(&page_ids) {
        pdf.object(
            *id,
            &format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Contents {} 0 R \
                 /Resources << /Font << /{} {} 0 R /{} {} 0 R >> >> >>",
                PAGES_ID,
                g.width,
                g.height,
                id + 1,
                Font::Bold.resource(),
                BOLD_FONT_ID,
                Font::Regular.resource(),
                REGULAR_FONT_ID
            ),
        );
        pdf.stream(id + 1, &page_content(page, layout));
    }

    pdf.finish()
}
