//! PDF export functionality.
//!
//! The paginated report cannot be streamed row by row: the `Page i of N`
//! footers need the final page count. The whole layout is built in memory,
//! stamped, serialized, and only then written to the sink.

mod layout;
mod render;
mod stats;
mod text;

use log::debug;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error_handling::ExportError;

use super::projector::ProjectedRow;

pub use layout::{
    lay_out, Band, BandKind, Page, PageGeometry, PageLayout, ReportMetadata, TextRun,
    TABLE_COLUMNS,
};
pub use render::render;
pub use stats::{DepartmentAggregate, ReportStatistics};
pub use text::Font;

/// Counters reported by [`write_pdf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfOutcome {
    /// Pages in the document
    pub pages: usize,
    /// Bytes accepted by the sink
    pub bytes: u64,
}

/// Lays out, renders and writes the report to `sink`.
///
/// # Errors
///
/// Returns `ExportError::SinkUnavailable` if the sink rejects the document.
pub async fn write_pdf<W>(
    rows: &[ProjectedRow],
    metadata: &ReportMetadata,
    stats: &ReportStatistics,
    geometry: &PageGeometry,
    sink: &mut W,
) -> Result<PdfOutcome, ExportError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let layout = lay_out(geometry, metadata, rows, stats);
    let bytes = render(&layout, metadata.generated_at);
    debug!(
        "Rendered PDF report: {} pages, {} bytes",
        layout.page_count(),
        bytes.len()
    );

    sink.write_all(&bytes).await.map_err(ExportError::sink)?;
    sink.flush().await.map_err(ExportError::sink)?;

    Ok(PdfOutcome {
        pages: layout.page_count(),
        bytes: bytes.len() as u64,
    })
}
