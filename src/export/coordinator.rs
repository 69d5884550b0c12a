//! Export orchestration.
//!
//! An export runs in two steps so that response metadata can be announced
//! before any body byte exists:
//!
//! 1. [`prepare_export`] fetches every matching employee in one query and
//!    fixes the suggested filename.
//! 2. [`PreparedExport::write_to`] projects the records and streams the body
//!    in the requested format.
//!
//! [`export`] runs both steps against an [`ExportSink`].

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use chrono::{DateTime, Utc};
use log::{info, warn};
use tokio::io::AsyncWrite;

use crate::config::{EXPORT_PAGE_SIZE, UNKNOWN_DEPARTMENT};
use crate::error_handling::ExportError;
use crate::storage::{EmployeeQuery, EmployeeQueryService, EmployeeRecord};

use super::csv::write_csv;
use super::pdf::{write_pdf, PageGeometry, ReportMetadata, ReportStatistics};
use super::projector::{project, require_salary, Column, ProjectedRow};
use super::types::{ExportFormat, ExportHeader, ExportRequest, ExportSummary};

/// Output that accepts response metadata before the body.
pub trait ExportSink: AsyncWrite + Unpin {
    /// Records the content type and suggested filename. Called once, before
    /// the first body byte.
    fn set_header(&mut self, header: &ExportHeader) -> io::Result<()>;
}

/// In-memory sink holding the header and the complete body.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    /// Header, once set
    pub header: Option<ExportHeader>,
    /// Body bytes
    pub body: Vec<u8>,
}

impl ExportSink for BufferedResponse {
    fn set_header(&mut self, header: &ExportHeader) -> io::Result<()> {
        if !self.body.is_empty() {
            return Err(io::Error::other(
                "header set after body bytes were written",
            ));
        }
        self.header = Some(header.clone());
        Ok(())
    }
}

impl AsyncWrite for BufferedResponse {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.body).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.body).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.body).poll_shutdown(cx)
    }
}

/// Records fetched for an export, ready to be written.
#[derive(Debug, Clone)]
pub struct PreparedExport {
    request: ExportRequest,
    header: ExportHeader,
    records: Vec<EmployeeRecord>,
    generated_at: DateTime<Utc>,
    geometry: PageGeometry,
}

/// Fetches every employee matching `request`.
///
/// The collaborator is asked for page 1 with `EXPORT_PAGE_SIZE` rows, the
/// request's department filter and sort, and no search term.
///
/// # Errors
///
/// Collaborator failures are returned unchanged as `ExportError::UpstreamQuery`.
pub async fn prepare_export<Q>(
    service: &Q,
    request: ExportRequest,
) -> Result<PreparedExport, ExportError>
where
    Q: EmployeeQueryService + ?Sized,
{
    let query = EmployeeQuery {
        page: 1,
        page_size: EXPORT_PAGE_SIZE,
        department_id: request.department_id(),
        search: None,
        sort_field: request.sort_field(),
        sort_order: request.sort_order(),
    };
    info!(
        "Starting {} export (department: {:?}, sort: {} {})",
        request.format(),
        request.department_id(),
        request.sort_field(),
        request.sort_order()
    );

    let page = service.query(&query).await?;
    if page.total > page.records.len() as u64 {
        warn!(
            "Export limited to {} of {} matching employees",
            page.records.len(),
            page.total
        );
    }

    let generated_at = Utc::now();
    Ok(PreparedExport {
        header: ExportHeader::for_format(request.format(), generated_at),
        request,
        records: page.records,
        generated_at,
        geometry: PageGeometry::default(),
    })
}

impl PreparedExport {
    /// Content type and suggested filename.
    pub fn header(&self) -> &ExportHeader {
        &self.header
    }

    /// Uses `geometry` instead of US Letter for the paginated format.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Department line for the report header: the first record's department,
    /// or `Unknown` when a filtered export matched nothing.
    fn department_heading(&self) -> Option<String> {
        if self.request.department_id().is_none() {
            return None;
        }
        Some(
            self.records
                .first()
                .and_then(|r| r.department_name.clone())
                .unwrap_or_else(|| UNKNOWN_DEPARTMENT.to_string()),
        )
    }

    /// Fails before any output if a record cannot be projected.
    fn validate(&self) -> Result<(), ExportError> {
        for (index, record) in self.records.iter().enumerate() {
            require_salary(index, record)?;
        }
        Ok(())
    }

    /// Writes the body to `sink`.
    ///
    /// # Errors
    ///
    /// - `ExportError::DataIntegrity` if a record lacks a salary; nothing is
    ///   written in that case.
    /// - `ExportError::SinkUnavailable` if the sink stops accepting bytes.
    pub async fn write_to<W>(self, sink: &mut W) -> Result<ExportSummary, ExportError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        self.validate()?;

        let summary = match self.request.format() {
            ExportFormat::Csv => {
                let columns = Column::set(self.request.include_timestamps());
                let outcome = write_csv(&self.records, columns, sink).await?;
                ExportSummary {
                    format: ExportFormat::Csv,
                    records: outcome.rows,
                    bytes_written: outcome.bytes,
                    pages: None,
                }
            }
            ExportFormat::Pdf => {
                let stats = ReportStatistics::from_records(&self.records)?;
                let rows = self
                    .records
                    .iter()
                    .enumerate()
                    .map(|(index, record)| project(index, record, Column::set(false)))
                    .collect::<Result<Vec<ProjectedRow>, _>>()?;
                let metadata = ReportMetadata {
                    generated_at: self.generated_at,
                    total_employees: self.records.len(),
                    department: self.department_heading(),
                };
                let outcome = write_pdf(&rows, &metadata, &stats, &self.geometry, sink).await?;
                ExportSummary {
                    format: ExportFormat::Pdf,
                    records: rows.len(),
                    bytes_written: outcome.bytes,
                    pages: Some(outcome.pages),
                }
            }
        };

        info!(
            "Exported {} employees as {} ({} bytes)",
            summary.records, summary.format, summary.bytes_written
        );
        Ok(summary)
    }
}

/// Runs a complete export into `sink`: query, header, body.
///
/// # Errors
///
/// See [`prepare_export`] and [`PreparedExport::write_to`]. A sink that
/// rejects the header fails with `ExportError::SinkUnavailable`.
pub async fn export<Q, S>(
    service: &Q,
    request: ExportRequest,
    sink: &mut S,
) -> Result<ExportSummary, ExportError>
where
    Q: EmployeeQueryService + ?Sized,
    S: ExportSink + ?Sized,
{
    let prepared = prepare_export(service, request).await?;
    sink.set_header(prepared.header())
        .map_err(ExportError::sink)?;
    prepared.write_to(sink).await
}
