//! CSV export functionality.
//!
//! Writes projected rows as RFC 4180 CSV: one header row of column titles,
//! then one line per employee. Quoting is delegated to the `csv` crate
//! (fields containing the delimiter, a quote or a line break are quoted and
//! embedded quotes doubled).
//!
//! Rows are encoded into a small in-memory chunk and handed to the async sink
//! every `CSV_CHUNK_ROWS` rows. Each chunk is awaited before the next one is
//! encoded, so a slow consumer suspends the producer instead of growing a buffer.

use csv::{Terminator, Writer, WriterBuilder};
use log::debug;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::config::CSV_CHUNK_ROWS;
use crate::error_handling::ExportError;
use crate::storage::EmployeeRecord;

use super::projector::{project, Column};

/// Counters reported by [`write_csv`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvOutcome {
    /// Data rows written (header excluded)
    pub rows: usize,
    /// Bytes accepted by the sink
    pub bytes: u64,
}

fn chunk_writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

/// Drains the encoded chunk into `sink`, leaving a fresh encoder behind.
async fn flush_chunk<W>(encoder: &mut Writer<Vec<u8>>, sink: &mut W) -> Result<u64, ExportError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let full = std::mem::replace(encoder, chunk_writer());
    let bytes = full
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))?;
    if bytes.is_empty() {
        return Ok(0);
    }
    sink.write_all(&bytes).await.map_err(ExportError::sink)?;
    Ok(bytes.len() as u64)
}

/// Streams `records` as CSV into `sink`, projecting each one onto `columns`.
///
/// The header row always names `columns` by their display titles, so an
/// empty `records` produces a header-only document.
///
/// # Errors
///
/// - `ExportError::DataIntegrity` if a record cannot be projected.
/// - `ExportError::SinkUnavailable` if the sink rejects a write or flush.
pub async fn write_csv<W>(
    records: &[EmployeeRecord],
    columns: &[Column],
    sink: &mut W,
) -> Result<CsvOutcome, ExportError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut encoder = chunk_writer();
    let mut outcome = CsvOutcome::default();

    encoder.write_record(columns.iter().map(|c| c.title()))?;
    let mut pending = 1;

    for (index, record) in records.iter().enumerate() {
        let row = project(index, record, columns)?;
        encoder.write_record(row.values())?;
        outcome.rows += 1;
        pending += 1;

        if pending >= CSV_CHUNK_ROWS {
            outcome.bytes += flush_chunk(&mut encoder, sink).await?;
            pending = 0;
        }
    }

    outcome.bytes += flush_chunk(&mut encoder, sink).await?;
    sink.flush().await.map_err(ExportError::sink)?;

    debug!(
        "CSV export wrote {} rows ({} bytes)",
        outcome.rows, outcome.bytes
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::money::Money;
    use chrono::{DateTime, Utc};
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    fn employee(id: i64, name: &str, department: Option<&str>) -> EmployeeRecord {
        let ts = DateTime::<Utc>::from_timestamp_millis(1_704_067_200_000 + id * 1000).unwrap();
        EmployeeRecord {
            id,
            name: name.to_string(),
            email: format!("user{}@company.com", id),
            salary: Some(Money::from_cents(7_500_000 + id)),
            department_name: department.map(str::to_string),
            created_at: ts,
            updated_at: ts,
        }
    }

    fn parse(bytes: &[u8]) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);
        let headers = reader
            .headers()
            .expect("headers")
            .iter()
            .map(String::from)
            .collect();
        let rows = reader
            .records()
            .map(|r| r.expect("record").iter().map(String::from).collect())
            .collect();
        (headers, rows)
    }

    #[tokio::test]
    async fn test_header_and_one_line_per_row() {
        let records: Vec<_> = (1..=3)
            .map(|i| employee(i, "Employee", Some("Sales")))
            .collect();
        let columns = Column::set(false);
        let mut out = Vec::new();
        let outcome = write_csv(&records, columns, &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out.clone()).unwrap();
        assert_eq!(text.lines().count(), 1 + records.len());
        assert!(text.starts_with("ID,Name,Email,Department,Salary\n"));
        assert_eq!(outcome.rows, 3);
        assert_eq!(outcome.bytes, out.len() as u64);
    }

    #[tokio::test]
    async fn test_fields_are_escaped_and_round_trip() {
        let records = vec![
            employee(1, "Smith, John", Some("R&D")),
            employee(2, "Jane \"JJ\" Doe", None),
            employee(3, "Line\nBreak", Some("Sales")),
        ];
        let columns = Column::set(false);
        let mut out = Vec::new();
        write_csv(&records, columns, &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out.clone()).unwrap();
        assert!(text.contains("\"Smith, John\""));
        assert!(text.contains("\"Jane \"\"JJ\"\" Doe\""));

        let (headers, rows) = parse(&out);
        assert_eq!(headers, vec!["ID", "Name", "Email", "Department", "Salary"]);
        for (record, parsed) in records.iter().zip(rows.iter()) {
            let projected: Vec<String> = project(0, record, columns)
                .unwrap()
                .values()
                .map(String::from)
                .collect();
            assert_eq!(&projected, parsed);
        }
        assert_eq!(rows[1][3], "N/A");
    }

    #[tokio::test]
    async fn test_empty_input_is_header_only() {
        let columns = Column::set(false);
        let mut out = Vec::new();
        let outcome = write_csv(&[], columns, &mut out).await.unwrap();
        assert_eq!(outcome.rows, 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ID,Name,Email,Department,Salary\n"
        );
    }

    #[tokio::test]
    async fn test_timestamp_columns_in_header() {
        let columns = Column::set(true);
        let mut out = Vec::new();
        write_csv(&[employee(1, "A", Some("Sales"))], columns, &mut out)
        .await
        .unwrap();
        let (headers, rows) = parse(&out);
        assert_eq!(headers.len(), 7);
        assert_eq!(&headers[5..], &["Created At", "Updated At"]);
        assert_eq!(rows[0][5], "2024-01-01T00:00:01.000Z");
    }

    #[tokio::test]
    async fn test_many_rows_span_several_chunks() {
        let records: Vec<_> = (1..=(CSV_CHUNK_ROWS as i64 * 2 + 17))
            .map(|i| employee(i, "Chunked", Some("Ops")))
            .collect();
        let columns = Column::set(false);
        let mut out = Vec::new();
        let outcome = write_csv(&records, columns, &mut out)
            .await
            .unwrap();
        assert_eq!(outcome.rows, records.len());
        let (_, rows) = parse(&out);
        assert_eq!(rows.len(), records.len());
        assert_eq!(rows.last().unwrap()[0], records.last().unwrap().id.to_string());
    }

    #[tokio::test]
    async fn test_backpressure_never_drops_rows() {
        // A tiny duplex buffer forces the writer to wait for the reader on every chunk.
        let records: Vec<_> = (1..=1000)
            .map(|i| employee(i, "Backpressure", Some("Finance")))
            .collect();
        let columns = Column::set(true);
        let (mut writer, mut reader) = tokio::io::duplex(64);

        let consumer = tokio::spawn(async move {
            use tokio::io::AsyncReadExt;
            let mut received = Vec::new();
            reader.read_to_end(&mut received).await.unwrap();
            received
        });

        let outcome = write_csv(&records, columns, &mut writer).await.unwrap();
        drop(writer);

        let received = consumer.await.unwrap();
        assert_eq!(outcome.bytes, received.len() as u64);
        let (_, parsed) = parse(&received);
        assert_eq!(parsed.len(), 1000);
    }

    #[tokio::test]
    async fn test_missing_salary_stops_the_stream() {
        let mut broken = employee(2, "No Salary", Some("Sales"));
        broken.salary = None;
        let records = vec![employee(1, "ok", None), broken];
        let mut out = Vec::new();
        let err = write_csv(&records, Column::set(false), &mut out)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::DataIntegrity {
                index: 1,
                field: "salary"
            }
        ));
    }

    #[tokio::test]
    async fn test_write_csv_runs_on_spawned_task() {
        let records: Vec<_> = (1..=(CSV_CHUNK_ROWS as i64 + 3))
            .map(|i| employee(i, "Spawned", Some("Sales")))
            .collect();
        let handle = tokio::spawn(async move {
            let mut out = Vec::new();
            let outcome = write_csv(&records, Column::set(true), &mut out).await?;
            Ok::<_, ExportError>((outcome, out))
        });

        let (outcome, out) = handle.await.unwrap().unwrap();
        assert_eq!(outcome.rows, CSV_CHUNK_ROWS + 3);
        assert_eq!(outcome.bytes, out.len() as u64);
    }

    /// Sink that rejects every write.
    struct ClosedSink;

    impl AsyncWrite for ClosedSink {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "consumer gone")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_closed_sink_is_sink_unavailable() {
        let columns = Column::set(false);
        let err = write_csv(&Vec::new(), columns, &mut ClosedSink)
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::SinkUnavailable(_)));
    }
}
