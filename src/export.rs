use crate::builder::ReportRow;
use crate::write_output_file;
use anyhow::{Context, Result};
use csv::Writer;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    day: u32,
    v1: Option<f64>,
    v2: Option<f64>,
    percent: Option<f64>,
    percent_formatted: &'a str,
    highlight: bool,
}

/// Writes the rows as CSV and returns the path actually written.
///
/// With `archive` set the output is gzipped and `.gz` is appended to the path.
///
/// # Errors
///
/// Fails when a row cannot be serialized, compression fails, or the file cannot be written.
pub async fn save_rows_csv(rows: &[ReportRow], path: &Path, archive: bool) -> Result<PathBuf> {
    let serialized = serialize_rows(rows)?;
    if archive {
        let archived = archive_path(path);
        let compressed = gzip(&serialized)?;
        write_output_file(&archived, &compressed).await?;
        Ok(archived)
    } else {
        write_output_file(path, &serialized).await?;
        Ok(path.to_path_buf())
    }
}

fn serialize_rows(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(CsvRow {
                day: row.day,
                v1: row.v1.value(),
                v2: row.v2.value(),
                percent: row.percent,
                percent_formatted: &row.percent_formatted,
                highlight: row.highlight,
            })
            .with_context(|| format!("failed to serialize report row for day {}", row.day))?;
    }
    finalize_writer(writer, "report CSV writer")
}

fn finalize_writer(mut writer: Writer<Vec<u8>>, label: &str) -> Result<Vec<u8>> {
    writer
        .flush()
        .with_context(|| format!("failed to flush {label}"))?;
    writer
        .into_inner()
        .with_context(|| format!("failed to finalize {label}"))
}

fn gzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(bytes)
        .context("failed to compress CSV output")?;
    encoder.finish().context("failed to finish gzip stream")
}

fn archive_path(path: &Path) -> PathBuf {
    let mut archived = path.as_os_str().to_owned();
    archived.push(".gz");
    PathBuf::from(archived)
}
