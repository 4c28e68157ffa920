use crate::error::{AnalysisError, Result};
use crate::signal::AnnotationRow;
use anyhow::Context;
use csv::{ByteRecord, ReaderBuilder};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Fields a line must carry when the tags column is omitted.
pub const MIN_FIELDS: usize = 3;
/// Fields a line carries with tags present.
pub const MAX_FIELDS: usize = 4;

/// Why a line was dropped from an annotation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Too few or too many comma-separated fields.
    Arity { fields: usize },
    InvalidOnset,
    InvalidOffset,
    /// A field was not valid UTF-8.
    Encoding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based line number in the input.
    pub line: u64,
    pub reason: SkipReason,
}

/// Rows that parsed cleanly, in input order, plus the lines that did not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedAnnotations {
    pub rows: Vec<AnnotationRow>,
    pub skipped: Vec<SkippedLine>,
}

/// Parse a headerless `wave_type,onset,offset[,tags]` record.
///
/// Bad lines are collected in `skipped` and never abort the parse; only a
/// failing reader does.
pub fn parse_annotations<R: Read>(reader: R) -> Result<ParsedAnnotations> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut parsed = ParsedAnnotations::default();
    let mut record = ByteRecord::new();
    loop {
        let line = reader.position().line();
        match reader.read_byte_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let line = record.position().map(|p| p.line()).unwrap_or(line);
                match parse_line(&record) {
                    Ok(row) => parsed.rows.push(row),
                    Err(reason) => {
                        debug!("skipping annotation line {}: {:?}", line, reason);
                        parsed.skipped.push(SkippedLine { line, reason });
                    }
                }
            }
            // A flexible byte-record reader only fails on I/O.
            Err(err) => return Err(AnalysisError::from(err)),
        }
    }
    debug!(
        "parsed {} annotation rows ({} skipped)",
        parsed.rows.len(),
        parsed.skipped.len()
    );
    Ok(parsed)
}

/// Parse an in-memory annotation record.
pub fn parse_annotations_str(text: &str) -> Result<ParsedAnnotations> {
    parse_annotations(text.as_bytes())
}

/// Read an annotation record from disk.
pub fn read_annotations(path: &Path) -> anyhow::Result<ParsedAnnotations> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_annotations(file).with_context(|| format!("reading {}", path.display()))
}

/// Turn one split line into a row, or say why it cannot be one.
pub fn parse_line(record: &ByteRecord) -> std::result::Result<AnnotationRow, SkipReason> {
    let fields = record.len();
    if !(MIN_FIELDS..=MAX_FIELDS).contains(&fields) {
        return Err(SkipReason::Arity { fields });
    }
    let wave_type = text_field(record, 0)?;
    let onset = integer_field(record, 1).ok_or(SkipReason::InvalidOnset)?;
    let offset = integer_field(record, 2).ok_or(SkipReason::InvalidOffset)?;
    let tags = if fields == MAX_FIELDS {
        text_field(record, 3)?.trim().to_string()
    } else {
        String::new()
    };
    Ok(AnnotationRow {
        wave_type: wave_type.to_string(),
        onset,
        offset,
        tags,
    })
}

fn text_field(record: &ByteRecord, idx: usize) -> std::result::Result<&str, SkipReason> {
    let raw = record.get(idx).unwrap_or_default();
    std::str::from_utf8(raw).map_err(|_| SkipReason::Encoding)
}

fn integer_field(record: &ByteRecord, idx: usize) -> Option<i64> {
    let raw = record.get(idx)?;
    std::str::from_utf8(raw).ok()?.trim().parse::<i64>().ok()
}
