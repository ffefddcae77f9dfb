//! Correction file parsing.
//!
//! Two line formats are accepted, one interval per line:
//!
//! ```text
//! # ISO 8601, start and end separated by a comma
//! 2019-03-02T12:02:00, 2019-03-02T12:05:00
//! # station archive format: date, start time, end time, BADDATA
//! 20190302 120200 120500 BADDATA
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. ISO ends are
//! exclusive. Archive ends name the last bad second and are inclusive, so
//! they become `end + 1 s`.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use metqc_interval::{Interval, Source, Variable};
use tracing::debug;

use crate::error::CorrectionError;

const LEGACY_MARKER: &str = "BADDATA";

/// Reads a correction file into intervals for `variable`.
///
/// # Errors
///
/// Returns [`CorrectionError::Read`] if the file cannot be read and
/// [`CorrectionError::MalformedCorrectionFile`] for the first line that is
/// neither blank, a comment, nor a valid interval.
pub fn read_correction_file(
    path: &Path,
    variable: Variable,
) -> Result<Vec<Interval>, CorrectionError> {
    let text = std::fs::read_to_string(path).map_err(|source| CorrectionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let intervals = parse_corrections(&text, variable, path)?;
    debug!(
        path = %path.display(),
        %variable,
        n_intervals = intervals.len(),
        "correction file read"
    );
    Ok(intervals)
}

/// Parses correction file contents. `path` is only used in error messages.
///
/// # Errors
///
/// Returns [`CorrectionError::MalformedCorrectionFile`] for the first
/// invalid line.
pub fn parse_corrections(
    text: &str,
    variable: Variable,
    path: &Path,
) -> Result<Vec<Interval>, CorrectionError> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let malformed = |reason: String| CorrectionError::MalformedCorrectionFile {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        };
        let (start, end) = parse_line(line).map_err(malformed)?;
        if start >= end {
            return Err(malformed(format!("end {end} is not after start {start}")));
        }
        out.push(Interval::new(start, end, variable, Source::Correction)?);
    }
    Ok(out)
}

fn parse_line(line: &str) -> Result<(NaiveDateTime, NaiveDateTime), String> {
    if line.contains(',') {
        return parse_iso_line(line);
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [date, start, end, marker] if *marker == LEGACY_MARKER => {
            let date = NaiveDate::parse_from_str(date, "%Y%m%d")
                .map_err(|e| format!("invalid date '{date}': {e}"))?;
            Ok((
                date.and_time(parse_compact_time(start)?),
                date.and_time(parse_compact_time(end)?) + TimeDelta::seconds(1),
            ))
        }
        _ => Err(format!(
            "expected '<start>, <end>' or 'YYYYMMDD HHMMSS HHMMSS {LEGACY_MARKER}', got '{line}'"
        )),
    }
}

fn parse_iso_line(line: &str) -> Result<(NaiveDateTime, NaiveDateTime), String> {
    let mut parts = line.split(',').map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) => Ok((parse_timestamp(start)?, parse_timestamp(end)?)),
        _ => Err("expected two comma-separated timestamps".to_string()),
    }
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    s.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|e| format!("invalid timestamp '{s}': {e}"))
}

fn parse_compact_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H%M%S").map_err(|e| format!("invalid time '{s}': {e}"))
}
