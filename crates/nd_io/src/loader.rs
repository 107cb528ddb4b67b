//! Loader: normalize delimited notification text into a typed `Dataset`.
//!
//! Contract:
//! - The first non-blank line is the header; it must name the area, date and
//!   count columns from `Params` (extra columns are ignored).
//! - Rows with a field count different from the header, an unparsable date, a
//!   non-numeric or negative count, or an empty area are **dropped and
//!   counted**. Nothing is ever coerced to zero or to an epoch date.
//! - If no row survives, the load fails with `EmptyDataset`.
//! No network I/O; the caller hands in text (or a local path).

#![forbid(unsafe_code)]

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use nd_core::entities::{Dataset, LoadReport, NormalizedRecord, SkipCounts, SkipReason};
use tracing::{debug, info, warn};

use crate::{config::Params, hasher, LoadError};

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    area: usize,
    date: usize,
    count: usize,
    width: usize,
}

// ----------------------------- Entry points -----------------------------

/// Normalize raw text into a `Dataset`, counting skipped rows.
pub fn load(raw_text: &str, params: &Params) -> Result<Dataset, LoadError> {
    params.validate_domains()?;

    let source_sha256 = hasher::sha256_hex(raw_text.as_bytes());
    let text = raw_text.strip_prefix('\u{feff}').unwrap_or(raw_text);

    let mut rdr = ReaderBuilder::new()
        .delimiter(params.delimiter_byte())
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| LoadError::MalformedInput(format!("unreadable header row: {e}")))?
        .clone();
    let cols = resolve_columns(&headers, params)?;

    let mut records: Vec<NormalizedRecord> = Vec::new();
    let mut skipped = SkipCounts::default();
    let mut rows_read = 0usize;

    for result in rdr.records() {
        rows_read += 1;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "skipping unreadable row");
                skipped.record(SkipReason::FieldCount);
                continue;
            }
        };

        match normalize_row(&row, cols, params) {
            Ok(rec) => records.push(rec),
            Err(reason) => {
                let line = row.position().map(|p| p.line()).unwrap_or(0);
                debug!(line, reason = reason.as_str(), "skipping row");
                skipped.record(reason);
            }
        }
    }

    if records.is_empty() {
        return Err(LoadError::EmptyDataset { rows_read, skipped: skipped.total() });
    }

    if skipped.total() > 0 {
        warn!(
            skipped = skipped.total(),
            field_count = skipped.field_count,
            invalid_date = skipped.invalid_date,
            invalid_count = skipped.invalid_count,
            empty_area = skipped.empty_area,
            "rows excluded during normalization"
        );
    }

    let report = LoadReport {
        rows_read,
        rows_kept: records.len(),
        skipped,
        source_sha256,
    };
    let dataset = Dataset::new(records, report);
    info!(
        rows_kept = dataset.len(),
        areas = dataset.areas().len(),
        years = dataset.years().len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Read a local UTF-8 file and normalize it.
pub fn load_from_path(path: &Path, params: &Params) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| LoadError::Read(format!("{}: {e}", path.display())))?;
    load(&text, params)
}

// ----------------------------- Header -----------------------------

fn resolve_columns(headers: &StringRecord, params: &Params) -> Result<ColumnMap, LoadError> {
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(LoadError::MalformedInput("missing header row".into()));
    }

    let find = |wanted: &str| -> Result<usize, LoadError> {
        let wanted = wanted.trim();
        headers
            .iter()
            .position(|h| h == wanted)
            .or_else(|| headers.iter().position(|h| h.to_lowercase() == wanted.to_lowercase()))
            .ok_or_else(|| {
                LoadError::MalformedInput(format!("header is missing required column '{wanted}'"))
            })
    };

    Ok(ColumnMap {
        area: find(&params.area_column)?,
        date: find(&params.date_column)?,
        count: find(&params.count_column)?,
        width: headers.len(),
    })
}

// ----------------------------- Rows -----------------------------

fn normalize_row(
    row: &StringRecord,
    cols: ColumnMap,
    params: &Params,
) -> Result<NormalizedRecord, SkipReason> {
    if row.len() != cols.width {
        return Err(SkipReason::FieldCount);
    }
    let field = |i: usize| row.get(i).unwrap_or("");

    let area = field(cols.area);
    if area.is_empty() {
        return Err(SkipReason::EmptyArea);
    }
    let date = parse_date(field(cols.date), &params.date_formats).ok_or(SkipReason::InvalidDate)?;
    let count = parse_count(field(cols.count)).ok_or(SkipReason::InvalidCount)?;

    Ok(NormalizedRecord::new(area, date, count))
}

/// RFC 3339 first, then the first format that yields a valid calendar date.
/// Time parts are dropped; an offset timestamp keeps the date as written.
pub fn parse_date(s: &str, formats: &[String]) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    formats.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(s, fmt)
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(s, fmt).ok().map(|dt| dt.date()))
    })
}

/// Non-negative integer only: "-3", "1.5", "abc" and "" are all rejected.
pub fn parse_count(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() || s.starts_with('-') {
        return None;
    }
    s.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Município;Date;Notifications";

    fn p() -> Params { Params::default() }

    fn fmts() -> Vec<String> { p().date_formats }

    #[test]
    fn scenario_three_rows() {
        let text = format!("{HEADER}\nA;2020-01-15;5\nA;2020-02-10;3\nB;2020-01-01;2\n");
        let ds = load(&text, &p()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.areas(), &["A".to_string(), "B".to_string()]);
        assert_eq!(ds.years(), &[2020]);
        assert_eq!(ds.report().rows_read, 3);
        assert_eq!(ds.report().skipped_total(), 0);
        assert_eq!(ds.report().source_sha256.len(), 64);
    }

    #[test]
    fn header_only_is_empty_dataset() {
        let err = load(&format!("{HEADER}\n"), &p()).unwrap_err();
        assert!(matches!(err, LoadError::EmptyDataset { rows_read: 0, skipped: 0 }));
    }

    #[test]
    fn empty_text_is_malformed() {
        assert!(matches!(load("", &p()), Err(LoadError::MalformedInput(_))));
    }

    #[test]
    fn missing_required_column_is_malformed() {
        let err = load("Município;Data;Notifications\nA;2020-01-01;1\n", &p()).unwrap_err();
        match err {
            LoadError::MalformedInput(m) => assert!(m.contains("Date"), "{m}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn all_rows_bad_is_empty_dataset_with_counts() {
        let text = format!("{HEADER}\nA;not-a-date;1\nB;2020-01-01;-4\n");
        let err = load(&text, &p()).unwrap_err();
        assert!(matches!(err, LoadError::EmptyDataset { rows_read: 2, skipped: 2 }));
    }

    #[test]
    fn bad_rows_are_skipped_and_counted_by_reason() {
        let text = format!(
            "{HEADER}\n\
             A;2020-01-15;5\n\
             A;2020-13-40;7\n\
             A;2020-02-10;abc\n\
             A;2020-02-11;-1\n\
             A;2020-02-12\n\
             ;2020-02-13;9\n\
             B;2020-03-01;2;extra\n\
             B;2020-03-02;4\n"
        );
        let ds = load(&text, &p()).unwrap();
        let r = ds.report();
        assert_eq!(r.rows_read, 8);
        assert_eq!(r.rows_kept, 2);
        assert_eq!(r.skipped.invalid_date, 1);
        assert_eq!(r.skipped.invalid_count, 2);
        assert_eq!(r.skipped.field_count, 2);
        assert_eq!(r.skipped.empty_area, 1);
        let total: u64 = ds.records().iter().map(|x| x.notifications()).sum();
        assert_eq!(total, 9);
    }

    #[test]
    fn bom_blank_lines_whitespace_and_extra_columns() {
        let text = "\u{feff}Id;Município;Date;Notifications;Source\n\
                    \n\
                    1; Manaus ; 2019-07-04 ; 12 ;x\n\
                    \n\
                    2;Tefé;2019/08/01;3;y\n";
        let ds = load(text, &p()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].area_name(), "Manaus");
        assert_eq!(ds.records()[1].month().index0(), 7);
        assert_eq!(ds.report().rows_read, 2);
    }

    #[test]
    fn header_match_falls_back_to_case_insensitive() {
        let ds = load("MUNICÍPIO;date;NOTIFICATIONS\nA;2020-01-01;1\n", &p()).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn custom_columns_and_delimiter() {
        let mut params = p();
        params.delimiter = ',';
        params.area_column = "city".into();
        params.date_column = "day".into();
        params.count_column = "cases".into();
        let ds = load("day,city,cases\n2021-05-05,X,10\n", &params).unwrap();
        assert_eq!(ds.records()[0].area_name(), "X");
        assert_eq!(ds.records()[0].notifications(), 10);
    }

    #[test]
    fn date_formats() {
        let f = fmts();
        assert_eq!(parse_date("2020-01-15", &f), NaiveDate::from_ymd_opt(2020, 1, 15));
        assert_eq!(parse_date("2020/01/15", &f), NaiveDate::from_ymd_opt(2020, 1, 15));
        assert_eq!(parse_date("2020-01-15T23:59:59", &f), NaiveDate::from_ymd_opt(2020, 1, 15));
        assert_eq!(parse_date("2020-01-15 08:00:00", &f), NaiveDate::from_ymd_opt(2020, 1, 15));
    }

    #[test]
    fn iso_timestamps_keep_the_written_date() {
        let f = fmts();
        let jan15 = NaiveDate::from_ymd_opt(2020, 1, 15);
        for s in [
            "2020-01-15T10:00:00Z",
            "2020-01-15T10:00:00.000Z",
            "2020-01-15T10:00:00.123",
            "2020-01-15T10:00",
            "2020-01-15T23:30:00-04:00",
            "2020-01-15 10:00:00.5",
        ] {
            assert_eq!(parse_date(s, &f), jan15, "{s}");
        }
        // RFC 3339 is tried even when the caller narrows the format list.
        assert_eq!(parse_date("2020-01-15T10:00:00Z", &["%d/%m/%Y".to_string()]), jan15);
    }

    #[test]
    fn utc_timestamp_rows_load() {
        let text = format!(
            "{HEADER}\nA;2020-01-01T00:00:00.000Z;2\nB;2020-02-01T00:00:00.000Z;3\n"
        );
        let ds = load(&text, &p()).unwrap();
        assert_eq!(ds.report().rows_kept, 2);
        assert_eq!(ds.report().skipped.total(), 0);
        assert_eq!(ds.records()[1].date(), NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
    }

    #[test]
    fn date_formats_rejections() {
        let f = fmts();
        assert_eq!(parse_date("2020-02-30", &f), None);
        assert_eq!(parse_date("2020-02-30T10:00:00Z", &f), None);
        assert_eq!(parse_date("15/01/2020", &f), None);
        assert_eq!(parse_date("", &f), None);
        assert_eq!(
            parse_date("15/01/2020", &["%d/%m/%Y".to_string()]),
            NaiveDate::from_ymd_opt(2020, 1, 15)
        );
    }

    #[test]
    fn counts() {
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count(" 42 "), Some(42));
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("-0"), None);
        assert_eq!(parse_count("1.5"), None);
        assert_eq!(parse_count("NaN"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn load_from_path_reads_utf8_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{HEADER}").unwrap();
        writeln!(f, "Tefé;2018-03-03;4").unwrap();
        f.flush().unwrap();
        let ds = load_from_path(f.path(), &p()).unwrap();
        assert_eq!(ds.areas(), &["Tefé".to_string()]);
    }

    #[test]
    fn load_from_missing_path_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("absent.csv"), &p()).unwrap_err();
        assert!(matches!(err, LoadError::Read(_)));
    }
}
