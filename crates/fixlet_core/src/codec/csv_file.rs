//! CSV stream and file codec.
//!
//! # Responsibility
//! - Decode positional rows into `FixletRecord` values.
//! - Encode records behind the fixed header line.
//! - Scope file handles to a single full read or a single full write.

use super::{CodecError, CodecResult};
use crate::model::record::{FixletRecord, RECORD_HEADER};
use csv::{ReaderBuilder, WriterBuilder};
use log::{error, info};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;

/// Decodes a header line followed by one record per data line.
///
/// The header content is discarded; fields are matched by position.
///
/// # Errors
/// - `MissingHeader` when the source is empty.
/// - `MalformedQuoting` when a quote is stray, trailed by text, or unclosed.
/// - `MalformedRow` when the header or a row has a field count other than five.
/// - `Read` when the source cannot be read or is not valid UTF-8.
pub fn decode<R: Read>(mut source: R) -> CodecResult<Vec<FixletRecord>> {
    let mut bytes = Vec::new();
    source
        .read_to_end(&mut bytes)
        .map_err(|err| read_error(csv::Error::from(err)))?;
    if let Some(line) = find_malformed_quote(&bytes) {
        return Err(CodecError::MalformedQuoting { path: None, line });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let header = reader.headers().map_err(read_error)?;
    if header.is_empty() {
        return Err(CodecError::MissingHeader { path: None });
    }
    if header.len() != RECORD_HEADER.len() {
        return Err(CodecError::MalformedRow {
            path: None,
            line: header.position().map_or(1, |position| position.line()),
            found: header.len(),
        });
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(read_error)?;
        if row.len() != RECORD_HEADER.len() {
            return Err(CodecError::MalformedRow {
                path: None,
                line: row.position().map_or(0, |position| position.line()),
                found: row.len(),
            });
        }
        records.push(row.deserialize::<FixletRecord>(None).map_err(read_error)?);
    }

    Ok(records)
}

#[derive(Clone, Copy)]
enum FieldScan {
    Start,
    Unquoted,
    Quoted,
    /// Saw a quote inside a quoted field: either an escape or the close.
    Closed,
}

/// Returns the 1-based line of the first quoting violation, if any.
///
/// Mirrors strict RFC 4180: a quote may only open a field, `""` escapes a
/// quote inside a quoted field, and a closing quote must be followed by a
/// delimiter or line end. The `csv` reader accepts all of these silently.
fn find_malformed_quote(bytes: &[u8]) -> Option<u64> {
    let mut state = FieldScan::Start;
    let mut line = 1;
    let mut opened_at = 1;

    for &byte in bytes {
        state = match (state, byte) {
            (FieldScan::Quoted, b'"') => FieldScan::Closed,
            (FieldScan::Quoted, b'\n') => {
                line += 1;
                FieldScan::Quoted
            }
            (FieldScan::Quoted, _) => FieldScan::Quoted,
            (FieldScan::Closed, b'"') => FieldScan::Quoted,
            (_, b',') => FieldScan::Start,
            (_, b'\n') => {
                line += 1;
                FieldScan::Start
            }
            (FieldScan::Closed, b'\r') => FieldScan::Closed,
            (FieldScan::Closed, _) => return Some(line),
            (FieldScan::Start, b'"') => {
                opened_at = line;
                FieldScan::Quoted
            }
            (_, b'"') => return Some(line),
            _ => FieldScan::Unquoted,
        };
    }

    matches!(state, FieldScan::Quoted).then_some(opened_at)
}

/// Encodes the header line and every record in the given order.
///
/// Fields are quoted only when they contain delimiter or quote characters.
pub fn encode<W: Write>(records: &[FixletRecord], destination: W) -> CodecResult<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(destination);

    writer.write_record(RECORD_HEADER).map_err(write_error)?;
    for record in records {
        writer.serialize(record).map_err(write_error)?;
    }
    writer
        .flush()
        .map_err(|err| write_error(csv::Error::from(err)))?;

    Ok(())
}

/// Loads every record from the file at `path`.
///
/// # Side effects
/// - Opens the file once and releases it before returning.
/// - Emits `codec_load` logging events with duration and status.
pub fn load_records(path: impl AsRef<Path>) -> CodecResult<Vec<FixletRecord>> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=codec_load module=codec status=start");

    let result = File::open(path)
        .map_err(|err| read_error(csv::Error::from(err)))
        .and_then(|file| decode(file))
        .map_err(|err| err.at(path));

    match &result {
        Ok(records) => info!(
            "event=codec_load module=codec status=ok duration_ms={} records={}",
            started_at.elapsed().as_millis(),
            records.len()
        ),
        Err(err) => error!(
            "event=codec_load module=codec status=error duration_ms={} error_code=codec_read_failed error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }

    result
}

/// Replaces the file at `path` with the given records.
///
/// # Side effects
/// - Creates or truncates the file, writes everything, flushes, then closes.
/// - Emits `codec_save` logging events with duration and status.
pub fn save_records(path: impl AsRef<Path>, records: &[FixletRecord]) -> CodecResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=codec_save module=codec status=start");

    let result = File::create(path)
        .map_err(|err| write_error(csv::Error::from(err)))
        .and_then(|file| encode(records, file))
        .map_err(|err| err.at(path));

    match &result {
        Ok(()) => info!(
            "event=codec_save module=codec status=ok duration_ms={} records={}",
            started_at.elapsed().as_millis(),
            records.len()
        ),
        Err(err) => error!(
            "event=codec_save module=codec status=error duration_ms={} error_code=codec_write_failed error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }

    result
}

fn read_error(source: csv::Error) -> CodecError {
    CodecError::Read { path: None, source }
}

fn write_error(source: csv::Error) -> CodecError {
    CodecError::Write { path: None, source }
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};
    use crate::codec::{CodecDirection, CodecError};
    use crate::model::record::FixletRecord;

    const HEADER: &str = "SiteID,FixletID,Name,Criticality,RelevantComputerCount\n";

    #[test]
    fn decode_discards_header_and_keeps_row_order() {
        let source = format!("{HEADER}S1,F2,Second,High,5\nS1,F1,First,Low,3");
        let records = decode(source.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                FixletRecord::new("S1", "F2", "Second", "High", 5),
                FixletRecord::new("S1", "F1", "First", "Low", 3),
            ]
        );
    }

    #[test]
    fn decode_coerces_unparsable_count_to_zero() {
        let source = format!("{HEADER}S1,F1,Name,High,abc\nS2,F2,Other,Low,9\n");
        let records = decode(source.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].relevant_computer_count, 0);
        assert_eq!(records[1].relevant_computer_count, 9);
    }

    #[test]
    fn decode_header_only_yields_empty_dataset() {
        let records = decode(HEADER.as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn decode_rejects_empty_source() {
        let err = decode("".as_bytes()).unwrap_err();
        assert!(matches!(err, CodecError::MissingHeader { path: None }));
        assert_eq!(err.direction(), CodecDirection::Read);
    }

    #[test]
    fn decode_short_row_is_fatal() {
        let source = format!("{HEADER}S1,F1,Name,High,4\nS2,F2,Broken\n");
        let err = decode(source.as_bytes()).unwrap_err();

        assert!(
            matches!(err, CodecError::MalformedRow { line: 3, found: 3, .. }),
            "unexpected error: {err}"
        );
        assert_eq!(err.direction(), CodecDirection::Read);
    }

    #[test]
    fn decode_long_row_is_fatal() {
        let source = format!("{HEADER}S1,F1,Name,High,4,extra\n");
        let err = decode(source.as_bytes()).unwrap_err();
        assert!(matches!(err, CodecError::MalformedRow { found: 6, .. }));
    }

    #[test]
    fn decode_rejects_text_after_closing_quote() {
        let source = format!("{HEADER}S1,\"F1\"x,Name,High,5\n");
        let err = decode(source.as_bytes()).unwrap_err();

        assert!(
            matches!(err, CodecError::MalformedQuoting { line: 2, .. }),
            "unexpected error: {err}"
        );
        assert_eq!(err.direction(), CodecDirection::Read);
    }

    #[test]
    fn decode_rejects_bare_quote_in_unquoted_field() {
        let source = format!("{HEADER}S1,F1,Name,High,5\nS1,F\"1,Name,High,5\n");
        let err = decode(source.as_bytes()).unwrap_err();
        assert!(matches!(err, CodecError::MalformedQuoting { line: 3, .. }));
    }

    #[test]
    fn decode_rejects_unclosed_quote() {
        let source = format!("{HEADER}S1,\"F1,Name,High,5\n");
        let err = decode(source.as_bytes()).unwrap_err();
        assert!(matches!(err, CodecError::MalformedQuoting { line: 2, .. }));
    }

    #[test]
    fn decode_accepts_escaped_quotes_and_embedded_newlines() {
        let source = format!("{HEADER}S1,F1,\"Say \"\"hi\"\"\nthere\",High,5\r\n");
        let records = decode(source.as_bytes()).unwrap();
        assert_eq!(records[0].name, "Say \"hi\"\nthere");
    }

    #[test]
    fn decode_accepts_empty_quoted_field() {
        let source = format!("{HEADER}S1,F1,\"\",High,5\n");
        let records = decode(source.as_bytes()).unwrap();
        assert_eq!(records[0].name, "");
        assert_eq!(records[0].criticality, "High");
    }

    #[test]
    fn decode_rejects_header_with_wrong_field_count() {
        let source = "SiteID,FixletID,Name\nS1,F1,Name,High,5\n";
        let err = decode(source.as_bytes()).unwrap_err();

        assert!(
            matches!(err, CodecError::MalformedRow { line: 1, found: 3, .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn encode_writes_fixed_header_and_decimal_counts() {
        let records = vec![
            FixletRecord::new("S1", "F1", "Patch", "High", 12),
            FixletRecord::new("S2", "F2", "Other", "Low", 0),
        ];
        let mut buffer = Vec::new();
        encode(&records, &mut buffer).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            format!("{HEADER}S1,F1,Patch,High,12\nS2,F2,Other,Low,0\n")
        );
    }

    #[test]
    fn encode_empty_dataset_still_writes_header() {
        let mut buffer = Vec::new();
        encode(&[], &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), HEADER);
    }

    #[test]
    fn encoded_records_decode_back_unchanged() {
        let records = vec![
            FixletRecord::new("S9", "F10", "Name with, comma", "Critical", 77),
            FixletRecord::new("S1", "F1", "Plain", "Low", 1),
            FixletRecord::new("S1", "F1", "Duplicate key", "Low", 2),
        ];
        let mut buffer = Vec::new();
        encode(&records, &mut buffer).unwrap();

        assert_eq!(decode(buffer.as_slice()).unwrap(), records);
    }
}
