//! CSV parser for the Windows-1252 encoded GSS extract.

use csv::{ReaderBuilder, Trim};

use crate::error::Result;
use crate::survey::{RawTable, is_missing};

/// Code points for bytes 0x80..=0x9F; the rest of the range maps to itself.
const WINDOWS_1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// Decodes Windows-1252 bytes into a `String`. Every byte has a mapping.
pub fn decode_windows_1252(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => WINDOWS_1252_HIGH[(b - 0x80) as usize],
            _ => b as char,
        })
        .collect()
}

/// Parses the CSV body into a [`RawTable`], turning sentinels into `None`.
///
/// # Errors
///
/// Returns [`crate::PipelineError::SchemaMismatch`] for malformed CSV,
/// including rows whose length differs from the header.
pub fn parse_csv(bytes: &[u8]) -> Result<RawTable> {
    let text = decode_windows_1252(bytes);
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::None)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row = record
            .iter()
            .map(|cell| (!is_missing(cell)).then(|| cell.to_string()))
            .collect();
        rows.push(row);
    }

    RawTable::new(headers, rows)
}
