//! CSV boundary: reads an uploaded catalogue into ordered raw records.
//!
//! Headers drive the column names; they are trimmed, internal whitespace is
//! collapsed, and BOM/zero-width characters are stripped before the engine
//! sees them. The delimiter is sniffed from the header line.

use crate::core::catalogue::RawRecord;
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

pub fn load_catalogue(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalogue file: {}", path.display()))?;
    parse_catalogue(&text)
        .with_context(|| format!("Failed to parse catalogue file: {}", path.display()))
}

pub fn parse_catalogue(text: &str) -> Result<Vec<RawRecord>> {
    let delimiter = sniff_delimiter(text.lines().next().unwrap_or(""));
    debug!(delimiter = %char::from(delimiter), "Sniffed catalogue delimiter");

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("Catalogue has no header row")?
        .iter()
        .map(normalize_header)
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.context("Malformed catalogue row")?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        // Zipping drops trailing cells without a header and leaves missing
        // cells absent rather than empty.
        let columns = headers
            .iter()
            .cloned()
            .zip(row.iter().map(str::to_string))
            .collect();
        records.push(RawRecord::from_pairs(columns));
    }

    debug!(rows = records.len(), "Parsed catalogue CSV");
    Ok(records)
}

/// Picks the delimiter occurring most often in the header line; ties go to
/// the earlier candidate, so a single-column file stays comma-separated.
fn sniff_delimiter(header: &str) -> u8 {
    let mut best = DELIMITERS[0];
    let mut best_count = header.matches(char::from(best)).count();
    for candidate in &DELIMITERS[1..] {
        let count = header.matches(char::from(*candidate)).count();
        if count > best_count {
            best = *candidate;
            best_count = count;
        }
    }
    best
}

fn normalize_header(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}'))
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
