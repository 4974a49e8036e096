//! Want-list parsing from pasted text and CSV uploads
//!
//! Paste format, one card per line:
//!
//! ```text
//! Set: Scarlet & Violet 151 (English)
//! 003 | Venusaur ex | holo | 1 | 30
//! 066 | Machop | reverse | 2 | 2
//! ```
//!
//! Columns are `card_number | card_name | finish | quantity | max_price`;
//! trailing columns may be left out. `Set:` and `Language:` lines set defaults
//! for the rows that follow. Parsing never rejects a row: incomplete rows come
//! back incomplete and are reported by validation.

use log::{debug, info, warn};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::models::WantRow;

/// List-level values filled into rows that leave them out
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WantListDefaults {
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub set_code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl WantListDefaults {
    /// Fills missing set and language fields; values already on the row win
    pub fn apply(&self, rows: &mut [WantRow]) {
        for row in rows.iter_mut() {
            fill(&mut row.set_name, &self.set_name);
            fill(&mut row.set_code, &self.set_code);
            fill(&mut row.language, &self.language);
        }
    }
}

fn fill(slot: &mut Option<String>, default: &Option<String>) {
    let missing = slot.as_deref().map_or(true, |v| v.trim().is_empty());
    if missing {
        if let Some(value) = default.as_deref().filter(|v| !v.trim().is_empty()) {
            *slot = Some(value.to_string());
        }
    }
}

/// Parses a number that may use a comma as decimal separator
fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Whole card count; a positive fraction below one still asks for a card
fn whole_quantity(value: f64) -> i64 {
    if value > 0.0 && value < 1.0 {
        1
    } else {
        value.trunc() as i64
    }
}

/// Quantity cell: unparsable or zero means the default of 1
fn paste_quantity(text: &str) -> i64 {
    match parse_number(text).map(whole_quantity) {
        Some(q) if q != 0 => q,
        _ => 1,
    }
}

/// Price cell: unparsable or zero means no ceiling
fn paste_max_price(text: &str) -> Option<f64> {
    parse_number(text).filter(|p| *p != 0.0)
}

/// Maps a language name or code to the upper-case code used in stock records
pub fn language_code(name: &str) -> Option<&'static str> {
    match name.trim().to_lowercase().as_str() {
        "en" | "english" | "englisch" => Some("EN"),
        "de" | "german" | "deutsch" => Some("DE"),
        "fr" | "french" | "français" | "francais" => Some("FR"),
        "it" | "italian" | "italiano" => Some("IT"),
        "es" | "spanish" | "español" | "espanol" => Some("ES"),
        "jp" | "ja" | "japanese" => Some("JP"),
        _ => None,
    }
}

/// Splits `Scarlet & Violet 151 (English)` into the set name and a language code
fn split_set_directive(value: &str) -> (String, Option<&'static str>) {
    let value = value.trim();
    if let Some(open) = value.rfind('(') {
        if value.ends_with(')') {
            let inner = &value[open + 1..value.len() - 1];
            if let Some(code) = language_code(inner) {
                return (value[..open].trim().to_string(), Some(code));
            }
        }
    }
    (value.to_string(), None)
}

/// Recognises `Set: ...` and `Language: ...` lines. Other `key: value` lines
/// without a pipe (budget, notes) are not directives and parse as rows.
fn apply_directive(line: &str, defaults: &mut WantListDefaults) -> bool {
    if line.contains('|') {
        return false;
    }
    let Some((key, value)) = line.split_once(':') else {
        return false;
    };
    match key.trim().to_lowercase().as_str() {
        "set" => {
            let (set_name, language) = split_set_directive(value);
            debug!("Paste directive: set '{set_name}' (language {language:?})");
            defaults.set_name = Some(set_name).filter(|s| !s.is_empty());
            if let Some(code) = language {
                defaults.language = Some(code.to_string());
            }
            true
        }
        "language" | "lang" => {
            let value = value.trim();
            let code = language_code(value)
                .map(str::to_string)
                .unwrap_or_else(|| value.to_uppercase());
            debug!("Paste directive: language {code}");
            defaults.language = Some(code).filter(|c| !c.is_empty());
            true
        }
        _ => false,
    }
}

/// Parses pipe-delimited paste text into want-list rows.
///
/// Blank lines are dropped. The first field only counts as a card number when
/// it starts with a digit.
pub fn parse_paste(text: &str) -> Vec<WantRow> {
    let mut rows = Vec::new();
    let mut defaults = WantListDefaults::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if apply_directive(line, &mut defaults) {
            continue;
        }

        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        let field = |i: usize| parts.get(i).copied().filter(|p| !p.is_empty());

        let mut row = WantRow {
            card_number: field(0)
                .filter(|p| p.starts_with(|c: char| c.is_ascii_digit()))
                .map(str::to_string),
            card_name: field(1).map(str::to_string),
            finish: field(2).map(str::to_string),
            quantity: field(3).map(paste_quantity),
            max_price: field(4).and_then(paste_max_price),
            ..Default::default()
        };
        defaults.apply(std::slice::from_mut(&mut row));
        rows.push(row);
    }

    info!("Parsed {} want-list rows from pasted text", rows.len());
    rows
}

/// One CSV record; every column optional and read as text first
#[derive(Debug, Default, Deserialize)]
struct CsvWantRecord {
    #[serde(default)]
    set_name: Option<String>,
    #[serde(default)]
    set_code: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    card_number: Option<String>,
    #[serde(default)]
    card_name: Option<String>,
    #[serde(default)]
    finish: Option<String>,
    #[serde(default)]
    quantity: Option<String>,
    #[serde(default)]
    max_price: Option<String>,
    #[serde(default)]
    min_condition: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<CsvWantRecord> for WantRow {
    fn from(record: CsvWantRecord) -> Self {
        let text = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let quantity = record.quantity.as_deref().and_then(|q| {
            let parsed = parse_number(q).map(whole_quantity);
            if parsed.is_none() && !q.trim().is_empty() {
                warn!("Ignoring unparsable quantity '{q}'");
            }
            parsed
        });

        WantRow {
            set_name: text(record.set_name),
            set_code: text(record.set_code),
            language: text(record.language),
            card_number: text(record.card_number),
            card_name: text(record.card_name),
            finish: text(record.finish),
            quantity,
            max_price: record.max_price.as_deref().and_then(parse_number),
            min_condition: text(record.min_condition),
            notes: text(record.notes),
        }
    }
}

/// Parses a header-based want-list CSV (see the served template for columns).
///
/// Columns may appear in any order or be missing, unknown columns are
/// ignored and cells are trimmed.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<WantRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.deserialize::<CsvWantRecord>() {
        rows.push(WantRow::from(result?));
    }

    info!("Parsed {} want-list rows from CSV", rows.len());
    Ok(rows)
}

/// Loads a want-list file: `.csv` files as CSV, anything else as paste text
pub fn read_want_list<P: AsRef<Path>>(path: P) -> Result<Vec<WantRow>> {
    let path = path.as_ref();
    info!("Reading want-list from {}", path.display());

    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        let file = std::fs::File::open(path)?;
        parse_csv(std::io::BufReader::new(file))
    } else {
        let text = std::fs::read_to_string(path)?;
        Ok(parse_paste(&text))
    }
}

#[cfg(test)]
#[path = "want_list_tests.rs"]
mod tests;
