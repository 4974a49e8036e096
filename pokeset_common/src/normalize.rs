//! Want-list row normalization and validation
//!
//! Normalization never fails: it only fills defaults and maps finish synonyms.
//! Validation then checks the normalized row and collects every problem it
//! finds, so users see all of them at once.

use log::debug;

use crate::models::{NormalizedRow, WantRow};

/// Finishes a row may ask for after normalization
pub const VALID_FINISHES: [&str; 4] = ["normal", "reverse", "holo", "any"];

pub const DEFAULT_LANGUAGE: &str = "EN";
pub const DEFAULT_CONDITION: &str = "NM/M";

const REVERSE_SYNONYMS: [&str; 5] = ["rev", "reverse", "reverseholo", "reverse-holo", "reverse_holo"];
const HOLO_SYNONYMS: [&str; 3] = ["holo", "holofoil", "foil"];
const NORMAL_SYNONYMS: [&str; 4] = ["normal", "non-holo", "nonholo", "base"];

/// Trimmed, lower-cased comparison form of an optional string
pub fn norm(s: Option<&str>) -> String {
    s.unwrap_or("").trim().to_lowercase()
}

/// Maps a finish as typed by a user onto `normal`, `reverse` or `holo`.
///
/// Empty input means `normal`. Unknown values come back lower-cased and are
/// rejected later by [`validate_row`] unless they are `any`. Applying this
/// twice gives the same result as applying it once.
pub fn normalize_finish(finish: Option<&str>) -> String {
    let value = norm(finish);
    if REVERSE_SYNONYMS.contains(&value.as_str()) {
        "reverse".to_string()
    } else if HOLO_SYNONYMS.contains(&value.as_str()) {
        "holo".to_string()
    } else if value.is_empty() || NORMAL_SYNONYMS.contains(&value.as_str()) {
        "normal".to_string()
    } else {
        value
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Applies defaults: finish synonyms, `EN` language, quantity 1, `NM/M` condition.
///
/// A quantity that is present is kept as-is, including zero and negatives, so
/// that validation can reject it.
pub fn normalize_row(row: &WantRow) -> NormalizedRow {
    let language = non_empty(&row.language)
        .map(|l| l.to_uppercase())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    NormalizedRow {
        set_name: non_empty(&row.set_name),
        set_code: non_empty(&row.set_code),
        card_number: non_empty(&row.card_number),
        card_name: non_empty(&row.card_name),
        finish: normalize_finish(row.finish.as_deref()),
        language,
        quantity: row.quantity.unwrap_or(1),
        max_price: row.max_price,
        min_condition: non_empty(&row.min_condition)
            .unwrap_or_else(|| DEFAULT_CONDITION.to_string()),
        notes: non_empty(&row.notes),
        raw_finish: row.finish.clone(),
    }
}

/// Result of [`validate_row`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub reasons: Vec<String>,
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        self.reasons.is_empty()
    }
}

/// Checks a normalized row. All checks run; none short-circuits.
pub fn validate_row(row: &NormalizedRow) -> Validation {
    let mut reasons = Vec::new();

    if row.card_number.is_none() && row.card_name.is_none() {
        reasons.push("card_number or card_name required".to_string());
    }
    if row.set_name.is_none() && row.set_code.is_none() {
        reasons.push("set_name or set_code required".to_string());
    }
    if row.quantity <= 0 {
        reasons.push(format!("quantity must be > 0 (got {})", row.quantity));
    }
    if !VALID_FINISHES.contains(&row.finish.as_str()) {
        let typed = row.raw_finish.as_deref().unwrap_or(&row.finish);
        reasons.push(format!("unknown finish: {typed}"));
    }

    if !reasons.is_empty() {
        debug!("Row {} failed validation: {}", row.group_key(), reasons.join("; "));
    }

    Validation { reasons }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
