//! Catalog, inventory and want-list types

use serde::{Deserialize, Deserializer, Serialize};

/// A printable card in the reference catalog.
///
/// `(set_code, card_number)` identifies an entry within a set. The finish and
/// language lists only enumerate legal variants; price and stock live on
/// [`InventoryItem`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogCard {
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub set_code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub card_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub finishes: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

/// A concrete sellable stock unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub set_code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub card_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub finish: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    /// Negative counts from the sheet read as 0
    #[serde(default, deserialize_with = "lenient_qty")]
    pub qty: u32,
    /// Placeholder/demo stock
    #[serde(default)]
    pub fictitious: bool,
}

impl InventoryItem {
    /// Quantity 0 means unavailable regardless of the other fields
    pub fn in_stock(&self) -> bool {
        self.qty > 0
    }

    /// Builds the composite stock id `{set_code}-{card_number}-{LANGUAGE}-{finish}`.
    ///
    /// Empty components are left out rather than producing doubled dashes.
    pub fn derive_id(set_code: &str, card_number: &str, language: &str, finish: &str) -> String {
        let language = language.to_uppercase();
        let finish = finish.to_lowercase();
        [set_code, card_number, language.as_str(), finish.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// A card someone wants, as pasted or uploaded.
///
/// Every field is optional here; [`crate::normalize_row`] applies defaults and
/// [`crate::validate_row`] decides whether the row is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WantRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A want-list row after defaults and finish synonyms have been applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_name: Option<String>,
    /// Canonical finish; anything outside the synonym table is kept as typed
    pub finish: String,
    /// Upper-cased language code
    pub language: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    pub min_condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Finish exactly as the user wrote it, for error messages
    #[serde(skip)]
    pub raw_finish: Option<String>,
}

impl NormalizedRow {
    /// Grouping key `{set}-{card}-{LANGUAGE}-{finish}` used to line up results
    pub fn group_key(&self) -> String {
        let set = self
            .set_code
            .as_deref()
            .or(self.set_name.as_deref())
            .unwrap_or("");
        let card = self
            .card_number
            .as_deref()
            .or(self.card_name.as_deref())
            .unwrap_or("");
        format!("{}-{}-{}-{}", set, card, self.language, self.finish)
    }
}

/// Outcome of matching one want-list row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Available,
    Unavailable,
    NotFound,
    FormatError,
    OverBudget,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Available => "available",
            MatchStatus::Unavailable => "unavailable",
            MatchStatus::NotFound => "not_found",
            MatchStatus::FormatError => "format_error",
            MatchStatus::OverBudget => "over_budget",
        }
    }

    /// Rows staff can be asked to source
    pub fn can_request_order(&self) -> bool {
        matches!(self, MatchStatus::Unavailable | MatchStatus::OverBudget)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External marketplace search for a card we do not stock
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchLink {
    pub label: &'static str,
    pub url: String,
}

/// One result per want-list row. Rebuilt on every match run, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub row: NormalizedRow,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<InventoryItem>,
    pub status: MatchStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_links: Vec<SearchLink>,
}

/// Accepts strings, numbers and null for text columns.
///
/// Spreadsheet columns holding card numbers are easily switched to a number
/// type; "003" then arrives as `3`.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Numbers, numeric strings (comma decimals allowed) or nothing
fn lenient_number(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

/// Prices that are missing or not numeric read as 0
fn lenient_price<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_number(&value).unwrap_or(0.0))
}

/// Stock counts are truncated and clamped to `0..=u32::MAX`, so one badly
/// edited record cannot break a whole snapshot.
fn lenient_qty<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let count = lenient_number(&value).unwrap_or(0.0);
    Ok(count.clamp(0.0, u32::MAX as f64) as u32)
}
