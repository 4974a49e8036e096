//! Want-list matching against catalog and inventory snapshots
//!
//! Matching is a linear scan in input order: the first candidate that fits
//! wins. Catalog lookups try the card number first and fall back to the card
//! name. Inventory lookups try the requested finish and language first and
//! fall back to any in-stock copy of the same card.

use log::{debug, info};

use crate::models::{CatalogCard, InventoryItem, MatchResult, MatchStatus, NormalizedRow, SearchLink, WantRow};
use crate::normalize::{norm, normalize_row, validate_row};

const NOT_FOUND_REASON: &str = "not found in catalog (check set/number/name)";

/// Finds the catalog entry a row refers to.
///
/// Set name and set code narrow the candidates when the row gives them and
/// are wildcards otherwise. Card numbers compare as strings, so "03" and "3"
/// are different cards.
pub fn find_catalog_match<'a>(row: &NormalizedRow, catalog: &'a [CatalogCard]) -> Option<&'a CatalogCard> {
    let set_name = norm(row.set_name.as_deref());
    let set_code = norm(row.set_code.as_deref());
    let in_set = |card: &&CatalogCard| {
        (set_name.is_empty() || norm(Some(&card.set_name)) == set_name)
            && (set_code.is_empty() || norm(Some(&card.set_code)) == set_code)
    };

    let by_number = row.card_number.as_deref().map(str::trim).and_then(|number| {
        catalog
            .iter()
            .filter(in_set)
            .find(|card| card.card_number.trim() == number)
    });
    if by_number.is_some() {
        return by_number;
    }

    let name = norm(row.card_name.as_deref());
    if name.is_empty() {
        return None;
    }
    catalog
        .iter()
        .filter(in_set)
        .find(|card| norm(Some(&card.name)) == name)
}

/// Finds the stock unit to offer for a resolved catalog card.
///
/// The exact pass wants the requested finish (any finish when the row says
/// `any`), the requested language and a positive quantity. When nothing fits,
/// the first in-stock copy of the same set code and number is offered
/// instead, whatever its finish or language.
pub fn find_inventory_match<'a>(
    card: &CatalogCard,
    row: &NormalizedRow,
    inventory: &'a [InventoryItem],
) -> Option<&'a InventoryItem> {
    let language = row.language.to_uppercase();
    let mut same_card = inventory
        .iter()
        .filter(|item| item.set_code == card.set_code && item.card_number == card.card_number);

    let exact = same_card.clone().find(|item| {
        (row.finish == "any" || item.finish == row.finish)
            && item.language.to_uppercase() == language
            && item.in_stock()
    });
    if exact.is_some() {
        return exact;
    }

    let substitute = same_card.find(|item| item.in_stock());
    if let Some(item) = substitute {
        debug!(
            "No {} {} copy of {} #{}, offering {} {} instead",
            row.finish, language, card.set_code, card.card_number, item.finish, item.language
        );
    }
    substitute
}

/// Marketplace searches for a card we cannot offer
pub fn build_search_links(card: &CatalogCard, row: &NormalizedRow) -> Vec<SearchLink> {
    let query = format!("{} {} {}", card.name, card.set_name, row.language);
    let query = urlencoding::encode(query.trim());

    vec![
        SearchLink {
            label: "Cardmarket",
            url: format!("https://www.cardmarket.com/en/Pokemon/Products/Singles?searchString={query}"),
        },
        SearchLink {
            label: "eBay",
            url: format!("https://www.ebay.com/sch/i.html?_nkw={query}"),
        },
        SearchLink {
            label: "TCGplayer",
            url: format!("https://www.tcgplayer.com/search/pokemon/product?q={query}"),
        },
    ]
}

/// Normalizes, validates and matches a single row
pub fn match_row(row: &WantRow, catalog: &[CatalogCard], inventory: &[InventoryItem]) -> MatchResult {
    let row = normalize_row(row);
    let key = row.group_key();
    let mut result = MatchResult {
        row,
        key,
        catalog: None,
        inventory: None,
        status: MatchStatus::FormatError,
        reasons: Vec::new(),
        search_links: Vec::new(),
    };

    let validation = validate_row(&result.row);
    if !validation.is_ok() {
        result.reasons = validation.reasons;
        return result;
    }

    let Some(card) = find_catalog_match(&result.row, catalog) else {
        result.status = MatchStatus::NotFound;
        result.reasons.push(NOT_FOUND_REASON.to_string());
        return result;
    };

    match find_inventory_match(card, &result.row, inventory) {
        Some(item) => {
            // A ceiling of zero counts as no ceiling; negative ones still apply
            match result.row.max_price.filter(|max| *max != 0.0) {
                Some(max) if item.price > max => {
                    result.status = MatchStatus::OverBudget;
                    result
                        .reasons
                        .push(format!("price {} > max_price {}", item.price, max));
                }
                _ => result.status = MatchStatus::Available,
            }
            result.inventory = Some(item.clone());
        }
        None => {
            result.status = MatchStatus::Unavailable;
            result.search_links = build_search_links(card, &result.row);
        }
    }
    result.catalog = Some(card.clone());
    result
}

/// Matches every row independently, one result per row in input order
pub fn match_rows(rows: &[WantRow], catalog: &[CatalogCard], inventory: &[InventoryItem]) -> Vec<MatchResult> {
    let results: Vec<MatchResult> = rows
        .iter()
        .map(|row| match_row(row, catalog, inventory))
        .collect();

    let available = results
        .iter()
        .filter(|r| r.status == MatchStatus::Available)
        .count();
    info!(
        "Matched {} want-list rows against {} catalog cards and {} stock items ({} available)",
        results.len(),
        catalog.len(),
        inventory.len(),
        available
    );

    results
}

#[cfg(test)]
#[path = "matching_tests.rs"]
mod tests;
