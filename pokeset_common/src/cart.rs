//! Proposed cart and order-request drafting
//!
//! The cart is advisory: it lists what could be bought right now and what it
//! would cost. Nothing is reserved and there is no checkout.

use serde::Serialize;

use crate::models::{MatchResult, MatchStatus};

/// Marks order requests created by the matcher
pub const ORDER_SOURCE: &str = "matcher_mvp";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub set: String,
    pub number: String,
    pub finish: String,
    pub language: String,
    pub price: f64,
    pub qty: i64,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.qty as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposedCart {
    pub items: Vec<CartItem>,
    pub subtotal: f64,
}

impl ProposedCart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Collects every available result into a cart, priced at the offered unit
/// price times the requested quantity.
pub fn proposed_cart(results: &[MatchResult]) -> ProposedCart {
    let items: Vec<CartItem> = results
        .iter()
        .filter(|r| r.status == MatchStatus::Available)
        .filter_map(|r| {
            r.inventory.as_ref().map(|item| CartItem {
                id: item.id.clone(),
                name: item.name.clone(),
                set: item.set_name.clone(),
                number: item.card_number.clone(),
                finish: item.finish.clone(),
                language: item.language.clone(),
                price: item.price,
                qty: r.row.quantity,
            })
        })
        .collect();
    let subtotal = items.iter().map(CartItem::line_total).sum();

    ProposedCart { items, subtotal }
}

/// Payload asking staff to source a card the shop cannot offer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    pub notes: String,
    pub requested_qty: i64,
    pub language: String,
    pub finish: String,
    pub condition: String,
    pub set_name: String,
    pub set_code: String,
    pub card_number: String,
    pub card_name: String,
    pub source: String,
}

impl OrderRequest {
    /// Drafts a request from a match result. Catalog values win over what the
    /// user typed; the row's budget and notes are carried along.
    pub fn from_match(result: &MatchResult, email: &str) -> Self {
        let row = &result.row;
        let catalog = result.catalog.as_ref();
        let pick = |from_catalog: Option<&String>, from_row: &Option<String>| {
            from_catalog
                .filter(|v| !v.is_empty())
                .or(from_row.as_ref())
                .cloned()
                .unwrap_or_default()
        };

        Self {
            email: email.to_string(),
            max_price: row.max_price.filter(|p| *p != 0.0),
            notes: row.notes.clone().unwrap_or_default(),
            requested_qty: row.quantity,
            language: row.language.clone(),
            finish: row.finish.clone(),
            condition: row.min_condition.clone(),
            set_name: pick(catalog.map(|c| &c.set_name), &row.set_name),
            set_code: pick(catalog.map(|c| &c.set_code), &row.set_code),
            card_number: pick(catalog.map(|c| &c.card_number), &row.card_number),
            card_name: pick(catalog.map(|c| &c.name), &row.card_name),
            source: ORDER_SOURCE.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "cart_tests.rs"]
mod tests;
