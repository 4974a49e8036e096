//! Order requests ("order for me") written to the orders table

use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use pokeset_common::OrderRequest;
use serde_json::Value;

use crate::error::Result;
use crate::store::{AirtableClient, AirtableRecord, Fields};

/// Status given to new requests that do not bring their own
pub const DEFAULT_ORDER_STATUS: &str = "requested";

/// Loose truthiness of a JSON field: null, false, 0 and "" count as missing
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(_) => true,
    }
}

/// Stamps `created_at` and fills `status` before an order is stored
pub fn stamp_order(fields: &mut Fields, now: DateTime<Utc>) {
    fields.insert(
        "created_at".to_string(),
        Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    if !is_truthy(fields.get("status")) {
        fields.insert(
            "status".to_string(),
            Value::String(DEFAULT_ORDER_STATUS.to_string()),
        );
    }
}

/// Stores a drafted order request
pub async fn submit_order_request(store: &AirtableClient, request: &OrderRequest) -> Result<AirtableRecord> {
    let mut fields = match serde_json::to_value(request)? {
        Value::Object(map) => map,
        _ => Fields::new(),
    };
    stamp_order(&mut fields, Utc::now());

    let table = &store.config().orders.name;
    let record = store.create_one(table, &fields).await?;
    info!(
        "Requested order {} for {} #{} ({})",
        record.id, request.card_name, request.card_number, request.email
    );
    Ok(record)
}
