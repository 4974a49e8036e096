//! Order request endpoint

use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use serde_json::Value;

use super::{parse_body, ApiError, AppState};
use crate::orders::{is_truthy, stamp_order};
use crate::store::{AirtableRecord, Fields};

/// POST /api/orders
pub(super) async fn create_order(State(state): State<AppState>, body: Bytes) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut fields: Fields = parse_body(&body)?;
    if !is_truthy(fields.get("email")) {
        return Err(ApiError::BadRequest("email required".to_string()));
    }
    stamp_order(&mut fields, Utc::now());

    let table = &state.store.config().orders.name;
    let record: AirtableRecord = state.store.create_one(table, &fields).await?;
    Ok((StatusCode::CREATED, Json(record.flatten())))
}
