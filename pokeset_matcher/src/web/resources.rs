//! Inventory and catalog endpoints
//!
//! Both tables expose the same four operations. Records travel flattened as
//! `{recordId, ...fields}`.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, patch, MethodRouter},
};
use log::{info, warn};
use pokeset_common::InventoryItem;
use serde::Deserialize;
use serde_json::Value;

use super::{method_not_allowed, parse_body, ApiError, AppState, ADMIN_KEY_HEADER};
use crate::config::Resource;
use crate::orders::is_truthy;
use crate::store::{AirtableRecord, Fields};

/// Query parameters for listing
#[derive(Debug, Default, Deserialize)]
pub(super) struct ListParams {
    #[serde(default)]
    q: Option<String>,
}

/// `GET` and `POST` on a table
pub(super) fn collection_routes(resource: Resource) -> MethodRouter<AppState> {
    get(move |State(state): State<AppState>, Query(params): Query<ListParams>| {
        list_records(state, resource, params)
    })
    .post(move |State(state): State<AppState>, headers: HeaderMap, body: Bytes| {
        create_record(state, resource, headers, body)
    })
    .fallback(|| async { method_not_allowed("GET,POST") })
}

/// `PATCH` and `DELETE` on a single record
pub(super) fn record_routes(resource: Resource) -> MethodRouter<AppState> {
    patch(
        move |State(state): State<AppState>, Path(id): Path<String>, headers: HeaderMap, body: Bytes| {
            update_record(state, resource, id, headers, body)
        },
    )
    .delete(
        move |State(state): State<AppState>, Path(id): Path<String>, headers: HeaderMap| {
            delete_record(state, resource, id, headers)
        },
    )
    .fallback(|| async { method_not_allowed("PATCH,DELETE") })
}

fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = state.admin_key.as_deref() else {
        return Ok(());
    };
    let given = headers.get(ADMIN_KEY_HEADER).and_then(|v| v.to_str().ok());
    if given == Some(expected) {
        Ok(())
    } else {
        warn!("Rejected edit without a valid admin key");
        Err(ApiError::Unauthorized("admin key required".to_string()))
    }
}

/// Text form of a field as it would appear when joined into an id
fn field_text(fields: &Fields, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(value) if is_truthy(Some(value)) => value.to_string(),
        _ => String::new(),
    }
}

/// Fills `id` from set code, number, language and finish unless one is given
fn ensure_inventory_id(fields: &mut Fields) {
    if is_truthy(fields.get("id")) {
        return;
    }
    let id = InventoryItem::derive_id(
        &field_text(fields, "set_code"),
        &field_text(fields, "card_number"),
        &field_text(fields, "language"),
        &field_text(fields, "finish"),
    );
    fields.insert("id".to_string(), Value::String(id));
}

/// Case-insensitive search over name, set, number and language
fn matches_query(record: &Value, query: &str) -> bool {
    let text = ["name", "set_name", "card_number", "language"]
        .iter()
        .map(|key| match record.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    text.contains(query)
}

/// GET /api/{resource}?q={filter}
async fn list_records(state: AppState, resource: Resource, params: ListParams) -> Result<Json<Vec<Value>>, ApiError> {
    let table = state.store.config().table(resource);
    let records = state.store.list_all::<Fields>(table).await?;
    let mut items: Vec<Value> = records.into_iter().map(AirtableRecord::flatten).collect();

    if let Some(query) = params.q.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty()) {
        items.retain(|item| matches_query(item, &query));
    }

    info!("Listed {} {} records", items.len(), resource.as_str());
    Ok(Json(items))
}

/// POST /api/{resource}
async fn create_record(
    state: AppState,
    resource: Resource,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_admin(&state, &headers)?;
    let mut fields: Fields = parse_body(&body)?;
    if resource == Resource::Inventory {
        ensure_inventory_id(&mut fields);
    }

    let table = &state.store.config().table(resource).name;
    let record: AirtableRecord = state.store.create_one(table, &fields).await?;
    Ok((StatusCode::CREATED, Json(record.flatten())))
}

/// PATCH /api/{resource}/{recordId}
async fn update_record(
    state: AppState,
    resource: Resource,
    id: String,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    require_admin(&state, &headers)?;
    let fields: Fields = parse_body(&body)?;

    let table = &state.store.config().table(resource).name;
    let record: AirtableRecord = state.store.update_one(table, &id, &fields).await?;
    Ok(Json(record.flatten()))
}

/// DELETE /api/{resource}/{recordId}
async fn delete_record(state: AppState, resource: Resource, id: String, headers: HeaderMap) -> Result<StatusCode, ApiError> {
    require_admin(&state, &headers)?;

    let table = &state.store.config().table(resource).name;
    state.store.delete_one(table, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
