//! Want-list match endpoint

use axum::{body::Bytes, extract::State, response::Json};
use log::info;
use pokeset_common::{parse_csv, parse_paste, proposed_cart, MatchResult, ProposedCart, WantListDefaults};
use serde::{Deserialize, Serialize};

use super::{parse_body, ApiError, AppState};
use crate::snapshot::Snapshot;

/// Body of `POST /api/match`. `csv` wins over `text` when both are sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(flatten)]
    pub defaults: WantListDefaults,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub results: Vec<MatchResult>,
    pub cart: ProposedCart,
}

/// POST /api/match
pub(super) async fn match_want_list(State(state): State<AppState>, body: Bytes) -> Result<Json<MatchResponse>, ApiError> {
    let request: MatchRequest = parse_body(&body)?;

    let mut rows = match request.csv.as_deref().filter(|csv| !csv.trim().is_empty()) {
        Some(csv) => parse_csv(csv.as_bytes())?,
        None => parse_paste(request.text.as_deref().unwrap_or_default()),
    };
    request.defaults.apply(&mut rows);

    let results = if rows.is_empty() {
        Vec::new()
    } else {
        let snapshot = Snapshot::load(&state.store).await?;
        snapshot.match_rows(&rows)
    };
    let cart = proposed_cart(&results);

    info!(
        "Matched {} want-list rows, {} in proposed cart",
        results.len(),
        cart.items.len()
    );
    Ok(Json(MatchResponse { results, cart }))
}
