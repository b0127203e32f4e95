//! Purchase route handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use markwave_core::purchase::{self, Purchase};

use crate::routes::{error_status, require};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreatePurchaseRequest {
    pub mobile: Option<String>,
    pub id: Option<String>,
    pub item: Option<String>,
    pub details: Option<String>,
}

pub async fn create_purchase(
    State(state): State<AppState>,
    Json(req): Json<CreatePurchaseRequest>,
) -> Result<Json<Purchase>, (StatusCode, String)> {
    let mobile = require(req.mobile.as_deref(), "mobile")?;

    let created = purchase::record(state.store.as_ref(), mobile, req.id, req.item, req.details)
        .await
        .map_err(error_status)?;

    Ok(Json(created))
}
