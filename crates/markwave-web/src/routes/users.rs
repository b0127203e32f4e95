//! User route handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use markwave_core::user::{self, DeviceInfo, User};

use crate::routes::{error_status, require};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub mobile: Option<String>,
    pub name: Option<String>,
    pub referral_type: Option<String>,
}

#[derive(Deserialize)]
pub struct VerifyUserRequest {
    pub mobile: Option<String>,
    pub device_id: Option<String>,
    pub device_model: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyUserResponse {
    pub otp: String,
    pub message: &'static str,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<User>, (StatusCode, String)> {
    let mobile = require(req.mobile.as_deref(), "mobile")?;
    let name = require(req.name.as_deref(), "name")?;
    let referral_type = require(req.referral_type.as_deref(), "referral_type")?;

    let user = user::create_or_update(state.store.as_ref(), mobile, name, referral_type)
        .await
        .map_err(error_status)?;

    Ok(Json(user))
}

pub async fn list_referrals(
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, (StatusCode, String)> {
    let users = user::referrals(state.store.as_ref())
        .await
        .map_err(error_status)?;

    Ok(Json(users))
}

pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, (StatusCode, String)> {
    let users = user::customers(state.store.as_ref())
        .await
        .map_err(error_status)?;

    Ok(Json(users))
}

pub async fn verify_user(
    State(state): State<AppState>,
    Json(req): Json<VerifyUserRequest>,
) -> Result<Json<VerifyUserResponse>, (StatusCode, String)> {
    let mobile = require(req.mobile.as_deref(), "mobile")?;
    let device = DeviceInfo {
        device_id: require(req.device_id.as_deref(), "device_id")?.to_string(),
        device_model: require(req.device_model.as_deref(), "device_model")?.to_string(),
    };

    let otp = user::verify(state.store.as_ref(), mobile, &device)
        .await
        .map_err(error_status)?;

    Ok(Json(VerifyUserResponse {
        otp,
        message: "User verified and device info stored",
    }))
}
