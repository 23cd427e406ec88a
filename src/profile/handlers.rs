use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{ProfileResponse, UpsertProfileRequest};
use super::repo::{self, ProfileChanges, ProfileRow};
use crate::auth::services::AuthUser;
use crate::metrics::energy::{compute_bmr, compute_tdee};
use crate::metrics::units;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(upsert_profile))
}

fn to_response(row: &ProfileRow) -> ProfileResponse {
    let profile = row.to_metrics();
    ProfileResponse {
        weight_kg: row.weight_kg,
        height_cm: row.height_cm,
        age: row.age,
        gender: profile.gender,
        activity_level: profile.activity_level,
        goal: profile.goal,
        bmr: compute_bmr(&profile),
        tdee: compute_tdee(&profile),
        updated_at: row.updated_at,
    }
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let row = repo::find_by_user(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Profile not found".to_string()))?;
    Ok(Json(to_response(&row)))
}

#[instrument(skip(state, payload))]
pub async fn upsert_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpsertProfileRequest>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    if matches!(payload.weight, Some(w) if w <= 0.0) {
        warn!("non-positive weight");
        return Err((StatusCode::BAD_REQUEST, "weight must be positive".into()));
    }
    if matches!(payload.height, Some(h) if h <= 0.0) {
        warn!("non-positive height");
        return Err((StatusCode::BAD_REQUEST, "height must be positive".into()));
    }
    if matches!(payload.age, Some(a) if a <= 0) {
        warn!("non-positive age");
        return Err((StatusCode::BAD_REQUEST, "age must be positive".into()));
    }

    let changes = ProfileChanges {
        weight_kg: payload
            .weight
            .map(|w| units::weight_to_kg(w, payload.units)),
        height_cm: payload
            .height
            .map(|h| units::height_to_cm(h, payload.units)),
        age: payload.age,
        gender: payload.gender.map(|g| g.as_str().to_string()),
        activity_level: payload.activity_level.map(|a| a.as_str().to_string()),
        goal: payload.goal.map(|g| g.as_str().to_string()),
    };

    let row = repo::upsert(&state.db, user_id, &changes)
        .await
        .map_err(internal)?;

    info!(user_id = %user_id, "profile saved");
    Ok(Json(to_response(&row)))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
