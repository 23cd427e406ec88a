use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{EntryResponse, ListQuery, UpsertEntryRequest};
use super::repo::{self, EntryChanges};
use crate::auth::services::AuthUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/nutrition", get(list_entries).post(create_entry))
        .route(
            "/nutrition/:id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

fn validate(payload: &UpsertEntryRequest) -> Result<EntryChanges, (StatusCode, String)> {
    let food = payload.food.trim();
    if food.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "food is required".into()));
    }
    if payload.servings <= 0.0 {
        return Err((StatusCode::BAD_REQUEST, "servings must be positive".into()));
    }
    for (label, value) in [
        ("calories", payload.calories),
        ("protein", payload.protein),
        ("carbs", payload.carbs),
        ("fat", payload.fat),
        ("fiber", payload.fiber),
    ] {
        if value < 0.0 {
            return Err((StatusCode::BAD_REQUEST, format!("{label} must not be negative")));
        }
    }

    Ok(EntryChanges {
        food: food.to_string(),
        servings: payload.servings,
        calories: payload.calories,
        protein_g: payload.protein,
        carbs_g: payload.carbs,
        fat_g: payload.fat,
        fiber_g: payload.fiber,
        meal_type: payload.meal_type.map(|m| m.as_str().to_string()),
        entry_date: payload
            .date
            .unwrap_or_else(|| OffsetDateTime::now_utc().date()),
    })
}

#[instrument(skip(state, payload))]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpsertEntryRequest>,
) -> Result<(StatusCode, Json<EntryResponse>), (StatusCode, String)> {
    let changes = validate(&payload).inspect_err(|(_, msg)| warn!(%msg, "invalid entry"))?;
    let entry = repo::insert(&state.db, user_id, &changes)
        .await
        .map_err(internal)?;
    info!(user_id = %user_id, entry_id = %entry.id, "nutrition entry logged");
    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<EntryResponse>>, (StatusCode, String)> {
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err((StatusCode::BAD_REQUEST, "from must not be after to".into()));
        }
    }
    let entries = repo::list_by_user(&state.db, user_id, query.from, query.to)
        .await
        .map_err(internal)?;
    Ok(Json(entries.into_iter().map(EntryResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EntryResponse>, (StatusCode, String)> {
    let entry = repo::find(&state.db, user_id, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Entry not found".to_string()))?;
    Ok(Json(entry.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpsertEntryRequest>,
) -> Result<Json<EntryResponse>, (StatusCode, String)> {
    let changes = validate(&payload).inspect_err(|(_, msg)| warn!(%msg, "invalid entry"))?;
    let entry = repo::update(&state.db, user_id, id, &changes)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Entry not found".to_string()))?;
    Ok(Json(entry.into()))
}

#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = repo::delete(&state.db, user_id, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Entry not found".into()));
    }
    info!(user_id = %user_id, entry_id = %id, "nutrition entry deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(calories: f64) -> UpsertEntryRequest {
        UpsertEntryRequest {
            food: "oatmeal".into(),
            servings: 1.0,
            calories,
            protein: 10.0,
            carbs: 50.0,
            fat: 6.0,
            fiber: 8.0,
            meal_type: None,
            date: None,
        }
    }

    #[test]
    fn validate_accepts_a_normal_entry() {
        let changes = validate(&request(320.0)).unwrap();
        assert_eq!(changes.food, "oatmeal");
        assert_eq!(changes.calories, 320.0);
        assert_eq!(changes.meal_type, None);
    }

    #[test]
    fn validate_rejects_blank_food_and_negative_macros() {
        let mut payload = request(320.0);
        payload.food = "   ".into();
        assert!(validate(&payload).is_err());

        let payload = request(-1.0);
        let (status, message) = validate(&payload).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("calories"));
    }

    #[test]
    fn validate_defaults_date_to_today() {
        let changes = validate(&request(100.0)).unwrap();
        assert_eq!(changes.entry_date, OffsetDateTime::now_utc().date());
    }
}
