use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{ListQuery, UpsertWorkoutRequest, WorkoutResponse};
use super::repo::{self, WorkoutChanges};
use crate::auth::services::AuthUser;
use crate::metrics::records::{self, ExerciseBests};
use crate::metrics::units;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", get(list_workouts).post(create_workout))
        .route("/workouts/records", get(get_records))
        .route(
            "/workouts/:id",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
}

fn validate(payload: &UpsertWorkoutRequest) -> Result<WorkoutChanges, (StatusCode, String)> {
    let exercise = payload.exercise.trim();
    if exercise.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "exercise is required".into()));
    }
    if payload.sets < 1 {
        return Err((StatusCode::BAD_REQUEST, "sets must be at least 1".into()));
    }
    if payload.reps < 1 {
        return Err((StatusCode::BAD_REQUEST, "reps must be at least 1".into()));
    }
    if payload.weight < 0.0 {
        return Err((StatusCode::BAD_REQUEST, "weight must not be negative".into()));
    }
    if matches!(payload.calories_burned, Some(c) if c < 0.0) {
        return Err((
            StatusCode::BAD_REQUEST,
            "calories_burned must not be negative".into(),
        ));
    }

    Ok(WorkoutChanges {
        exercise: exercise.to_string(),
        sets: payload.sets,
        reps: payload.reps,
        weight_kg: units::weight_to_kg(payload.weight, payload.units),
        calories_burned: payload.calories_burned,
        notes: payload.notes.clone(),
        // decided against the prior history just before the write
        personal_record: false,
        workout_date: payload
            .date
            .unwrap_or_else(|| OffsetDateTime::now_utc().date()),
    })
}

#[instrument(skip(state, payload))]
pub async fn create_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpsertWorkoutRequest>,
) -> Result<(StatusCode, Json<WorkoutResponse>), (StatusCode, String)> {
    let mut changes = validate(&payload).inspect_err(|(_, msg)| warn!(%msg, "invalid workout"))?;

    let history = repo::list_by_user(&state.db, user_id, None, None)
        .await
        .map_err(internal)?;
    changes.personal_record = records::is_new_record(
        &history,
        &changes.exercise,
        changes.weight_kg,
        changes.reps,
    );

    let workout = repo::insert(&state.db, user_id, &changes)
        .await
        .map_err(internal)?;
    info!(
        user_id = %user_id,
        workout_id = %workout.id,
        personal_record = workout.personal_record,
        "workout logged"
    );
    Ok((StatusCode::CREATED, Json(workout.into())))
}

#[instrument(skip(state))]
pub async fn list_workouts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<WorkoutResponse>>, (StatusCode, String)> {
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err((StatusCode::BAD_REQUEST, "from must not be after to".into()));
        }
    }
    let workouts = repo::list_by_user(&state.db, user_id, query.from, query.to)
        .await
        .map_err(internal)?;
    Ok(Json(
        workouts.into_iter().map(WorkoutResponse::from).collect(),
    ))
}

/// Per-exercise bests derived on demand from the full stored history.
#[instrument(skip(state))]
pub async fn get_records(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<BTreeMap<String, ExerciseBests>>, (StatusCode, String)> {
    let history = repo::list_by_user(&state.db, user_id, None, None)
        .await
        .map_err(internal)?;
    Ok(Json(records::detect_prs(&history)))
}

#[instrument(skip(state))]
pub async fn get_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkoutResponse>, (StatusCode, String)> {
    let workout = repo::find(&state.db, user_id, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Workout not found".to_string()))?;
    Ok(Json(workout.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpsertWorkoutRequest>,
) -> Result<Json<WorkoutResponse>, (StatusCode, String)> {
    let mut changes = validate(&payload).inspect_err(|(_, msg)| warn!(%msg, "invalid workout"))?;

    // the edited row's flag is recomputed against the rest of the history
    let history: Vec<_> = repo::list_by_user(&state.db, user_id, None, None)
        .await
        .map_err(internal)?
        .into_iter()
        .filter(|w| w.id != id)
        .collect();
    changes.personal_record = records::is_new_record(
        &history,
        &changes.exercise,
        changes.weight_kg,
        changes.reps,
    );

    let workout = repo::update(&state.db, user_id, id, &changes)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Workout not found".to_string()))?;
    Ok(Json(workout.into()))
}

#[instrument(skip(state))]
pub async fn delete_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = repo::delete(&state.db, user_id, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Workout not found".into()));
    }
    info!(user_id = %user_id, workout_id = %id, "workout deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::units::UnitSystem;

    fn request() -> UpsertWorkoutRequest {
        UpsertWorkoutRequest {
            exercise: "bench press".into(),
            sets: 3,
            reps: 5,
            weight: 100.0,
            calories_burned: Some(250.0),
            notes: None,
            date: None,
            units: UnitSystem::Metric,
        }
    }

    #[test]
    fn validate_accepts_a_normal_workout() {
        let changes = validate(&request()).unwrap();
        assert_eq!(changes.exercise, "bench press");
        assert_eq!(changes.weight_kg, 100.0);
        assert!(!changes.personal_record);
    }

    #[test]
    fn validate_normalizes_imperial_load() {
        let mut payload = request();
        payload.units = UnitSystem::Imperial;
        payload.weight = 225.0;
        let changes = validate(&payload).unwrap();
        assert!((changes.weight_kg - 102.058).abs() < 0.01);
    }

    #[test]
    fn validate_rejects_zero_sets_or_reps() {
        let mut payload = request();
        payload.sets = 0;
        assert!(validate(&payload).is_err());

        let mut payload = request();
        payload.reps = 0;
        assert!(validate(&payload).is_err());
    }

    #[test]
    fn validate_allows_bodyweight_zero_load() {
        let mut payload = request();
        payload.weight = 0.0;
        assert!(validate(&payload).is_ok());
    }
}
