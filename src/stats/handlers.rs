use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::{NutritionStatsResponse, RangeQuery, SummaryResponse, WorkoutStatsResponse};
use crate::auth::services::AuthUser;
use crate::metrics::aggregate::{energy_balance, nutrition_totals, workout_totals};
use crate::metrics::energy::{compute_bmr, compute_tdee};
use crate::metrics::insights::{generate_insights, RECENT_WORKOUT_WINDOW};
use crate::metrics::Profile;
use crate::nutrition::repo as nutrition_repo;
use crate::profile::repo as profile_repo;
use crate::state::AppState;
use crate::workouts::repo as workouts_repo;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats/nutrition", get(nutrition_stats))
        .route("/stats/workouts", get(workout_stats))
        .route("/stats/summary", get(summary))
}

fn check_range(query: &RangeQuery) -> Result<(), (StatusCode, String)> {
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err((StatusCode::BAD_REQUEST, "from must not be after to".into()));
        }
    }
    Ok(())
}

#[instrument(skip(state))]
pub async fn nutrition_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<RangeQuery>,
) -> Result<Json<NutritionStatsResponse>, (StatusCode, String)> {
    check_range(&query)?;
    let entries = nutrition_repo::list_by_user(&state.db, user_id, query.from, query.to)
        .await
        .map_err(internal)?;
    Ok(Json(NutritionStatsResponse {
        from: query.from,
        to: query.to,
        totals: nutrition_totals(&entries),
    }))
}

#[instrument(skip(state))]
pub async fn workout_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<RangeQuery>,
) -> Result<Json<WorkoutStatsResponse>, (StatusCode, String)> {
    check_range(&query)?;
    let workouts = workouts_repo::list_by_user(&state.db, user_id, query.from, query.to)
        .await
        .map_err(internal)?;
    Ok(Json(WorkoutStatsResponse {
        from: query.from,
        to: query.to,
        totals: workout_totals(&workouts),
    }))
}

/// The dashboard roll-up: metabolic targets, the period's energy balance,
/// and the advisory strings, all recomputed on demand.
#[instrument(skip(state))]
pub async fn summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<RangeQuery>,
) -> Result<Json<SummaryResponse>, (StatusCode, String)> {
    check_range(&query)?;

    let profile = profile_repo::find_by_user(&state.db, user_id)
        .await
        .map_err(internal)?
        .map(|row| row.to_metrics())
        .unwrap_or_else(Profile::default);

    let entries = nutrition_repo::list_by_user(&state.db, user_id, query.from, query.to)
        .await
        .map_err(internal)?;
    let workouts = workouts_repo::list_by_user(&state.db, user_id, query.from, query.to)
        .await
        .map_err(internal)?;
    let recent = workouts_repo::list_recent(&state.db, user_id, RECENT_WORKOUT_WINDOW as i64)
        .await
        .map_err(internal)?;

    let nutrition = nutrition_totals(&entries);
    let training = workout_totals(&workouts);
    let balance = energy_balance(&nutrition, &training);
    let insights = generate_insights(&profile, &nutrition, &recent);

    Ok(Json(SummaryResponse {
        from: query.from,
        to: query.to,
        bmr: compute_bmr(&profile),
        tdee: compute_tdee(&profile),
        consumed: balance.consumed,
        burned: balance.burned,
        net: balance.net,
        entries: nutrition.entries,
        sessions: training.sessions,
        insights,
    }))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
