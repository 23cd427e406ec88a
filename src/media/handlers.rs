use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{ListQuery, MessageResponse, PostMessageRequest};
use super::repo;
use crate::auth::services::AuthUser;
use crate::state::AppState;

/// The community feed keeps messages short.
const MAX_MESSAGE_LEN: usize = 50;

pub fn routes() -> Router<AppState> {
    Router::new().route("/media", get(list_messages).post(post_message))
}

/// The feed is shared across users; auth is still required to read it.
#[instrument(skip(state))]
pub async fn list_messages(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<MessageResponse>>, (StatusCode, String)> {
    let limit = query.limit.clamp(1, 200);
    let rows = repo::list(&state.db, limit).await.map_err(internal)?;
    Ok(Json(rows.into_iter().map(MessageResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn post_message(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), (StatusCode, String)> {
    let message = payload.message.trim();
    if message.is_empty() || message.chars().count() > MAX_MESSAGE_LEN {
        warn!(len = message.len(), "rejected feed message");
        return Err((
            StatusCode::BAD_REQUEST,
            format!("message must be 1-{MAX_MESSAGE_LEN} characters"),
        ));
    }

    let row = repo::insert(&state.db, message).await.map_err(internal)?;
    info!(user_id = %user_id, message_id = %row.id, "feed message posted");
    Ok((StatusCode::CREATED, Json(row.into())))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
