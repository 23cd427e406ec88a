pub mod client;
pub mod handlers;
pub mod prompt;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
