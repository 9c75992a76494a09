mod dto;
pub mod handlers;
mod prompts;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::upload_routes())
        .merge(handlers::generation_routes())
        .merge(handlers::template_routes())
}
