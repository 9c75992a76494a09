use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{
    accounts::jwt::Session,
    errors::AppError,
    history::{repo, repo_types::HistoryEntry},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/history", get(list_history))
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
}

#[instrument(skip_all, fields(username = %session.username))]
pub async fn list_history(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<HistoryResponse>, AppError> {
    let entries = repo::list_for_user(&state.db, &session.username).await?;
    Ok(Json(HistoryResponse { entries }))
}
