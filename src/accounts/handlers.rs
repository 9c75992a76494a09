use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    accounts::{
        dto::{CredentialsRequest, LoginResponse, MeResponse, SignupResponse},
        jwt::{JwtKeys, Session},
        repo_types::User,
    },
    errors::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let created = User::create_account(
        &state.db,
        state.config.password_scheme,
        &payload.username,
        &payload.password,
    )
    .await?;

    if !created {
        warn!("username already exists");
        return Err(AppError::Conflict("Username already exists".into()));
    }

    info!("account created");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            username: payload.username,
        }),
    ))
}

#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if !User::verify_credentials(&state.db, &payload.username, &payload.password).await? {
        warn!("login rejected");
        return Err(AppError::Unauthorized);
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(&payload.username)?;

    info!("user logged in");
    Ok(Json(LoginResponse {
        access_token,
        username: payload.username,
    }))
}

#[instrument(skip_all, fields(username = %session.username))]
pub async fn get_me(session: Session) -> Json<MeResponse> {
    Json(MeResponse {
        username: session.username,
    })
}
