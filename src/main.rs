mod accounts;
mod app;
mod config;
mod db;
mod documents;
mod errors;
mod features;
mod history;
mod llm;
mod scoring;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "talentmatch=debug,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init().await?;
    tracing::info!(
        model = %app_state.config.llm.model,
        scheme = ?app_state.config.password_scheme,
        "talentmatch starting"
    );

    app::serve(app::build_app(app_state)).await
}
