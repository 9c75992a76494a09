use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::db;
use crate::documents::{
    report::{PlainTextRenderer, ReportRenderer},
    DocumentTextExtractor, PdfTextExtractor,
};
use crate::llm::{GeminiClient, TextGenerator};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub generator: Arc<dyn TextGenerator>,
    pub extractor: Arc<dyn DocumentTextExtractor>,
    pub renderer: Arc<dyn ReportRenderer>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = db::connect(&config.database_url, config.database_max_connections).await?;
        db::init_schema(&db).await?;

        let generator = Arc::new(GeminiClient::new(
            config.llm.api_key.clone(),
            config.llm.model.clone(),
        )?) as Arc<dyn TextGenerator>;

        Ok(Self {
            db,
            config,
            generator,
            extractor: Arc::new(PdfTextExtractor),
            renderer: Arc::new(PlainTextRenderer),
        })
    }
}


#[cfg(test)]
impl AppState {
    pub fn fake() -> Self {
        use sqlx::sqlite::SqlitePoolOptions;

        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_lazy("sqlite::memory:")
            .expect("lazy pool ok");
        Self::with_parts(db, Arc::new(fakes::FakeGenerator::replying("Match Score: 82%")))
    }

    pub async fn fake_with_memory_db() -> Self {
        Self::with_generator(Arc::new(fakes::FakeGenerator::replying("Match Score: 82%"))).await
    }

    pub async fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self::with_parts(db::memory_pool().await, generator)
    }

    fn with_parts(db: SqlitePool, generator: Arc<dyn TextGenerator>) -> Self {
        use crate::accounts::password::PasswordScheme;
        use crate::config::{JwtConfig, LlmConfig, DEFAULT_PROMPT};

        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            database_max_connections: 1,
            password_scheme: PasswordScheme::Sha256,
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
            },
            llm: LlmConfig {
                api_key: "test".into(),
                model: "test-model".into(),
                prompt: DEFAULT_PROMPT.into(),
            },
        });

        Self {
            db,
            config,
            generator,
            extractor: Arc::new(fakes::FakeExtractor),
            renderer: Arc::new(PlainTextRenderer),
        }
    }
}
