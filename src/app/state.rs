use std::time::Instant;

use sea_orm::DatabaseConnection;

use crate::config::app::AppConfig;
use crate::services::mailer::Mailer;
use crate::services::telegram::TelegramClient;

/// Shared state handed to every handler through an axum `Extension`.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub http: reqwest::Client,
    pub mailer: Option<Mailer>,
    pub telegram: Option<TelegramClient>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        db: DatabaseConnection,
        http: reqwest::Client,
        mailer: Option<Mailer>,
        telegram: Option<TelegramClient>,
    ) -> Self {
        AppState {
            config,
            db,
            http,
            mailer,
            telegram,
            started_at: Instant::now(),
        }
    }
}
