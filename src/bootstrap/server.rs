use std::net::SocketAddr;

use anyhow::{Context, Result};

use crate::app::state::AppState;
use crate::config::app::AppConfig;
use crate::services::jobs;
use crate::services::mailer::Mailer;
use crate::services::product;
use crate::services::telegram::TelegramClient;

/// The ordered startup steps.
///
/// The server boots through these in strict sequence and never serves
/// traffic unless every earlier step succeeded.
pub(crate) trait BootSteps {
    async fn connect_database(&mut self) -> Result<()>;
    async fn run_initial_fetch(&mut self) -> Result<()>;
    fn activate_jobs(&mut self);
    async fn serve(&mut self) -> Result<()>;
}

/// Drives the boot steps, short-circuiting on the first failure.
pub(crate) async fn run_sequence<B: BootSteps>(steps: &mut B) -> Result<()> {
    steps.connect_database().await?;

    tracing::info!("Fetching initial product data...");
    steps.run_initial_fetch().await?;
    tracing::info!("Initial data fetch completed");

    steps.activate_jobs();

    steps.serve().await
}

/// Production boot: state is assembled by the database step and reused
/// by every later one.
struct Boot {
    config: AppConfig,
    state: Option<AppState>,
}

impl Boot {
    fn state(&self) -> Result<&AppState> {
        self.state
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("bootstrap sequence ran out of order"))
    }
}

impl BootSteps for Boot {
    async fn connect_database(&mut self) -> Result<()> {
        let db = crate::db::connect(&self.config).await?;

        let http = reqwest::Client::builder()
            .user_agent("pricewatch/0.1")
            .build()
            .context("failed to build HTTP client")?;

        let mailer = match &self.config.smtp {
            Some(smtp) => Some(Mailer::from_config(smtp)?),
            None => {
                tracing::warn!("SMTP not configured, e-mail delivery disabled");
                None
            }
        };

        let telegram = match &self.config.telegram_bot_token {
            Some(token) => Some(TelegramClient::new(http.clone(), token.clone())),
            None => {
                tracing::warn!("TELEGRAM_BOT_TOKEN not set, telegram delivery disabled");
                None
            }
        };

        self.state = Some(AppState::new(self.config.clone(), db, http, mailer, telegram));

        Ok(())
    }

    async fn run_initial_fetch(&mut self) -> Result<()> {
        let refreshed = product::fetch_and_update_products(self.state()?).await?;
        tracing::info!(products = refreshed, "initial product snapshot stored");
        Ok(())
    }

    fn activate_jobs(&mut self) {
        if let Ok(state) = self.state() {
            jobs::start_jobs(state.clone());
        }
    }

    async fn serve(&mut self) -> Result<()> {
        let state = self.state()?.clone();
        let port = self.config.port;

        // Build the router
        let app = crate::routes::routes(state);

        // Start the server
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        tracing::info!("🚀 Server running on port {port}");
        tracing::info!("📊 Health check: http://localhost:{port}/health");
        tracing::info!("🌐 Backend: http://localhost:{port}");

        axum::serve(listener, app).await.context("server error")?;

        Ok(())
    }
}

pub async fn init_server() -> Result<()> {
    let config = AppConfig::get().await?;

    let mut boot = Boot { config, state: None };

    run_sequence(&mut boot).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingBoot {
        calls: Vec<&'static str>,
        fail_connect: bool,
        fail_fetch: bool,
    }

    impl BootSteps for RecordingBoot {
        async fn connect_database(&mut self) -> Result<()> {
            self.calls.push("connect");
            if self.fail_connect {
                anyhow::bail!("connection refused");
            }
            Ok(())
        }

        async fn run_initial_fetch(&mut self) -> Result<()> {
            self.calls.push("fetch");
            if self.fail_fetch {
                anyhow::bail!("upstream unavailable");
            }
            Ok(())
        }

        fn activate_jobs(&mut self) {
            self.calls.push("jobs");
        }

        async fn serve(&mut self) -> Result<()> {
            self.calls.push("serve");
            Ok(())
        }
    }

    #[tokio::test]
    async fn boots_in_strict_order() {
        let mut boot = RecordingBoot::default();

        run_sequence(&mut boot).await.unwrap();

        assert_eq!(boot.calls, ["connect", "fetch", "jobs", "serve"]);
    }

    #[tokio::test]
    async fn connect_failure_stops_the_sequence() {
        let mut boot = RecordingBoot {
            fail_connect: true,
            ..Default::default()
        };

        assert!(run_sequence(&mut boot).await.is_err());
        assert_eq!(boot.calls, ["connect"]);
    }

    #[tokio::test]
    async fn fetch_failure_never_reaches_the_listener() {
        let mut boot = RecordingBoot {
            fail_fetch: true,
            ..Default::default()
        };

        assert!(run_sequence(&mut boot).await.is_err());
        assert_eq!(boot.calls, ["connect", "fetch"]);
    }
}
