use std::time::Duration;

use anyhow::Result;
use pricewatch_core::config::ConfigBuilder;
use tokio::sync::OnceCell;

static APP: OnceCell<AppConfig> = OnceCell::const_new();

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FETCH_INTERVAL_SECS: u64 = 3600;

#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub product_api_url: String,
    pub fetch_interval: Duration,
    pub public_dir: String,
    pub smtp: Option<SmtpConfig>,
    pub telegram_bot_token: Option<String>,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl ConfigBuilder for AppConfig {
    fn build() -> Result<Self> {
        let port = parse_port(std::env::var("PORT").ok());

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|err| anyhow::anyhow!("cannot read `DATABASE_URL`: {:?}", err))?;

        let product_api_url = std::env::var("PRODUCT_API_URL")
            .map_err(|err| anyhow::anyhow!("cannot read `PRODUCT_API_URL`: {:?}", err))?;

        let fetch_interval = Duration::from_secs(parse_fetch_interval(
            std::env::var("FETCH_INTERVAL_SECS").ok(),
        ));

        let public_dir = std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".into());

        let smtp = smtp_from_env()?;

        let telegram_bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok();

        Ok(AppConfig {
            port,
            database_url,
            product_api_url,
            fetch_interval,
            public_dir,
            smtp,
            telegram_bot_token,
        })
    }
}

impl AppConfig {
    pub async fn get() -> Result<AppConfig> {
        APP.get_or_try_init(|| async { AppConfig::build() })
            .await
            .cloned()
    }
}

fn parse_port(raw: Option<String>) -> u16 {
    let Some(raw) = raw else {
        tracing::warn!("cannot read `PORT` defaulting to `{DEFAULT_PORT}`");

        return DEFAULT_PORT;
    };

    raw.parse().unwrap_or_else(|err| {
        tracing::error!("cannot parse `PORT`, defaulting to {DEFAULT_PORT}: {err:?}");
        DEFAULT_PORT
    })
}

fn parse_fetch_interval(raw: Option<String>) -> u64 {
    let Some(raw) = raw else {
        return DEFAULT_FETCH_INTERVAL_SECS;
    };

    raw.parse().unwrap_or_else(|err| {
        tracing::error!(
            "cannot parse `FETCH_INTERVAL_SECS`, defaulting to {DEFAULT_FETCH_INTERVAL_SECS}: {err:?}"
        );
        DEFAULT_FETCH_INTERVAL_SECS
    })
}

/// SMTP settings are optional as a set: no `SMTP_HOST` means e-mail
/// delivery is disabled, but a half-configured set is a startup error.
fn smtp_from_env() -> Result<Option<SmtpConfig>> {
    let Ok(host) = std::env::var("SMTP_HOST") else {
        return Ok(None);
    };

    let port = std::env::var("SMTP_PORT")
        .unwrap_or_else(|_| "587".into())
        .parse()
        .map_err(|err| anyhow::anyhow!("cannot parse `SMTP_PORT`: {:?}", err))?;

    let username = std::env::var("SMTP_USERNAME")
        .map_err(|err| anyhow::anyhow!("cannot read `SMTP_USERNAME`: {:?}", err))?;

    let password = std::env::var("SMTP_PASSWORD")
        .map_err(|err| anyhow::anyhow!("cannot read `SMTP_PASSWORD`: {:?}", err))?;

    let from = std::env::var("SMTP_FROM")
        .map_err(|err| anyhow::anyhow!("cannot read `SMTP_FROM`: {:?}", err))?;

    Ok(Some(SmtpConfig {
        host,
        port,
        username,
        password,
        from,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_absent() {
        assert_eq!(parse_port(None), 3000);
    }

    #[test]
    fn port_defaults_when_unparsable() {
        assert_eq!(parse_port(Some("not-a-port".into())), 3000);
    }

    #[test]
    fn port_uses_the_configured_value() {
        assert_eq!(parse_port(Some("8080".into())), 8080);
    }

    #[test]
    fn fetch_interval_defaults_to_an_hour() {
        assert_eq!(parse_fetch_interval(None), 3600);
        assert_eq!(parse_fetch_interval(Some("oops".into())), 3600);
        assert_eq!(parse_fetch_interval(Some("900".into())), 900);
    }
}
