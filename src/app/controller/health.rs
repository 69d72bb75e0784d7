use axum::{Extension, Json, http::StatusCode};
use serde::Serialize;

use crate::app::state::AppState;

pub struct HealthController;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthBody {
    pub status: &'static str,
    pub database: &'static str,
    pub uptime_seconds: u64,
}

#[pricewatch_macros::controller]
impl HealthController {
    /// Liveness plus database reachability.
    #[pricewatch_macros::get("/health")]
    #[pricewatch_macros::api_response(status = 200, body = HealthBody, description = "Service healthy")]
    pub async fn health(Extension(state): Extension<AppState>) -> (StatusCode, Json<HealthBody>) {
        let uptime_seconds = state.started_at.elapsed().as_secs();

        match state.db.ping().await {
            Ok(()) => (
                StatusCode::OK,
                Json(HealthBody {
                    status: "ok",
                    database: "up",
                    uptime_seconds,
                }),
            ),
            Err(err) => {
                tracing::error!("database ping failed: {err}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(HealthBody {
                        status: "degraded",
                        database: "down",
                        uptime_seconds,
                    }),
                )
            }
        }
    }
}
