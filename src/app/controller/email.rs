use axum::{Extension, Json};
use pricewatch_core::response::ApiResponse;
use serde::Deserialize;

use crate::app::response::{MessageResponse, SimpleResponse};
use crate::app::state::AppState;

pub struct EmailController;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TestEmailRequest {
    pub to: String,
}

#[pricewatch_macros::controller]
impl EmailController {
    /// Send a test message to verify the SMTP settings.
    #[pricewatch_macros::post("/test-email")]
    #[pricewatch_macros::api_response(status = 200, body = SimpleResponse, description = "Test e-mail sent")]
    #[pricewatch_macros::api_response(status = 502, body = SimpleResponse, description = "SMTP delivery failed")]
    pub async fn send_test(
        Extension(state): Extension<AppState>,
        Json(payload): Json<TestEmailRequest>,
    ) -> MessageResponse {
        let Some(mailer) = &state.mailer else {
            return ApiResponse::InternalServerError(SimpleResponse::new(
                "e-mail delivery is not configured",
            ));
        };

        match mailer
            .send(
                &payload.to,
                "Pricewatch test e-mail",
                "Pricewatch can reach your inbox.".to_string(),
            )
            .await
        {
            Ok(()) => ApiResponse::Ok(SimpleResponse::new(format!(
                "test e-mail sent to {}",
                payload.to
            ))),
            Err(err) => {
                tracing::error!("test e-mail failed: {err:#}");
                ApiResponse::BadGateway(SimpleResponse::new("test e-mail delivery failed"))
            }
        }
    }
}
