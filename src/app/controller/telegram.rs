use axum::{Extension, Json};
use pricewatch_core::response::ApiResponse;
use serde::{Deserialize, Serialize};

use crate::app::response::{MessageResponse, SimpleResponse};
use crate::app::state::AppState;

pub struct TelegramController;

/// Subset of the Telegram update payload the webhook cares about.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TelegramUpdate {
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TelegramMessage {
    pub chat: TelegramChat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TelegramChat {
    pub id: i64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BotStatus {
    pub configured: bool,
}

#[pricewatch_macros::controller]
impl TelegramController {
    /// Telegram pushes updates here. Always acks; answers `/start`.
    #[pricewatch_macros::post("/webhook")]
    #[pricewatch_macros::api_response(status = 200, body = SimpleResponse, description = "Update accepted")]
    pub async fn webhook(
        Extension(state): Extension<AppState>,
        Json(update): Json<TelegramUpdate>,
    ) -> MessageResponse {
        let Some(message) = update.message else {
            return ApiResponse::Ok(SimpleResponse::new("ignored"));
        };

        let chat_id = message.chat.id.to_string();
        let text = message.text.unwrap_or_default();

        if text.starts_with("/start") {
            if let Some(telegram) = &state.telegram {
                if let Err(err) = telegram
                    .send_message(
                        &chat_id,
                        "Pricewatch is online. Subscribe to products to get price-drop alerts here.",
                    )
                    .await
                {
                    tracing::error!("failed to answer /start from chat {chat_id}: {err:#}");
                }
            } else {
                tracing::warn!("received /start but no bot token is configured");
            }
        } else {
            tracing::debug!(chat = %chat_id, "unhandled telegram message");
        }

        ApiResponse::Ok(SimpleResponse::new("accepted"))
    }

    #[pricewatch_macros::get("/status")]
    #[pricewatch_macros::api_response(status = 200, body = BotStatus, description = "Bot configuration state")]
    pub async fn status(
        Extension(state): Extension<AppState>,
    ) -> ApiResponse<BotStatus, SimpleResponse> {
        ApiResponse::Ok(BotStatus {
            configured: state.telegram.is_some(),
        })
    }
}
