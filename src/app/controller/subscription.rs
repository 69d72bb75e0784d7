use axum::{Extension, Json, extract::Path};
use pricewatch_core::response::ApiResponse;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;

use crate::app::model::subscription::{self, Channel};
use crate::app::model::product;
use crate::app::response::{MessageResponse, SimpleResponse};
use crate::app::state::AppState;

pub struct SubscriptionController;

/// Payload for `POST /api/subscriptions`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateSubscription {
    pub product_id: i32,
    pub channel: Channel,
    pub recipient: String,
    pub target_price: f64,
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct SubscriptionList {
    pub subscriptions: Vec<subscription::Model>,
}

type SubscriptionResponse = ApiResponse<subscription::Model, SimpleResponse>;
type SubscriptionListResponse = ApiResponse<SubscriptionList, SimpleResponse>;

#[pricewatch_macros::controller]
impl SubscriptionController {
    #[pricewatch_macros::post("/subscriptions")]
    #[pricewatch_macros::api_response(status = 201, body = subscription::Model, description = "Subscription created")]
    #[pricewatch_macros::api_response(status = 400, body = SimpleResponse, description = "Invalid subscription")]
    #[pricewatch_macros::api_response(status = 404, body = SimpleResponse, description = "Unknown product")]
    pub async fn create(
        Extension(state): Extension<AppState>,
        Json(payload): Json<CreateSubscription>,
    ) -> SubscriptionResponse {
        if payload.recipient.trim().is_empty() {
            return ApiResponse::BadRequest(SimpleResponse::new("recipient must not be empty"));
        }

        if !payload.target_price.is_finite() || payload.target_price <= 0.0 {
            return ApiResponse::BadRequest(SimpleResponse::new("target_price must be positive"));
        }

        match product::Entity::find_by_id(payload.product_id).one(&state.db).await {
            Ok(Some(_)) => {}
            Ok(None) => return ApiResponse::NotFound(SimpleResponse::new("unknown product")),
            Err(err) => {
                tracing::error!("failed to look up product {}: {err}", payload.product_id);
                return ApiResponse::InternalServerError(SimpleResponse::new(
                    "failed to create subscription",
                ));
            }
        }

        let active = subscription::ActiveModel {
            product_id: Set(payload.product_id),
            channel: Set(payload.channel),
            recipient: Set(payload.recipient),
            target_price: Set(payload.target_price),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        match active.insert(&state.db).await {
            Ok(created) => ApiResponse::Created(created),
            Err(err) => {
                tracing::error!("failed to store subscription: {err}");
                ApiResponse::InternalServerError(SimpleResponse::new(
                    "failed to create subscription",
                ))
            }
        }
    }

    #[pricewatch_macros::get("/subscriptions")]
    #[pricewatch_macros::api_response(status = 200, body = SubscriptionList, description = "Active subscriptions")]
    pub async fn list(Extension(state): Extension<AppState>) -> SubscriptionListResponse {
        match subscription::Entity::find().all(&state.db).await {
            Ok(subscriptions) => ApiResponse::Ok(SubscriptionList { subscriptions }),
            Err(err) => {
                tracing::error!("failed to list subscriptions: {err}");
                ApiResponse::InternalServerError(SimpleResponse::new(
                    "failed to list subscriptions",
                ))
            }
        }
    }

    #[pricewatch_macros::delete("/subscriptions/{id}")]
    #[pricewatch_macros::api_response(status = 200, body = SimpleResponse, description = "Subscription deleted")]
    #[pricewatch_macros::api_response(status = 404, body = SimpleResponse, description = "Unknown subscription")]
    pub async fn remove(
        Extension(state): Extension<AppState>,
        Path(id): Path<i32>,
    ) -> MessageResponse {
        match subscription::Entity::delete_by_id(id).exec(&state.db).await {
            Ok(result) if result.rows_affected == 0 => {
                ApiResponse::NotFound(SimpleResponse::new("unknown subscription"))
            }
            Ok(_) => ApiResponse::Ok(SimpleResponse::new("subscription deleted")),
            Err(err) => {
                tracing::error!("failed to delete subscription {id}: {err}");
                ApiResponse::InternalServerError(SimpleResponse::new(
                    "failed to delete subscription",
                ))
            }
        }
    }
}
