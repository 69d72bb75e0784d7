use axum::{Extension, extract::Path};
use pricewatch_core::response::ApiResponse;
use sea_orm::EntityTrait;

use crate::app::model::product;
use crate::app::response::{MessageResponse, SimpleResponse};
use crate::app::state::AppState;
use crate::services::product as product_service;

pub struct ProductController;

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ProductList {
    pub products: Vec<product::Model>,
}

type ProductListResponse = ApiResponse<ProductList, SimpleResponse>;
type ProductResponse = ApiResponse<product::Model, SimpleResponse>;

#[pricewatch_macros::controller]
impl ProductController {
    /// All tracked products.
    #[pricewatch_macros::get("/")]
    #[pricewatch_macros::api_response(status = 200, body = ProductList, description = "Tracked products")]
    pub async fn list(Extension(state): Extension<AppState>) -> ProductListResponse {
        match product::Entity::find().all(&state.db).await {
            Ok(products) => ApiResponse::Ok(ProductList { products }),
            Err(err) => {
                tracing::error!("failed to list products: {err}");
                ApiResponse::InternalServerError(SimpleResponse::new("failed to list products"))
            }
        }
    }

    #[pricewatch_macros::get("/{id}")]
    #[pricewatch_macros::api_response(status = 200, body = product::Model, description = "Product")]
    #[pricewatch_macros::api_response(status = 404, body = SimpleResponse, description = "Unknown product")]
    pub async fn show(
        Extension(state): Extension<AppState>,
        Path(id): Path<i32>,
    ) -> ProductResponse {
        match product::Entity::find_by_id(id).one(&state.db).await {
            Ok(Some(found)) => ApiResponse::Ok(found),
            Ok(None) => ApiResponse::NotFound(SimpleResponse::new("unknown product")),
            Err(err) => {
                tracing::error!("failed to load product {id}: {err}");
                ApiResponse::InternalServerError(SimpleResponse::new("failed to load product"))
            }
        }
    }

    /// Trigger a fetch-and-update pass outside the schedule.
    #[pricewatch_macros::post("/refresh")]
    #[pricewatch_macros::api_response(status = 200, body = SimpleResponse, description = "Refresh completed")]
    #[pricewatch_macros::api_response(status = 502, body = SimpleResponse, description = "Upstream fetch failed")]
    pub async fn refresh(Extension(state): Extension<AppState>) -> MessageResponse {
        match product_service::fetch_and_update_products(&state).await {
            Ok(count) => {
                ApiResponse::Ok(SimpleResponse::new(format!("refreshed {count} products")))
            }
            Err(err) => {
                tracing::error!("manual product refresh failed: {err:#}");
                ApiResponse::BadGateway(SimpleResponse::new("upstream fetch failed"))
            }
        }
    }
}
