#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct SimpleResponse {
    pub message: String,
}

impl SimpleResponse {
    pub fn new(message: impl Into<String>) -> Self {
        SimpleResponse {
            message: message.into(),
        }
    }
}

pub type MessageResponse =
    pricewatch_core::response::ApiResponse<SimpleResponse, SimpleResponse>;
