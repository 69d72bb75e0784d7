use axum::{response::IntoResponse, http::StatusCode, Json};

#[derive(utoipa::IntoResponses)]
pub enum ApiResponse<T, E>
where T: serde::Serialize + utoipa::ToSchema,
      E: serde::Serialize + utoipa::ToSchema
{
    #[response(status = 200, description = "Ok")]
    Ok(T),

    #[response(status = 201, description = "Created")]
    Created(T),

    #[response(status = 400, description = "Bad request")]
    BadRequest(E),

    #[response(status = 404, description = "Not found")]
    NotFound(E),

    #[response(status = 502, description = "Upstream failure")]
    BadGateway(E),

    #[response(status = 500, description = "Internal server error")]
    InternalServerError(E),
}

impl<T, E> IntoResponse for ApiResponse<T, E>
where T: serde::Serialize + utoipa::ToSchema,
      E: serde::Serialize + utoipa::ToSchema
{
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::Ok(data) => (StatusCode::OK, Json(data)).into_response(),
            Self::Created(data) => (StatusCode::CREATED, Json(data)).into_response(),
            Self::BadRequest(error) => (StatusCode::BAD_REQUEST, Json(error)).into_response(),
            Self::NotFound(error) => (StatusCode::NOT_FOUND, Json(error)).into_response(),
            Self::BadGateway(error) => (StatusCode::BAD_GATEWAY, Json(error)).into_response(),
            Self::InternalServerError(error) => (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize, utoipa::ToSchema)]
    struct Note {
        message: String,
    }

    fn note(message: &str) -> Note {
        Note { message: message.into() }
    }

    #[test]
    fn variants_map_to_their_status_codes() {
        let cases: Vec<(ApiResponse<Note, Note>, StatusCode)> = vec![
            (ApiResponse::Ok(note("ok")), StatusCode::OK),
            (ApiResponse::Created(note("created")), StatusCode::CREATED),
            (ApiResponse::BadRequest(note("bad")), StatusCode::BAD_REQUEST),
            (ApiResponse::NotFound(note("missing")), StatusCode::NOT_FOUND),
            (ApiResponse::BadGateway(note("upstream")), StatusCode::BAD_GATEWAY),
            (
                ApiResponse::InternalServerError(note("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (response, expected) in cases {
            assert_eq!(response.into_response().status(), expected);
        }
    }
}
