pub mod recipes;
pub mod testing;

use crate::store::StoreError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Confirmation body for operations that return no record
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Errors a handler can return. Each maps to one status code and an
/// `ErrorResponse` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    MalformedRequest(String),

    #[error("recipe not found")]
    NotFound,

    #[error("{0}")]
    Storage(String),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Storage(msg) => ApiError::Storage(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::MalformedRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "recipe not found".to_string()),
            ApiError::Storage(msg) => {
                // Backend detail stays in the logs
                tracing::error!("Storage failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal storage error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// JSON request body decoded whatever the `Content-Type` header says.
/// Anything that does not parse into `T` is a `MalformedRequest`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::MalformedRequest(e.body_text()))?;
        let Json(value) =
            Json::<T>::from_bytes(&bytes).map_err(|e| ApiError::MalformedRequest(e.body_text()))?;
        Ok(JsonBody(value))
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Recipes API", description = "Create, list, search, update and delete recipes"),
        components(schemas(ErrorResponse, MessageResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> =
        vec![recipes::ApiDoc::openapi(), testing::ApiDoc::openapi()];

    for module_spec in modules {
        spec.merge(module_spec);
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let spec = openapi();
        for path in ["/recipes", "/recipes/search", "/recipes/{id}", "/ping"] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MalformedRequest("bad".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Storage("down".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
