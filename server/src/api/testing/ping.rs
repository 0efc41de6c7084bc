use crate::api::MessageResponse;
use axum::{response::IntoResponse, Json};

#[utoipa::path(
    get,
    path = "/ping",
    tag = "testing",
    responses(
        (status = 200, description = "Service is up", body = MessageResponse)
    )
)]
pub async fn ping() -> impl IntoResponse {
    Json(MessageResponse {
        message: "pong".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_ping() {
        let response = ping().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], br#"{"message":"pong"}"#);
    }
}
