use crate::api::{ApiError, ErrorResponse, MessageResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted", body = MessageResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(store): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    store.delete(&id)?;
    tracing::info!(recipe_id = %id, "Deleted recipe");

    Ok(Json(MessageResponse {
        message: "recipe deleted".to_string(),
    }))
}
