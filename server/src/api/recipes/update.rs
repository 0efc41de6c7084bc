use crate::api::{ApiError, ErrorResponse, JsonBody};
use crate::models::{Recipe, RecipeRequest};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

#[utoipa::path(
    put,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe updated successfully", body = Recipe),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(store): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<RecipeRequest>,
) -> Result<Json<Recipe>, ApiError> {
    // The store keeps id and publishedAt; only content fields are replaced
    let recipe = store.update(&id, request)?;
    tracing::info!(recipe_id = %recipe.id, "Updated recipe");

    Ok(Json(recipe))
}
