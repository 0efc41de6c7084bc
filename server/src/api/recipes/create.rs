use crate::api::{ApiError, ErrorResponse, JsonBody};
use crate::models::{Recipe, RecipeRequest};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = Recipe),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(store): State<AppState>,
    JsonBody(request): JsonBody<RecipeRequest>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let recipe = store.create(request)?;
    tracing::info!(recipe_id = %recipe.id, "Created recipe");

    Ok((StatusCode::CREATED, Json(recipe)))
}
