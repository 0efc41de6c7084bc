use crate::api::{ApiError, ErrorResponse};
use crate::models::Recipe;
use crate::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes, possibly none", body = Vec<Recipe>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_recipes(State(store): State<AppState>) -> Result<Json<Vec<Recipe>>, ApiError> {
    Ok(Json(store.list()?))
}
