use crate::api::{ApiError, ErrorResponse};
use crate::models::Recipe;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};

/// First `tag` value in the query string. Repeats are ignored and an absent
/// tag is the empty tag, which only matches recipes with an empty-string tag.
fn first_tag(pairs: Vec<(String, String)>) -> String {
    pairs
        .into_iter()
        .find(|(key, _)| key == "tag")
        .map(|(_, value)| value)
        .unwrap_or_default()
}

#[utoipa::path(
    get,
    path = "/recipes/search",
    tag = "recipes",
    params(
        ("tag" = Option<String>, Query, description = "Tag to match, ignoring case")
    ),
    responses(
        (status = 200, description = "Recipes carrying the tag", body = Vec<Recipe>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn search_recipes(
    State(store): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let tag = first_tag(pairs);

    Ok(Json(store.find_by_tag(&tag)?))
}
