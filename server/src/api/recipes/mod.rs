pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod search;
pub mod update;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /recipes endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes",
            get(list::list_recipes).post(create::create_recipe),
        )
        .route("/recipes/search", get(search::search_recipes))
        .route(
            "/recipes/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        search::search_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(crate::models::Recipe, crate::models::RecipeRequest))
)]
pub struct ApiDoc;
