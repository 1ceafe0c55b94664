use axum::{extract::{Path, State}, http::StatusCode, Json};
use service::recipe::domain::Recipe;

use crate::{errors::JsonApiError, routes::ServerState};

#[utoipa::path(
    get, path = "/users/{username}/favourites", tag = "favourites",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "Favourites in the order they were added"),
        (status = 404, description = "User Not Found")
    )
)]
pub async fn list(State(state): State<ServerState>, Path(username): Path<String>) -> Result<Json<Vec<Recipe>>, JsonApiError> {
    Ok(Json(state.recipes.find_all_favourites(&username).await?))
}

#[utoipa::path(
    post, path = "/users/{username}/favourites/{recipe_id}", tag = "favourites",
    params(
        ("username" = String, Path, description = "Username"),
        ("recipe_id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe is a favourite"),
        (status = 404, description = "User or Recipe Not Found")
    )
)]
pub async fn add(State(state): State<ServerState>, Path((username, recipe_id)): Path<(String, i32)>) -> Result<Json<Recipe>, JsonApiError> {
    Ok(Json(state.recipes.add_to_favourites(&username, recipe_id).await?))
}

#[utoipa::path(
    delete, path = "/users/{username}/favourites/{recipe_id}", tag = "favourites",
    params(
        ("username" = String, Path, description = "Username"),
        ("recipe_id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe is not a favourite"),
        (status = 404, description = "User or Recipe Not Found")
    )
)]
pub async fn remove(State(state): State<ServerState>, Path((username, recipe_id)): Path<(String, i32)>) -> Result<StatusCode, JsonApiError> {
    state.recipes.delete_from_favourites(&username, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
