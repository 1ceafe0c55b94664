use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use service::recipe::domain::{Recipe, RecipeInput};
use tracing::info;

use crate::{errors::JsonApiError, routes::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive substring of the recipe name
    pub name: Option<String>,
    pub category_id: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateRecipeRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: String,
    pub category_id: i32,
    /// Author of the recipe
    pub username: String,
}

impl CreateRecipeRequest {
    fn into_parts(self) -> (String, RecipeInput) {
        let input = RecipeInput {
            name: self.name,
            description: self.description,
            ingredients: self.ingredients,
            category_id: self.category_id,
        };
        (self.username, input)
    }
}

#[utoipa::path(
    get, path = "/recipes", tag = "recipes",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK"),
        (status = 404, description = "Category Not Found")
    )
)]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<Recipe>>, JsonApiError> {
    let list = state.recipes.search(q.name.as_deref(), q.category_id).await?;
    info!(count = list.len(), "list recipes");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/recipes", tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Category or User Not Found")
    )
)]
pub async fn create(State(state): State<ServerState>, Json(body): Json<CreateRecipeRequest>) -> Result<(StatusCode, Json<Recipe>), JsonApiError> {
    let (username, input) = body.into_parts();
    let recipe = state.recipes.save_recipe(input, &username).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

#[utoipa::path(
    get, path = "/recipes/{id}", tag = "recipes",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::RecipeDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Recipe>, JsonApiError> {
    match state.recipes.find_by_id(id).await? {
        Some(r) => Ok(Json(r)),
        None => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("recipe {} not found", id)))),
    }
}

#[utoipa::path(
    put, path = "/recipes/{id}", tag = "recipes",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = crate::openapi::RecipeInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Recipe or Category Not Found")
    )
)]
pub async fn update(State(state): State<ServerState>, Path(id): Path<i32>, Json(input): Json<RecipeInput>) -> Result<Json<Recipe>, JsonApiError> {
    let recipe = state.recipes.edit_recipe(id, input).await?;
    Ok(Json(recipe))
}

#[utoipa::path(
    delete, path = "/recipes/{id}", tag = "recipes",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    if state.recipes.delete_by_id(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("recipe {} not found", id))))
    }
}
