use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use service::recipe::domain::{Category, User};

use crate::{errors::JsonApiError, routes::ServerState};

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterUserRequest {
    pub username: String,
}

#[utoipa::path(get, path = "/categories", tag = "catalog", responses((status = 200, description = "List OK")))]
pub async fn list_categories(State(state): State<ServerState>) -> Result<Json<Vec<Category>>, JsonApiError> {
    Ok(Json(state.recipes.list_categories().await?))
}

#[utoipa::path(
    post, path = "/categories", tag = "catalog",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Conflict")
    )
)]
pub async fn create_category(State(state): State<ServerState>, Json(body): Json<CreateCategoryRequest>) -> Result<(StatusCode, Json<Category>), JsonApiError> {
    let category = state.recipes.create_category(&body.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    post, path = "/users", tag = "catalog",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Registered"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Conflict")
    )
)]
pub async fn register_user(State(state): State<ServerState>, Json(body): Json<RegisterUserRequest>) -> Result<(StatusCode, Json<User>), JsonApiError> {
    let user = state.recipes.register_user(&body.username).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
