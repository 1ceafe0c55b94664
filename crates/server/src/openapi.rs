use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Body of `PUT /recipes/{id}`
#[derive(ToSchema)]
pub struct RecipeInputDoc {
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub category_id: i32,
}

#[derive(ToSchema)]
pub struct RecipeDoc {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub category_id: i32,
    pub author_id: i32,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::recipes::list,
        crate::routes::recipes::create,
        crate::routes::recipes::get,
        crate::routes::recipes::update,
        crate::routes::recipes::delete,
        crate::routes::favourites::list,
        crate::routes::favourites::add,
        crate::routes::favourites::remove,
        crate::routes::catalog::list_categories,
        crate::routes::catalog::create_category,
        crate::routes::catalog::register_user,
    ),
    components(
        schemas(
            HealthResponse,
            RecipeInputDoc,
            RecipeDoc,
            crate::routes::recipes::CreateRecipeRequest,
            crate::routes::catalog::CreateCategoryRequest,
            crate::routes::catalog::RegisterUserRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "recipes"),
        (name = "favourites"),
        (name = "catalog")
    )
)]
pub struct ApiDoc;
