use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::{warn, Level};
use utoipa::OpenApi;

use common::types::Health;
use service::recipe::repo::seaorm::{SeaOrmCategoryRepository, SeaOrmRecipeRepository, SeaOrmUserRepository};
use service::recipe::RecipeService;

pub mod catalog;
pub mod favourites;
pub mod recipes;

pub type AppRecipeService = RecipeService<SeaOrmRecipeRepository, SeaOrmCategoryRepository, SeaOrmUserRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub recipes: Arc<AppRecipeService>,
}

impl ServerState {
    /// Wire SeaORM repositories over one shared connection pool.
    pub fn new(db: DatabaseConnection) -> Self {
        let recipes = RecipeService::new(
            Arc::new(SeaOrmRecipeRepository { db: db.clone() }),
            Arc::new(SeaOrmCategoryRepository { db: db.clone() }),
            Arc::new(SeaOrmUserRepository { db: db.clone() }),
        );
        Self { db, recipes: Arc::new(recipes) }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses(
        (status = 200, description = "Service and database are up"),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn health(State(state): State<ServerState>) -> (StatusCode, Json<Health>) {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(Health { status: "ok" })),
        Err(e) => {
            warn!(error = %e, "database ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(Health { status: "degraded" }))
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::openapi::ApiDoc::openapi())
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let recipe_routes = Router::new()
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route("/recipes/:id", get(recipes::get).put(recipes::update).delete(recipes::delete));

    let catalog_routes = Router::new()
        .route("/categories", get(catalog::list_categories).post(catalog::create_category))
        .route("/users", post(catalog::register_user));

    let favourite_routes = Router::new()
        .route("/users/:username/favourites", get(favourites::list))
        .route(
            "/users/:username/favourites/:recipe_id",
            post(favourites::add).delete(favourites::remove),
        );

    // Compose
    public
        .merge(recipe_routes)
        .merge(catalog_routes)
        .merge(favourite_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx and friends at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
