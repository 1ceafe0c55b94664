//! Recipe module: three-layer architecture (domain, repository, service).
//!
//! Recipes, their categories and users' favourites are handled here; SeaORM and
//! in-memory repositories live side by side.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use errors::RecipeError;
pub use service::RecipeService;
