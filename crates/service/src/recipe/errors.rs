use thiserror::Error;

/// Business errors for recipe workflows
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("category {0} not found")]
    CategoryNotFound(i32),
    #[error("recipe {0} not found")]
    RecipeNotFound(i32),
    #[error("user '{0}' not found")]
    UserNotFound(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("already exists: {0}")]
    Conflict(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl RecipeError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            RecipeError::CategoryNotFound(_) => 2001,
            RecipeError::RecipeNotFound(_) => 2002,
            RecipeError::UserNotFound(_) => 2003,
            RecipeError::Validation(_) => 2101,
            RecipeError::Conflict(_) => 2102,
            RecipeError::Repository(_) => 2200,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RecipeError::CategoryNotFound(_) | RecipeError::RecipeNotFound(_) | RecipeError::UserNotFound(_)
        )
    }
}

impl From<models::errors::ModelError> for RecipeError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => RecipeError::Validation(msg),
            models::errors::ModelError::Conflict(msg) => RecipeError::Conflict(msg),
            models::errors::ModelError::Db(msg) => RecipeError::Repository(msg),
        }
    }
}

impl From<sea_orm::DbErr> for RecipeError {
    fn from(e: sea_orm::DbErr) -> Self { models::errors::ModelError::from(e).into() }
}
