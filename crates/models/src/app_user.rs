use sea_orm::{entity::prelude::*, ColumnTrait, QueryFilter, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

pub const USERNAME_MAX_LEN: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_username(username: &str) -> Result<(), errors::ModelError> {
    if username.is_empty() { return Err(errors::ModelError::Validation("username required".into())); }
    if username.chars().any(char::is_whitespace) {
        return Err(errors::ModelError::Validation("username must not contain whitespace".into()));
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("username longer than {} characters", USERNAME_MAX_LEN)));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, username: &str) -> Result<Model, errors::ModelError> {
    validate_username(username)?;
    let am = ActiveModel {
        username: Set(username.to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::Username.eq(username)).one(db).await?)
}
