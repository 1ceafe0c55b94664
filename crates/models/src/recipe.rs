use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{app_user, category, errors};

pub const NAME_MAX_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub ingredients: String,
    pub category_id: i32,
    pub author_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Category,
    Author,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
            Relation::Author => Entity::belongs_to(app_user::Entity)
                .from(Column::AuthorId)
                .to(app_user::Column::Id)
                .into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("recipe name required".into())); }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("recipe name longer than {} characters", NAME_MAX_LEN)));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    description: &str,
    ingredients: &str,
    category_id: i32,
    author_id: i32,
) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        ingredients: Set(ingredients.to_string()),
        category_id: Set(category_id),
        author_id: Set(author_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
