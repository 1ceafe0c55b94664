use sea_orm::{entity::prelude::*, sea_query::OnConflict, ColumnTrait, ConnectionTrait, QueryFilter, QueryOrder, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{app_user, errors, recipe};

/// One favourite membership; rows ordered by `id` give favouriting order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_favourite")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub recipe_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Recipe,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(app_user::Entity)
                .from(Column::UserId)
                .to(app_user::Column::Id)
                .into(),
            Relation::Recipe => Entity::belongs_to(recipe::Entity)
                .from(Column::RecipeId)
                .to(recipe::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Recipe ids favourited by a user, oldest first.
pub async fn recipe_ids_for_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Vec<i32>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|r| r.recipe_id).collect())
}

/// Add a membership row; returns `false` when the pair is already stored.
pub async fn insert<C: ConnectionTrait>(db: &C, user_id: i32, recipe_id: i32) -> Result<bool, errors::ModelError> {
    let am = ActiveModel {
        user_id: Set(user_id),
        recipe_id: Set(recipe_id),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    let res = Entity::insert(am)
        .on_conflict(
            OnConflict::columns([Column::UserId, Column::RecipeId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;
    match res {
        Ok(rows) => Ok(rows > 0),
        Err(DbErr::RecordNotInserted) => Ok(false),
        Err(e) => Err(e.into()),
    }
}
