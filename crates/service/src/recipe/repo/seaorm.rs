use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use models::{app_user, category, recipe, user_favourite};

use crate::recipe::domain::{Category, NewRecipe, Recipe, User};
use crate::recipe::errors::RecipeError;
use crate::recipe::repository::{name_matches, CategoryRepository, RecipeRepository, UserRepository};

/// `LOWER(name) LIKE '%text%'` with LIKE wildcards in `text` taken literally.
fn name_contains(text: &str) -> SimpleExpr {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    Expr::expr(Func::lower(Expr::col(recipe::Column::Name)))
        .like(LikeExpr::new(format!("%{}%", escaped)).escape('\\'))
}

pub struct SeaOrmRecipeRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRecipeRepository {
    async fn list_where(&self, cond: Option<SimpleExpr>, category_id: Option<i32>) -> Result<Vec<Recipe>, RecipeError> {
        let mut q = recipe::Entity::find();
        if let Some(cond) = cond {
            q = q.filter(cond);
        }
        if let Some(cid) = category_id {
            q = q.filter(recipe::Column::CategoryId.eq(cid));
        }
        let rows = q.order_by_asc(recipe::Column::Id).all(&self.db).await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn list_named(&self, text: &str, category_id: Option<i32>) -> Result<Vec<Recipe>, RecipeError> {
        match self.db.get_database_backend() {
            // SQLite LOWER() folds ASCII only, so non-Latin names are matched here
            DbBackend::Sqlite => {
                let rows = self.list_where(None, category_id).await?;
                Ok(rows.into_iter().filter(|r| name_matches(&r.name, text)).collect())
            }
            _ => self.list_where(Some(name_contains(text)), category_id).await,
        }
    }
}

#[async_trait]
impl RecipeRepository for SeaOrmRecipeRepository {
    async fn list(&self) -> Result<Vec<Recipe>, RecipeError> {
        self.list_where(None, None).await
    }

    async fn get(&self, id: i32) -> Result<Option<Recipe>, RecipeError> {
        let res = recipe::Entity::find_by_id(id).one(&self.db).await?;
        Ok(res.map(Recipe::from))
    }

    async fn get_many(&self, ids: &[i32]) -> Result<Vec<Recipe>, RecipeError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = recipe::Entity::find()
            .filter(recipe::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await?;
        let mut by_id: HashMap<i32, recipe::Model> = rows.into_iter().map(|r| (r.id, r)).collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).map(Recipe::from).collect())
    }

    async fn create(&self, r: NewRecipe) -> Result<Recipe, RecipeError> {
        let created = recipe::create(&self.db, &r.name, &r.description, &r.ingredients, r.category_id, r.author_id).await?;
        Ok(created.into())
    }

    async fn update(&self, r: Recipe) -> Result<Recipe, RecipeError> {
        let mut am: recipe::ActiveModel = recipe::Entity::find_by_id(r.id)
            .one(&self.db)
            .await?
            .ok_or(RecipeError::RecipeNotFound(r.id))?
            .into();
        // author_id is never written after creation
        am.name = Set(r.name);
        am.description = Set(r.description);
        am.ingredients = Set(r.ingredients);
        am.category_id = Set(r.category_id);
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipeError> {
        let txn = self.db.begin().await?;
        user_favourite::Entity::delete_many()
            .filter(user_favourite::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;
        let res = recipe::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_by_name_containing(&self, text: &str) -> Result<Vec<Recipe>, RecipeError> {
        self.list_named(text, None).await
    }

    async fn list_by_category(&self, category_id: i32) -> Result<Vec<Recipe>, RecipeError> {
        self.list_where(None, Some(category_id)).await
    }

    async fn list_by_name_containing_and_category(&self, text: &str, category_id: i32) -> Result<Vec<Recipe>, RecipeError> {
        self.list_named(text, Some(category_id)).await
    }
}

pub struct SeaOrmCategoryRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn get(&self, id: i32) -> Result<Option<Category>, RecipeError> {
        let res = category::Entity::find_by_id(id).one(&self.db).await?;
        Ok(res.map(Category::from))
    }

    async fn list(&self) -> Result<Vec<Category>, RecipeError> {
        let rows = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RecipeError> {
        let res = category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(res.map(Category::from))
    }

    async fn create(&self, name: &str) -> Result<Category, RecipeError> {
        let created = category::create(&self.db, name).await?;
        Ok(created.into())
    }
}

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    async fn load(&self, u: app_user::Model) -> Result<User, RecipeError> {
        let favourites = user_favourite::recipe_ids_for_user(&self.db, u.id).await?;
        Ok(User { id: u.id, username: u.username, favourites })
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RecipeError> {
        match app_user::find_by_username(&self.db, username).await? {
            Some(u) => Ok(Some(self.load(u).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, username: &str) -> Result<User, RecipeError> {
        let created = app_user::create(&self.db, username).await?;
        Ok(User { id: created.id, username: created.username, favourites: Vec::new() })
    }

    async fn save(&self, user: &User) -> Result<User, RecipeError> {
        let stored = app_user::Entity::find_by_id(user.id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RecipeError::UserNotFound(user.username.clone()))?;

        let txn = self.db.begin().await?;
        let existing = user_favourite::recipe_ids_for_user(&txn, user.id).await?;
        let removed: Vec<i32> = existing.iter().copied().filter(|id| !user.favourites.contains(id)).collect();
        if !removed.is_empty() {
            user_favourite::Entity::delete_many()
                .filter(user_favourite::Column::UserId.eq(user.id))
                .filter(user_favourite::Column::RecipeId.is_in(removed))
                .exec(&txn)
                .await?;
        }
        for recipe_id in user.favourites.iter().filter(|id| !existing.contains(id)) {
            user_favourite::insert(&txn, user.id, *recipe_id).await?;
        }
        txn.commit().await?;

        self.load(stored).await
    }
}
