use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Category, NewRecipe, Recipe, RecipeInput, User};
use super::errors::RecipeError;
use super::repository::{CategoryRepository, RecipeRepository, UserRepository};

/// Recipe business service independent of web framework and storage.
///
/// Resolves referenced categories, users and recipes through the repositories and
/// fails with a typed not-found error when one is missing.
pub struct RecipeService<R: RecipeRepository, C: CategoryRepository, U: UserRepository> {
    recipes: Arc<R>,
    categories: Arc<C>,
    users: Arc<U>,
}

impl<R: RecipeRepository, C: CategoryRepository, U: UserRepository> RecipeService<R, C, U> {
    pub fn new(recipes: Arc<R>, categories: Arc<C>, users: Arc<U>) -> Self {
        Self { recipes, categories, users }
    }

    async fn category(&self, id: i32) -> Result<Category, RecipeError> {
        self.categories.get(id).await?.ok_or(RecipeError::CategoryNotFound(id))
    }

    async fn user(&self, username: &str) -> Result<User, RecipeError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| RecipeError::UserNotFound(username.to_string()))
    }

    async fn recipe(&self, id: i32) -> Result<Recipe, RecipeError> {
        self.recipes.get(id).await?.ok_or(RecipeError::RecipeNotFound(id))
    }

    pub async fn find_all(&self) -> Result<Vec<Recipe>, RecipeError> {
        self.recipes.list().await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipeError> {
        self.recipes.get(id).await
    }

    /// Delete a recipe; returns whether it existed.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i32) -> Result<bool, RecipeError> {
        let existed = self.recipes.delete(id).await?;
        info!(recipe_id = id, existed, "recipe_deleted");
        Ok(existed)
    }

    /// Replace name, description, ingredients and category of an existing recipe.
    /// The author never changes.
    #[instrument(skip(self, input), fields(category_id = input.category_id))]
    pub async fn edit_recipe(&self, id: i32, input: RecipeInput) -> Result<Recipe, RecipeError> {
        let category = self.category(input.category_id).await?;
        let mut recipe = self.recipe(id).await?;
        models::recipe::validate_name(&input.name)?;

        recipe.name = input.name;
        recipe.description = input.description;
        recipe.ingredients = input.ingredients;
        recipe.category_id = category.id;

        let updated = self.recipes.update(recipe).await?;
        info!(recipe_id = updated.id, "recipe_edited");
        Ok(updated)
    }

    /// Create a recipe authored by `username`.
    ///
    /// # Examples
    /// ```
    /// use service::recipe::{RecipeService, domain::RecipeInput, repository::{mock::MockCatalog, CategoryRepository, UserRepository}};
    /// use std::sync::Arc;
    /// let catalog = Arc::new(MockCatalog::default());
    /// let svc = RecipeService::new(catalog.clone(), catalog.clone(), catalog.clone());
    /// let soups = tokio_test::block_on(CategoryRepository::create(catalog.as_ref(), "Soups")).unwrap();
    /// tokio_test::block_on(UserRepository::create(catalog.as_ref(), "alice")).unwrap();
    /// let input = RecipeInput { name: "Soup".into(), description: "desc".into(), ingredients: "water,salt".into(), category_id: soups.id };
    /// let recipe = tokio_test::block_on(svc.save_recipe(input, "alice")).unwrap();
    /// assert_eq!(recipe.category_id, soups.id);
    /// ```
    #[instrument(skip(self, input), fields(category_id = input.category_id))]
    pub async fn save_recipe(&self, input: RecipeInput, username: &str) -> Result<Recipe, RecipeError> {
        let category = self.category(input.category_id).await?;
        let author = self.user(username).await?;
        models::recipe::validate_name(&input.name)?;

        let created = self
            .recipes
            .create(NewRecipe {
                name: input.name,
                description: input.description,
                ingredients: input.ingredients,
                category_id: category.id,
                author_id: author.id,
            })
            .await?;
        info!(recipe_id = created.id, author = %author.username, "recipe_created");
        Ok(created)
    }

    /// The user's favourite recipes in the order they were favourited.
    pub async fn find_all_favourites(&self, username: &str) -> Result<Vec<Recipe>, RecipeError> {
        let user = self.user(username).await?;
        self.recipes.get_many(&user.favourites).await
    }

    /// Add a recipe to the user's favourites. Adding twice is a no-op.
    ///
    /// # Examples
    /// ```
    /// use service::recipe::{RecipeService, domain::RecipeInput, repository::{mock::MockCatalog, CategoryRepository, UserRepository}};
    /// use std::sync::Arc;
    /// let catalog = Arc::new(MockCatalog::default());
    /// let svc = RecipeService::new(catalog.clone(), catalog.clone(), catalog.clone());
    /// let c = tokio_test::block_on(CategoryRepository::create(catalog.as_ref(), "Soups")).unwrap();
    /// tokio_test::block_on(UserRepository::create(catalog.as_ref(), "alice")).unwrap();
    /// let r = tokio_test::block_on(svc.save_recipe(RecipeInput { name: "Soup".into(), description: String::new(), ingredients: String::new(), category_id: c.id }, "alice")).unwrap();
    /// tokio_test::block_on(svc.add_to_favourites("alice", r.id)).unwrap();
    /// tokio_test::block_on(svc.add_to_favourites("alice", r.id)).unwrap();
    /// let favs = tokio_test::block_on(svc.find_all_favourites("alice")).unwrap();
    /// assert_eq!(favs, vec![r]);
    /// ```
    #[instrument(skip(self))]
    pub async fn add_to_favourites(&self, username: &str, recipe_id: i32) -> Result<Recipe, RecipeError> {
        let mut user = self.user(username).await?;
        let recipe = self.recipe(recipe_id).await?;
        if user.add_favourite(recipe.id) {
            self.users.save(&user).await?;
            info!(recipe_id, "favourite_added");
        } else {
            debug!(recipe_id, "already a favourite");
        }
        Ok(recipe)
    }

    /// Remove a recipe from the user's favourites. Removing a non-member is a no-op.
    #[instrument(skip(self))]
    pub async fn delete_from_favourites(&self, username: &str, recipe_id: i32) -> Result<(), RecipeError> {
        let mut user = self.user(username).await?;
        let recipe = self.recipe(recipe_id).await?;
        if user.remove_favourite(recipe.id) {
            self.users.save(&user).await?;
            info!(recipe_id, "favourite_removed");
        } else {
            debug!(recipe_id, "not a favourite");
        }
        Ok(())
    }

    pub async fn find_all_by_name(&self, name: &str) -> Result<Vec<Recipe>, RecipeError> {
        self.recipes.list_by_name_containing(name).await
    }

    pub async fn find_all_by_category(&self, category_id: i32) -> Result<Vec<Recipe>, RecipeError> {
        let category = self.category(category_id).await?;
        self.recipes.list_by_category(category.id).await
    }

    pub async fn find_all_by_name_and_category(&self, name: &str, category_id: i32) -> Result<Vec<Recipe>, RecipeError> {
        let category = self.category(category_id).await?;
        self.recipes.list_by_name_containing_and_category(name, category.id).await
    }

    /// List view dispatch: no filter, name only, category only, or both.
    pub async fn search(&self, name: Option<&str>, category_id: Option<i32>) -> Result<Vec<Recipe>, RecipeError> {
        match (name, category_id) {
            (None, None) => self.find_all().await,
            (Some(name), None) => self.find_all_by_name(name).await,
            (None, Some(cid)) => self.find_all_by_category(cid).await,
            (Some(name), Some(cid)) => self.find_all_by_name_and_category(name, cid).await,
        }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, RecipeError> {
        self.categories.list().await
    }

    #[instrument(skip(self))]
    pub async fn create_category(&self, name: &str) -> Result<Category, RecipeError> {
        models::category::validate_name(name)?;
        let name = name.trim();
        if self.categories.find_by_name(name).await?.is_some() {
            return Err(RecipeError::Conflict(format!("category '{}'", name)));
        }
        let created = self.categories.create(name).await?;
        info!(category_id = created.id, "category_created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn register_user(&self, username: &str) -> Result<User, RecipeError> {
        models::app_user::validate_username(username)?;
        if let Some(existing) = self.users.find_by_username(username).await? {
            debug!("user exists: {}", existing.username);
            return Err(RecipeError::Conflict(format!("user '{}'", username)));
        }
        let user = self.users.create(username).await?;
        info!(user_id = user.id, "user_registered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::repository::mock::MockCatalog;

    type Svc = RecipeService<MockCatalog, MockCatalog, MockCatalog>;

    struct Fixture {
        svc: Svc,
        category_id: i32,
        other_category_id: i32,
    }

    async fn fixture() -> Fixture {
        let catalog = Arc::new(MockCatalog::default());
        let svc = RecipeService::new(catalog.clone(), catalog.clone(), catalog);
        let c1 = svc.create_category("Soups").await.unwrap();
        let c2 = svc.create_category("Cakes").await.unwrap();
        svc.register_user("alice").await.unwrap();
        svc.register_user("bob").await.unwrap();
        Fixture { svc, category_id: c1.id, other_category_id: c2.id }
    }

    fn input(name: &str, category_id: i32) -> RecipeInput {
        RecipeInput {
            name: name.into(),
            description: "desc".into(),
            ingredients: "water,salt".into(),
            category_id,
        }
    }

    #[tokio::test]
    async fn save_then_find_returns_same_fields() {
        let f = fixture().await;
        let r = f.svc.save_recipe(input("Soup", f.category_id), "alice").await.unwrap();
        let alice = f.svc.users.find_by_username("alice").await.unwrap().unwrap();

        let found = f.svc.find_by_id(r.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Soup");
        assert_eq!(found.description, "desc");
        assert_eq!(found.ingredients, "water,salt");
        assert_eq!(found.category_id, f.category_id);
        assert_eq!(found.author_id, alice.id);
    }

    #[tokio::test]
    async fn save_checks_category_before_user() {
        let f = fixture().await;
        let err = f.svc.save_recipe(input("Soup", 999), "nobody").await.unwrap_err();
        assert!(matches!(err, RecipeError::CategoryNotFound(999)));

        let err = f.svc.save_recipe(input("Soup", f.category_id), "nobody").await.unwrap_err();
        assert!(matches!(err, RecipeError::UserNotFound(ref u) if u == "nobody"));
    }

    #[tokio::test]
    async fn save_rejects_blank_name() {
        let f = fixture().await;
        let err = f.svc.save_recipe(input("  ", f.category_id), "alice").await.unwrap_err();
        assert!(matches!(err, RecipeError::Validation(_)));
    }

    #[tokio::test]
    async fn find_by_id_absent_is_none() {
        let f = fixture().await;
        assert!(f.svc.find_by_id(12345).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn edit_never_changes_author() {
        let f = fixture().await;
        let r = f.svc.save_recipe(input("Soup", f.category_id), "alice").await.unwrap();

        let edited = f
            .svc
            .edit_recipe(
                r.id,
                RecipeInput {
                    name: "Cake".into(),
                    description: "sweet".into(),
                    ingredients: "flour".into(),
                    category_id: f.other_category_id,
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.id, r.id);
        assert_eq!(edited.author_id, r.author_id);
        assert_eq!(edited.name, "Cake");
        assert_eq!(edited.description, "sweet");
        assert_eq!(edited.ingredients, "flour");
        assert_eq!(edited.category_id, f.other_category_id);
        assert_eq!(f.svc.find_by_id(r.id).await.unwrap(), Some(edited));
    }

    #[tokio::test]
    async fn edit_resolves_category_then_recipe() {
        let f = fixture().await;
        let err = f.svc.edit_recipe(777, input("x", 888)).await.unwrap_err();
        assert!(matches!(err, RecipeError::CategoryNotFound(888)));
        let err = f.svc.edit_recipe(777, input("x", f.category_id)).await.unwrap_err();
        assert!(matches!(err, RecipeError::RecipeNotFound(777)));
    }

    #[tokio::test]
    async fn add_to_favourites_is_idempotent() {
        let f = fixture().await;
        let r = f.svc.save_recipe(input("Soup", f.category_id), "alice").await.unwrap();
        assert_eq!(f.svc.add_to_favourites("bob", r.id).await.unwrap(), r);
        f.svc.add_to_favourites("bob", r.id).await.unwrap();
        assert_eq!(f.svc.find_all_favourites("bob").await.unwrap(), vec![r]);
        assert!(f.svc.find_all_favourites("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn favourites_keep_insertion_order() {
        let f = fixture().await;
        let a = f.svc.save_recipe(input("A", f.category_id), "alice").await.unwrap();
        let b = f.svc.save_recipe(input("B", f.category_id), "alice").await.unwrap();
        f.svc.add_to_favourites("alice", b.id).await.unwrap();
        f.svc.add_to_favourites("alice", a.id).await.unwrap();
        assert_eq!(f.svc.find_all_favourites("alice").await.unwrap(), vec![b, a]);
    }

    #[tokio::test]
    async fn delete_from_favourites_non_member_is_noop() {
        let f = fixture().await;
        let a = f.svc.save_recipe(input("A", f.category_id), "alice").await.unwrap();
        let b = f.svc.save_recipe(input("B", f.category_id), "alice").await.unwrap();
        f.svc.add_to_favourites("alice", a.id).await.unwrap();

        f.svc.delete_from_favourites("alice", b.id).await.unwrap();
        assert_eq!(f.svc.find_all_favourites("alice").await.unwrap(), vec![a.clone()]);

        f.svc.delete_from_favourites("alice", a.id).await.unwrap();
        assert!(f.svc.find_all_favourites("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn favourites_report_missing_user_and_recipe() {
        let f = fixture().await;
        let err = f.svc.find_all_favourites("ghost").await.unwrap_err();
        assert!(matches!(err, RecipeError::UserNotFound(_)));
        let err = f.svc.add_to_favourites("ghost", 1).await.unwrap_err();
        assert!(matches!(err, RecipeError::UserNotFound(_)));
        let err = f.svc.add_to_favourites("alice", 404).await.unwrap_err();
        assert!(matches!(err, RecipeError::RecipeNotFound(404)));
        let err = f.svc.delete_from_favourites("alice", 404).await.unwrap_err();
        assert!(matches!(err, RecipeError::RecipeNotFound(404)));
    }

    #[tokio::test]
    async fn delete_by_id_drops_recipe_and_favourites() {
        let f = fixture().await;
        let r = f.svc.save_recipe(input("Soup", f.category_id), "alice").await.unwrap();
        f.svc.add_to_favourites("bob", r.id).await.unwrap();

        assert!(f.svc.delete_by_id(r.id).await.unwrap());
        assert!(f.svc.find_by_id(r.id).await.unwrap().is_none());
        assert!(f.svc.find_all_favourites("bob").await.unwrap().is_empty());
        assert!(!f.svc.delete_by_id(r.id).await.unwrap());
    }

    #[tokio::test]
    async fn find_all_by_name_empty_matches_all_case_insensitive() {
        let f = fixture().await;
        f.svc.save_recipe(input("Tomato Soup", f.category_id), "alice").await.unwrap();
        f.svc.save_recipe(input("Cheesecake", f.other_category_id), "bob").await.unwrap();

        let all = f.svc.find_all().await.unwrap();
        assert_eq!(f.svc.find_all_by_name("").await.unwrap(), all);
        let soups = f.svc.find_all_by_name("sOuP").await.unwrap();
        assert_eq!(soups.len(), 1);
        assert_eq!(soups[0].name, "Tomato Soup");
    }

    #[tokio::test]
    async fn category_filters_require_existing_category() {
        let f = fixture().await;
        let err = f.svc.find_all_by_category(4040).await.unwrap_err();
        assert!(matches!(err, RecipeError::CategoryNotFound(4040)));
        let err = f.svc.find_all_by_name_and_category("", 4040).await.unwrap_err();
        assert!(matches!(err, RecipeError::CategoryNotFound(4040)));
        assert!(f.svc.find_all_by_category(f.other_category_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn name_and_category_is_a_conjunction() {
        let f = fixture().await;
        let soup = f.svc.save_recipe(input("Onion Soup", f.category_id), "alice").await.unwrap();
        f.svc.save_recipe(input("Onion Tart", f.other_category_id), "alice").await.unwrap();
        f.svc.save_recipe(input("Leek Soup", f.category_id), "alice").await.unwrap();

        let hits = f.svc.find_all_by_name_and_category("onion", f.category_id).await.unwrap();
        assert_eq!(hits, vec![soup]);
    }

    #[tokio::test]
    async fn search_dispatches_on_filters() {
        let f = fixture().await;
        let soup = f.svc.save_recipe(input("Soup", f.category_id), "alice").await.unwrap();
        let cake = f.svc.save_recipe(input("Cake", f.other_category_id), "alice").await.unwrap();

        assert_eq!(f.svc.search(None, None).await.unwrap().len(), 2);
        assert_eq!(f.svc.search(Some("cake"), None).await.unwrap(), vec![cake.clone()]);
        assert_eq!(f.svc.search(None, Some(f.category_id)).await.unwrap(), vec![soup]);
        assert!(f.svc.search(Some("cake"), Some(f.category_id)).await.unwrap().is_empty());
        assert!(matches!(f.svc.search(Some("cake"), Some(9)).await, Err(RecipeError::CategoryNotFound(9))));
    }

    #[tokio::test]
    async fn duplicate_category_and_user_conflict() {
        let f = fixture().await;
        assert!(matches!(f.svc.create_category(" Soups ").await, Err(RecipeError::Conflict(_))));
        assert!(matches!(f.svc.register_user("alice").await, Err(RecipeError::Conflict(_))));
        assert!(matches!(f.svc.register_user("with space").await, Err(RecipeError::Validation(_))));
        assert_eq!(f.svc.list_categories().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn scenario_soup_in_category_and_favourites() {
        let f = fixture().await;
        let r = f.svc.save_recipe(input("Soup", f.category_id), "alice").await.unwrap();
        assert!(f.svc.find_all_by_category(f.category_id).await.unwrap().contains(&r));
        f.svc.add_to_favourites("alice", r.id).await.unwrap();
        assert_eq!(f.svc.find_all_favourites("alice").await.unwrap(), vec![r]);
    }
}
