use async_trait::async_trait;

use super::domain::{Category, NewRecipe, Recipe, User};
use super::errors::RecipeError;

/// Repository abstraction for recipe persistence.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Recipe>, RecipeError>;
    async fn get(&self, id: i32) -> Result<Option<Recipe>, RecipeError>;
    /// Recipes for `ids` in the same order; unknown ids are skipped.
    async fn get_many(&self, ids: &[i32]) -> Result<Vec<Recipe>, RecipeError>;
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, RecipeError>;
    async fn update(&self, recipe: Recipe) -> Result<Recipe, RecipeError>;
    /// Remove a recipe and every favourite membership pointing at it.
    async fn delete(&self, id: i32) -> Result<bool, RecipeError>;

    /// Case-insensitive substring match on the name; empty text matches all.
    async fn list_by_name_containing(&self, text: &str) -> Result<Vec<Recipe>, RecipeError>;
    async fn list_by_category(&self, category_id: i32) -> Result<Vec<Recipe>, RecipeError>;
    async fn list_by_name_containing_and_category(&self, text: &str, category_id: i32) -> Result<Vec<Recipe>, RecipeError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn get(&self, id: i32) -> Result<Option<Category>, RecipeError>;
    async fn list(&self) -> Result<Vec<Category>, RecipeError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RecipeError>;
    async fn create(&self, name: &str) -> Result<Category, RecipeError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RecipeError>;
    async fn create(&self, username: &str) -> Result<User, RecipeError>;
    /// Persist the aggregate, making stored favourites equal `user.favourites`.
    async fn save(&self, user: &User) -> Result<User, RecipeError>;
}

pub(crate) fn name_matches(name: &str, text: &str) -> bool {
    name.to_lowercase().contains(&text.to_lowercase())
}

/// Simple in-memory repositories for tests, doc examples and benches.
///
/// `MockCatalog` implements all three repository traits over shared state, so
/// recipe deletion can drop favourites the way the database cascade does.
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    struct State {
        recipes: BTreeMap<i32, Recipe>,
        categories: BTreeMap<i32, Category>,
        users: BTreeMap<String, User>,
        next_id: i32,
    }

    impl State {
        fn next_id(&mut self) -> i32 {
            self.next_id += 1;
            self.next_id
        }
    }

    #[derive(Default)]
    pub struct MockCatalog {
        state: RwLock<State>,
    }

    impl MockCatalog {
        fn filtered<F>(state: &State, pred: F) -> Vec<Recipe>
        where
            F: Fn(&Recipe) -> bool,
        {
            state.recipes.values().filter(|r| pred(r)).cloned().collect()
        }
    }

    #[async_trait]
    impl RecipeRepository for MockCatalog {
        async fn list(&self) -> Result<Vec<Recipe>, RecipeError> {
            let state = self.state.read().await;
            Ok(state.recipes.values().cloned().collect())
        }

        async fn get(&self, id: i32) -> Result<Option<Recipe>, RecipeError> {
            let state = self.state.read().await;
            Ok(state.recipes.get(&id).cloned())
        }

        async fn get_many(&self, ids: &[i32]) -> Result<Vec<Recipe>, RecipeError> {
            let state = self.state.read().await;
            Ok(ids.iter().filter_map(|id| state.recipes.get(id).cloned()).collect())
        }

        async fn create(&self, recipe: NewRecipe) -> Result<Recipe, RecipeError> {
            let mut state = self.state.write().await;
            let id = state.next_id();
            let created = Recipe {
                id,
                name: recipe.name,
                description: recipe.description,
                ingredients: recipe.ingredients,
                category_id: recipe.category_id,
                author_id: recipe.author_id,
            };
            state.recipes.insert(id, created.clone());
            Ok(created)
        }

        async fn update(&self, recipe: Recipe) -> Result<Recipe, RecipeError> {
            let mut state = self.state.write().await;
            match state.recipes.get_mut(&recipe.id) {
                Some(slot) => {
                    *slot = recipe.clone();
                    Ok(recipe)
                }
                None => Err(RecipeError::RecipeNotFound(recipe.id)),
            }
        }

        async fn delete(&self, id: i32) -> Result<bool, RecipeError> {
            let mut state = self.state.write().await;
            let existed = state.recipes.remove(&id).is_some();
            if existed {
                for user in state.users.values_mut() {
                    user.remove_favourite(id);
                }
            }
            Ok(existed)
        }

        async fn list_by_name_containing(&self, text: &str) -> Result<Vec<Recipe>, RecipeError> {
            let state = self.state.read().await;
            Ok(Self::filtered(&state, |r| name_matches(&r.name, text)))
        }

        async fn list_by_category(&self, category_id: i32) -> Result<Vec<Recipe>, RecipeError> {
            let state = self.state.read().await;
            Ok(Self::filtered(&state, |r| r.category_id == category_id))
        }

        async fn list_by_name_containing_and_category(&self, text: &str, category_id: i32) -> Result<Vec<Recipe>, RecipeError> {
            let state = self.state.read().await;
            Ok(Self::filtered(&state, |r| r.category_id == category_id && name_matches(&r.name, text)))
        }
    }

    #[async_trait]
    impl CategoryRepository for MockCatalog {
        async fn get(&self, id: i32) -> Result<Option<Category>, RecipeError> {
            let state = self.state.read().await;
            Ok(state.categories.get(&id).cloned())
        }

        async fn list(&self) -> Result<Vec<Category>, RecipeError> {
            let state = self.state.read().await;
            Ok(state.categories.values().cloned().collect())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RecipeError> {
            let state = self.state.read().await;
            Ok(state.categories.values().find(|c| c.name == name).cloned())
        }

        async fn create(&self, name: &str) -> Result<Category, RecipeError> {
            let mut state = self.state.write().await;
            if state.categories.values().any(|c| c.name == name) {
                return Err(RecipeError::Conflict(format!("category '{}'", name)));
            }
            let id = state.next_id();
            let category = Category { id, name: name.to_string() };
            state.categories.insert(id, category.clone());
            Ok(category)
        }
    }

    #[async_trait]
    impl UserRepository for MockCatalog {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, RecipeError> {
            let state = self.state.read().await;
            Ok(state.users.get(username).cloned())
        }

        async fn create(&self, username: &str) -> Result<User, RecipeError> {
            let mut state = self.state.write().await;
            if state.users.contains_key(username) {
                return Err(RecipeError::Conflict(format!("user '{}'", username)));
            }
            let id = state.next_id();
            let user = User { id, username: username.to_string(), favourites: Vec::new() };
            state.users.insert(username.to_string(), user.clone());
            Ok(user)
        }

        async fn save(&self, user: &User) -> Result<User, RecipeError> {
            let mut state = self.state.write().await;
            match state.users.get_mut(&user.username) {
                Some(slot) => {
                    *slot = user.clone();
                    Ok(user.clone())
                }
                None => Err(RecipeError::UserNotFound(user.username.clone())),
            }
        }
    }
}
