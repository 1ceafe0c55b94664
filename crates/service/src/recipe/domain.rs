use serde::{Deserialize, Serialize};

/// Recipe as seen by the business layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub category_id: i32,
    pub author_id: i32,
}

/// Recipe not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub category_id: i32,
    pub author_id: i32,
}

/// Editable recipe fields; used for both creation and edits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: String,
    pub category_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// User aggregate: identity plus the favourites set (recipe ids, favouriting order)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub favourites: Vec<i32>,
}

impl User {
    /// Add a recipe to favourites; returns false when it was already there.
    pub fn add_favourite(&mut self, recipe_id: i32) -> bool {
        if self.favourites.contains(&recipe_id) {
            return false;
        }
        self.favourites.push(recipe_id);
        true
    }

    /// Remove a recipe from favourites; returns false when it was not a member.
    pub fn remove_favourite(&mut self, recipe_id: i32) -> bool {
        let before = self.favourites.len();
        self.favourites.retain(|id| *id != recipe_id);
        before != self.favourites.len()
    }
}

impl From<models::recipe::Model> for Recipe {
    fn from(m: models::recipe::Model) -> Self {
        Recipe {
            id: m.id,
            name: m.name,
            description: m.description,
            ingredients: m.ingredients,
            category_id: m.category_id,
            author_id: m.author_id,
        }
    }
}

impl From<models::category::Model> for Category {
    fn from(m: models::category::Model) -> Self { Category { id: m.id, name: m.name } }
}
