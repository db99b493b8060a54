use std::sync::Arc;

use crate::recipe::{RawRow, Recipe};

/// Owns the canonical recipe list, in source order.
///
/// Recipes are shared out as `Arc<Recipe>` so the category index and the
/// view stack can hold on to them without copying.
#[derive(Clone, Debug, Default)]
pub struct RecipeRepository {
    recipes: Vec<Arc<Recipe>>,
}

impl RecipeRepository {
    pub fn new() -> Self {
        RecipeRepository {
            recipes: Vec::new(),
        }
    }

    /// Build the repository from raw rows. Malformed rows are kept with
    /// defaulted fields.
    pub fn load(rows: &[RawRow]) -> Self {
        RecipeRepository {
            recipes: rows
                .iter()
                .map(|row| Arc::new(Recipe::from_row(row)))
                .collect(),
        }
    }

    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        RecipeRepository {
            recipes: recipes.into_iter().map(Arc::new).collect(),
        }
    }

    /// First recipe with the given id. Duplicates after it are unreachable
    /// through this lookup.
    pub fn find_by_id(&self, id: &str) -> Option<&Arc<Recipe>> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    pub fn recipes(&self) -> &[Arc<Recipe>] {
        &self.recipes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Recipe>> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
