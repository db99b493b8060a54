//! Three-level category index derived from the repository.
//!
//! category → subcategory → sub-subcategory → recipes, every level kept in
//! first-encountered order. Keys are the raw strings from the sheet, so the
//! empty string is a perfectly good bucket.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::recipe::Recipe;
use crate::repository::RecipeRepository;

pub type RecipeList = Vec<Arc<Recipe>>;
pub type SubsubcategoryMap = IndexMap<String, RecipeList>;
pub type SubcategoryMap = IndexMap<String, SubsubcategoryMap>;

#[derive(Clone, Debug, Default)]
pub struct CategoryIndex {
    categories: IndexMap<String, SubcategoryMap>,
}

impl CategoryIndex {
    /// Single pass over `recipes`; recomputed wholesale, never patched.
    pub fn build(recipes: &[Arc<Recipe>]) -> Self {
        let mut categories: IndexMap<String, SubcategoryMap> = IndexMap::new();

        for recipe in recipes {
            categories
                .entry(recipe.category.clone())
                .or_default()
                .entry(recipe.subcategory.clone())
                .or_default()
                .entry(recipe.subsubcategory.clone())
                .or_default()
                .push(Arc::clone(recipe));
        }

        CategoryIndex { categories }
    }

    pub fn from_repository(repository: &RecipeRepository) -> Self {
        Self::build(repository.recipes())
    }

    pub fn category(&self, category: &str) -> Option<&SubcategoryMap> {
        self.categories.get(category)
    }

    pub fn subcategory(&self, category: &str, subcategory: &str) -> Option<&SubsubcategoryMap> {
        self.category(category)?.get(subcategory)
    }

    pub fn subsubcategory(
        &self,
        category: &str,
        subcategory: &str,
        subsubcategory: &str,
    ) -> Option<&RecipeList> {
        self.subcategory(category, subcategory)?.get(subsubcategory)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&String, &SubcategoryMap)> {
        self.categories.iter()
    }

    /// Every (category, subcategory, subsubcategory, recipe) in index order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &str, &Arc<Recipe>)> {
        self.categories.iter().flat_map(|(category, subs)| {
            subs.iter().flat_map(move |(subcategory, subsubs)| {
                subsubs.iter().flat_map(move |(subsubcategory, recipes)| {
                    recipes.iter().map(move |recipe| {
                        (
                            category.as_str(),
                            subcategory.as_str(),
                            subsubcategory.as_str(),
                            recipe,
                        )
                    })
                })
            })
        })
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn recipe_count(&self) -> usize {
        self.categories
            .values()
            .flat_map(|subs| subs.values())
            .flat_map(|subsubs| subsubs.values())
            .map(Vec::len)
            .sum()
    }
}
