use serde::Serialize;

use crate::repository::RecipeRepository;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub fragment: String,
}

/// Case-insensitive substring search over id, materials and steps.
///
/// Hits come back in repository order, one per recipe no matter how many
/// fields matched. An empty query matches nothing.
pub fn search(repository: &RecipeRepository, query: &str) -> Vec<SearchHit> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    repository
        .iter()
        .filter(|recipe| recipe.mentions(&needle))
        .map(|recipe| SearchHit {
            id: recipe.id.clone(),
            fragment: recipe.fragment(),
        })
        .collect()
}
