use std::sync::Arc;

use crate::recipe::Recipe;

/// Recently opened recipes, most recent first, unique by id.
#[derive(Clone, Debug, Default)]
pub struct RecipeViewStack {
    entries: Vec<Arc<Recipe>>,
}

impl RecipeViewStack {
    pub fn new() -> Self {
        RecipeViewStack {
            entries: Vec::new(),
        }
    }

    /// Put `recipe` on top. An entry with the same id is taken out of its
    /// old position first, keeping the order of everything else.
    pub fn show(&mut self, recipe: Arc<Recipe>) {
        if let Some(pos) = self.entries.iter().position(|r| r.id == recipe.id) {
            self.entries.remove(pos);
        }
        self.entries.insert(0, recipe);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn front(&self) -> Option<&Arc<Recipe>> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Recipe>> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::RawRow;

    fn recipe(id: &str) -> Arc<Recipe> {
        Arc::new(Recipe::from_row(&RawRow::new(vec![id.to_string()])))
    }

    #[test]
    fn reshowing_moves_to_front_without_duplicating() {
        let mut stack = RecipeViewStack::new();
        stack.show(recipe("A"));
        stack.show(recipe("B"));
        stack.show(recipe("A"));

        assert_eq!(stack.ids(), vec!["A", "B"]);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn removal_keeps_relative_order() {
        let mut stack = RecipeViewStack::new();
        for id in ["A", "B", "C", "D"] {
            stack.show(recipe(id));
        }
        assert_eq!(stack.ids(), vec!["D", "C", "B", "A"]);

        stack.show(recipe("B"));
        assert_eq!(stack.ids(), vec!["B", "D", "C", "A"]);
        assert_eq!(stack.front().map(|r| r.id.as_str()), Some("B"));
    }

    #[test]
    fn clear_always_empties() {
        let mut stack = RecipeViewStack::new();
        stack.clear();
        assert!(stack.is_empty());

        stack.show(recipe("A"));
        stack.show(recipe("B"));
        stack.clear();
        assert!(stack.is_empty());

        stack.show(recipe("C"));
        assert_eq!(stack.ids(), vec!["C"]);
    }
}
