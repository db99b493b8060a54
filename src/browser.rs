//! Application state and the view-state machine.
//!
//! ```text
//! Uninitialized --load--> LoadedNoView
//! any --category-level route--> ShowingCategoryLevel   (stack cleared)
//! any --recipe route----------> ShowingRecipeStack     (stack pushed)
//! any --page opened-----------> LoadedNoView           (stack cleared)
//! ```
//!
//! Routes that miss (unknown prefix, id or category path) change nothing.

use log::{debug, error, info};
use serde::Serialize;
use std::sync::Arc;

use crate::error::LoadError;
use crate::index::CategoryIndex;
use crate::recipe::{RawRow, Recipe};
use crate::render::{self, DisplayContent, Region};
use crate::repository::RecipeRepository;
use crate::router::{self, ViewIntent};
use crate::search;
use crate::source::DataSource;
use crate::surface::{DisplaySurface, LoadStatus};
use crate::view_stack::RecipeViewStack;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    Uninitialized,
    LoadedNoView,
    ShowingCategoryLevel,
    ShowingRecipeStack,
}

/// Owns the repository, the derived index, the view stack and the current
/// view state. Only this type mutates any of them.
#[derive(Debug)]
pub struct RecipeBrowser {
    repository: RecipeRepository,
    index: CategoryIndex,
    stack: RecipeViewStack,
    state: ViewState,
}

impl Default for RecipeBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeBrowser {
    pub fn new() -> Self {
        RecipeBrowser {
            repository: RecipeRepository::new(),
            index: CategoryIndex::default(),
            stack: RecipeViewStack::new(),
            state: ViewState::Uninitialized,
        }
    }

    /// Fetch the table once and populate everything from it.
    ///
    /// On failure the repository and index stay empty and the surface gets
    /// a failure status; no partial data is ever kept.
    pub async fn load<D, S>(&mut self, source: &D, surface: &mut S) -> Result<usize, LoadError>
    where
        D: DataSource,
        S: DisplaySurface,
    {
        surface.status(&LoadStatus::Loading);
        info!("Loading recipe data from {}", source.describe());

        match source.fetch_raw_table().await {
            Ok(rows) => {
                let count = self.populate(&rows);
                if count == 0 {
                    error!("Recipe source returned no rows");
                    surface.status(&LoadStatus::Empty);
                } else {
                    info!("Loaded {} recipes in {} categories", count, self.index.len());
                    surface.status(&LoadStatus::Loaded { count });
                    surface.show(Region::CategoryMenu, &self.menu());
                }
                Ok(count)
            }
            Err(e) => {
                error!("Error loading recipe data: {}", e);
                self.populate(&[]);
                surface.status(&LoadStatus::Failed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Replace all data with `rows` and rebuild the index. Returns the
    /// number of recipes.
    pub fn populate(&mut self, rows: &[RawRow]) -> usize {
        self.repository = RecipeRepository::load(rows);
        self.index = CategoryIndex::from_repository(&self.repository);
        self.stack.clear();
        self.state = ViewState::LoadedNoView;
        self.repository.len()
    }

    /// A page was (re)opened: start from an empty stack and blank content
    /// and search regions, then show `fragment`.
    pub fn open_page<S: DisplaySurface>(&mut self, fragment: &str, surface: &mut S) -> bool {
        self.reset_view(surface);
        self.navigate(fragment, surface)
    }

    pub fn reset_view<S: DisplaySurface>(&mut self, surface: &mut S) {
        self.stack.clear();
        if self.state != ViewState::Uninitialized {
            self.state = ViewState::LoadedNoView;
        }
        surface.show(Region::MainContent, &DisplayContent::Empty);
        surface.show(Region::SearchResult, &DisplayContent::Empty);
    }

    /// Route `fragment` and dispatch it. Returns whether the view changed.
    pub fn navigate<S: DisplaySurface>(&mut self, fragment: &str, surface: &mut S) -> bool {
        self.dispatch(router::route(fragment), surface)
    }

    pub fn dispatch<S: DisplaySurface>(&mut self, intent: ViewIntent, surface: &mut S) -> bool {
        let content = match &intent {
            ViewIntent::Recipe { id } => {
                return match self.repository.find_by_id(id).cloned() {
                    Some(recipe) => {
                        self.show_recipe(recipe, surface);
                        true
                    }
                    None => {
                        debug!("no recipe with id {:?}", id);
                        false
                    }
                };
            }
            ViewIntent::Category { category } => render::category(&self.index, category),
            ViewIntent::Subcategory {
                category,
                subcategory,
            } => render::subcategory(&self.index, category, subcategory),
            ViewIntent::Subsubcategory {
                category,
                subcategory,
                subsubcategory,
            } => render::subsubcategory(&self.index, category, subcategory, subsubcategory),
            ViewIntent::NoMatch => return false,
        };

        match content {
            Some(content) => {
                self.stack.clear();
                self.state = ViewState::ShowingCategoryLevel;
                surface.show(Region::MainContent, &content);
                true
            }
            None => {
                debug!("category path not in index: {:?}", intent);
                false
            }
        }
    }

    /// Push `recipe` onto the view stack and show the whole stack.
    pub fn show_recipe<S: DisplaySurface>(&mut self, recipe: Arc<Recipe>, surface: &mut S) {
        self.stack.show(recipe);
        self.state = ViewState::ShowingRecipeStack;
        surface.show(Region::MainContent, &render::recipe_stack(&self.stack));
    }

    /// Fill the search region. Does not touch the view stack. Returns the
    /// number of hits.
    pub fn search<S: DisplaySurface>(&self, query: &str, surface: &mut S) -> usize {
        let hits = search::search(&self.repository, query);
        debug!("search {:?}: {} hits", query, hits.len());
        surface.show(Region::SearchResult, &render::search_results(query, &hits));
        hits.len()
    }

    pub fn menu(&self) -> DisplayContent {
        render::menu(&self.index)
    }

    pub fn repository(&self) -> &RecipeRepository {
        &self.repository
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    pub fn stack(&self) -> &RecipeViewStack {
        &self.stack
    }

    pub fn state(&self) -> ViewState {
        self.state
    }
}
