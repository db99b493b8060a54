//! Structured display representation.
//!
//! Everything here reads index, repository and stack state and never
//! changes it. Turning a [`DisplayContent`] into pixels (or markup, or
//! terminal text) is the display surface's job.

use serde::Serialize;

use crate::index::{CategoryIndex, RecipeList, SubsubcategoryMap};
use crate::router;
use crate::search::SearchHit;
use crate::view_stack::RecipeViewStack;

/// Page regions a surface can be asked to fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    CategoryMenu,
    MainContent,
    SearchResult,
}

impl Region {
    /// Element id of the region in the shell page
    pub fn element_id(&self) -> &'static str {
        match self {
            Region::CategoryMenu => "categoryMenu",
            Region::MainContent => "recipeContent",
            Region::SearchResult => "result",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayContent {
    /// Stacked recipe details, most recent first
    RecipeStack { sections: Vec<RecipeSection> },

    /// Heading tree for a category-level view
    Headings { roots: Vec<HeadingNode> },

    /// The full category menu
    Menu { categories: Vec<MenuNode> },

    /// Search hits for `query`; empty `links` with a non-empty query means
    /// "nothing found"
    SearchResults { query: String, links: Vec<Link> },

    /// Region left blank
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecipeSection {
    pub id: String,
    pub materials: Vec<String>,
    pub steps: Vec<String>,
    pub reference: Option<String>,
    pub rating: String,
    /// True for every section but the last
    pub divider_after: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub fragment: String,
}

/// A heading (`level` 1..=4) with its nested headings. Leaves at level 4
/// link to recipes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeadingNode {
    pub level: u8,
    pub text: String,
    pub link: Option<String>,
    pub children: Vec<HeadingNode>,
}

impl HeadingNode {
    fn heading(level: u8, text: &str, children: Vec<HeadingNode>) -> Self {
        HeadingNode {
            level,
            text: text.to_string(),
            link: None,
            children,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuNode {
    pub label: String,
    pub fragment: String,
    pub children: Vec<MenuNode>,
}

pub fn recipe_stack(stack: &RecipeViewStack) -> DisplayContent {
    let last = stack.len().saturating_sub(1);
    let sections = stack
        .iter()
        .enumerate()
        .map(|(i, recipe)| RecipeSection {
            id: recipe.id.clone(),
            materials: recipe.materials.clone(),
            steps: recipe.steps.clone(),
            reference: recipe.reference.clone(),
            rating: recipe.rating.clone(),
            divider_after: i < last,
        })
        .collect();

    DisplayContent::RecipeStack { sections }
}

/// `None` when the category is not in the index.
pub fn category(index: &CategoryIndex, category: &str) -> Option<DisplayContent> {
    let subs = index.category(category)?;
    let children = subs
        .iter()
        .map(|(subcategory, subsubs)| HeadingNode::heading(2, subcategory, subsub_headings(subsubs)))
        .collect();

    Some(DisplayContent::Headings {
        roots: vec![HeadingNode::heading(1, category, children)],
    })
}

pub fn subcategory(index: &CategoryIndex, category: &str, subcategory: &str) -> Option<DisplayContent> {
    let subsubs = index.subcategory(category, subcategory)?;
    let sub = HeadingNode::heading(2, subcategory, subsub_headings(subsubs));

    Some(DisplayContent::Headings {
        roots: vec![HeadingNode::heading(1, category, vec![sub])],
    })
}

pub fn subsubcategory(
    index: &CategoryIndex,
    category: &str,
    subcategory: &str,
    subsubcategory: &str,
) -> Option<DisplayContent> {
    let recipes = index.subsubcategory(category, subcategory, subsubcategory)?;
    let subsub = HeadingNode::heading(3, subsubcategory, recipe_links(recipes));
    let sub = HeadingNode::heading(2, subcategory, vec![subsub]);

    Some(DisplayContent::Headings {
        roots: vec![HeadingNode::heading(1, category, vec![sub])],
    })
}

fn subsub_headings(subsubs: &SubsubcategoryMap) -> Vec<HeadingNode> {
    subsubs
        .iter()
        .map(|(subsubcategory, recipes)| HeadingNode::heading(3, subsubcategory, recipe_links(recipes)))
        .collect()
}

fn recipe_links(recipes: &RecipeList) -> Vec<HeadingNode> {
    recipes
        .iter()
        .map(|recipe| HeadingNode {
            level: 4,
            text: recipe.id.clone(),
            link: Some(recipe.fragment()),
            children: Vec::new(),
        })
        .collect()
}

pub fn menu(index: &CategoryIndex) -> DisplayContent {
    let categories = index
        .categories()
        .map(|(category, subs)| MenuNode {
            label: category.clone(),
            fragment: router::category_fragment(category),
            children: subs
                .iter()
                .map(|(subcategory, subsubs)| MenuNode {
                    label: subcategory.clone(),
                    fragment: router::subcategory_fragment(category, subcategory),
                    children: subsubs
                        .iter()
                        .map(|(subsubcategory, recipes)| MenuNode {
                            label: subsubcategory.clone(),
                            fragment: router::subsubcategory_fragment(
                                category,
                                subcategory,
                                subsubcategory,
                            ),
                            children: recipes
                                .iter()
                                .map(|recipe| MenuNode {
                                    label: recipe.id.clone(),
                                    fragment: recipe.fragment(),
                                    children: Vec::new(),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    DisplayContent::Menu { categories }
}

/// An empty query blanks the region.
pub fn search_results(query: &str, hits: &[SearchHit]) -> DisplayContent {
    if query.is_empty() {
        return DisplayContent::Empty;
    }

    DisplayContent::SearchResults {
        query: query.to_string(),
        links: hits
            .iter()
            .map(|hit| Link {
                label: hit.id.clone(),
                fragment: hit.fragment.clone(),
            })
            .collect(),
    }
}
