use serde::{Deserialize, Serialize};

use crate::router;

/// Number of columns a recipe row carries in the source sheet.
///
/// Column order: id, category, subcategory, subsubcategory, materials,
/// steps, reference, rating.
pub const COLUMN_COUNT: usize = 8;

pub const COL_ID: usize = 0;
pub const COL_CATEGORY: usize = 1;
pub const COL_SUBCATEGORY: usize = 2;
pub const COL_SUBSUBCATEGORY: usize = 3;
pub const COL_MATERIALS: usize = 4;
pub const COL_STEPS: usize = 5;
pub const COL_REFERENCE: usize = 6;
pub const COL_RATING: usize = 7;

/// One row of the raw table, as delivered by a data source.
///
/// Rows may be shorter (or longer) than [`COLUMN_COUNT`]; missing cells read
/// as the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(cells: Vec<String>) -> Self {
        RawRow { cells }
    }

    pub fn column(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

impl<S: Into<String>> FromIterator<S> for RawRow {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        RawRow::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A single dish entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Display name and routing key
    pub id: String,

    pub category: String,
    pub subcategory: String,
    pub subsubcategory: String,

    /// One entry per line of the source field
    pub materials: Vec<String>,

    /// One entry per line of the source field
    pub steps: Vec<String>,

    /// External link, `None` when the source cell is empty
    pub reference: Option<String>,

    /// Free text, not necessarily numeric
    pub rating: String,
}

impl Recipe {
    /// Build a recipe from a raw row, substituting defaults for anything
    /// missing. Never fails.
    pub fn from_row(row: &RawRow) -> Self {
        let reference = row.column(COL_REFERENCE);

        Recipe {
            id: row.column(COL_ID).to_string(),
            category: row.column(COL_CATEGORY).to_string(),
            subcategory: row.column(COL_SUBCATEGORY).to_string(),
            subsubcategory: row.column(COL_SUBSUBCATEGORY).to_string(),
            materials: split_lines(row.column(COL_MATERIALS)),
            steps: split_lines(row.column(COL_STEPS)),
            reference: (!reference.is_empty()).then(|| reference.to_string()),
            rating: row.column(COL_RATING).to_string(),
        }
    }

    /// Fragment that routes back to this recipe
    pub fn fragment(&self) -> String {
        router::recipe_fragment(&self.id)
    }

    /// Case-insensitive substring test against id, materials and steps.
    /// `needle` must already be lowercased.
    pub fn mentions(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle)
            || self
                .materials
                .iter()
                .any(|m| m.to_lowercase().contains(needle))
            || self.steps.iter().any(|s| s.to_lowercase().contains(needle))
    }
}

// Empty field means no lines at all; otherwise every piece is kept, blanks included.
fn split_lines(field: &str) -> Vec<String> {
    if field.is_empty() {
        return Vec::new();
    }
    field.split('\n').map(str::to_string).collect()
}
