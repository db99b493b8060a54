//! Fragment routing.
//!
//! Fragments look like `recipe-<id>`, `category-<cat>`,
//! `subcategory-<cat>-<sub>` and `subsubcategory-<cat>-<sub>-<subsub>`, each
//! component percent-encoded on its own and then joined with `-`.
//!
//! Percent-encoding leaves `-` alone, so a name that itself contains `-` is
//! split in the wrong place. Links generated by this crate have the same
//! property; the scheme is kept as is so existing bookmarks keep working.

use log::debug;

pub const RECIPE_PREFIX: &str = "recipe-";
pub const CATEGORY_PREFIX: &str = "category-";
pub const SUBCATEGORY_PREFIX: &str = "subcategory-";
pub const SUBSUBCATEGORY_PREFIX: &str = "subsubcategory-";

const SEPARATOR: char = '-';

// Marks left unescaped in fragments on top of `A-Z a-z 0-9 - _ . ~`.
const UNESCAPED_MARKS: [char; 5] = ['!', '*', '\'', '(', ')'];

/// What a fragment asks to be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewIntent {
    Recipe {
        id: String,
    },
    Category {
        category: String,
    },
    Subcategory {
        category: String,
        subcategory: String,
    },
    Subsubcategory {
        category: String,
        subcategory: String,
        subsubcategory: String,
    },
    NoMatch,
}

impl ViewIntent {
    pub fn is_category_level(&self) -> bool {
        matches!(
            self,
            ViewIntent::Category { .. }
                | ViewIntent::Subcategory { .. }
                | ViewIntent::Subsubcategory { .. }
        )
    }
}

/// Map a fragment (with or without the leading `#`) to a view intent.
pub fn route(fragment: &str) -> ViewIntent {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

    let intent = if let Some(rest) = fragment.strip_prefix(RECIPE_PREFIX) {
        decode(rest).map(|id| ViewIntent::Recipe { id })
    } else if let Some(rest) = fragment.strip_prefix(CATEGORY_PREFIX) {
        decode(rest).map(|category| ViewIntent::Category { category })
    } else if let Some(rest) = fragment.strip_prefix(SUBCATEGORY_PREFIX) {
        split_components::<2>(rest).map(|[category, subcategory]| ViewIntent::Subcategory {
            category,
            subcategory,
        })
    } else if let Some(rest) = fragment.strip_prefix(SUBSUBCATEGORY_PREFIX) {
        split_components::<3>(rest).map(|[category, subcategory, subsubcategory]| {
            ViewIntent::Subsubcategory {
                category,
                subcategory,
                subsubcategory,
            }
        })
    } else {
        None
    };

    intent.unwrap_or_else(|| {
        debug!("fragment {:?} does not route anywhere", fragment);
        ViewIntent::NoMatch
    })
}

// Split on the separator and decode the first N pieces; trailing pieces are ignored.
fn split_components<const N: usize>(rest: &str) -> Option<[String; N]> {
    let mut pieces = rest.split(SEPARATOR);
    let mut out: [String; N] = std::array::from_fn(|_| String::new());
    for slot in out.iter_mut() {
        *slot = decode(pieces.next()?)?;
    }
    Some(out)
}

fn decode(component: &str) -> Option<String> {
    match urlencoding::decode(component) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(e) => {
            debug!("fragment component {:?} is not valid UTF-8: {}", component, e);
            None
        }
    }
}

/// Percent-encode one fragment component, leaving alphanumerics and
/// `- _ . ! ~ * ' ( )` as they are.
pub fn encode_component(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    let mut run_start = 0;
    for (i, c) in component.char_indices() {
        if UNESCAPED_MARKS.contains(&c) {
            out.push_str(&urlencoding::encode(&component[run_start..i]));
            out.push(c);
            run_start = i + c.len_utf8();
        }
    }
    out.push_str(&urlencoding::encode(&component[run_start..]));
    out
}

pub fn recipe_fragment(id: &str) -> String {
    format!("{}{}", RECIPE_PREFIX, encode_component(id))
}

pub fn category_fragment(category: &str) -> String {
    format!("{}{}", CATEGORY_PREFIX, encode_component(category))
}

pub fn subcategory_fragment(category: &str, subcategory: &str) -> String {
    format!(
        "{}{}{}{}",
        SUBCATEGORY_PREFIX,
        encode_component(category),
        SEPARATOR,
        encode_component(subcategory)
    )
}

pub fn subsubcategory_fragment(category: &str, subcategory: &str, subsubcategory: &str) -> String {
    format!(
        "{}{}{}{}{}{}",
        SUBSUBCATEGORY_PREFIX,
        encode_component(category),
        SEPARATOR,
        encode_component(subcategory),
        SEPARATOR,
        encode_component(subsubcategory)
    )
}
