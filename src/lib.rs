/*!
# Recipe Browser

Browse a recipe collection kept in a Google spreadsheet, by category or by
search, with recently opened recipes stacked on top of each other.

## Overview

The recipe sheet is fetched once at startup. Every row becomes a recipe; the
recipes are grouped into a three-level category index which drives the menu.
Navigation is expressed as URL fragments (`#recipe-…`, `#category-…`,
`#subcategory-…-…`, `#subsubcategory-…-…-…`), so every view has a link.

## Architecture

### Core
- **Recipe Repository** - flat recipe list in sheet order, lookup by id
- **Category Index** - category → subcategory → sub-subcategory → recipes
- **View Router** - fragment → view intent
- **Recipe View Stack** - recently opened recipes, most recent first
- **Renderer** - state → structured display content

### Collaborators
- **Data sources** - Google Sheets gviz export, CSV file, in-memory rows
- **Display surfaces** - HTML (handlebars) or plain terminal text
- **Dispatcher** - single consumer of fragment changes, owns all state

### Front ends
- `website` - axum server with a static shell page that forwards
  `hashchange` events
- `cli` - reads fragments from stdin and prints each view

## Modules

- **recipe**: Recipe and raw row types
- **repository**: Recipe storage and lookup
- **index**: Category index
- **router**: Fragment routing and fragment builders
- **view_stack**: Recently viewed recipes
- **render**: Display representation
- **search**: Substring search
- **browser**: Application state and view-state machine
- **dispatch**: Fragment notification channel
- **source**: Data sources
- **surface**: Display surface trait
- **config**: Runtime configuration
- **html**: HTML rendering (feature `web`)
- **app**: Web server (feature `web`)
*/

pub mod browser;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod index;
pub mod recipe;
pub mod render;
pub mod repository;
pub mod router;
pub mod search;
pub mod source;
pub mod surface;
pub mod view_stack;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod html;

/// Re-export the types most callers need
pub use browser::{RecipeBrowser, ViewState};
pub use config::Config;
pub use error::{DispatchError, LoadError};
pub use index::CategoryIndex;
pub use recipe::{RawRow, Recipe};
pub use render::{DisplayContent, Region};
pub use repository::RecipeRepository;
pub use router::{ViewIntent, route};
pub use source::DataSource;
pub use surface::{DisplaySurface, LoadStatus};
pub use view_stack::RecipeViewStack;
