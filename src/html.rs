//! HTML rendering of display content, via handlebars templates.
//!
//! Markup matches the shell page: `#categoryMenu` gets nested
//! `<li>/<ul>` lists, `#recipeContent` gets heading trees or stacked recipe
//! items, `#result` gets search links. All text is HTML-escaped.

use handlebars::{Handlebars, RenderError, TemplateError};
use log::error;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

use crate::render::{DisplayContent, HeadingNode, Region};
use crate::surface::{DisplaySurface, LoadStatus};

const RECIPE_STACK: &str = "recipe_stack";
const HEADINGS: &str = "headings";
const MENU: &str = "menu";
const SEARCH_RESULTS: &str = "search_results";
const STATUS: &str = "status";

const RECIPE_STACK_TEMPLATE: &str = r#"{{#each sections}}
<div class="recipe-item"{{#unless @first}} style="margin-top: 40px;"{{/unless}}>
  <h1 id="{{id}}">{{id}}</h1>
  <p>★材料</p>
  <pre><code>{{materials}}</code></pre>
  <p>★手順</p>
  <pre><code>{{steps}}</code></pre>
  {{#if reference}}<p><a href="{{reference}}" target="_blank">{{id}}</a></p>{{/if}}
  <p>★評価
　{{rating}}</p>
  {{#if divider_after}}<hr>{{/if}}
</div>
{{/each}}"#;

const HEADINGS_TEMPLATE: &str = r##"{{#each headings}}<h{{level}}>{{#if link}}<a href="#{{link}}">{{text}}</a>{{else}}{{text}}{{/if}}</h{{level}}>{{/each}}"##;

const MENU_TEMPLATE: &str = r##"{{#each categories}}<li><a href="#{{fragment}}">{{label}}</a><ul>{{#each children}}<li><a href="#{{fragment}}">{{label}}</a><ul>{{#each children}}<li><a href="#{{fragment}}">{{label}}</a><ul>{{#each children}}<li><a href="#{{fragment}}">{{label}}</a></li>{{/each}}</ul></li>{{/each}}</ul></li>{{/each}}</ul></li>{{/each}}"##;

const SEARCH_RESULTS_TEMPLATE: &str = r##"{{#if links}}{{#each links}}<a href="#{{fragment}}">{{label}}</a>{{/each}}{{else}}<p>該当する結果がありません。</p>{{/if}}"##;

const STATUS_TEMPLATE: &str = r#"<div id="loadingStatus" style="text-align: center; padding: 20px; font-weight: bold;{{#if failed}} color: red;{{/if}}">{{text}}</div>"#;

pub struct HtmlRenderer {
    registry: Handlebars<'static>,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_template_string(RECIPE_STACK, RECIPE_STACK_TEMPLATE)?;
        registry.register_template_string(HEADINGS, HEADINGS_TEMPLATE)?;
        registry.register_template_string(MENU, MENU_TEMPLATE)?;
        registry.register_template_string(SEARCH_RESULTS, SEARCH_RESULTS_TEMPLATE)?;
        registry.register_template_string(STATUS, STATUS_TEMPLATE)?;
        Ok(HtmlRenderer { registry })
    }

    pub fn render(&self, content: &DisplayContent) -> Result<String, RenderError> {
        match content {
            DisplayContent::RecipeStack { sections } => {
                let sections: Vec<_> = sections
                    .iter()
                    .map(|s| {
                        json!({
                            "id": s.id,
                            "materials": s.materials.join("\n"),
                            "steps": s.steps.join("\n"),
                            "reference": s.reference,
                            "rating": s.rating,
                            "divider_after": s.divider_after,
                        })
                    })
                    .collect();
                self.registry
                    .render(RECIPE_STACK, &json!({ "sections": sections }))
            }
            DisplayContent::Headings { roots } => {
                let mut headings = Vec::new();
                flatten_headings(roots, &mut headings);
                self.registry
                    .render(HEADINGS, &json!({ "headings": headings }))
            }
            DisplayContent::Menu { categories } => self
                .registry
                .render(MENU, &json!({ "categories": categories })),
            DisplayContent::SearchResults { links, .. } => self
                .registry
                .render(SEARCH_RESULTS, &json!({ "links": links })),
            DisplayContent::Empty => Ok(String::new()),
        }
    }

    pub fn render_status(&self, status: &LoadStatus) -> Result<String, RenderError> {
        self.registry.render(
            STATUS,
            &json!({ "text": status.to_string(), "failed": status.is_failure() }),
        )
    }
}

#[derive(Serialize)]
struct FlatHeading<'a> {
    level: u8,
    text: &'a str,
    link: Option<&'a str>,
}

// Document order: each heading followed by its children.
fn flatten_headings<'a>(nodes: &'a [HeadingNode], out: &mut Vec<FlatHeading<'a>>) {
    for node in nodes {
        out.push(FlatHeading {
            level: node.level,
            text: &node.text,
            link: node.link.as_deref(),
        });
        flatten_headings(&node.children, out);
    }
}

/// Markup currently in each region, plus the load status line.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PageSnapshot {
    pub category_menu: String,
    pub main_content: String,
    pub search_result: String,
    pub status: Option<LoadStatus>,
    pub status_html: String,
}

/// Display surface that keeps rendered HTML per region.
pub struct HtmlSurface {
    renderer: HtmlRenderer,
    regions: HashMap<Region, String>,
    status: Option<LoadStatus>,
    status_html: String,
}

impl HtmlSurface {
    pub fn new() -> Result<Self, TemplateError> {
        Ok(HtmlSurface {
            renderer: HtmlRenderer::new()?,
            regions: HashMap::new(),
            status: None,
            status_html: String::new(),
        })
    }

    pub fn region(&self, region: Region) -> &str {
        self.regions.get(&region).map(String::as_str).unwrap_or("")
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            category_menu: self.region(Region::CategoryMenu).to_string(),
            main_content: self.region(Region::MainContent).to_string(),
            search_result: self.region(Region::SearchResult).to_string(),
            status: self.status.clone(),
            status_html: self.status_html.clone(),
        }
    }
}

impl DisplaySurface for HtmlSurface {
    fn show(&mut self, region: Region, content: &DisplayContent) {
        match self.renderer.render(content) {
            Ok(html) => {
                self.regions.insert(region, html);
            }
            Err(e) => error!("Failed to render {}: {}", region.element_id(), e),
        }
    }

    fn status(&mut self, status: &LoadStatus) {
        self.status = Some(status.clone());
        match self.renderer.render_status(status) {
            Ok(html) => self.status_html = html,
            Err(e) => error!("Failed to render load status: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Link, RecipeSection};

    fn section(id: &str, reference: Option<&str>, divider_after: bool) -> RecipeSection {
        RecipeSection {
            id: id.to_string(),
            materials: vec!["rice".to_string(), "<salt>".to_string()],
            steps: vec!["cook".to_string()],
            reference: reference.map(str::to_string),
            rating: "5".to_string(),
            divider_after,
        }
    }

    #[test]
    fn stacked_recipes_are_spaced_and_divided() {
        let renderer = HtmlRenderer::new().unwrap();
        let html = renderer
            .render(&DisplayContent::RecipeStack {
                sections: vec![
                    section("Onigiri", Some("https://example.com/onigiri"), true),
                    section("Miso", None, false),
                ],
            })
            .unwrap();

        assert_eq!(html.matches("<hr>").count(), 1);
        assert_eq!(html.matches("margin-top: 40px;").count(), 1);
        assert!(html.contains("<pre><code>rice\n&lt;salt&gt;</code></pre>"));
        assert!(html.contains(r#"<a href="https://example.com/onigiri" target="_blank">Onigiri</a>"#));
        assert_eq!(html.matches("target=\"_blank\"").count(), 1);
    }

    #[test]
    fn heading_tree_renders_in_document_order() {
        let renderer = HtmlRenderer::new().unwrap();
        let leaf = HeadingNode {
            level: 4,
            text: "Mochi".to_string(),
            link: Some("recipe-Mochi".to_string()),
            children: Vec::new(),
        };
        let h3 = HeadingNode {
            level: 3,
            text: "Rice".to_string(),
            link: None,
            children: vec![leaf],
        };
        let h2 = HeadingNode {
            level: 2,
            text: "Japanese".to_string(),
            link: None,
            children: vec![h3],
        };
        let h1 = HeadingNode {
            level: 1,
            text: "Sweets".to_string(),
            link: None,
            children: vec![h2],
        };

        let html = renderer
            .render(&DisplayContent::Headings { roots: vec![h1] })
            .unwrap();
        assert_eq!(
            html,
            r##"<h1>Sweets</h1><h2>Japanese</h2><h3>Rice</h3><h4><a href="#recipe-Mochi">Mochi</a></h4>"##
        );
    }

    #[test]
    fn empty_search_shows_notice() {
        let renderer = HtmlRenderer::new().unwrap();
        let none = renderer
            .render(&DisplayContent::SearchResults {
                query: "caviar".to_string(),
                links: Vec::new(),
            })
            .unwrap();
        assert_eq!(none, "<p>該当する結果がありません。</p>");

        let some = renderer
            .render(&DisplayContent::SearchResults {
                query: "soup".to_string(),
                links: vec![Link {
                    label: "Tomato Soup".to_string(),
                    fragment: "recipe-Tomato%20Soup".to_string(),
                }],
            })
            .unwrap();
        assert_eq!(some, r##"<a href="#recipe-Tomato%20Soup">Tomato Soup</a>"##);
    }

    #[test]
    fn failed_status_is_red() {
        let mut surface = HtmlSurface::new().unwrap();
        surface.status(&LoadStatus::Failed {
            message: "HTTP error! status: 404".to_string(),
        });

        let snapshot = surface.snapshot();
        assert!(snapshot.status_html.contains("color: red;"));
        assert!(snapshot.status_html.contains("エラーが発生しました。"));
        assert!(snapshot.main_content.is_empty());
    }
}
