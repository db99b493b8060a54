#![cfg(not(tarpaulin_include))]

use clap::Parser;
use recipe_browser::config::{Config, ConfigArgs};
use recipe_browser::dispatch;
use recipe_browser::render::{DisplayContent, HeadingNode, MenuNode, Region};
use recipe_browser::surface::{DisplaySurface, LoadStatus};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Browse recipes from the terminal by typing fragments
#[derive(Parser)]
#[command(name = "cli")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

/// Prints every region update to stdout as plain text.
#[derive(Default)]
struct TextSurface;

impl DisplaySurface for TextSurface {
    fn show(&mut self, region: Region, content: &DisplayContent) {
        let mut out = String::new();
        match content {
            DisplayContent::RecipeStack { sections } => {
                for section in sections {
                    out.push_str(&format!("# {}\n★材料\n", section.id));
                    for line in &section.materials {
                        out.push_str(&format!("    {}\n", line));
                    }
                    out.push_str("★手順\n");
                    for line in &section.steps {
                        out.push_str(&format!("    {}\n", line));
                    }
                    if let Some(reference) = &section.reference {
                        out.push_str(&format!("→ {}\n", reference));
                    }
                    out.push_str(&format!("★評価\n　{}\n", section.rating));
                    if section.divider_after {
                        out.push_str("----------------------------------------\n");
                    }
                }
            }
            DisplayContent::Headings { roots } => write_headings(&mut out, roots),
            DisplayContent::Menu { categories } => write_menu(&mut out, categories, 0),
            DisplayContent::SearchResults { links, .. } => {
                if links.is_empty() {
                    out.push_str("該当する結果がありません。\n");
                }
                for link in links {
                    out.push_str(&format!("{}  #{}\n", link.label, link.fragment));
                }
            }
            DisplayContent::Empty => {}
        }

        println!("== {} ==", region.element_id());
        print!("{}", out);
    }

    fn status(&mut self, status: &LoadStatus) {
        println!("[{}]", status);
    }
}

fn write_headings(out: &mut String, nodes: &[HeadingNode]) {
    for node in nodes {
        let marks = "#".repeat(node.level as usize);
        match &node.link {
            Some(link) => out.push_str(&format!("{} {}  #{}\n", marks, node.text, link)),
            None => out.push_str(&format!("{} {}\n", marks, node.text)),
        }
        write_headings(out, &node.children);
    }
}

fn write_menu(out: &mut String, nodes: &[MenuNode], depth: usize) {
    for node in nodes {
        out.push_str(&format!("{}- {}  #{}\n", "  ".repeat(depth), node.label, node.fragment));
        write_menu(out, &node.children, depth + 1);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config::resolve(&cli.config);

    let (handle, listener) = dispatch::channel();
    let dispatcher = tokio::spawn(dispatch::run_browser(
        config.source(),
        TextSurface,
        listener,
        config.initial_fragment.clone(),
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut status = String::from("ok");
    loop {
        print!("({}) > ", status);
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = line.trim();

        if command == "q" {
            break;
        }

        if command == "help" {
            println!("Commands:");
            println!("  q: Quit");
            println!("  search <text>: Search names, materials and steps");
            println!("  recipe-<id>: Show a recipe");
            println!("  category-<category>: Show a category");
            println!("  subcategory-<category>-<subcategory>: Show a subcategory");
            println!(
                "  subsubcategory-<category>-<subcategory>-<subsubcategory>: Show a sub-subcategory"
            );
            continue;
        }

        if let Some(query) = command.strip_prefix("search") {
            let hits = handle.search(query.trim()).await?;
            status = format!("{} hits", hits);
        } else if handle.navigate(command).await? {
            status = String::from("ok");
        } else {
            status = String::from("no match");
        }
    }

    drop(handle);
    let browser = dispatcher.await?;
    println!("Viewed {} recipes", browser.stack().len());

    Ok(())
}
