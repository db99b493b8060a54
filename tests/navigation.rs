use recipe_browser::dispatch;
use recipe_browser::render::{DisplayContent, HeadingNode};
use recipe_browser::source::StaticSource;
use recipe_browser::surface::MemorySurface;
use recipe_browser::{LoadError, LoadStatus, RawRow, RecipeBrowser, Region, ViewState};

fn rows() -> Vec<RawRow> {
    let rows: [[&str; 8]; 4] = [
        ["Tomato Soup", "Soups", "Vegetable", "Hot", "tomato paste\nwater", "simmer\nserve", "https://example.com/soup", "★★★"],
        ["Gazpacho", "Soups", "Vegetable", "Cold", "tomato\ncucumber", "blend", "", "★★"],
        ["Pudding", "Desserts", "Custard", "", "milk\negg\nsugar", "steam", "", "★★★★"],
        ["Brownie", "Desserts", "Baked", "", "chocolate", "bake", "", ""],
    ];
    rows.iter().map(|r| r.iter().copied().collect()).collect()
}

async fn loaded() -> (RecipeBrowser, MemorySurface) {
    let mut browser = RecipeBrowser::new();
    let mut surface = MemorySurface::new();
    let count = browser
        .load(&StaticSource::new(rows()), &mut surface)
        .await
        .expect("static rows load");
    assert_eq!(count, 4);
    (browser, surface)
}

fn stack_ids(surface: &MemorySurface) -> Vec<String> {
    match surface.region(Region::MainContent) {
        Some(DisplayContent::RecipeStack { sections }) => {
            sections.iter().map(|s| s.id.clone()).collect()
        }
        other => panic!("expected a recipe stack, got {:?}", other),
    }
}

fn heading_texts(nodes: &[HeadingNode], out: &mut Vec<(u8, String)>) {
    for node in nodes {
        out.push((node.level, node.text.clone()));
        heading_texts(&node.children, out);
    }
}

#[tokio::test]
async fn load_shows_menu_and_status() {
    let (browser, surface) = loaded().await;

    assert_eq!(browser.state(), ViewState::LoadedNoView);
    assert_eq!(
        surface.statuses(),
        &[LoadStatus::Loading, LoadStatus::Loaded { count: 4 }]
    );
    let Some(DisplayContent::Menu { categories }) = surface.region(Region::CategoryMenu) else {
        panic!("menu should be shown after load");
    };
    let labels: Vec<_> = categories.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Soups", "Desserts"]);
    println!("✓ Menu generated after load");
}

#[tokio::test]
async fn recipe_views_stack_most_recent_first() {
    let (mut browser, mut surface) = loaded().await;

    assert!(browser.navigate("#recipe-Tomato%20Soup", &mut surface));
    assert!(browser.navigate("#recipe-Pudding", &mut surface));
    assert!(browser.navigate("#recipe-Tomato%20Soup", &mut surface));

    assert_eq!(browser.state(), ViewState::ShowingRecipeStack);
    assert_eq!(stack_ids(&surface), vec!["Tomato Soup", "Pudding"]);

    let Some(DisplayContent::RecipeStack { sections }) = surface.region(Region::MainContent) else {
        unreachable!();
    };
    assert!(sections[0].divider_after);
    assert!(!sections[1].divider_after);
    assert_eq!(sections[0].materials, vec!["tomato paste", "water"]);
    assert_eq!(sections[0].reference.as_deref(), Some("https://example.com/soup"));
    assert_eq!(sections[1].reference, None);
    println!("✓ Re-shown recipe moves to the front");
}

#[tokio::test]
async fn category_view_clears_the_stack() {
    let (mut browser, mut surface) = loaded().await;
    browser.navigate("recipe-Brownie", &mut surface);
    browser.navigate("recipe-Gazpacho", &mut surface);
    assert_eq!(browser.stack().len(), 2);

    assert!(browser.navigate("category-Desserts", &mut surface));
    assert!(browser.stack().is_empty());
    assert_eq!(browser.state(), ViewState::ShowingCategoryLevel);

    let Some(DisplayContent::Headings { roots }) = surface.region(Region::MainContent) else {
        panic!("expected headings");
    };
    let mut texts = Vec::new();
    heading_texts(roots, &mut texts);
    assert_eq!(
        texts,
        vec![
            (1, "Desserts".to_string()),
            (2, "Custard".to_string()),
            (3, String::new()),
            (4, "Pudding".to_string()),
            (2, "Baked".to_string()),
            (3, String::new()),
            (4, "Brownie".to_string()),
        ]
    );

    // A fresh stack afterwards
    browser.navigate("recipe-Pudding", &mut surface);
    assert_eq!(stack_ids(&surface), vec!["Pudding"]);
    println!("✓ Category view clears the recipe stack");
}

#[tokio::test]
async fn subcategory_levels_render_down_to_the_match() {
    let (mut browser, mut surface) = loaded().await;

    assert!(browser.navigate("subcategory-Soups-Vegetable", &mut surface));
    let Some(DisplayContent::Headings { roots }) = surface.region(Region::MainContent) else {
        panic!("expected headings");
    };
    let mut texts = Vec::new();
    heading_texts(roots, &mut texts);
    assert_eq!(texts.len(), 6);
    assert_eq!(texts[2], (3, "Hot".to_string()));

    assert!(browser.navigate("subsubcategory-Soups-Vegetable-Cold", &mut surface));
    let Some(DisplayContent::Headings { roots }) = surface.region(Region::MainContent) else {
        panic!("expected headings");
    };
    let mut texts = Vec::new();
    heading_texts(roots, &mut texts);
    assert_eq!(
        texts,
        vec![
            (1, "Soups".to_string()),
            (2, "Vegetable".to_string()),
            (3, "Cold".to_string()),
            (4, "Gazpacho".to_string()),
        ]
    );
}

#[tokio::test]
async fn misses_leave_everything_unchanged() {
    let (mut browser, mut surface) = loaded().await;
    browser.navigate("recipe-Pudding", &mut surface);
    let updates = surface.updates();

    assert!(!browser.navigate("unknown-xyz", &mut surface));
    assert!(!browser.navigate("recipe-Ramen", &mut surface));
    assert!(!browser.navigate("category-Drinks", &mut surface));
    assert!(!browser.navigate("subcategory-Soups-Fish", &mut surface));
    assert!(!browser.navigate("subsubcategory-Soups-Vegetable-Warm", &mut surface));

    assert_eq!(surface.updates(), updates);
    assert_eq!(browser.state(), ViewState::ShowingRecipeStack);
    assert_eq!(browser.stack().len(), 1);
    println!("✓ Route misses are no-ops");
}

#[tokio::test]
async fn load_failure_leaves_everything_empty() {
    let mut browser = RecipeBrowser::new();
    let mut surface = MemorySurface::new();
    assert_eq!(browser.state(), ViewState::Uninitialized);

    let err = browser
        .load(&StaticSource::failing("network down"), &mut surface)
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Unavailable(_)));

    assert!(browser.repository().is_empty());
    assert!(browser.index().is_empty());
    assert!(surface.region(Region::CategoryMenu).is_none());
    assert!(matches!(
        surface.last_status(),
        Some(LoadStatus::Failed { message }) if message.contains("network down")
    ));
    assert!(!browser.navigate("recipe-Pudding", &mut surface));
    println!("✓ Load failure surfaces a status, not partial data");
}

#[tokio::test]
async fn empty_sheet_reports_failure_status() {
    let mut browser = RecipeBrowser::new();
    let mut surface = MemorySurface::new();

    let count = browser
        .load(&StaticSource::new(Vec::new()), &mut surface)
        .await
        .unwrap();
    assert_eq!(count, 0);
    assert_eq!(surface.last_status(), Some(&LoadStatus::Empty));
    assert!(surface.region(Region::CategoryMenu).is_none());
}

#[tokio::test]
async fn search_keeps_the_stack() {
    let (mut browser, mut surface) = loaded().await;
    browser.navigate("recipe-Brownie", &mut surface);

    assert_eq!(browser.search("tomato", &mut surface), 2);
    let Some(DisplayContent::SearchResults { links, .. }) = surface.region(Region::SearchResult) else {
        panic!("expected search results");
    };
    let labels: Vec<_> = links.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["Tomato Soup", "Gazpacho"]);
    assert_eq!(links[0].fragment, "recipe-Tomato%20Soup");
    assert_eq!(browser.stack().len(), 1);

    browser.search("", &mut surface);
    assert_eq!(surface.region(Region::SearchResult), Some(&DisplayContent::Empty));
}

#[tokio::test]
async fn opening_a_page_starts_a_fresh_stack() {
    let (mut browser, mut surface) = loaded().await;
    browser.navigate("recipe-Brownie", &mut surface);
    browser.navigate("recipe-Pudding", &mut surface);
    browser.search("tomato", &mut surface);

    assert!(browser.open_page("recipe-Gazpacho", &mut surface));
    assert_eq!(browser.stack().ids(), vec!["Gazpacho"]);
    assert_eq!(stack_ids(&surface), vec!["Gazpacho"]);
    assert_eq!(surface.region(Region::SearchResult), Some(&DisplayContent::Empty));

    assert!(!browser.open_page("recipe-Nope", &mut surface));
    assert!(browser.stack().is_empty());
    assert_eq!(browser.state(), ViewState::LoadedNoView);
    assert_eq!(surface.region(Region::MainContent), Some(&DisplayContent::Empty));
    println!("✓ Opening a page resets the view");
}

#[tokio::test]
async fn dispatcher_handles_notifications_in_order() {
    let (handle, listener) = dispatch::channel();
    let task = tokio::spawn(dispatch::run_browser(
        StaticSource::new(rows()),
        MemorySurface::new(),
        listener,
        Some("#recipe-Gazpacho".to_string()),
    ));

    handle.notify("recipe-Pudding").unwrap();
    handle.notify("unknown-xyz").unwrap();
    assert!(handle.navigate("recipe-Gazpacho").await.unwrap());
    assert_eq!(handle.search("milk").await.unwrap(), 1);
    assert!(!handle.navigate("category-Drinks").await.unwrap());

    drop(handle);
    let browser = task.await.unwrap();
    assert_eq!(browser.stack().ids(), vec!["Gazpacho", "Pudding"]);
    assert_eq!(browser.state(), ViewState::ShowingRecipeStack);
    println!("✓ Notifications dispatched in arrival order");
}

#[tokio::test]
async fn dispatcher_survives_load_failure() {
    let (handle, listener) = dispatch::channel();
    let task = tokio::spawn(dispatch::run_browser(
        StaticSource::failing("HTTP error! status: 500"),
        MemorySurface::new(),
        listener,
        None,
    ));

    assert!(!handle.navigate("recipe-Pudding").await.unwrap());
    drop(handle);

    let browser = task.await.unwrap();
    assert!(browser.repository().is_empty());
    assert_eq!(browser.state(), ViewState::LoadedNoView);
}
