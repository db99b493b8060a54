use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::config::Config;
use crate::dispatch::{self, BrowserHandle};
use crate::html::{HtmlSurface, PageSnapshot};
use crate::render::{DisplayContent, Region};
use crate::surface::{DisplaySurface, LoadStatus};

/// HTML surface shared between the dispatcher task (writer) and the request
/// handlers (readers).
#[derive(Clone)]
pub struct SharedSurface(Arc<Mutex<HtmlSurface>>);

impl SharedSurface {
    pub fn new(surface: HtmlSurface) -> Self {
        SharedSurface(Arc::new(Mutex::new(surface)))
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }
}

impl DisplaySurface for SharedSurface {
    fn show(&mut self, region: Region, content: &DisplayContent) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .show(region, content);
    }

    fn status(&mut self, status: &LoadStatus) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .status(status);
    }
}

pub struct AppState {
    browser: BrowserHandle,
    surface: SharedSurface,
}

#[derive(Deserialize)]
struct ViewQuery {
    #[serde(default)]
    fragment: String,
    /// Set by the shell on page load
    #[serde(default)]
    fresh: bool,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
struct ViewResponse {
    changed: bool,
    page: PageSnapshot,
}

#[derive(Serialize)]
struct SearchResponse {
    hits: usize,
    page: PageSnapshot,
}

#[derive(Serialize)]
struct ErrorResponse {
    status: String,
    message: String,
}

/// Build the router around an already running dispatcher.
pub fn router(browser: BrowserHandle, surface: SharedSurface) -> Router {
    let app_state = Arc::new(AppState { browser, surface });

    Router::new()
        .route("/", get(serve_shell))
        .route("/api/page", get(get_page))
        .route("/api/view", get(view))
        .route("/api/search", get(search))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(app_state)
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let surface = SharedSurface::new(HtmlSurface::new()?);
    let (handle, listener) = dispatch::channel();

    // The dispatcher owns the browser state; it loads first, then serves
    // navigation requests in arrival order.
    tokio::spawn(dispatch::run_browser(
        config.source(),
        surface.clone(),
        listener,
        config.initial_fragment.clone(),
    ));

    let app = router(handle, surface);

    let listener = TcpListener::bind(&config.bind).await?;
    info!("Listening on http://{}", config.bind);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_shell() -> Html<&'static str> {
    Html(include_str!("./static/index.html"))
}

async fn get_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.surface.snapshot())
}

async fn view(
    Query(params): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let result = if params.fresh {
        state.browser.open(params.fragment).await
    } else {
        state.browser.navigate(params.fragment).await
    };

    match result {
        Ok(changed) => Json(ViewResponse {
            changed,
            page: state.surface.snapshot(),
        })
        .into_response(),
        Err(e) => dispatcher_gone(e),
    }
}

async fn search(
    Query(params): Query<SearchQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state.browser.search(params.q).await {
        Ok(hits) => Json(SearchResponse {
            hits,
            page: state.surface.snapshot(),
        })
        .into_response(),
        Err(e) => dispatcher_gone(e),
    }
}

fn dispatcher_gone(e: crate::error::DispatchError) -> axum::response::Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            status: "error".to_string(),
            message: e.to_string(),
        }),
    )
        .into_response()
}
