//! Single-consumer notification channel in front of [`RecipeBrowser`].
//!
//! One task owns the browser and its surface and handles commands one at a
//! time, in arrival order. Front ends only ever hold a [`BrowserHandle`].

use log::{debug, info};
use tokio::sync::{mpsc, oneshot};

use crate::browser::RecipeBrowser;
use crate::error::DispatchError;
use crate::source::DataSource;
use crate::surface::DisplaySurface;

#[derive(Debug)]
pub enum Command {
    /// The URL fragment changed. `done` receives whether the view changed.
    Navigate {
        fragment: String,
        done: Option<oneshot::Sender<bool>>,
    },
    /// A page was opened at `fragment`; the view starts over.
    Open {
        fragment: String,
        done: Option<oneshot::Sender<bool>>,
    },
    /// Search query typed. `done` receives the number of hits.
    Search {
        query: String,
        done: Option<oneshot::Sender<usize>>,
    },
}

/// Sending side of the channel. Cheap to clone.
#[derive(Clone, Debug)]
pub struct BrowserHandle {
    tx: mpsc::UnboundedSender<Command>,
}

/// Receiving side; there is exactly one.
#[derive(Debug)]
pub struct FragmentListener {
    rx: mpsc::UnboundedReceiver<Command>,
}

pub fn channel() -> (BrowserHandle, FragmentListener) {
    let (tx, rx) = mpsc::unbounded_channel();
    (BrowserHandle { tx }, FragmentListener { rx })
}

impl BrowserHandle {
    /// Fire-and-forget fragment change notification.
    pub fn notify(&self, fragment: impl Into<String>) -> Result<(), DispatchError> {
        self.tx
            .send(Command::Navigate {
                fragment: fragment.into(),
                done: None,
            })
            .map_err(|_| DispatchError)
    }

    /// Notify and wait until the change has been dispatched.
    pub async fn navigate(&self, fragment: impl Into<String>) -> Result<bool, DispatchError> {
        let (done, rx) = oneshot::channel();
        self.tx
            .send(Command::Navigate {
                fragment: fragment.into(),
                done: Some(done),
            })
            .map_err(|_| DispatchError)?;
        rx.await.map_err(|_| DispatchError)
    }

    /// Start a fresh view at `fragment` and wait for it to be shown.
    pub async fn open(&self, fragment: impl Into<String>) -> Result<bool, DispatchError> {
        let (done, rx) = oneshot::channel();
        self.tx
            .send(Command::Open {
                fragment: fragment.into(),
                done: Some(done),
            })
            .map_err(|_| DispatchError)?;
        rx.await.map_err(|_| DispatchError)
    }

    pub async fn search(&self, query: impl Into<String>) -> Result<usize, DispatchError> {
        let (done, rx) = oneshot::channel();
        self.tx
            .send(Command::Search {
                query: query.into(),
                done: Some(done),
            })
            .map_err(|_| DispatchError)?;
        rx.await.map_err(|_| DispatchError)
    }
}

impl FragmentListener {
    /// Handle commands until every handle has been dropped.
    pub async fn listen<S: DisplaySurface>(mut self, browser: &mut RecipeBrowser, surface: &mut S) {
        while let Some(command) = self.rx.recv().await {
            match command {
                Command::Navigate { fragment, done } => {
                    let changed = browser.navigate(&fragment, surface);
                    debug!("navigated to {:?} (changed: {})", fragment, changed);
                    if let Some(done) = done {
                        let _ = done.send(changed);
                    }
                }
                Command::Open { fragment, done } => {
                    let changed = browser.open_page(&fragment, surface);
                    debug!("opened page at {:?} (changed: {})", fragment, changed);
                    if let Some(done) = done {
                        let _ = done.send(changed);
                    }
                }
                Command::Search { query, done } => {
                    let hits = browser.search(&query, surface);
                    if let Some(done) = done {
                        let _ = done.send(hits);
                    }
                }
            }
        }
        info!("all browser handles dropped, dispatcher stopping");
    }
}

/// Startup sequence: load once, show the initial fragment if there is one,
/// then listen for fragment changes. Returns the browser when the channel
/// closes.
///
/// A load failure is reported on the surface; the listener still runs
/// against the empty index so callers never hang.
pub async fn run_browser<D, S>(
    source: D,
    mut surface: S,
    listener: FragmentListener,
    initial_fragment: Option<String>,
) -> RecipeBrowser
where
    D: DataSource,
    S: DisplaySurface,
{
    let mut browser = RecipeBrowser::new();
    let _ = browser.load(&source, &mut surface).await;

    if let Some(fragment) = initial_fragment.filter(|f| !f.is_empty()) {
        browser.navigate(&fragment, &mut surface);
    }

    listener.listen(&mut browser, &mut surface).await;
    browser
}
