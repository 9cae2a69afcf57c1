use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::{
    models::theory::Theory,
    navigation::Route,
    repositories::theory as theory_repo,
    state::Portal,
};

/// When the search box fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// One request per qualifying keystroke.
    Immediate,
    /// One request once typing pauses for the given window.
    Debounced(Duration),
}

/// One selectable entry under the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: i64,
    pub title: String,
}

impl From<Theory> for Suggestion {
    fn from(theory: Theory) -> Self {
        Self {
            id: theory.id,
            title: theory.title,
        }
    }
}

/// What the search box renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchView {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    pub loading: bool,
}

impl SearchView {
    pub fn titles(&self) -> Vec<String> {
        self.suggestions.iter().map(|s| s.title.clone()).collect()
    }
}

/// Queries of length 1 and 2 are too short to search.
pub fn should_search(text: &str) -> bool {
    let len = text.chars().count();
    len == 0 || len > 2
}

/// A typeahead search box.
///
/// Every keystroke takes the next sequence number; a response is applied only
/// if its number is still the latest, so an older request finishing late can
/// never overwrite newer suggestions. Must be driven from inside a tokio
/// runtime.
pub struct TypeaheadSearch {
    portal: Portal,
    mode: SearchMode,
    latest: Arc<AtomicU64>,
    view: Arc<watch::Sender<SearchView>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl TypeaheadSearch {
    /// Creates a search box using the mode configured for this deployment.
    pub fn new(portal: &Portal) -> Self {
        let mode = match portal.config.search_debounce {
            Some(window) => SearchMode::Debounced(window),
            None => SearchMode::Immediate,
        };
        Self::with_mode(portal, mode)
    }

    pub fn with_mode(portal: &Portal, mode: SearchMode) -> Self {
        let (view, _) = watch::channel(SearchView::default());
        Self {
            portal: portal.clone(),
            mode,
            latest: Arc::new(AtomicU64::new(0)),
            view: Arc::new(view),
            pending: Mutex::new(None),
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// The current state of the box.
    pub fn view(&self) -> SearchView {
        self.view.borrow().clone()
    }

    /// Receives every change to the box.
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view.subscribe()
    }

    /// Handles a keystroke.
    pub fn on_input(&self, text: &str) {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let query = text.to_string();

        if let SearchMode::Debounced(_) = self.mode {
            if let Some(handle) = self.pending.lock().take() {
                handle.abort();
            }
        }

        if !should_search(&query) {
            self.view.send_modify(|view| {
                view.query = query;
                view.suggestions.clear();
                view.loading = false;
            });
            return;
        }

        self.view.send_modify(|view| view.query = query.clone());

        let portal = self.portal.clone();
        let latest = Arc::clone(&self.latest);
        let view = Arc::clone(&self.view);
        let delay = match self.mode {
            SearchMode::Debounced(window) => Some(window),
            SearchMode::Immediate => None,
        };

        let handle = tokio::spawn(async move {
            if let Some(window) = delay {
                tokio::time::sleep(window).await;
            }
            let current = view.send_if_modified(|v| {
                if latest.load(Ordering::SeqCst) != seq {
                    return false;
                }
                v.loading = true;
                true
            });
            if !current {
                return;
            }

            let with_auth = portal.session.get().is_authenticated();
            let suggestions = match theory_repo::search(&portal.client, &query, with_auth).await {
                Ok(theories) => theories.into_iter().map(Suggestion::from).collect(),
                Err(e) => {
                    tracing::warn!("Suggestions for {:?} unavailable: {}", query, e);
                    Vec::new()
                }
            };

            view.send_if_modified(|v| {
                if latest.load(Ordering::SeqCst) != seq {
                    tracing::debug!("Discarding stale suggestions for {:?}", query);
                    return false;
                }
                v.suggestions = suggestions;
                v.loading = false;
                true
            });
        });

        *self.pending.lock() = Some(handle);
    }

    /// Picks a suggestion: clears the list and navigates to its detail page.
    pub fn select(&self, suggestion: &Suggestion) -> Route {
        self.latest.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }

        self.view.send_modify(|view| {
            view.query = suggestion.title.clone();
            view.suggestions.clear();
            view.loading = false;
        });

        let route = Route::TheoryDetail(suggestion.id);
        self.portal.navigator.redirect(route.clone());
        route
    }
}

impl Drop for TypeaheadSearch {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }
}
