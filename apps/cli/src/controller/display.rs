//! The main-view state machine: holds the current quote and dispatches
//! fetch/save/share actions.

use quote_client::QuoteFetcher;
use shared::{
    domain::Quote,
    error::{FetchError, StoreError},
};
use storage::QuoteStore;
use tracing::info;

use crate::controller::events::DisplayEvent;
use crate::share::ShareSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Idle,
    Loading,
    Loaded,
    Error,
}

pub struct DisplayController {
    state: DisplayState,
    /// Most recently fetched quote. Transient; never persisted, and left
    /// untouched when a later fetch fails.
    current: Option<Quote>,
    app_name: String,
}

impl DisplayController {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            state: DisplayState::Idle,
            current: None,
            app_name: app_name.into(),
        }
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    pub fn current_quote(&self) -> Option<&Quote> {
        self.current.as_ref()
    }

    /// Enters `Loading`. Returns `false` when a fetch is already in
    /// flight; the request is ignored, not queued.
    pub fn start_fetch(&mut self) -> bool {
        if self.state == DisplayState::Loading {
            info!("fetch request ignored: already loading");
            return false;
        }
        self.state = DisplayState::Loading;
        true
    }

    /// Leaves `Loading` with the fetch outcome. Success replaces the
    /// current quote; failure keeps whatever was already displayed.
    pub fn complete_fetch(&mut self, result: Result<Quote, FetchError>) -> DisplayEvent {
        match result {
            Ok(quote) => {
                self.current = Some(quote.clone());
                self.state = DisplayState::Loaded;
                DisplayEvent::QuoteLoaded(quote)
            }
            Err(error) => {
                self.state = DisplayState::Error;
                DisplayEvent::FetchFailed(error.to_string())
            }
        }
    }

    /// The only suspend point in the core: start, await the fetcher, and
    /// complete. `None` means a fetch was already in flight.
    pub async fn run_fetch(&mut self, fetcher: &QuoteFetcher) -> Option<DisplayEvent> {
        if !self.start_fetch() {
            return None;
        }
        let result = fetcher.fetch().await;
        Some(self.complete_fetch(result))
    }

    pub fn save(&self, store: &mut QuoteStore) -> DisplayEvent {
        let Some(quote) = &self.current else {
            return DisplayEvent::NothingToSave;
        };
        match store.add(quote) {
            Ok(()) => DisplayEvent::Saved,
            Err(StoreError::Duplicate) => DisplayEvent::AlreadySaved,
            Err(error) => DisplayEvent::SaveFailed(error.to_string()),
        }
    }

    pub fn share(&self, sink: &dyn ShareSink) -> DisplayEvent {
        let Some(quote) = &self.current else {
            return DisplayEvent::NothingToShare;
        };
        match sink.present(&quote.share_text(&self.app_name)) {
            Ok(()) => DisplayEvent::Shared,
            Err(error) => DisplayEvent::ShareFailed(error.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "tests/display_tests.rs"]
mod tests;
