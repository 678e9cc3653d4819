//! Bridges the quote store to a display-ordered list of saved quotes.

use shared::{domain::Quote, error::ControllerError};
use storage::QuoteStore;

use crate::share::ShareSink;

#[derive(Default)]
pub struct SavedListController {
    quotes: Vec<Quote>,
}

impl SavedListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the in-memory snapshot with the store's current contents.
    /// Order is stable until the next refresh, nothing more.
    pub fn refresh(&mut self, store: &QuoteStore) {
        self.quotes = store.list();
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    fn quote_at(&self, index: usize) -> Result<&Quote, ControllerError> {
        self.quotes.get(index).ok_or(ControllerError::IndexOutOfRange {
            index,
            len: self.quotes.len(),
        })
    }

    /// Removes the quote at `index` from the store, then refreshes. An
    /// out-of-range index leaves both snapshot and store unchanged.
    pub fn delete(&mut self, index: usize, store: &mut QuoteStore) -> Result<(), ControllerError> {
        let quote = self.quote_at(index)?.clone();
        store.remove(&quote)?;
        self.refresh(store);
        Ok(())
    }

    /// Shares a saved quote straight from the list, same format as the
    /// current-quote share.
    pub fn share(
        &self,
        index: usize,
        app_name: &str,
        sink: &dyn ShareSink,
    ) -> Result<(), ControllerError> {
        let quote = self.quote_at(index)?;
        sink.present(&quote.share_text(app_name))
            .map_err(|error| ControllerError::Share(error.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/saved_list_tests.rs"]
mod tests;
