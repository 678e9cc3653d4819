use std::{
    fs,
    path::{Path, PathBuf},
};

use shared::{domain::Quote, error::StoreError};
use tracing::warn;

/// The saved quote collection, persisted as a single JSON file.
///
/// The store owns one named slot on disk and is handed explicitly to the
/// controllers that need it. Every mutation is written through before the
/// call returns; there is no write buffering and no background flush. The
/// legacy `text|author` delimiter encoding is gone: entries are tagged
/// records, so a separator character inside either field cannot corrupt
/// the collection.
#[derive(Debug)]
pub struct QuoteStore {
    path: PathBuf,
    quotes: Vec<Quote>,
}

impl QuoteStore {
    /// Opens the store at `path`, creating parent directories as needed.
    /// A missing file is an empty collection. Entries that fail to
    /// deserialize are skipped with a warning; only an unreadable file or
    /// a non-array top level is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        ensure_parent_dir_exists(&path)?;

        let quotes = match fs::read_to_string(&path) {
            Ok(raw) => parse_collection(&path, &raw)?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(error) => {
                return Err(StoreError::Persist(format!(
                    "failed to read '{}': {error}",
                    path.display()
                )))
            }
        };

        Ok(Self { path, quotes })
    }

    /// All stored quotes. Order is unspecified and not guaranteed to be
    /// stable across store generations.
    pub fn list(&self) -> Vec<Quote> {
        self.quotes.clone()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Inserts `quote` and persists before returning. An equal quote
    /// already in the collection yields `Duplicate` and touches nothing.
    pub fn add(&mut self, quote: &Quote) -> Result<(), StoreError> {
        if self.quotes.iter().any(|q| q == quote) {
            return Err(StoreError::Duplicate);
        }
        self.quotes.push(quote.clone());
        self.persist()
    }

    /// Removes the matching entry if present; removing an absent quote is
    /// a silent no-op and does not rewrite the file.
    pub fn remove(&mut self, quote: &Quote) -> Result<(), StoreError> {
        let before = self.quotes.len();
        self.quotes.retain(|q| q != quote);
        if self.quotes.len() == before {
            return Ok(());
        }
        self.persist()
    }

    // Temp-file write plus rename, so a crash mid-write leaves the previous
    // generation intact.
    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.quotes)
            .map_err(|error| StoreError::Persist(format!("failed to encode quotes: {error}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|error| {
            StoreError::Persist(format!("failed to write '{}': {error}", tmp.display()))
        })?;
        fs::rename(&tmp, &self.path).map_err(|error| {
            StoreError::Persist(format!(
                "failed to replace '{}': {error}",
                self.path.display()
            ))
        })
    }
}

fn parse_collection(path: &Path, raw: &str) -> Result<Vec<Quote>, StoreError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw).map_err(|error| {
        StoreError::Persist(format!(
            "saved quote file '{}' is not a JSON array: {error}",
            path.display()
        ))
    })?;

    let mut quotes: Vec<Quote> = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<Quote>(value) {
            Ok(quote) if quote.is_valid() => {
                if !quotes.contains(&quote) {
                    quotes.push(quote);
                }
            }
            Ok(_) => warn!(path = %path.display(), "skipping saved quote with empty field"),
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping malformed saved quote entry")
            }
        }
    }
    Ok(quotes)
}

fn ensure_parent_dir_exists(path: &Path) -> Result<(), StoreError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(parent).map_err(|error| {
        StoreError::Persist(format!(
            "failed to create parent directory '{}': {error}",
            parent.display()
        ))
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
