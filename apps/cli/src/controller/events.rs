//! User-visible outcomes of display controller actions. The binary renders
//! these; the controller never prints.

use shared::domain::Quote;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    QuoteLoaded(Quote),
    FetchFailed(String),
    Saved,
    AlreadySaved,
    NothingToSave,
    SaveFailed(String),
    Shared,
    NothingToShare,
    ShareFailed(String),
}

impl DisplayEvent {
    /// Transient message shown to the user. Duplicate saves get their own
    /// message rather than the generic error path.
    pub fn message(&self) -> String {
        match self {
            DisplayEvent::QuoteLoaded(quote) => {
                format!("\"{}\"\n\n- {}", quote.text, quote.author)
            }
            DisplayEvent::FetchFailed(detail) => detail.clone(),
            DisplayEvent::Saved => "Quote saved successfully!".to_string(),
            DisplayEvent::AlreadySaved => "Quote already saved!".to_string(),
            DisplayEvent::NothingToSave => "No quote to save".to_string(),
            DisplayEvent::SaveFailed(detail) => detail.clone(),
            DisplayEvent::Shared => "Quote shared".to_string(),
            DisplayEvent::NothingToShare => "No quote to share".to_string(),
            DisplayEvent::ShareFailed(detail) => detail.clone(),
        }
    }

    /// True for outcomes the binary should treat as a failed operation.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            DisplayEvent::FetchFailed(_)
                | DisplayEvent::NothingToSave
                | DisplayEvent::SaveFailed(_)
                | DisplayEvent::NothingToShare
                | DisplayEvent::ShareFailed(_)
        )
    }
}
