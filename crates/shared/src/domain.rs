use serde::{Deserialize, Serialize};

/// A single quotation, either freshly fetched from the remote API or loaded
/// back from the saved collection.
///
/// Equality is exact on both fields (case- and whitespace-sensitive); two
/// quotes with the same `(text, author)` pair refer to the same saved entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }

    /// A quote is usable only when both fields are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.text.is_empty() && !self.author.is_empty()
    }

    /// Formats the quote for the share sheet:
    /// `"<text>"` on one line, `- <author>` below, then the app attribution.
    pub fn share_text(&self, app_name: &str) -> String {
        format!(
            "\"{}\"\n\n- {}\n\nShared via {}",
            self.text, self.author, app_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_exact_on_both_fields() {
        let a = Quote::new("Be the change", "Gandhi");
        let b = Quote::new("Be the change", "Gandhi");
        let c = Quote::new("Be the change", "gandhi");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Quote::new("Be the change ", "Gandhi"));
    }

    #[test]
    fn validity_requires_both_fields() {
        assert!(Quote::new("text", "author").is_valid());
        assert!(!Quote::new("", "author").is_valid());
        assert!(!Quote::new("text", "").is_valid());
    }

    #[test]
    fn share_text_matches_expected_layout() {
        let quote = Quote::new("Be the change", "Gandhi");
        assert_eq!(
            quote.share_text("WinQuote"),
            "\"Be the change\"\n\n- Gandhi\n\nShared via WinQuote"
        );
    }

    #[test]
    fn serializes_as_tagged_record() {
        let quote = Quote::new("Be the change", "Gandhi");
        let json = serde_json::to_value(&quote).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"text": "Be the change", "author": "Gandhi"})
        );
    }
}
