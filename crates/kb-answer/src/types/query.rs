//! Search query type

use serde::{Deserialize, Serialize};

/// A single knowledge-base search query. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The query text
    pub text: String,

    /// Number of results to request (default: 5)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Language code for the search request (default: "en-US")
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Opaque search session reference (optional)
    #[serde(default)]
    pub session: Option<String>,
}

fn default_page_size() -> u32 {
    5
}

fn default_locale() -> String {
    "en-US".to_string()
}

impl SearchQuery {
    /// Create a new query with default paging and locale
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page_size: default_page_size(),
            locale: default_locale(),
            session: None,
        }
    }

    /// Set the number of results to request
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the language code
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Attach a search session reference
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let query = SearchQuery::new("grace period")
            .with_page_size(10)
            .with_session("sessions/abc");
        assert_eq!(query.text, "grace period");
        assert_eq!(query.page_size, 10);
        assert_eq!(query.locale, "en-US");
        assert_eq!(query.session.as_deref(), Some("sessions/abc"));
    }
}
