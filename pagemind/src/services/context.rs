//! Context selection: deciding which text grounds an answer.
//!
//! The policy: start from the most recently scraped text, then let the
//! similarity index's top-1 hit replace it whenever the index is non-empty.
//! The index wins even when its best match is older or unrelated to the
//! query; tests below pin that behavior deliberately.

use std::sync::{Arc, RwLock};

/// Upper bound on the context forwarded to the model, in characters.
pub const MAX_CONTEXT_CHARS: usize = 3000;

/// Fixed reply when nothing has been scraped yet.
pub const NO_CONTENT_MESSAGE: &str = "No content available. Please scrape a URL first.";

/// Text of the last successful scrape. Empty at startup, overwritten by
/// every successful scrape, never otherwise cleared. Shared across requests
/// with single-writer lock semantics; reads take a point-in-time snapshot,
/// so a scrape interleaved with a query is last-write-wins.
#[derive(Clone, Default)]
pub struct RecentContent(Arc<RwLock<String>>);

impl RecentContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> String {
        self.0
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set(&self, content: String) {
        *self
            .0
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = content;
    }
}

/// Outcome of context selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Nothing scraped anywhere; callers short-circuit the generator and
    /// reply with [`NO_CONTENT_MESSAGE`].
    Unavailable,
    /// Bounded text to embed in the prompt.
    Grounded(String),
}

/// Choose the context for a query.
///
/// `best_match` is the index's top-1 hit, which the caller resolves only
/// when `index_size > 0`. A non-empty hit unconditionally replaces the
/// recent text.
pub fn select(recent: &str, index_size: u64, best_match: Option<&str>) -> Selection {
    if index_size == 0 && recent.is_empty() {
        return Selection::Unavailable;
    }

    let mut context = recent;
    if index_size > 0 {
        if let Some(best) = best_match.filter(|m| !m.is_empty()) {
            context = best;
        }
    }

    Selection::Grounded(truncate_chars(context, MAX_CONTEXT_CHARS))
}

/// Hard character cutoff, no word-boundary awareness.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_everything_is_unavailable() {
        assert_eq!(select("", 0, None), Selection::Unavailable);
    }

    #[test]
    fn recent_text_is_the_fallback_when_index_is_empty() {
        assert_eq!(
            select("fresh scrape", 0, None),
            Selection::Grounded("fresh scrape".to_string())
        );
    }

    #[test]
    fn index_hit_overrides_recent_text() {
        // Pins the override: the top-1 match replaces the fresher recent
        // text even when it is stale or unrelated to the query.
        assert_eq!(
            select("fresh scrape", 3, Some("stale unrelated match")),
            Selection::Grounded("stale unrelated match".to_string())
        );
    }

    #[test]
    fn empty_index_hit_keeps_recent_text() {
        assert_eq!(
            select("fresh scrape", 3, Some("")),
            Selection::Grounded("fresh scrape".to_string())
        );
        assert_eq!(
            select("fresh scrape", 3, None),
            Selection::Grounded("fresh scrape".to_string())
        );
    }

    #[test]
    fn index_hit_alone_is_enough() {
        // Recent text resets on restart while the index persists.
        assert_eq!(
            select("", 1, Some("indexed page")),
            Selection::Grounded("indexed page".to_string())
        );
    }

    #[test]
    fn long_context_is_cut_to_exactly_the_limit() {
        let long = "a".repeat(MAX_CONTEXT_CHARS + 500);
        let Selection::Grounded(context) = select(&long, 0, None) else {
            panic!("expected grounded context");
        };
        assert_eq!(context.chars().count(), MAX_CONTEXT_CHARS);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "é".repeat(MAX_CONTEXT_CHARS + 10);
        let Selection::Grounded(context) = select("", 1, Some(&long)) else {
            panic!("expected grounded context");
        };
        assert_eq!(context.chars().count(), MAX_CONTEXT_CHARS);
    }

    #[test]
    fn short_context_is_untouched() {
        assert_eq!(truncate_chars("short", 3000), "short");
        assert_eq!(truncate_chars("", 3000), "");
    }

    #[test]
    fn recent_content_round_trips() {
        let recent = RecentContent::new();
        assert_eq!(recent.get(), "");

        recent.set("first".to_string());
        assert_eq!(recent.get(), "first");

        let alias = recent.clone();
        alias.set("second".to_string());
        assert_eq!(recent.get(), "second");
    }
}
