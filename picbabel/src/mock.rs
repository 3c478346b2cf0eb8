//! Mock translation provider for testing
//!
//! This module provides a deterministic, API-free provider for exercising
//! the reconciliation pipeline without API keys or network access, including
//! the unhappy paths a real provider only produces under load: missing
//! entries, short responses and outright failures.
//!
//! # Example
//!
//! ```ignore
//! use picbabel::{MockMode, MockProvider, TranslationProvider};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockProvider::new(MockMode::Prefix);
//!     let texts = vec!["Sunset".to_string()];
//!     let results = mock.translate_batch(&texts, "DE").await.unwrap();
//!     assert_eq!(results, vec![Some("DE:Sunset".to_string())]);
//! }
//! ```

use crate::data::Language;
use crate::error::{TranslateError, TranslateResult};
use crate::translator::TranslationProvider;
use async_trait::async_trait;
use std::collections::HashMap;

/// Mock translation modes for testing different provider behaviors
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Prefix each text with the target language: "Sunset" → "DE:Sunset"
    Prefix,

    /// Return every input unchanged
    Echo,

    /// Look each text up in a fixed dictionary; texts without an entry get
    /// no translation (a `None` slot in the response)
    Dictionary(HashMap<String, String>),

    /// Behave like `Prefix` but drop the last `n` entries entirely,
    /// producing a response shorter than the request
    Short(usize),

    /// Fail every call with the given message
    Fail(String),
}

/// Mock provider that simulates various provider behaviors
///
/// The language catalog is a fixed, deliberately unsorted list so callers
/// that promise sorted output can be tested against it.
#[derive(Debug, Clone)]
pub struct MockProvider {
    mode: MockMode,
}

impl MockProvider {
    /// Create a new MockProvider with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self { mode }
    }

    fn apply(&self, text: &str, index: usize, total: usize, target_lang: &str) -> Option<String> {
        match &self.mode {
            MockMode::Prefix => Some(format!("{}:{}", target_lang, text)),
            MockMode::Echo => Some(text.to_string()),
            MockMode::Dictionary(map) => map.get(text).cloned(),
            MockMode::Short(dropped) => {
                if index < total.saturating_sub(*dropped) {
                    Some(format!("{}:{}", target_lang, text))
                } else {
                    None // filtered out entirely in translate_batch
                }
            }
            MockMode::Fail(_) => None,
        }
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
    ) -> TranslateResult<Vec<Option<String>>> {
        if let MockMode::Fail(msg) = &self.mode {
            return Err(TranslateError::ProviderTransport(msg.clone()));
        }

        let total = texts.len();
        let mut results: Vec<Option<String>> = texts
            .iter()
            .enumerate()
            .map(|(index, text)| self.apply(text, index, total, target_lang))
            .collect();

        // Short mode truncates the response instead of leaving None holes
        if let MockMode::Short(dropped) = &self.mode {
            results.truncate(total.saturating_sub(*dropped));
        }

        Ok(results)
    }

    async fn target_languages(&self) -> TranslateResult<Vec<Language>> {
        if let MockMode::Fail(msg) = &self.mode {
            return Err(TranslateError::ProviderTransport(msg.clone()));
        }

        // Unsorted on purpose
        Ok(vec![
            Language {
                language: "ES".to_string(),
                name: "Spanish".to_string(),
            },
            Language {
                language: "DE".to_string(),
                name: "German".to_string(),
            },
            Language {
                language: "FR".to_string(),
                name: "French".to_string(),
            },
        ])
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Prefix Mode Tests ==========

    #[tokio::test]
    async fn test_prefix_batch() {
        let mock = MockProvider::new(MockMode::Prefix);
        let texts = vec!["Sunset".to_string(), "beach".to_string()];
        let results = mock.translate_batch(&texts, "DE").await.unwrap();
        assert_eq!(
            results,
            vec![Some("DE:Sunset".to_string()), Some("DE:beach".to_string())]
        );
    }

    #[tokio::test]
    async fn test_prefix_different_targets() {
        let mock = MockProvider::new(MockMode::Prefix);
        let texts = vec!["hello".to_string()];
        assert_eq!(
            mock.translate_batch(&texts, "FR").await.unwrap(),
            vec![Some("FR:hello".to_string())]
        );
        assert_eq!(
            mock.translate_batch(&texts, "ES").await.unwrap(),
            vec![Some("ES:hello".to_string())]
        );
    }

    // ========== Echo Mode Tests ==========

    #[tokio::test]
    async fn test_echo_returns_unchanged() {
        let mock = MockProvider::new(MockMode::Echo);
        let texts = vec!["a".to_string(), "b".to_string()];
        let results = mock.translate_batch(&texts, "DE").await.unwrap();
        assert_eq!(results, vec![Some("a".to_string()), Some("b".to_string())]);
    }

    // ========== Dictionary Mode Tests ==========

    #[tokio::test]
    async fn test_dictionary_misses_become_none() {
        let mut map = HashMap::new();
        map.insert("Hello".to_string(), "Hallo".to_string());

        let mock = MockProvider::new(MockMode::Dictionary(map));
        let texts = vec!["Hello".to_string(), "green".to_string()];
        let results = mock.translate_batch(&texts, "DE").await.unwrap();
        assert_eq!(results, vec![Some("Hallo".to_string()), None]);
    }

    // ========== Short Mode Tests ==========

    #[tokio::test]
    async fn test_short_truncates_response() {
        let mock = MockProvider::new(MockMode::Short(1));
        let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let results = mock.translate_batch(&texts, "DE").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], Some("DE:a".to_string()));
    }

    // ========== Fail Mode Tests ==========

    #[tokio::test]
    async fn test_fail_mode_errors() {
        let mock = MockProvider::new(MockMode::Fail("service unavailable".to_string()));
        let texts = vec!["hello".to_string()];
        match mock.translate_batch(&texts, "DE").await {
            Err(TranslateError::ProviderTransport(msg)) => {
                assert_eq!(msg, "service unavailable");
            }
            other => panic!("Expected ProviderTransport, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fail_mode_language_catalog_errors() {
        let mock = MockProvider::new(MockMode::Fail("down".to_string()));
        assert!(mock.target_languages().await.is_err());
    }

    // ========== Catalog Tests ==========

    #[tokio::test]
    async fn test_catalog_is_unsorted() {
        let mock = MockProvider::new(MockMode::Prefix);
        let languages = mock.target_languages().await.unwrap();
        let names: Vec<&str> = languages.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Spanish", "German", "French"]);
    }

    // ========== Order Tests ==========

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let mock = MockProvider::new(MockMode::Prefix);
        let texts = vec![
            "first".to_string(),
            "second".to_string(),
            "third".to_string(),
        ];
        let results = mock.translate_batch(&texts, "DE").await.unwrap();
        assert_eq!(results[0], Some("DE:first".to_string()));
        assert_eq!(results[1], Some("DE:second".to_string()));
        assert_eq!(results[2], Some("DE:third".to_string()));
    }
}
