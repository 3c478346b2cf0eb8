//! Translation provider trait and target-language validation
//!
//! This module defines the [`TranslationProvider`] trait for provider
//! abstraction, so the reconciler can run against the DeepL API in
//! production and a deterministic mock in tests without knowing the
//! difference.
//!
//! # Example
//!
//! ```ignore
//! use picbabel::{DeepLProvider, TranslationProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = DeepLProvider::from_env()?;
//!     let texts = vec!["Sunset".to_string(), "beach".to_string()];
//!     let results = provider.translate_batch(&texts, "DE").await?;
//!     println!("{:?}", results);
//!     Ok(())
//! }
//! ```

use crate::data::Language;
use crate::error::{TranslateError, TranslateResult};
use async_trait::async_trait;

/// Generic trait for batched text translation providers
///
/// All methods are async to support I/O-bound operations like network
/// requests.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate a batch of strings into the target language
    ///
    /// # Guarantees
    ///
    /// - Output order matches input order
    /// - A `None` entry means the provider produced no translation for that
    ///   index; implementations must still keep every other entry at its
    ///   original index
    ///
    /// The caller validates that the output length equals the input length;
    /// a provider that cannot uphold that should return what it got and let
    /// the caller fail the batch.
    async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
    ) -> TranslateResult<Vec<Option<String>>>;

    /// Fetch the provider's catalog of supported target languages, unsorted
    async fn target_languages(&self) -> TranslateResult<Vec<Language>>;

    /// Name of this provider, for logging and debugging
    fn provider_name(&self) -> &str;
}

/// Validate a target language code before it reaches the provider
///
/// Accepts codes like `DE`, `fr`, `PT-BR`, `zh_Hans`; rejects empty codes
/// and anything with characters outside ASCII alphanumerics, `-` and `_`.
pub fn validate_target_lang(lang: &str) -> TranslateResult<()> {
    if lang.is_empty() {
        return Err(TranslateError::InvalidRequest(
            "no target language specified".to_string(),
        ));
    }

    if !lang
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TranslateError::InvalidRequest(format!(
            "invalid characters in target language code: {}",
            lang
        )));
    }

    Ok(())
}
