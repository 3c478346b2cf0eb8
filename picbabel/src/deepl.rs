//! DeepL API provider for batch translation
//!
//! This module integrates with the DeepL REST API (v2) for real
//! translations and for the target-language catalog.
//!
//! # Authentication
//!
//! The provider loads the API key from the `DEEPL_API_KEY` environment
//! variable; `DEEPL_API_URL` overrides the API base (defaults to the free
//! tier endpoint, `https://api-free.deepl.com`). Obtain a key from:
//! https://www.deepl.com/pro-api
//!
//! # Example
//!
//! ```ignore
//! use picbabel::{DeepLProvider, TranslationProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = DeepLProvider::from_env()?;
//!
//!     let texts = vec!["Sunset".to_string(), "beach".to_string()];
//!     let results = provider.translate_batch(&texts, "DE").await?;
//!     println!("{:?}", results);
//!
//!     for lang in provider.target_languages().await? {
//!         println!("{}: {}", lang.language, lang.name);
//!     }
//!     Ok(())
//! }
//! ```

use crate::data::Language;
use crate::error::{TranslateError, TranslateResult};
use crate::translator::{TranslationProvider, validate_target_lang};
use async_trait::async_trait;
use serde_json::json;

/// Default API base, the DeepL free tier
const DEFAULT_BASE_URL: &str = "https://api-free.deepl.com";

/// DeepL API v2 provider
///
/// Sends the whole unit batch in one `POST /v2/translate` request; DeepL
/// accepts up to 50 texts per request, which is far beyond what one image's
/// metadata produces, so no chunking is needed here.
#[derive(Clone)]
pub struct DeepLProvider {
    /// API key for authentication
    api_key: String,
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Base URL, free or pro endpoint
    base_url: String,
}

impl DeepLProvider {
    /// Create a new DeepLProvider with an explicit API key
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance against the free tier endpoint
    /// * `Err(TranslateError)` - If the key is empty or HTTP client creation fails
    pub fn new(api_key: String) -> TranslateResult<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a provider against a specific API base URL
    ///
    /// Useful for the pro endpoint (`https://api.deepl.com`) and for
    /// pointing tests at a local stub server.
    pub fn with_base_url(api_key: String, base_url: String) -> TranslateResult<Self> {
        if api_key.trim().is_empty() {
            return Err(TranslateError::Configuration(
                "DeepL API key cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                TranslateError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a provider from `DEEPL_API_KEY` / `DEEPL_API_URL`
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(TranslateError)` - If `DEEPL_API_KEY` is not set
    pub fn from_env() -> TranslateResult<Self> {
        let api_key = std::env::var("DEEPL_API_KEY").map_err(|_| {
            TranslateError::Configuration(
                "DEEPL_API_KEY environment variable not set".to_string(),
            )
        })?;
        let base_url =
            std::env::var("DEEPL_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self::with_base_url(api_key, base_url)
    }

    fn auth_header(&self) -> String {
        format!("DeepL-Auth-Key {}", self.api_key)
    }

    /// Surface a non-2xx response as a transport error with the verbatim body
    async fn transport_error(response: reqwest::Response) -> TranslateError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        TranslateError::ProviderTransport(format!("DeepL API error: {} - {}", status, body))
    }
}

impl std::fmt::Debug for DeepLProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepLProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationProvider for DeepLProvider {
    async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
    ) -> TranslateResult<Vec<Option<String>>> {
        validate_target_lang(target_lang)?;

        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/v2/translate", self.base_url);
        let body = json!({
            "text": texts,
            "target_lang": target_lang,
        });

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::transport_error(response).await);
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::ProviderResponse(format!("Failed to parse API response: {}", e))
        })?;

        let translations = json["translations"].as_array().ok_or_else(|| {
            TranslateError::ProviderResponse(
                "Invalid API response: missing 'translations' array".to_string(),
            )
        })?;

        // An entry without a "text" string becomes None rather than an
        // error; the reconciler decides how much leniency the batch gets.
        Ok(translations
            .iter()
            .map(|t| t["text"].as_str().map(|s| s.to_string()))
            .collect())
    }

    async fn target_languages(&self) -> TranslateResult<Vec<Language>> {
        let url = format!("{}/v2/languages?type=target", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::transport_error(response).await);
        }

        response.json::<Vec<Language>>().await.map_err(|e| {
            TranslateError::ProviderResponse(format!("Failed to parse language catalog: {}", e))
        })
    }

    fn provider_name(&self) -> &str {
        "DeepL"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Initialization Tests ==========

    #[test]
    fn test_new_with_valid_key() {
        let provider = DeepLProvider::new("test-api-key".to_string());
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().provider_name(), "DeepL");
    }

    #[test]
    fn test_new_with_empty_key() {
        let result = DeepLProvider::new("".to_string());
        match result {
            Err(TranslateError::Configuration(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_with_whitespace_key() {
        assert!(DeepLProvider::new("   ".to_string()).is_err());
    }

    #[test]
    fn test_from_env_without_key() {
        unsafe {
            std::env::remove_var("DEEPL_API_KEY");
        }
        match DeepLProvider::from_env() {
            Err(TranslateError::Configuration(msg)) => assert!(msg.contains("not set")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider =
            DeepLProvider::with_base_url("key".to_string(), "http://localhost:9999/".to_string())
                .unwrap();
        assert_eq!(provider.base_url, "http://localhost:9999");
    }

    // ========== Validation Tests ==========

    #[tokio::test]
    async fn test_translate_empty_batch_skips_network() {
        let provider = DeepLProvider::new("test-key".to_string()).unwrap();
        let results = provider.translate_batch(&[], "DE").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_translate_invalid_target_lang() {
        let provider = DeepLProvider::new("test-key".to_string()).unwrap();
        let texts = vec!["hello".to_string()];
        let result = provider.translate_batch(&texts, "de@AT").await;
        assert!(result.is_err());
    }

    // ========== Debug Implementation Test ==========

    #[test]
    fn test_debug_masks_api_key() {
        let provider = DeepLProvider::new("secret-key".to_string()).unwrap();
        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("secret-key"));
    }

    // ========== Integration Tests (require a real API key) ==========

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_real_api_batch_translation() {
        if std::env::var("DEEPL_API_KEY").is_err() {
            eprintln!("Skipping: DEEPL_API_KEY not set");
            return;
        }

        let provider = DeepLProvider::from_env().unwrap();
        let texts = vec!["Sunset".to_string(), "beach".to_string()];
        let results = provider.translate_batch(&texts, "DE").await.unwrap();

        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(result.as_deref().is_some_and(|t| !t.is_empty()));
        }
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_real_api_language_catalog() {
        if std::env::var("DEEPL_API_KEY").is_err() {
            eprintln!("Skipping: DEEPL_API_KEY not set");
            return;
        }

        let provider = DeepLProvider::from_env().unwrap();
        let languages = provider.target_languages().await.unwrap();

        assert!(!languages.is_empty());
        assert!(languages.iter().any(|l| l.language == "DE"));
    }
}
