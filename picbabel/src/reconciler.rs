//! Batch translation reconciler
//!
//! The reconciler is the orchestrating component: it flattens a field set
//! into one ordered unit batch, invokes the translation provider exactly
//! once for the whole batch, validates the response count, and reassembles
//! the flat result back onto the original field structure. One call to
//! [`Reconciler::translate`] is one provider request, regardless of how many
//! fields or list elements are involved.
//!
//! The reconciler holds no state between calls: no translation cache, no
//! session data, no retries. Concurrent calls are fully independent.
//!
//! # Example
//!
//! ```ignore
//! use picbabel::{MockMode, MockProvider, Reconciler, FieldSet};
//! use std::collections::HashSet;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reconciler = Reconciler::new(Arc::new(MockProvider::new(MockMode::Prefix)));
//!
//!     let mut fields = FieldSet::new();
//!     fields.insert("ObjectName", "Sunset");
//!     fields.insert("Keywords", "beach, ocean");
//!     let list_fields: HashSet<String> = ["Keywords".to_string()].into();
//!
//!     let result = reconciler.translate(&fields, &list_fields, "DE").await?;
//!     assert_eq!(result.get("Keywords"), Some("DE:beach, DE:ocean"));
//!     Ok(())
//! }
//! ```

use crate::data::{FieldSet, Language};
use crate::error::{TranslateError, TranslateResult};
use crate::flatten::flatten;
use crate::reassembly::reassemble;
use crate::translator::{TranslationProvider, validate_target_lang};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Structured-field batch translation reconciler
#[derive(Clone)]
pub struct Reconciler {
    provider: Arc<dyn TranslationProvider>,
}

impl Reconciler {
    /// Create a reconciler around a translation provider
    pub fn new(provider: Arc<dyn TranslationProvider>) -> Self {
        Self { provider }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Translate a set of metadata fields into the target language
    ///
    /// `list_fields` names the fields whose text is a comma-joined list of
    /// independent elements; every other field is treated as one scalar
    /// string. Returns a field set covering every input field in input
    /// order, with list fields rejoined with `", "`.
    ///
    /// # Errors
    ///
    /// * `InvalidRequest` - empty field set or empty/invalid target language
    /// * `ProviderResponse` - provider returned a different number of
    ///   translations than units sent
    /// * `ProviderTransport` - network failure or non-2xx provider status
    ///
    /// If flattening yields zero units (every field empty or contracted),
    /// the provider is never invoked and an empty field set is returned;
    /// that is a normal outcome, not an error.
    pub async fn translate(
        &self,
        fields: &FieldSet,
        list_fields: &HashSet<String>,
        target_lang: &str,
    ) -> TranslateResult<FieldSet> {
        if fields.is_empty() {
            return Err(TranslateError::InvalidRequest(
                "no fields to translate".to_string(),
            ));
        }
        validate_target_lang(target_lang)?;

        let units = flatten(fields, list_fields);
        if units.is_empty() {
            info!("no translatable text in any field, skipping provider call");
            return Ok(FieldSet::new());
        }

        let texts: Vec<String> = units.iter().map(|u| u.text.clone()).collect();
        info!(
            units = texts.len(),
            target = target_lang,
            provider = self.provider.provider_name(),
            "sending translation batch"
        );

        let translations = self.provider.translate_batch(&texts, target_lang).await?;

        if translations.len() != units.len() {
            return Err(TranslateError::ProviderResponse(format!(
                "translation count mismatch: sent {} texts, received {}",
                units.len(),
                translations.len()
            )));
        }

        let result = reassemble(fields, list_fields, &units, &translations);
        info!(fields = result.len(), "batch reconciled");
        Ok(result)
    }

    /// Fetch the provider's target languages, sorted by display name
    pub async fn list_target_languages(&self) -> TranslateResult<Vec<Language>> {
        let mut languages = self.provider.target_languages().await?;
        languages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(languages)
    }
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}
