//! Batch translation reconciliation for embedded image metadata fields
//!
//! picbabel takes a set of named metadata fields (titles, captions,
//! comma-joined keyword lists), flattens them into one ordered batch for a
//! single call to a translation provider, and reassembles the flat response
//! back onto the original field structure without losing field identity or
//! misaligning list elements.
//!
//! # Workflow Example
//!
//! ```ignore
//! use picbabel::{DeepLProvider, FieldSet, Reconciler};
//! use std::collections::HashSet;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Collect the fields to translate
//!     let mut fields = FieldSet::new();
//!     fields.insert("ObjectName", "Sunset");
//!     fields.insert("CaptionAbstract", "A quiet evening at the pier");
//!     fields.insert("Keywords", "beach, ocean, dusk");
//!
//!     // 2. Designate which fields are comma-joined lists
//!     let list_fields: HashSet<String> = ["Keywords".to_string()].into();
//!
//!     // 3. One provider call covers the whole batch
//!     let provider = DeepLProvider::from_env()?;
//!     let reconciler = Reconciler::new(Arc::new(provider));
//!     let translated = reconciler.translate(&fields, &list_fields, "DE").await?;
//!
//!     println!("{}", serde_json::to_string_pretty(&translated)?);
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod deepl;
pub mod error;
pub mod flatten;
pub mod mock;
pub mod reassembly;
pub mod reconciler;
pub mod translator;


// Re-export main types for convenient access
pub use data::{FieldSet, Language, TranslationUnit};
pub use deepl::DeepLProvider;
pub use error::{TranslateError, TranslateResult};
pub use flatten::{flatten, split_list_text};
pub use mock::{MockMode, MockProvider};
pub use reassembly::reassemble;
pub use reconciler::Reconciler;
pub use translator::{TranslationProvider, validate_target_lang};
