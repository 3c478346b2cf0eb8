//! Flattening: ordered field set → ordered batch of translation units
//!
//! The flattening phase turns a heterogeneous set of metadata fields (some
//! scalar strings, some comma-joined lists) into one flat sequence of
//! [`TranslationUnit`]s suitable for a single batched provider call. The
//! sequence order is the contract: the Nth unit produced here corresponds to
//! the Nth translation in the provider's response, and reassembly walks the
//! same sequence in lock-step.
//!
//! # Example
//!
//! ```ignore
//! // Fields: { ObjectName: "Sunset", Keywords: "beach, ocean" }
//! // Keywords designated list-valued
//! //
//! // Batch: [
//! //   scalar  ObjectName "Sunset"
//! //   element Keywords   "beach"  (position 0)
//! //   element Keywords   "ocean"  (position 1)
//! // ]
//! ```

use crate::data::{FieldSet, TranslationUnit};
use std::collections::HashSet;

/// Split a list field's stored text into its elements
///
/// Splits on `','`, trims surrounding whitespace from each piece and drops
/// pieces that end up empty. `"  beach , ocean ,,  "` yields
/// `["beach", "ocean"]`; an all-whitespace input yields no elements.
pub fn split_list_text(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Flatten a field set into the ordered unit batch for one provider call
///
/// Iterates fields in insertion order. Scalar fields with non-empty text
/// contribute exactly one unit holding the whole text. List fields are split
/// with [`split_list_text`]; each surviving element contributes one unit
/// tagged with its position in the *filtered* sequence. Fields with empty
/// text, and list fields whose elements all filter away, contribute no units
/// at all; they later reconcile to an empty string.
pub fn flatten(fields: &FieldSet, list_fields: &HashSet<String>) -> Vec<TranslationUnit> {
    let mut units = Vec::new();

    for (name, text) in fields.iter() {
        if text.is_empty() {
            continue;
        }
        if list_fields.contains(name) {
            for (index, element) in split_list_text(text).into_iter().enumerate() {
                units.push(TranslationUnit::element(name, element, index));
            }
        } else {
            units.push(TranslationUnit::scalar(name, text));
        }
    }

    units
}
