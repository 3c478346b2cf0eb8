//! Reassembly: flat ordered provider output → original field structure
//!
//! The provider returns one flat list of translations, indexed exactly
//! against the unit batch produced by [`crate::flatten::flatten`]. This
//! module walks the two sequences in lock-step and rebuilds the field
//! structure: scalar units become their field's value, element units land by
//! recorded position in a sparse per-field list, and list fields are finally
//! rejoined with `", "`.
//!
//! A `None` response entry is tolerated: the slot stays empty, the
//! consumption index still advances, and the finalize step simply drops the
//! hole. One missing element never voids the rest of the batch.

use crate::data::{FieldSet, TranslationUnit};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Map the provider's flat translation list back onto the field structure
///
/// `translations` must have exactly one entry per unit; the caller validates
/// the count before calling. The returned set covers every field of the
/// input in input order:
///
/// - scalar field with a translated unit → the translation
/// - scalar field whose translation is missing, or which never produced a
///   unit → the source text unchanged (empty fields stay empty)
/// - list field → surviving element translations joined with `", "` in
///   ascending position order, missing elements skipped
pub fn reassemble(
    fields: &FieldSet,
    list_fields: &HashSet<String>,
    units: &[TranslationUnit],
    translations: &[Option<String>],
) -> FieldSet {
    debug_assert_eq!(units.len(), translations.len());

    let mut scalars: HashMap<&str, &str> = HashMap::new();
    let mut elements: HashMap<&str, Vec<Option<String>>> = HashMap::new();

    for (index, (unit, slot)) in units.iter().zip(translations).enumerate() {
        match unit.element_index {
            Some(position) => {
                // Fill by position, not by push: even if this field's
                // entries arrive interleaved with other fields', each
                // translation lands at the slot its source element occupied.
                let list = elements.entry(unit.field.as_str()).or_default();
                match slot {
                    Some(text) => {
                        if list.len() <= position {
                            list.resize(position + 1, None);
                        }
                        list[position] = Some(text.clone());
                    }
                    None => {
                        warn!(field = %unit.field, index, "missing translation for list element");
                    }
                }
            }
            None => match slot {
                Some(text) => {
                    scalars.insert(unit.field.as_str(), text.as_str());
                }
                None => {
                    warn!(field = %unit.field, index, "missing translation for field");
                }
            },
        }
    }

    let mut out = FieldSet::new();
    for (name, source) in fields.iter() {
        if list_fields.contains(name) {
            let joined = elements
                .get(name)
                .map(|list| {
                    list.iter()
                        .flatten()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            out.insert(name, joined);
        } else {
            // Fall back to the source text when the field produced no unit
            // (empty source) or its translation went missing.
            out.insert(name, scalars.get(name).copied().unwrap_or(source));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn all_some(texts: &[&str]) -> Vec<Option<String>> {
        texts.iter().map(|t| Some(t.to_string())).collect()
    }

    #[test]
    fn test_scalar_takes_response_text() {
        let fields: FieldSet = [("Title", "Sunset")].into_iter().collect();
        let units = vec![TranslationUnit::scalar("Title", "Sunset")];

        let out = reassemble(&fields, &HashSet::new(), &units, &all_some(&["Abendrot"]));
        assert_eq!(out.get("Title"), Some("Abendrot"));
    }

    #[test]
    fn test_list_elements_rejoined_in_order() {
        let fields: FieldSet = [("Keywords", "beach, ocean")].into_iter().collect();
        let units = vec![
            TranslationUnit::element("Keywords", "beach", 0),
            TranslationUnit::element("Keywords", "ocean", 1),
        ];

        let out = reassemble(
            &fields,
            &list_of(&["Keywords"]),
            &units,
            &all_some(&["Strand", "Meer"]),
        );
        assert_eq!(out.get("Keywords"), Some("Strand, Meer"));
    }

    #[test]
    fn test_positions_win_over_arrival_order() {
        // Units deliberately listed with positions out of sequence; the
        // recorded position decides where each translation lands.
        let fields: FieldSet = [("Keywords", "a, b, c")].into_iter().collect();
        let units = vec![
            TranslationUnit::element("Keywords", "c", 2),
            TranslationUnit::element("Keywords", "a", 0),
            TranslationUnit::element("Keywords", "b", 1),
        ];

        let out = reassemble(
            &fields,
            &list_of(&["Keywords"]),
            &units,
            &all_some(&["C", "A", "B"]),
        );
        assert_eq!(out.get("Keywords"), Some("A, B, C"));
    }

    #[test]
    fn test_missing_element_skipped_not_padded() {
        let fields: FieldSet = [("Keywords", "red, green, blue")].into_iter().collect();
        let units = vec![
            TranslationUnit::element("Keywords", "red", 0),
            TranslationUnit::element("Keywords", "green", 1),
            TranslationUnit::element("Keywords", "blue", 2),
        ];
        let translations = vec![Some("rot".to_string()), None, Some("blau".to_string())];

        let out = reassemble(&fields, &list_of(&["Keywords"]), &units, &translations);
        assert_eq!(out.get("Keywords"), Some("rot, blau"));
    }

    #[test]
    fn test_missing_scalar_falls_back_to_source() {
        let fields: FieldSet = [("Title", "Sunset")].into_iter().collect();
        let units = vec![TranslationUnit::scalar("Title", "Sunset")];

        let out = reassemble(&fields, &HashSet::new(), &units, &[None]);
        assert_eq!(out.get("Title"), Some("Sunset"));
    }

    #[test]
    fn test_unitless_fields_reconcile_to_empty() {
        // An empty scalar and a contracted list produced no units at all;
        // both still appear in the output, as empty strings.
        let fields: FieldSet = [("Title", ""), ("Keywords", "   ,  ,"), ("Caption", "x")]
            .into_iter()
            .collect();
        let units = vec![TranslationUnit::scalar("Caption", "x")];

        let out = reassemble(&fields, &list_of(&["Keywords"]), &units, &all_some(&["y"]));
        assert_eq!(out.get("Title"), Some(""));
        assert_eq!(out.get("Keywords"), Some(""));
        assert_eq!(out.get("Caption"), Some("y"));
        assert_eq!(out.names(), vec!["Title", "Keywords", "Caption"]);
    }

    #[test]
    fn test_output_order_matches_input_order() {
        let fields: FieldSet = [("B", "b"), ("A", "a")].into_iter().collect();
        let units = vec![
            TranslationUnit::scalar("B", "b"),
            TranslationUnit::scalar("A", "a"),
        ];

        let out = reassemble(&fields, &HashSet::new(), &units, &all_some(&["B2", "A2"]));
        assert_eq!(out.names(), vec!["B", "A"]);
    }

    #[test]
    fn test_all_elements_missing_yields_empty_string() {
        let fields: FieldSet = [("Keywords", "one, two")].into_iter().collect();
        let units = vec![
            TranslationUnit::element("Keywords", "one", 0),
            TranslationUnit::element("Keywords", "two", 1),
        ];

        let out = reassemble(&fields, &list_of(&["Keywords"]), &units, &[None, None]);
        assert_eq!(out.get("Keywords"), Some(""));
    }
}
