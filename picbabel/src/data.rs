//! Core data structures for field-level batch translation
//!
//! This module defines the types shared by the flattening and reassembly
//! phases: the insertion-ordered [`FieldSet`], the tagged [`TranslationUnit`]
//! that makes up the provider batch, and the [`Language`] catalog entry.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An insertion-ordered mapping from field name to text
///
/// Metadata fields arrive from the caller in a meaningful order (the order
/// the form or frontend supplied them), and reconciliation guarantees depend
/// on iterating fields in exactly that order. A plain `HashMap` would lose
/// it, so `FieldSet` keeps a flat vector of entries and enforces key
/// uniqueness on insert.
///
/// The JSON form is a plain object; serialization preserves entry order in
/// both directions.
///
/// # Example
///
/// ```ignore
/// let mut fields = FieldSet::new();
/// fields.insert("ObjectName", "Sunset");
/// fields.insert("Keywords", "beach, ocean");
/// assert_eq!(fields.get("ObjectName"), Some("Sunset"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    entries: Vec<(String, String)>,
}

impl FieldSet {
    /// Create an empty field set
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a field, replacing the text in place if the name already exists
    ///
    /// Replacing in place keeps the field at its original position, so a
    /// caller updating a value never changes iteration order.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let name = name.into();
        let text = text.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = text;
        } else {
            self.entries.push((name, text));
        }
    }

    /// Look up a field's text by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the set holds no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, text)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t.as_str()))
    }

    /// Field names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl FromIterator<(String, String)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut set = FieldSet::new();
        for (name, text) in iter {
            set.insert(name, text);
        }
        set
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(n, t)| (n.to_string(), t.to_string()))
            .collect()
    }
}

impl Serialize for FieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, text) in &self.entries {
            map.serialize_entry(name, text)?;
        }
        map.end()
    }
}

struct FieldSetVisitor;

impl<'de> Visitor<'de> for FieldSetVisitor {
    type Value = FieldSet;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a JSON object of field name to text")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = FieldSet::new();
        while let Some((name, text)) = access.next_entry::<String, String>()? {
            set.insert(name, text);
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for FieldSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldSetVisitor)
    }
}

/// One atomic string queued for the translation provider
///
/// Units carry their origin with them: the owning field name and, when the
/// unit is a single element of a list-valued field, the element's zero-based
/// position within the filtered element sequence. The unit sequence is the
/// only thing the provider sees and the only thing its response is indexed
/// against, so reassembly never has to guess where a translation belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    /// Name of the field this unit came from
    pub field: String,
    /// Source text sent to the provider
    pub text: String,
    /// `Some(position)` when this unit is one element of a list field;
    /// `None` for a whole scalar field
    pub element_index: Option<usize>,
}

impl TranslationUnit {
    /// Unit holding a whole scalar field
    pub fn scalar(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            text: text.into(),
            element_index: None,
        }
    }

    /// Unit holding one element of a list field at the given position
    pub fn element(field: impl Into<String>, text: impl Into<String>, index: usize) -> Self {
        Self {
            field: field.into(),
            text: text.into(),
            element_index: Some(index),
        }
    }

    /// True if this unit is a list element rather than a whole field
    pub fn is_element(&self) -> bool {
        self.element_index.is_some()
    }
}

/// One entry of the provider's target-language catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Language code as the provider spells it (e.g., "DE", "FR")
    pub language: String,
    /// Human-readable display name (e.g., "German")
    pub name: String,
}
