//! Nested translation dictionaries.
//!
//! A [`Dictionary`] is an insertion-ordered tree of string keys. Interior
//! nodes are plain mappings; the nodes that actually carry text are
//! **locale leaves**, mappings from locale code to translated string:
//!
//! ```text
//! user
//! └── profile
//!     └── title        <- locale leaf
//!         ├── en: "User Profile"
//!         └── es: "Perfil de Usuario"
//! ```
//!
//! # Invariants
//!
//! 1. **Leaf classification is by content**: a mapping is a locale leaf iff at
//!    least one of its immediate values is [`Entry::Text`]. Nodes mixing text
//!    and nested mappings are classified by the same rule; callers should
//!    avoid them.
//! 2. **Order is declaration order**: iteration, leaf traversal and the
//!    derived [`AvailableLocales`] all follow key insertion order
//!    (depth-first), which makes locale tie-breaks reproducible.
//! 3. **Subtrees are shared**: nested mappings live behind `Arc`, so cloning
//!    a dictionary or merging into it never deep-copies untouched branches.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::I18nError;
use crate::locale::AvailableLocales;

/// Locale identifier (e.g., `"en"`, `"en-US"`, `"zh-Hant-TW"`).
pub type Locale = String;

/// A single dictionary value.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// Translated text.
    Text(String),
    /// Nested mapping: a sub-dictionary or a locale leaf.
    Map(Arc<Dictionary>),
    /// Any other JSON value (array, number, bool, null). Never translated.
    Other(Value),
}

impl Entry {
    /// The text, if this entry is [`Entry::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The nested mapping, if this entry is [`Entry::Map`].
    #[must_use]
    pub fn as_map(&self) -> Option<&Dictionary> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for Entry {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Entry {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Dictionary> for Entry {
    fn from(map: Dictionary) -> Self {
        Self::Map(Arc::new(map))
    }
}

/// Insertion-ordered translation tree.
///
/// # Example
///
/// ```
/// use lingo_i18n::Dictionary;
///
/// let dict = Dictionary::new()
///     .with_leaf("hello", [("en", "Hello"), ("es", "Hola")])
///     .with_map(
///         "user",
///         Dictionary::new().with_leaf("title", [("en", "Profile")]),
///     );
///
/// assert!(dict.get_map("hello").unwrap().is_locale_leaf());
/// assert!(!dict.get_map("user").unwrap().is_locale_leaf());
/// let available = dict.available_locales();
/// let locales: Vec<&str> = available.iter().collect();
/// assert_eq!(locales, ["en", "es"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Dictionary {
    entries: IndexMap<String, Entry>,
}

impl Dictionary {
    /// Create an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, returning the previous one.
    ///
    /// Replacing keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<Entry>) -> Option<Entry> {
        self.entries.insert(key.into(), entry.into())
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, entry: impl Into<Entry>) -> Self {
        self.insert(key, entry);
        self
    }

    /// Add a nested mapping.
    #[must_use]
    pub fn with_map(self, key: impl Into<String>, map: Dictionary) -> Self {
        self.with(key, map)
    }

    /// Add a locale leaf from `(locale, text)` pairs.
    #[must_use]
    pub fn with_leaf<L, T>(
        self,
        key: impl Into<String>,
        translations: impl IntoIterator<Item = (L, T)>,
    ) -> Self
    where
        L: Into<String>,
        T: Into<String>,
    {
        let leaf: Dictionary = translations
            .into_iter()
            .map(|(locale, text)| (locale.into(), Entry::Text(text.into())))
            .collect();
        self.with(key, leaf)
    }

    /// Look up an immediate entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Look up an immediate entry together with its stored key.
    #[must_use]
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &Entry)> {
        self.entries
            .get_key_value(key)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Look up an immediate nested mapping.
    #[must_use]
    pub fn get_map(&self, key: &str) -> Option<&Dictionary> {
        self.get(key).and_then(Entry::as_map)
    }

    /// Whether `key` is an immediate entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of immediate entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over immediate keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over immediate `(key, entry)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether this mapping is a locale leaf (has at least one text value).
    #[must_use]
    pub fn is_locale_leaf(&self) -> bool {
        self.entries.values().any(|entry| matches!(entry, Entry::Text(_)))
    }

    /// All locale leaves, depth-first in declaration order.
    ///
    /// Text values outside a leaf (directly under an interior mapping) are
    /// not leaves and are skipped.
    #[must_use]
    pub fn leaves(&self) -> Vec<(String, &Dictionary)> {
        let mut out = Vec::new();
        collect_leaves(self, "", &mut out);
        out
    }

    /// Every locale code used as a key in any leaf, first-seen order.
    #[must_use]
    pub fn available_locales(&self) -> AvailableLocales {
        let mut locales = AvailableLocales::new();
        for (_, leaf) in self.leaves() {
            for locale in leaf.keys() {
                locales.insert(locale);
            }
        }
        locales
    }

    /// Parse a dictionary from JSON text.
    ///
    /// The root must be an object. String values become [`Entry::Text`],
    /// objects become [`Entry::Map`], everything else [`Entry::Other`].
    pub fn from_json_str(json: &str) -> Result<Self, I18nError> {
        let value: Value = serde_json::from_str(json)?;
        Self::try_from(value)
    }

    /// Transpose a locale-keyed dictionary into the canonical shape.
    ///
    /// The input maps each locale to a tree of texts:
    ///
    /// ```text
    /// { en: { test: "Test" }, es-MX: { test: "Prueba" } }
    /// ```
    ///
    /// and the result maps each key path to a locale leaf:
    ///
    /// ```text
    /// { test: { en: "Test", es-MX: "Prueba" } }
    /// ```
    ///
    /// Key order follows first appearance across locales. Fails if a locale's
    /// value is not an object, if a tree contains non-text scalars, or if one
    /// locale uses a path as text where another nests keys under it.
    pub fn from_locale_keyed(source: &Dictionary) -> Result<Self, I18nError> {
        let mut out = Dictionary::new();
        for (locale, entry) in source.iter() {
            let Some(tree) = entry.as_map() else {
                return Err(I18nError::NotAnObject {
                    path: locale.to_owned(),
                });
            };
            let mut segments = Vec::new();
            transpose_into(&mut out, tree, locale, &mut segments)?;
        }
        Ok(out)
    }

    pub(crate) fn entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries.get_mut(key)
    }
}

impl<K: Into<String>> FromIterator<(K, Entry)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, Entry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

fn collect_leaves<'a>(dict: &'a Dictionary, prefix: &str, out: &mut Vec<(String, &'a Dictionary)>) {
    for (key, entry) in &dict.entries {
        let Entry::Map(child) = entry else {
            continue;
        };
        let child: &Dictionary = child;
        let path = join_path(prefix, key);
        if child.is_locale_leaf() {
            out.push((path, child));
        } else {
            collect_leaves(child, &path, out);
        }
    }
}

pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

fn transpose_into<'a>(
    out: &mut Dictionary,
    tree: &'a Dictionary,
    locale: &str,
    segments: &mut Vec<&'a str>,
) -> Result<(), I18nError> {
    for (key, entry) in tree.iter() {
        segments.push(key);
        match entry {
            Entry::Text(text) => place_text(out, segments, locale, text)?,
            Entry::Map(child) => transpose_into(out, child, locale, segments)?,
            Entry::Other(_) => {
                return Err(I18nError::LocaleKeyed(format!(
                    "unsupported value at '{}' for locale '{locale}'",
                    segments.join(".")
                )));
            }
        }
        segments.pop();
    }
    Ok(())
}

fn place_text(
    out: &mut Dictionary,
    segments: &[&str],
    locale: &str,
    text: &str,
) -> Result<(), I18nError> {
    let conflict = || {
        I18nError::LocaleKeyed(format!(
            "key '{}' is text in one locale and nested in another",
            segments.join(".")
        ))
    };

    let mut node = out;
    for segment in segments {
        if node.is_locale_leaf() {
            return Err(conflict());
        }
        if !node.contains_key(segment) {
            node.insert(*segment, Dictionary::new());
        }
        node = match node.entry_mut(segment) {
            Some(Entry::Map(child)) => Arc::make_mut(child),
            _ => return Err(conflict()),
        };
    }
    if node.iter().any(|(_, entry)| matches!(entry, Entry::Map(_))) {
        return Err(conflict());
    }
    node.insert(locale, text);
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON conversion
// ---------------------------------------------------------------------------

impl TryFrom<Value> for Dictionary {
    type Error = I18nError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(from_json_object(map)),
            _ => Err(I18nError::NotAnObject {
                path: String::new(),
            }),
        }
    }
}

fn from_json_object(map: serde_json::Map<String, Value>) -> Dictionary {
    map.into_iter()
        .map(|(key, value)| {
            let entry = match value {
                Value::String(text) => Entry::Text(text),
                Value::Object(child) => Entry::Map(Arc::new(from_json_object(child))),
                other => Entry::Other(other),
            };
            (key, entry)
        })
        .collect()
}

impl From<Dictionary> for Value {
    fn from(dict: Dictionary) -> Self {
        Value::Object(to_json_object(&dict))
    }
}

fn to_json_object(dict: &Dictionary) -> serde_json::Map<String, Value> {
    dict.iter()
        .map(|(key, entry)| {
            let value = match entry {
                Entry::Text(text) => Value::String(text.clone()),
                Entry::Map(child) => Value::Object(to_json_object(child)),
                Entry::Other(other) => other.clone(),
            };
            (key.to_owned(), value)
        })
        .collect()
}
