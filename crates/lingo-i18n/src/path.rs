//! Dotted key paths and dictionary navigation.
//!
//! [`navigate`] walks a [`Dictionary`] one segment at a time. On success it
//! returns the *container* of the final key (so callers can read the leaf
//! entry or inspect its siblings); on failure it reports the full requested
//! path, never just the failing suffix, because that is what a "missing"
//! message needs to show.

use crate::dictionary::{Dictionary, Entry};

/// A key path: `"user.profile.title"` or `["user", "profile", "title"]`.
///
/// Dotted strings are split on `.`; pre-split sequences are taken as-is, so
/// a segment may itself contain a dot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Parse a dotted path. The empty string is the empty path.
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::default();
        }
        Self {
            segments: dotted.split('.').map(str::to_owned).collect(),
        }
    }

    /// Build a path from pre-split segments.
    #[must_use]
    pub fn from_segments<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// A new path with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    /// Iterate over segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl std::fmt::Display for KeyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for KeyPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl From<&String> for KeyPath {
    fn from(dotted: &String) -> Self {
        Self::parse(dotted)
    }
}

impl From<String> for KeyPath {
    fn from(dotted: String) -> Self {
        Self::parse(&dotted)
    }
}

impl From<&[&str]> for KeyPath {
    fn from(segments: &[&str]) -> Self {
        Self::from_segments(segments.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(segments: [&str; N]) -> Self {
        Self::from_segments(segments)
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl From<&KeyPath> for KeyPath {
    fn from(path: &KeyPath) -> Self {
        path.clone()
    }
}

/// Result of [`navigate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation<'a> {
    /// Every segment resolved.
    Found {
        /// Mapping that holds the final key.
        container: &'a Dictionary,
        /// The final key, borrowed from `container`.
        key: &'a str,
        /// The requested path, dotted.
        path: String,
    },
    /// Some segment was missing or not a mapping.
    NotFound {
        /// The full requested path, dotted.
        failed_at_path: String,
    },
}

impl<'a> Navigation<'a> {
    /// The entry at the final key, if found.
    #[must_use]
    pub fn value(&self) -> Option<&'a Entry> {
        match self {
            Self::Found { container, key, .. } => {
                let container: &'a Dictionary = *container;
                container.get(key)
            }
            Self::NotFound { .. } => None,
        }
    }

    /// Whether navigation succeeded.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// The dotted path, found or not.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Found { path, .. } => path,
            Self::NotFound { failed_at_path } => failed_at_path,
        }
    }
}

/// Walk `root` along `path`.
///
/// ```
/// use lingo_i18n::path::{navigate, KeyPath};
/// use lingo_i18n::Dictionary;
///
/// let dict = Dictionary::new().with_map(
///     "user",
///     Dictionary::new().with_leaf("name", [("en", "Name")]),
/// );
/// let nav = navigate(&dict, &KeyPath::parse("user.name"));
/// assert!(nav.value().and_then(|e| e.as_map()).is_some());
///
/// let nav = navigate(&dict, &KeyPath::parse("user.email.label"));
/// assert_eq!(nav.path(), "user.email.label");
/// assert!(!nav.is_found());
/// ```
#[must_use]
pub fn navigate<'a>(root: &'a Dictionary, path: &KeyPath) -> Navigation<'a> {
    let not_found = || Navigation::NotFound {
        failed_at_path: path.to_string(),
    };

    let Some((last, parents)) = path.segments.split_last() else {
        return not_found();
    };

    let mut container = root;
    for segment in parents {
        match container.get(segment) {
            Some(Entry::Map(child)) => container = &**child,
            _ => return not_found(),
        }
    }

    match container.get_key_value(last) {
        Some((key, _)) => Navigation::Found {
            container,
            key,
            path: path.to_string(),
        },
        None => not_found(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Dictionary {
        Dictionary::try_from(json!({
            "user": {
                "profile": {
                    "title": { "en": "User Profile" },
                    "details": { "name": { "en": "Name" } }
                }
            },
            "hello": { "en": "Hello" },
            "list": [1, 2, 3]
        }))
        .unwrap()
    }

    #[test]
    fn parse_and_display() {
        let path = KeyPath::parse("a.b.c");
        assert_eq!(path.len(), 3);
        assert_eq!(path.to_string(), "a.b.c");
        assert!(KeyPath::parse("").is_empty());
        assert_eq!(KeyPath::from(["a.b", "c"]).len(), 2);
        assert_eq!(KeyPath::parse("a").child("b").to_string(), "a.b");
    }

    #[test]
    fn finds_nested_leaf() {
        let dict = sample();
        let nav = navigate(&dict, &KeyPath::parse("user.profile.details.name"));
        match nav {
            Navigation::Found { container, key, ref path } => {
                assert_eq!(key, "name");
                assert_eq!(path, "user.profile.details.name");
                assert!(container.contains_key("name"));
            }
            Navigation::NotFound { .. } => panic!("expected found"),
        }
    }

    #[test]
    fn finds_locale_entry_directly() {
        let dict = sample();
        let nav = navigate(&dict, &KeyPath::parse("hello.en"));
        assert_eq!(nav.value().and_then(Entry::as_text), Some("Hello"));
    }

    #[test]
    fn pre_split_segments() {
        let dict = sample();
        let nav = navigate(&dict, &KeyPath::from(&["user", "profile", "title"][..]));
        assert!(nav.is_found());
    }

    #[test]
    fn missing_reports_full_path() {
        let dict = sample();
        for path in ["user.settings.theme", "nope", "user.profile.title.en.x"] {
            let nav = navigate(&dict, &KeyPath::parse(path));
            assert_eq!(
                nav,
                Navigation::NotFound {
                    failed_at_path: path.to_owned()
                }
            );
        }
    }

    #[test]
    fn non_mapping_intermediate_fails() {
        let dict = sample();
        let nav = navigate(&dict, &KeyPath::parse("list.0"));
        assert!(!nav.is_found());
    }

    #[test]
    fn empty_path_not_found() {
        let dict = sample();
        assert!(!navigate(&dict, &KeyPath::default()).is_found());
        assert!(!navigate(&Dictionary::new(), &KeyPath::parse("anything")).is_found());
    }
}
