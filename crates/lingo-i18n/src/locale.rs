//! Locale resolution with a fixed fallback precedence.
//!
//! Given a requested locale and the locales a dictionary (or a single leaf)
//! actually provides, [`resolve`] picks the best match. First rule wins:
//!
//! | Step | Kind | Rule |
//! |------|------|------|
//! | 1 | [`MatchKind::Exact`] | requested code is available verbatim |
//! | 2 | [`MatchKind::BaseLanguage`] | `en` for `en-GB` |
//! | 3 | [`MatchKind::Variant`] | first available `en-*` for `en` / `en-GB` |
//! | 4 | [`MatchKind::AnyAvailable`] | first available locale of any language |
//! | 5 | [`MatchKind::Unresolved`] | nothing available; requested kept verbatim |
//!
//! "First" always means iteration order of the available collection. The
//! engine feeds it [`AvailableLocales`] (first-seen, depth-first) or a leaf's
//! own keys (declaration order), so tie-breaks are reproducible.
//!
//! [`FallbackDepth`] truncates the chain for callers that would rather see a
//! miss than a translation in an unrelated language.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::dictionary::Locale;

/// Leading segment of a locale code (before the first `-`).
///
/// ```
/// use lingo_i18n::locale::base_language;
///
/// assert_eq!(base_language("zh-Hant-TW"), "zh");
/// assert_eq!(base_language("en"), "en");
/// ```
#[must_use]
pub fn base_language(code: &str) -> &str {
    code.split_once('-').map_or(code, |(base, _)| base)
}

/// How a requested locale was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// The requested locale itself.
    Exact,
    /// The requested locale's base language.
    BaseLanguage,
    /// Another region/script variant of the same base language.
    Variant,
    /// An unrelated locale, chosen because nothing closer exists.
    AnyAvailable,
    /// No candidate; the requested locale is kept as-is.
    Unresolved,
}

impl MatchKind {
    /// Stable lowercase name, used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::BaseLanguage => "base-language",
            Self::Variant => "variant",
            Self::AnyAvailable => "any-available",
            Self::Unresolved => "unresolved",
        }
    }

    /// Whether a different, available locale was substituted.
    #[must_use]
    pub const fn is_fallback(self) -> bool {
        matches!(self, Self::BaseLanguage | Self::Variant | Self::AnyAvailable)
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far down the fallback chain resolution may go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackDepth {
    /// Step 1 only.
    Exact,
    /// Steps 1–3: stay within the requested language.
    SameLanguage,
    /// Steps 1–4.
    #[default]
    Full,
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The locale that was asked for.
    pub requested: Locale,
    /// The locale to use. Equal to `requested` when unresolved.
    pub resolved: Locale,
    /// Which rule produced `resolved`.
    pub kind: MatchKind,
}

impl Resolution {
    /// Whether an available locale was found.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.kind != MatchKind::Unresolved
    }
}

/// Resolve `requested` against `available` using the full fallback chain.
///
/// ```
/// use lingo_i18n::locale::{resolve, MatchKind};
///
/// let r = resolve("fr", ["en", "fr-CM"]);
/// assert_eq!(r.resolved, "fr-CM");
/// assert_eq!(r.kind, MatchKind::Variant);
/// ```
#[must_use]
pub fn resolve<'a>(requested: &str, available: impl IntoIterator<Item = &'a str>) -> Resolution {
    resolve_with(requested, available, FallbackDepth::Full)
}

/// Resolve `requested` against `available`, stopping at `depth`.
#[must_use]
pub fn resolve_with<'a>(
    requested: &str,
    available: impl IntoIterator<Item = &'a str>,
    depth: FallbackDepth,
) -> Resolution {
    let available: Vec<&str> = available.into_iter().collect();
    let matched = |resolved: &str, kind: MatchKind| Resolution {
        requested: requested.to_owned(),
        resolved: resolved.to_owned(),
        kind,
    };

    let has = |code: &str| available.iter().any(|candidate| *candidate == code);

    if has(requested) {
        return matched(requested, MatchKind::Exact);
    }

    if depth >= FallbackDepth::SameLanguage {
        let base = base_language(requested);
        if has(base) {
            return matched(base, MatchKind::BaseLanguage);
        }
        let prefix = format!("{base}-");
        if let Some(variant) = available.iter().find(|code| code.starts_with(&prefix)) {
            return matched(*variant, MatchKind::Variant);
        }
    }

    if depth == FallbackDepth::Full {
        if let Some(first) = available.first() {
            return matched(*first, MatchKind::AnyAvailable);
        }
    }

    matched(requested, MatchKind::Unresolved)
}

/// Insertion-ordered set of locale codes.
///
/// Order is first insertion; re-inserting an existing code keeps its
/// position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableLocales {
    codes: IndexSet<Locale>,
}

impl AvailableLocales {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a locale. Returns `false` if it was already present.
    pub fn insert(&mut self, locale: &str) -> bool {
        if self.codes.contains(locale) {
            return false;
        }
        self.codes.insert(locale.to_owned())
    }

    /// Whether `locale` is present.
    #[must_use]
    pub fn contains(&self, locale: &str) -> bool {
        self.codes.contains(locale)
    }

    /// Number of locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether no locale is available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Resolve `requested` against this set.
    #[must_use]
    pub fn resolve(&self, requested: &str) -> Resolution {
        resolve(requested, self.iter())
    }
}

impl<'a> FromIterator<&'a str> for AvailableLocales {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for locale in iter {
            set.insert(locale);
        }
        set
    }
}
