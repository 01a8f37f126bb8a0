//! Non-fatal diagnostics emitted by the engine.
//!
//! Nothing in the translation path raises: a missing key or locale turns into
//! a sentinel string plus one [`Diagnostic`]. Each diagnostic is delivered to
//! `on_diagnostic` observers and logged through `tracing` at the level
//! returned by [`Diagnostic::level`].
//!
//! | Variant | Level |
//! |---------|-------|
//! | [`LocaleFallback`](Diagnostic::LocaleFallback) | `WARN` |
//! | [`NoLocales`](Diagnostic::NoLocales) | `ERROR` |
//! | [`MissingLocales`](Diagnostic::MissingLocales) | `WARN` |
//! | [`MissingKey`](Diagnostic::MissingKey) | `WARN` |
//! | [`KeyFallback`](Diagnostic::KeyFallback) | `DEBUG` |
//! | [`MissingTranslation`](Diagnostic::MissingTranslation) | `WARN` |

use tracing::Level;

use crate::dictionary::Locale;
use crate::locale::{MatchKind, base_language};

/// A non-fatal event worth telling the host about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The active locale was resolved to something other than the request.
    LocaleFallback {
        requested: Locale,
        resolved: Locale,
        kind: MatchKind,
    },
    /// The dictionary provides no locale at all.
    NoLocales { requested: Locale },
    /// A leaf lacks some of the dictionary's available locales.
    MissingLocales { path: String, locales: Vec<Locale> },
    /// An accessor chain addressed a key that does not exist.
    MissingKey { path: String },
    /// A leaf lacks the current locale; another of its locales was used.
    KeyFallback {
        path: String,
        requested: Locale,
        resolved: Locale,
        kind: MatchKind,
    },
    /// A leaf has no usable text for the current locale.
    MissingTranslation { path: String, locale: Locale },
}

impl Diagnostic {
    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::LocaleFallback {
                requested,
                resolved,
                kind,
            } => {
                let base = base_language(requested);
                match kind {
                    MatchKind::BaseLanguage => format!(
                        "Locale \"{requested}\" not found, falling back to base language \"{resolved}\""
                    ),
                    MatchKind::Variant => format!(
                        "Base language \"{base}\" not found, falling back to variant \"{resolved}\""
                    ),
                    MatchKind::AnyAvailable => {
                        format!("No \"{base}\" or variants found, falling back to \"{resolved}\"")
                    }
                    MatchKind::Exact | MatchKind::Unresolved => {
                        format!("Locale \"{requested}\" resolved to \"{resolved}\" ({kind})")
                    }
                }
            }
            Self::NoLocales { .. } => "No localizations found in dictionary".to_owned(),
            Self::MissingLocales { path, locales } => format!(
                "Translation key \"{path}\" is missing translations for locales: {}",
                locales.join(", ")
            ),
            Self::MissingKey { path } => format!("Translation key \"{path}\" not found"),
            Self::KeyFallback {
                path,
                requested,
                resolved,
                ..
            } => format!(
                "Translation key \"{path}\" has no \"{requested}\" entry, using \"{resolved}\""
            ),
            Self::MissingTranslation { path, locale } => {
                format!("Translation key \"{path}\" has no translation for locale \"{locale}\"")
            }
        }
    }

    /// Severity used when logging.
    #[must_use]
    pub const fn level(&self) -> Level {
        match self {
            Self::NoLocales { .. } => Level::ERROR,
            Self::KeyFallback { .. } => Level::DEBUG,
            Self::LocaleFallback { .. }
            | Self::MissingLocales { .. }
            | Self::MissingKey { .. }
            | Self::MissingTranslation { .. } => Level::WARN,
        }
    }

    /// Whether this is a warning or worse.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.level() <= Level::WARN
    }

    /// Key path this diagnostic is about, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::MissingLocales { path, .. }
            | Self::MissingKey { path }
            | Self::KeyFallback { path, .. }
            | Self::MissingTranslation { path, .. } => Some(path),
            Self::LocaleFallback { .. } | Self::NoLocales { .. } => None,
        }
    }

    /// Emit this diagnostic as a `tracing` event.
    pub fn log(&self) {
        let message = self.message();
        match self {
            Self::LocaleFallback {
                requested,
                resolved,
                kind,
            } => tracing::warn!(
                target: "lingo_i18n",
                requested = %requested,
                resolved = %resolved,
                kind = kind.as_str(),
                "{message}"
            ),
            Self::NoLocales { requested } => {
                tracing::error!(target: "lingo_i18n", requested = %requested, "{message}");
            }
            Self::MissingLocales { path, locales } => tracing::warn!(
                target: "lingo_i18n",
                path = %path,
                missing = locales.len(),
                "{message}"
            ),
            Self::MissingKey { path } => {
                tracing::warn!(target: "lingo_i18n", path = %path, "{message}");
            }
            Self::KeyFallback {
                path,
                requested,
                resolved,
                kind,
            } => tracing::debug!(
                target: "lingo_i18n",
                path = %path,
                requested = %requested,
                resolved = %resolved,
                kind = kind.as_str(),
                "{message}"
            ),
            Self::MissingTranslation { path, locale } => tracing::warn!(
                target: "lingo_i18n",
                path = %path,
                locale = %locale,
                "{message}"
            ),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
