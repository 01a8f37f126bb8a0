//! Engine configuration.
//!
//! [`LocalizationOptions`] can be built in code, or loaded from JSON (always)
//! and TOML (with the `toml-config` feature):
//!
//! ```toml
//! default_locale = "es"
//! leaf_fallback = "same-language"
//! audit = false
//! ```
//!
//! Missing fields take their defaults. [`LocalizationOptions::validate`]
//! reports problems without rejecting the value; the engine accepts any
//! options and only the caller decides whether a warning is fatal.

use serde::{Deserialize, Serialize};

use crate::dictionary::Locale;
use crate::error::I18nError;
use crate::locale::FallbackDepth;

/// Per-key fallback policy used when a leaf lacks the current locale.
pub type LeafFallback = FallbackDepth;

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Configuration for a [`Localization`](crate::Localization).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationOptions {
    /// Locale requested at construction and by `reset_locale`.
    /// Default: `None` (treated as `"en"`).
    pub default_locale: Option<Locale>,
    /// How far a single lookup may fall back inside one leaf. Default: `Full`.
    pub leaf_fallback: LeafFallback,
    /// Report leaves missing some available locale. Default: `true`.
    pub audit: bool,
}

impl Default for LocalizationOptions {
    fn default() -> Self {
        Self {
            default_locale: None,
            leaf_fallback: LeafFallback::Full,
            audit: true,
        }
    }
}

impl LocalizationOptions {
    /// Set the default locale.
    #[must_use]
    pub fn with_default_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Set the per-key fallback policy.
    #[must_use]
    pub fn with_leaf_fallback(mut self, depth: LeafFallback) -> Self {
        self.leaf_fallback = depth;
        self
    }

    /// Enable or disable the coverage audit.
    #[must_use]
    pub fn with_audit(mut self, audit: bool) -> Self {
        self.audit = audit;
        self
    }

    /// The default locale, or `"en"` when unset.
    #[must_use]
    pub fn effective_default_locale(&self) -> &str {
        self.default_locale.as_deref().unwrap_or(DEFAULT_LOCALE)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, I18nError> {
        serde_json::from_str(s).map_err(|err| I18nError::Config(err.to_string()))
    }

    /// Load from a TOML string.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, I18nError> {
        toml::from_str(s).map_err(|err| I18nError::Config(err.to_string()))
    }

    /// Check for values that cannot work.
    ///
    /// Returns a list of problems; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Some(locale) = &self.default_locale {
            if locale.trim().is_empty() {
                errors.push("default_locale must not be empty".into());
            } else if locale.chars().any(char::is_whitespace) {
                errors.push(format!(
                    "default_locale must not contain whitespace, got {locale:?}"
                ));
            }
        }

        errors
    }
}
