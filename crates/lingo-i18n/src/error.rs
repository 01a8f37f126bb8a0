//! Errors for the fallible parsing entry points.
//!
//! Translation itself never fails: missing keys and locales degrade to
//! sentinel strings plus a [`Diagnostic`](crate::diagnostics::Diagnostic).
//! Only turning foreign input (JSON, TOML, locale-keyed trees) into typed
//! values can be rejected.

/// Errors from i18n parsing operations.
#[derive(Debug)]
pub enum I18nError {
    /// JSON text could not be parsed.
    Parse(serde_json::Error),
    /// The value at `path` had to be a JSON object but was not.
    NotAnObject {
        /// Dotted path of the offending value (empty for the root).
        path: String,
    },
    /// A locale-keyed dictionary could not be transposed.
    LocaleKeyed(String),
    /// Options could not be loaded.
    Config(String),
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "parse error: {err}"),
            Self::NotAnObject { path } if path.is_empty() => {
                write!(f, "dictionary root must be an object")
            }
            Self::NotAnObject { path } => write!(f, "expected an object at '{path}'"),
            Self::LocaleKeyed(msg) => write!(f, "locale-keyed dictionary: {msg}"),
            Self::Config(msg) => write!(f, "invalid options: {msg}"),
        }
    }
}

impl std::error::Error for I18nError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for I18nError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
