#![forbid(unsafe_code)]

//! Runtime localization: locale resolution, nested dictionaries, and
//! `{{name}}` templates.
//!
//! # Role
//! `lingo-i18n` turns a nested dictionary of per-locale strings into
//! translated text for whichever locale the host asks for, degrading
//! gracefully when a locale or key is missing instead of failing.
//!
//! # How the pieces fit
//! The pure building blocks ([`locale::resolve`], [`merge()`],
//! [`path::navigate`], [`template::substitute`]) are independent and
//! `Send + Sync`. [`Localization`] composes them into a single-owner engine
//! with locale-change and diagnostic observers; [`Localization::t`] offers a
//! chained accessor over the same lookup. A UI layer binds to the engine
//! through its observers and, optionally, a [`LocaleSlot`].
//!
//! ```
//! use lingo_i18n::{Dictionary, Localization};
//!
//! let dict = Dictionary::from_json_str(r#"{
//!     "hello": { "en": "Hello", "en-GB": "Hello, mate", "es": "Hola" }
//! }"#).unwrap();
//!
//! let mut l10n = Localization::new(dict);
//! l10n.set_locale("es-AR");
//! assert_eq!(l10n.locale(), "es");
//! assert_eq!(l10n.translate("hello"), "Hola");
//! ```

pub mod accessor;
pub mod coverage;
pub mod diagnostics;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod locale;
pub mod merge;
pub mod observer;
pub mod options;
pub mod path;
pub mod slot;
pub mod template;

pub use accessor::Accessor;
pub use coverage::{CoverageReport, LocaleCoverage, audit, coverage_report};
pub use diagnostics::Diagnostic;
pub use dictionary::{Dictionary, Entry, Locale};
pub use engine::{LocaleChange, LocaleView, Localization, LocalizationBuilder};
pub use error::I18nError;
pub use locale::{AvailableLocales, FallbackDepth, MatchKind, Resolution, resolve, resolve_with};
pub use merge::{merge, merge_all};
pub use observer::Subscription;
pub use options::{LeafFallback, LocalizationOptions};
pub use path::{KeyPath, Navigation, navigate};
pub use slot::LocaleSlot;
pub use template::{Scalar, Variables, substitute};
