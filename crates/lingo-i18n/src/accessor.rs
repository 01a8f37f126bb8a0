//! Chained, lazily-resolved key access.
//!
//! ```
//! use lingo_i18n::{Dictionary, Localization, Variables};
//!
//! let dict = Dictionary::new().with_map(
//!     "user",
//!     Dictionary::new().with_leaf("welcome", [("en", "Welcome, {{name}}")]),
//! );
//! let l10n = Localization::new(dict);
//!
//! let welcome = l10n.t().at("user").at("welcome");
//! assert_eq!(welcome.call_with(&Variables::from([("name", "Ana")])), "Welcome, Ana");
//! assert_eq!(l10n.t().at("user").at("bogus").call(), "[invalid key: user.bogus]");
//! ```
//!
//! Building a chain never looks anything up; the path is resolved only when a
//! terminal method ([`Accessor::call`], [`Accessor::call_with`],
//! [`Accessor::exists`]) runs.

use crate::diagnostics::Diagnostic;
use crate::engine::{Localization, Lookup, missing_translation, render_text};
use crate::path::KeyPath;
use crate::template::Variables;

/// An accumulated key path bound to an engine.
#[derive(Debug, Clone)]
pub struct Accessor<'a> {
    engine: &'a Localization,
    path: KeyPath,
}

impl<'a> Accessor<'a> {
    pub(crate) fn new(engine: &'a Localization) -> Self {
        Self {
            engine,
            path: KeyPath::default(),
        }
    }

    /// A new accessor with `segment` appended. `self` is left untouched.
    ///
    /// The segment is taken verbatim, even if it contains a `.`.
    #[must_use]
    pub fn at(&self, segment: impl Into<String>) -> Self {
        Self {
            engine: self.engine,
            path: self.path.child(segment),
        }
    }

    /// The accumulated path.
    #[must_use]
    pub fn key_path(&self) -> &KeyPath {
        &self.path
    }

    /// The accumulated path, dotted.
    #[must_use]
    pub fn path(&self) -> String {
        self.path.to_string()
    }

    /// Whether the path addresses a locale leaf or a text entry.
    ///
    /// Emits no diagnostic.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.engine.is_translatable(&self.path)
    }

    /// Translate the accumulated path.
    pub fn call(&self) -> String {
        self.render(None)
    }

    /// Translate the accumulated path with `{{name}}` substitution.
    pub fn call_with(&self, vars: &Variables) -> String {
        self.render(Some(vars))
    }

    fn render(&self, vars: Option<&Variables>) -> String {
        match self.engine.lookup(&self.path) {
            Lookup::Text(text) => render_text(text, vars),
            Lookup::Untranslated => missing_translation(&self.path),
            Lookup::Absent => {
                let path = self.path.to_string();
                self.engine.emit(Diagnostic::MissingKey { path: path.clone() });
                format!("[invalid key: {path}]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Diagnostic, Dictionary, Localization, Variables};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine() -> Localization {
        Localization::new(
            Dictionary::try_from(json!({
                "user": {
                    "profile": { "title": { "en": "Profile", "es": "Perfil" } },
                    "greet": { "en": "Hi {{name}}" }
                },
                "a.b": { "en": "dotted key" },
                "hello": { "en": "Hello" }
            }))
            .unwrap(),
        )
    }

    #[test]
    fn chain_resolves_leaf() {
        let l10n = engine();
        assert_eq!(l10n.t().at("user").at("profile").at("title").call(), "Profile");
        let vars = Variables::from([("name", "Ana")]);
        assert_eq!(l10n.t().at("user").at("greet").call_with(&vars), "Hi Ana");
    }

    #[test]
    fn at_does_not_mutate_parent() {
        let l10n = engine();
        let user = l10n.t().at("user");
        let profile = user.at("profile");
        assert_eq!(user.path(), "user");
        assert_eq!(profile.path(), "user.profile");
        assert_eq!(profile.key_path().len(), 2);
    }

    #[test]
    fn dotted_segment_is_one_key() {
        let l10n = engine();
        assert_eq!(l10n.t().at("a.b").call(), "dotted key");
        // The plain surface splits on dots and misses it.
        assert_eq!(l10n.translate("a.b"), "missing a.b");
    }

    #[test]
    fn invalid_key_emits_missing_key() {
        let l10n = engine();
        let log: Rc<RefCell<Vec<Diagnostic>>> = Rc::default();
        let sink = Rc::clone(&log);
        let _sub = l10n.on_diagnostic(move |d| sink.borrow_mut().push(d.clone()));

        assert_eq!(l10n.t().at("user").call(), "[invalid key: user]");
        assert_eq!(l10n.t().at("nope").at("deeper").call(), "[invalid key: nope.deeper]");
        assert_eq!(
            *log.borrow(),
            vec![
                Diagnostic::MissingKey { path: "user".into() },
                Diagnostic::MissingKey {
                    path: "nope.deeper".into()
                },
            ]
        );
    }

    #[test]
    fn exists_is_silent() {
        let l10n = engine();
        let log: Rc<RefCell<Vec<Diagnostic>>> = Rc::default();
        let sink = Rc::clone(&log);
        let _sub = l10n.on_diagnostic(move |d| sink.borrow_mut().push(d.clone()));

        assert!(l10n.t().at("hello").exists());
        assert!(l10n.t().at("hello").at("en").exists());
        assert!(!l10n.t().at("user").exists());
        assert!(!l10n.t().at("missing").exists());
        assert!(!l10n.t().exists());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn empty_chain_is_invalid() {
        let l10n = engine();
        assert_eq!(l10n.t().call(), "[invalid key: ]");
    }
}
