//! The stateful localization engine.
//!
//! [`Localization`] owns the merged dictionary and the current locale, and
//! exposes translation by dotted key path. All failures are soft: lookups
//! always return a string, and problems are reported as [`Diagnostic`]s.
//!
//! # Sentinels
//!
//! | Situation | `translate` returns | Diagnostic |
//! |-----------|---------------------|------------|
//! | path does not exist | `missing <path>` | none |
//! | path is a namespace or a non-text value | `missing <path>` | none |
//! | leaf has no usable locale | `[missing translation: <path>]` | `MissingTranslation` |
//! | leaf lacks current locale, fallback used | fallback text | `KeyFallback` |
//!
//! The accessor surface ([`Localization::t`]) differs only for paths that do
//! not address a translatable node: it returns `[invalid key: <path>]` and
//! emits `MissingKey`.
//!
//! # Threading
//!
//! The engine is single-owner and `!Send`: observer registries and the
//! optional [`LocaleSlot`] are `Rc`-based.

use std::cell::OnceCell;

use indexmap::IndexMap;
use tracing::{debug, field, info_span};

use crate::accessor::Accessor;
use crate::coverage::{self, CoverageReport};
use crate::diagnostics::Diagnostic;
use crate::dictionary::{Dictionary, Entry, Locale};
use crate::locale::{AvailableLocales, MatchKind, Resolution, resolve_with};
use crate::merge::{merge, merge_all};
use crate::observer::{Observers, Subscription};
use crate::options::{LeafFallback, LocalizationOptions};
use crate::path::{KeyPath, navigate};
use crate::slot::LocaleSlot;
use crate::template::{Variables, substitute};

/// Outcome of a single key lookup, before sentinel formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lookup<'a> {
    /// Usable text.
    Text(&'a str),
    /// The path is absent or does not address a translatable node.
    Absent,
    /// A leaf exists but holds no usable text; already reported.
    Untranslated,
}

/// Pick the text a leaf should render for `locale` under `depth`.
///
/// Only text entries are candidates, so a fallback never lands on a value
/// that cannot be rendered.
fn pick_text<'a>(
    leaf: &'a Dictionary,
    locale: &str,
    depth: LeafFallback,
) -> Option<(Resolution, &'a str)> {
    let candidates = leaf
        .iter()
        .filter(|(_, entry)| matches!(entry, Entry::Text(_)))
        .map(|(code, _)| code);
    let resolution = resolve_with(locale, candidates, depth);
    if !resolution.is_resolved() {
        return None;
    }
    let text = leaf.get(&resolution.resolved).and_then(Entry::as_text)?;
    Some((resolution, text))
}

/// Flattened, read-only rendering of a dictionary for one locale.
///
/// Keys are dotted leaf paths in declaration order; values are the text
/// `translate` would return for that path, without substitution. Leaves with
/// no usable text are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleView {
    entries: IndexMap<String, String>,
}

impl LocaleView {
    /// Render `dictionary` for `locale`.
    #[must_use]
    pub fn build(dictionary: &Dictionary, locale: &str, depth: LeafFallback) -> Self {
        let entries = dictionary
            .leaves()
            .into_iter()
            .filter_map(|(path, leaf)| {
                pick_text(leaf, locale, depth).map(|(_, text)| (path, text.to_owned()))
            })
            .collect();
        Self { entries }
    }

    /// Text for a dotted path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Number of rendered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(path, text)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Payload delivered to locale-change observers.
#[derive(Debug, Clone)]
pub struct LocaleChange {
    /// The active locale after resolution.
    pub locale: Locale,
    /// The locale that was asked for.
    pub requested: Locale,
    /// How `requested` became `locale`.
    pub kind: MatchKind,
    dictionary: Dictionary,
    leaf_fallback: LeafFallback,
    view: OnceCell<LocaleView>,
}

impl LocaleChange {
    /// The dictionary flattened for [`locale`](Self::locale).
    ///
    /// Built on first call and cached.
    pub fn view(&self) -> &LocaleView {
        self.view
            .get_or_init(|| LocaleView::build(&self.dictionary, &self.locale, self.leaf_fallback))
    }
}

/// Runtime localization engine.
///
/// ```
/// use lingo_i18n::{Dictionary, Localization, Variables};
///
/// let dict = Dictionary::new()
///     .with_leaf("greet", [("en", "Hello {{name}}"), ("es", "Hola {{name}}")]);
/// let mut l10n = Localization::new(dict);
///
/// let vars = Variables::from([("name", "Ana")]);
/// assert_eq!(l10n.translate_with("greet", &vars), "Hello Ana");
/// l10n.set_locale("es-MX");
/// assert_eq!(l10n.locale(), "es");
/// assert_eq!(l10n.translate_with("greet", &vars), "Hola Ana");
/// assert_eq!(l10n.translate("nope"), "missing nope");
/// ```
pub struct Localization {
    dictionary: Dictionary,
    available: AvailableLocales,
    current: Locale,
    default_locale: Locale,
    options: LocalizationOptions,
    locale_observers: Observers<LocaleChange>,
    diagnostic_observers: Observers<Diagnostic>,
    slot: Option<LocaleSlot>,
    // Callbacks registered through the builder, alive as long as the engine.
    _retained: Vec<Subscription>,
}

impl std::fmt::Debug for Localization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localization")
            .field("current", &self.current)
            .field("default_locale", &self.default_locale)
            .field("available", &self.available)
            .field("options", &self.options)
            .field("locale_observers", &self.locale_observers)
            .field("diagnostic_observers", &self.diagnostic_observers)
            .finish_non_exhaustive()
    }
}

impl Localization {
    /// Engine over a single dictionary with default options.
    #[must_use]
    pub fn new(dictionary: Dictionary) -> Self {
        Self::builder().dictionary(dictionary).build()
    }

    /// Engine over `dictionaries` merged left to right.
    #[must_use]
    pub fn with_options(
        dictionaries: impl IntoIterator<Item = Dictionary>,
        options: LocalizationOptions,
    ) -> Self {
        let mut builder = Self::builder().options(options);
        for dictionary in dictionaries {
            builder = builder.dictionary(dictionary);
        }
        builder.build()
    }

    /// Start building an engine.
    #[must_use]
    pub fn builder() -> LocalizationBuilder {
        LocalizationBuilder::default()
    }

    // -----------------------------------------------------------------
    // Locale
    // -----------------------------------------------------------------

    /// Resolve and activate `locale`, then notify locale observers.
    ///
    /// Observers are notified even when the active locale does not change.
    /// The request (not the resolved locale) is written to the slot, if any.
    pub fn set_locale(&mut self, locale: impl Into<Locale>) -> Resolution {
        let requested = locale.into();
        if let Some(slot) = &self.slot {
            slot.set(requested.clone());
        }
        self.relocate(&requested)
    }

    /// Resolve and activate the default locale.
    ///
    /// This always targets [`default_locale`](Self::default_locale), not the
    /// current locale.
    pub fn reset_locale(&mut self) -> Resolution {
        let default = self.default_locale.clone();
        self.set_locale(default)
    }

    /// The active locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.current
    }

    /// The locale requested at construction and by [`reset_locale`](Self::reset_locale).
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Every locale used by any leaf, first-seen order.
    #[must_use]
    pub fn available_locales(&self) -> &AvailableLocales {
        &self.available
    }

    // -----------------------------------------------------------------
    // Dictionary
    // -----------------------------------------------------------------

    /// The merged dictionary.
    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// The options this engine was built with.
    #[must_use]
    pub fn options(&self) -> &LocalizationOptions {
        &self.options
    }

    /// Merge `fragment` into the dictionary and re-announce the current locale.
    ///
    /// The audit runs again when enabled, so gaps introduced by the fragment
    /// are reported. The slot is left alone: it keeps the last request.
    pub fn merge_dictionary(&mut self, fragment: &Dictionary) -> Resolution {
        self.dictionary = merge(&self.dictionary, fragment);
        self.available = self.dictionary.available_locales();
        debug!(
            target: "lingo_i18n",
            keys = fragment.len(),
            locales = self.available.len(),
            "dictionary fragment merged"
        );
        if self.options.audit {
            self.run_audit();
        }
        let current = self.current.clone();
        self.relocate(&current)
    }

    /// Coverage statistics for the current dictionary.
    #[must_use]
    pub fn coverage_report(&self) -> CoverageReport {
        coverage::coverage_report(&self.dictionary)
    }

    // -----------------------------------------------------------------
    // Translation
    // -----------------------------------------------------------------

    /// Translate `path` in the current locale.
    pub fn translate(&self, path: impl Into<KeyPath>) -> String {
        let path = path.into();
        self.render(&path, None)
    }

    /// Translate `path` and substitute `{{name}}` placeholders from `vars`.
    pub fn translate_with(&self, path: impl Into<KeyPath>, vars: &Variables) -> String {
        let path = path.into();
        self.render(&path, Some(vars))
    }

    /// Root of the chained accessor.
    #[must_use]
    pub fn t(&self) -> Accessor<'_> {
        Accessor::new(self)
    }

    fn render(&self, path: &KeyPath, vars: Option<&Variables>) -> String {
        match self.lookup(path) {
            Lookup::Text(text) => render_text(text, vars),
            Lookup::Absent => format!("missing {path}"),
            Lookup::Untranslated => missing_translation(path),
        }
    }

    pub(crate) fn lookup(&self, path: &KeyPath) -> Lookup<'_> {
        let navigation = navigate(&self.dictionary, path);
        if !navigation.is_found() {
            return Lookup::Absent;
        }
        match navigation.value() {
            Some(Entry::Text(text)) => Lookup::Text(text),
            Some(Entry::Map(leaf)) if leaf.is_locale_leaf() => {
                self.lookup_leaf(leaf, navigation.path())
            }
            _ => Lookup::Absent,
        }
    }

    fn lookup_leaf<'a>(&self, leaf: &'a Dictionary, path: &str) -> Lookup<'a> {
        match pick_text(leaf, &self.current, self.options.leaf_fallback) {
            Some((resolution, text)) => {
                if resolution.kind.is_fallback() {
                    self.emit(Diagnostic::KeyFallback {
                        path: path.to_owned(),
                        requested: resolution.requested,
                        resolved: resolution.resolved,
                        kind: resolution.kind,
                    });
                }
                Lookup::Text(text)
            }
            None => {
                self.emit(Diagnostic::MissingTranslation {
                    path: path.to_owned(),
                    locale: self.current.clone(),
                });
                Lookup::Untranslated
            }
        }
    }

    /// Whether `path` addresses a leaf or a text entry.
    pub(crate) fn is_translatable(&self, path: &KeyPath) -> bool {
        match navigate(&self.dictionary, path).value() {
            Some(Entry::Text(_)) => true,
            Some(Entry::Map(map)) => map.is_locale_leaf(),
            _ => false,
        }
    }

    // -----------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------

    /// Call `callback` after every `set_locale`, `reset_locale` and
    /// `merge_dictionary`.
    pub fn on_locale_change(&self, callback: impl Fn(&LocaleChange) + 'static) -> Subscription {
        self.locale_observers.subscribe(callback)
    }

    /// Call `callback` for every diagnostic.
    pub fn on_diagnostic(&self, callback: impl Fn(&Diagnostic) + 'static) -> Subscription {
        self.diagnostic_observers.subscribe(callback)
    }

    pub(crate) fn emit(&self, diagnostic: Diagnostic) {
        diagnostic.log();
        self.diagnostic_observers.notify(&diagnostic);
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    /// Resolve `requested`, activate it and notify locale observers.
    fn relocate(&mut self, requested: &str) -> Resolution {
        let span = info_span!(
            "lingo.set_locale",
            requested = %requested,
            resolved = field::Empty
        );
        let _guard = span.enter();

        let resolution = self.apply_locale(requested);
        span.record("resolved", resolution.resolved.as_str());
        self.announce(&resolution);
        resolution
    }

    fn apply_locale(&mut self, requested: &str) -> Resolution {
        let resolution = self.available.resolve(requested);
        match resolution.kind {
            MatchKind::Exact => {}
            MatchKind::BaseLanguage | MatchKind::Variant | MatchKind::AnyAvailable => {
                self.emit(Diagnostic::LocaleFallback {
                    requested: resolution.requested.clone(),
                    resolved: resolution.resolved.clone(),
                    kind: resolution.kind,
                });
            }
            MatchKind::Unresolved => self.emit(Diagnostic::NoLocales {
                requested: resolution.requested.clone(),
            }),
        }
        self.current.clone_from(&resolution.resolved);
        resolution
    }

    fn announce(&self, resolution: &Resolution) {
        let change = LocaleChange {
            locale: resolution.resolved.clone(),
            requested: resolution.requested.clone(),
            kind: resolution.kind,
            dictionary: self.dictionary.clone(),
            leaf_fallback: self.options.leaf_fallback,
            view: OnceCell::new(),
        };
        let observers = self.locale_observers.notify(&change);
        debug!(
            target: "lingo_i18n",
            locale = %change.locale,
            observers,
            "locale change announced"
        );
    }

    fn run_audit(&self) {
        for diagnostic in coverage::audit(&self.dictionary, &self.available) {
            self.emit(diagnostic);
        }
    }
}

pub(crate) fn render_text(text: &str, vars: Option<&Variables>) -> String {
    match vars {
        Some(vars) => substitute(text, vars),
        None => text.to_owned(),
    }
}

pub(crate) fn missing_translation(path: &KeyPath) -> String {
    format!("[missing translation: {path}]")
}

/// Builder for [`Localization`].
#[derive(Default)]
#[must_use]
pub struct LocalizationBuilder {
    fragments: Vec<Dictionary>,
    options: LocalizationOptions,
    slot: Option<LocaleSlot>,
    diagnostic_callbacks: Vec<Box<dyn Fn(&Diagnostic)>>,
}

impl std::fmt::Debug for LocalizationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalizationBuilder")
            .field("fragments", &self.fragments.len())
            .field("options", &self.options)
            .field("slot", &self.slot)
            .field("diagnostic_callbacks", &self.diagnostic_callbacks.len())
            .finish()
    }
}

impl LocalizationBuilder {
    /// Add a dictionary fragment. Later fragments win on conflicts.
    pub fn dictionary(mut self, dictionary: Dictionary) -> Self {
        self.fragments.push(dictionary);
        self
    }

    /// Replace all options.
    pub fn options(mut self, options: LocalizationOptions) -> Self {
        self.options = options;
        self
    }

    /// Locale requested at construction and by `reset_locale`.
    pub fn default_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.options.default_locale = Some(locale.into());
        self
    }

    /// Per-key fallback policy.
    pub fn leaf_fallback(mut self, depth: LeafFallback) -> Self {
        self.options.leaf_fallback = depth;
        self
    }

    /// Enable or disable the coverage audit.
    pub fn audit(mut self, audit: bool) -> Self {
        self.options.audit = audit;
        self
    }

    /// Attach a host-owned locale slot.
    ///
    /// When the slot holds a locale at build time, the engine starts there
    /// instead of at the default locale.
    pub fn slot(mut self, slot: LocaleSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Register a diagnostic observer that lives as long as the engine.
    ///
    /// Unlike [`Localization::on_diagnostic`], it also sees the diagnostics
    /// raised during construction (audit and initial locale resolution).
    pub fn on_diagnostic(mut self, callback: impl Fn(&Diagnostic) + 'static) -> Self {
        self.diagnostic_callbacks.push(Box::new(callback));
        self
    }

    /// Merge fragments, audit, and resolve the initial locale.
    ///
    /// Construction never fails; an empty dictionary yields a
    /// [`Diagnostic::NoLocales`] and keeps the requested locale verbatim.
    #[must_use]
    pub fn build(self) -> Localization {
        let Self {
            fragments,
            options,
            slot,
            diagnostic_callbacks,
        } = self;

        let dictionary = merge_all(fragments);
        let available = dictionary.available_locales();
        let default_locale = options.effective_default_locale().to_owned();

        let diagnostic_observers = Observers::<Diagnostic>::new();
        let retained = diagnostic_callbacks
            .into_iter()
            .map(|callback| diagnostic_observers.subscribe(callback))
            .collect();

        let mut engine = Localization {
            dictionary,
            available,
            current: default_locale.clone(),
            default_locale,
            options,
            locale_observers: Observers::new(),
            diagnostic_observers,
            slot,
            _retained: retained,
        };

        if engine.options.audit {
            engine.run_audit();
        }

        let requested = engine
            .slot
            .as_ref()
            .and_then(LocaleSlot::get)
            .unwrap_or_else(|| engine.default_locale.clone());
        let resolution = engine.apply_locale(&requested);
        debug!(
            target: "lingo_i18n",
            requested = %resolution.requested,
            resolved = %resolution.resolved,
            kind = resolution.kind.as_str(),
            locales = engine.available.len(),
            "localization ready"
        );
        engine
    }
}
