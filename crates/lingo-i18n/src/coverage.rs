//! Translation coverage: the construction-time audit and a per-locale report.
//!
//! A leaf *covers* a locale when it holds text for that exact code. Fallback
//! is deliberately ignored here: a leaf that only renders in `es` through a
//! fallback to `es-MX` is still reported as missing `es`.

use crate::diagnostics::Diagnostic;
use crate::dictionary::{Dictionary, Entry};
use crate::locale::AvailableLocales;

fn covers(leaf: &Dictionary, locale: &str) -> bool {
    matches!(leaf.get(locale), Some(Entry::Text(_)))
}

/// One [`Diagnostic::MissingLocales`] per leaf that lacks any of `available`.
///
/// Leaves are visited depth-first in declaration order; missing locales are
/// listed in `available` order.
#[must_use]
pub fn audit(dictionary: &Dictionary, available: &AvailableLocales) -> Vec<Diagnostic> {
    dictionary
        .leaves()
        .into_iter()
        .filter_map(|(path, leaf)| {
            let locales: Vec<String> = available
                .iter()
                .filter(|locale| !covers(leaf, locale))
                .map(str::to_owned)
                .collect();
            (!locales.is_empty()).then_some(Diagnostic::MissingLocales { path, locales })
        })
        .collect()
}

/// Coverage statistics for every available locale of `dictionary`.
///
/// ```
/// use lingo_i18n::{coverage_report, Dictionary};
///
/// let dict = Dictionary::new()
///     .with_leaf("greeting", [("en", "Hello"), ("es", "Hola")])
///     .with_leaf("submit", [("en", "Submit")]);
/// let report = coverage_report(&dict);
///
/// assert_eq!(report.total_keys, 2);
/// let es = report.locale("es").unwrap();
/// assert_eq!(es.missing, ["submit"]);
/// assert!((es.coverage_percent - 50.0).abs() < f32::EPSILON);
/// ```
#[must_use]
pub fn coverage_report(dictionary: &Dictionary) -> CoverageReport {
    let leaves = dictionary.leaves();
    let total = leaves.len();

    let locales = dictionary
        .available_locales()
        .iter()
        .map(|locale| {
            let mut missing: Vec<String> = leaves
                .iter()
                .filter(|(_, leaf)| !covers(leaf, locale))
                .map(|(path, _)| path.clone())
                .collect();
            missing.sort_unstable();
            let present = total.saturating_sub(missing.len());
            let coverage_percent = if total == 0 {
                100.0
            } else {
                (present as f32 / total as f32) * 100.0
            };
            LocaleCoverage {
                locale: locale.to_owned(),
                present,
                missing,
                coverage_percent,
            }
        })
        .collect();

    CoverageReport {
        total_keys: total,
        locales,
    }
}

/// Coverage of a dictionary's leaves, per locale.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    /// Number of locale leaves.
    pub total_keys: usize,
    /// Per-locale coverage, in available-locale order.
    pub locales: Vec<LocaleCoverage>,
}

impl CoverageReport {
    /// Coverage entry for `locale`.
    #[must_use]
    pub fn locale(&self, locale: &str) -> Option<&LocaleCoverage> {
        self.locales.iter().find(|entry| entry.locale == locale)
    }

    /// Whether every locale covers every key.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.locales.iter().all(|entry| entry.missing.is_empty())
    }
}

/// Per-locale coverage statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCoverage {
    /// Locale code.
    pub locale: String,
    /// Leaves with text for this locale.
    pub present: usize,
    /// Dotted paths of leaves without it, sorted.
    pub missing: Vec<String>,
    /// `present / total` as a percentage (0.0–100.0).
    pub coverage_percent: f32,
}
