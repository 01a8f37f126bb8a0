//! Property-based invariant tests for resolution, merge, lookup, and templates.
//!
//! 1.  A locale present verbatim resolves to itself (Exact)
//! 2.  `base-REGION` with only `base` available resolves to `base`
//! 3.  A base with no exact/base match but some `base-X` resolves to a variant
//! 4.  Empty available set: Unresolved, requested kept verbatim
//! 5.  A resolved locale is always a member of the available set
//! 6.  Truncating the fallback chain never changes a successful shallower match
//! 7.  Merge of disjoint dictionaries contains the union of keys
//! 8.  Merge unions leaf locales, right side wins on collision
//! 9.  Merge is associative on disjoint key sets
//! 10. `{path: {locale: X}}` translated in `locale` returns X exactly
//! 11. Substitution without `{{` is identity
//! 12. Substitution is single-pass (no recursive expansion)
//! 13. Missing variables leave their tokens intact
//! 14. Coverage percent is in [0, 100] and present + missing == total
//! 15. Failed navigation reports the full requested path
//! 16. JSON serialization round-trips dictionaries
//! 17. translate is total; a missing path echoes the requested path

use lingo_i18n::locale::base_language;
use lingo_i18n::{
    Dictionary, Entry, FallbackDepth, KeyPath, Localization, MatchKind, Variables, coverage_report,
    merge, navigate, resolve, resolve_with, substitute,
};
use proptest::prelude::*;

// ── Strategies ───────────────────────────────────────────────────────

fn locale_code() -> impl Strategy<Value = String> {
    "[a-z]{2}(-[A-Z]{2})?"
}

fn available_set() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(locale_code(), 0..6)
}

fn leaf_entries() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((locale_code(), "[a-zA-Z ]{0,12}"), 1..4)
}

fn flat_dictionary(prefix: &'static str) -> impl Strategy<Value = Dictionary> {
    prop::collection::vec(("[a-z]{1,6}", leaf_entries()), 0..8).prop_map(move |leaves| {
        let mut dict = Dictionary::new();
        for (key, entries) in leaves {
            dict = dict.with_leaf(format!("{prefix}{key}"), entries);
        }
        dict
    })
}

fn nested_dictionary() -> impl Strategy<Value = Dictionary> {
    prop::collection::vec(("[a-z]{1,4}", flat_dictionary("")), 0..4).prop_map(|sections| {
        let mut dict = Dictionary::new();
        for (name, section) in sections {
            dict.insert(name, section);
        }
        dict
    })
}

fn strs(codes: &[String]) -> Vec<&str> {
    codes.iter().map(String::as_str).collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Exact match
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn exact_locale_resolves_to_itself(available in available_set(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!available.is_empty());
        let requested = pick.get(&available).clone();
        let r = resolve(&requested, strs(&available));
        prop_assert_eq!(r.kind, MatchKind::Exact);
        prop_assert_eq!(r.resolved, requested);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Base language
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn region_falls_back_to_base(base in "[a-z]{2}", region in "[A-Z]{2}", mut others in available_set()) {
        let requested = format!("{base}-{region}");
        others.retain(|code| *code != requested);
        others.push(base.clone());
        let r = resolve(&requested, strs(&others));
        prop_assert_eq!(r.kind, MatchKind::BaseLanguage);
        prop_assert_eq!(r.resolved, base);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Variant
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn base_falls_back_to_variant(base in "[a-z]{2}", region in "[A-Z]{2}", mut others in available_set()) {
        others.retain(|code| base_language(code) != base);
        let variant = format!("{base}-{region}");
        others.push(variant.clone());
        let r = resolve(&base, strs(&others));
        prop_assert_eq!(r.kind, MatchKind::Variant);
        prop_assert_eq!(r.resolved, variant);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Empty available set
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn empty_set_is_unresolved(requested in ".{0,16}") {
        let r = resolve(&requested, std::iter::empty());
        prop_assert_eq!(r.kind, MatchKind::Unresolved);
        prop_assert_eq!(r.resolved, requested);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Resolved locale is available
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolved_is_available(requested in locale_code(), available in available_set()) {
        let r = resolve(&requested, strs(&available));
        if r.is_resolved() {
            prop_assert!(available.contains(&r.resolved));
        } else {
            prop_assert!(available.is_empty());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Depth truncation is consistent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn shallower_success_is_preserved(requested in locale_code(), available in available_set()) {
        let exact = resolve_with(&requested, strs(&available), FallbackDepth::Exact);
        let same = resolve_with(&requested, strs(&available), FallbackDepth::SameLanguage);
        let full = resolve_with(&requested, strs(&available), FallbackDepth::Full);
        if exact.is_resolved() {
            prop_assert_eq!(&exact, &same);
        }
        if same.is_resolved() {
            prop_assert_eq!(&same, &full);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Disjoint merge is a union
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn disjoint_merge_is_union(a in flat_dictionary("a_"), b in flat_dictionary("b_")) {
        let merged = merge(&a, &b);
        prop_assert_eq!(merged.len(), a.len() + b.len());
        for key in a.keys().chain(b.keys()) {
            prop_assert!(merged.contains_key(key), "lost key {}", key);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Leaf union with right bias
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn leaf_merge_is_right_biased(left in leaf_entries(), right in leaf_entries()) {
        let a = Dictionary::new().with_leaf("k", left.clone());
        let b = Dictionary::new().with_leaf("k", right.clone());
        let merged = merge(&a, &b);
        let leaf = merged.get_map("k").unwrap();

        for (locale, _) in &left {
            if !right.iter().any(|(l, _)| l == locale) {
                // Last duplicate within `left` wins inside its own leaf.
                let expected = left
                    .iter()
                    .rev()
                    .find(|(l, _)| l == locale)
                    .map(|(_, t)| t.as_str());
                prop_assert_eq!(leaf.get(locale).and_then(Entry::as_text), expected);
            }
        }
        for (locale, _) in &right {
            let expected = right.iter().rev().find(|(l, _)| l == locale).map(|(_, t)| t.as_str());
            prop_assert_eq!(leaf.get(locale).and_then(Entry::as_text), expected);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Associativity on disjoint keys
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn merge_associative_on_disjoint(
        a in flat_dictionary("a_"),
        b in flat_dictionary("b_"),
        c in flat_dictionary("c_"),
    ) {
        let left = merge(&merge(&a, &b), &c);
        let right = merge(&a, &merge(&b, &c));
        prop_assert_eq!(left, right);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 10. Translate round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_leaf_round_trip(
        segments in prop::collection::vec("[a-z]{1,6}", 1..4),
        locale in locale_code(),
        text in "[^{}]{0,24}",
    ) {
        let (last, parents) = segments.split_last().unwrap();
        let mut dict = Dictionary::new().with_leaf(last.clone(), [(locale.clone(), text.clone())]);
        for parent in parents.iter().rev() {
            dict = Dictionary::new().with_map(parent.clone(), dict);
        }

        let mut l10n = Localization::builder()
            .dictionary(dict)
            .default_locale(locale.clone())
            .build();
        l10n.set_locale(locale);
        prop_assert_eq!(l10n.translate(segments.join(".")), text);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 11. Substitution identity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn substitution_without_tokens_is_identity(text in "[^{]*", name in "[a-z]{1,8}") {
        let vars = Variables::new().with(name, "value");
        prop_assert_eq!(substitute(&text, &vars), text);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 12. Single pass
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn substitution_is_single_pass(name in "[a-z]{1,8}", other in "[a-z]{1,8}") {
        prop_assume!(name != other);
        let injected = format!("{{{{{other}}}}}");
        let vars = Variables::new().with(name.clone(), injected.clone()).with(other, "EXPANDED");
        let out = substitute(&format!("<{{{{{name}}}}}>"), &vars);
        prop_assert_eq!(out, format!("<{injected}>"));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 13. Missing variables
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn missing_variables_keep_tokens(name in "[a-z]{1,10}", prefix in "[a-zA-Z ]{0,10}") {
        let template = format!("{prefix}{{{{{name}}}}}");
        prop_assert_eq!(substitute(&template, &Variables::new()), template);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 14. Coverage bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn coverage_bounds(dict in nested_dictionary()) {
        let report = coverage_report(&dict);
        prop_assert_eq!(report.total_keys, dict.leaves().len());
        prop_assert_eq!(report.locales.len(), dict.available_locales().len());
        for locale in &report.locales {
            prop_assert!((0.0..=100.0).contains(&locale.coverage_percent));
            prop_assert_eq!(locale.present + locale.missing.len(), report.total_keys);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 15. Navigation failure path
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn navigation_failure_reports_full_path(
        dict in nested_dictionary(),
        segments in prop::collection::vec("[A-Z]{1,4}", 1..4),
    ) {
        // Uppercase keys never occur in the generated dictionaries.
        let path = KeyPath::from(segments.clone());
        let nav = navigate(&dict, &path);
        prop_assert!(!nav.is_found());
        prop_assert_eq!(nav.path(), segments.join("."));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 16. JSON round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn json_round_trip(dict in nested_dictionary()) {
        let json = serde_json::to_string(&dict).unwrap();
        let back = Dictionary::from_json_str(&json).unwrap();
        prop_assert_eq!(back, dict);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 17. translate is total
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn translate_never_panics(
        dict in nested_dictionary(),
        locale in locale_code(),
        path in "[a-z.]{0,20}",
    ) {
        let mut l10n = Localization::new(dict);
        l10n.set_locale(locale);
        let out = l10n.translate(path.as_str());
        if out.starts_with("missing ") {
            prop_assert_eq!(out, format!("missing {path}"));
        }
        let _ = l10n.t().at(path).call();
    }
}
