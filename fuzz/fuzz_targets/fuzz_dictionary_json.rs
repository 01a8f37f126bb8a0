#![no_main]

use lingo_i18n::{Dictionary, Localization, coverage_report};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 8192 {
        return;
    }
    let Ok(dict) = Dictionary::from_json_str(text) else {
        return;
    };

    // Serialization must reproduce an equal dictionary.
    let Ok(json) = serde_json::to_string(&dict) else {
        panic!("serializing a parsed dictionary failed");
    };
    let reparsed = Dictionary::from_json_str(&json);
    assert!(matches!(reparsed, Ok(ref d) if *d == dict));

    let report = coverage_report(&dict);
    for locale in &report.locales {
        assert!((0.0..=100.0).contains(&locale.coverage_percent));
        assert_eq!(locale.present + locale.missing.len(), report.total_keys);
    }

    // The engine must accept any dictionary and never panic on lookups.
    let mut l10n = Localization::new(dict.clone());
    for (path, _) in dict.leaves() {
        let _ = l10n.translate(path.as_str());
    }
    for locale in ["en", "zz-ZZ", ""] {
        l10n.set_locale(locale);
        let _ = l10n.translate("a.b.c");
    }

    let _ = Dictionary::from_locale_keyed(&dict);
});
