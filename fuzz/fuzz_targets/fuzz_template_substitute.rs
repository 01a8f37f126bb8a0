#![no_main]

use lingo_i18n::template::{Variables, substitute};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    // No variables: output is the template verbatim.
    assert_eq!(substitute(text, &Variables::new()), text);

    // Values that look like placeholders must not be re-expanded.
    let vars = Variables::new()
        .with("name", "{{name}}")
        .with("x", "X")
        .with("", "empty");
    let once = substitute(text, &vars);
    if !text.contains("{{") {
        assert_eq!(once, text);
    }

    // Use the input itself as a variable name and as a value.
    let vars = Variables::new().with(text.trim(), text);
    let _ = substitute(&format!("{{{{{text}}}}}"), &vars);
});
