//! `{{name}}` template substitution.
//!
//! # Invariants
//!
//! 1. **Single pass**: substituted values are never re-scanned, so a value
//!    containing `{{x}}` is emitted literally.
//! 2. **Missing variables are not errors**: an unknown `{{name}}` is left in
//!    the output verbatim.
//! 3. **Identity without placeholders**: a template with no `{{` passes
//!    through unchanged.
//!
//! # Failure Modes
//!
//! | Input | Behavior |
//! |-------|----------|
//! | `{{name}}`, `name` unset | token left as-is |
//! | `{{ name }}` | whitespace trimmed, same as `{{name}}` |
//! | `{{name` (unclosed) | rest of template emitted as-is |
//! | `{name}` | not a placeholder, emitted as-is |

use indexmap::IndexMap;

/// A scalar template value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A string.
    Text(String),
    /// An integer.
    Int(i64),
    /// A float. Integral floats print without a fraction (`5.0` → `5`).
    Float(f64),
    /// A boolean.
    Bool(bool),
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<u32> for Scalar {
    fn from(n: u32) -> Self {
        Self::Int(n.into())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Named template variables.
///
/// ```
/// use lingo_i18n::template::{substitute, Variables};
///
/// let vars = Variables::new().with("count", 5).with("type", "messages");
/// assert_eq!(
///     substitute("You have {{count}} new {{type}}", &vars),
///     "You have 5 new messages"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    values: IndexMap<String, Scalar>,
}

impl Variables {
    /// Create an empty variable set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Scalar>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.values.get(name)
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variable is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Self::new();
        for (name, value) in iter {
            vars.insert(name, value);
        }
        vars
    }
}

impl<K: Into<String>, V: Into<Scalar>, const N: usize> From<[(K, V); N]> for Variables {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Replace every `{{name}}` in `template` with its value from `vars`.
///
/// Unknown names are left verbatim; see the module docs for edge cases.
#[must_use]
pub fn substitute(template: &str, vars: &Variables) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        result.push_str(&rest[..open]);
        let inner = &rest[open + 2..];
        let Some(close) = inner.find("}}") else {
            // Unclosed: emit as-is
            result.push_str(&rest[open..]);
            return result;
        };

        let token_end = open + 2 + close + 2;
        match vars.get(inner[..close].trim()) {
            Some(value) => result.push_str(&value.to_string()),
            None => result.push_str(&rest[open..token_end]),
        }
        rest = &rest[token_end..];
    }

    result.push_str(rest);
    result
}
