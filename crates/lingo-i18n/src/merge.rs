//! Deep dictionary merge.
//!
//! For every key of `source`: when both sides hold a mapping, recurse;
//! otherwise the source entry replaces the target's. Because a locale leaf is
//! itself a mapping, merging two leaves for the same key unions their locale
//! coverage, which is what progressive translation needs:
//!
//! ```
//! use lingo_i18n::{merge, Dictionary};
//!
//! let a = Dictionary::new().with_leaf("hello", [("en", "Hi")]);
//! let b = Dictionary::new().with_leaf("hello", [("es", "Hola")]);
//! let merged = merge(&a, &b);
//!
//! let leaf = merged.get_map("hello").unwrap();
//! assert_eq!(leaf.keys().collect::<Vec<_>>(), ["en", "es"]);
//! ```
//!
//! Inputs are never mutated. Subtrees that only one side touches are shared
//! with the input through their `Arc`, so a merge costs O(source) allocations
//! rather than O(target + source).

use std::sync::Arc;

use crate::dictionary::{Dictionary, Entry};

/// Merge `source` into a copy of `target`; `source` wins on conflicts.
///
/// Keys keep `target` order; keys new in `source` are appended in source
/// order. Arrays and other scalar values are replaced wholesale.
#[must_use]
pub fn merge(target: &Dictionary, source: &Dictionary) -> Dictionary {
    let mut output = target.clone();
    for (key, incoming) in source.iter() {
        let merged = match (output.get(key), incoming) {
            (Some(Entry::Map(existing)), Entry::Map(child)) => {
                Entry::Map(Arc::new(merge(existing, child)))
            }
            _ => incoming.clone(),
        };
        output.insert(key, merged);
    }
    output
}

/// Fold `fragments` left to right with [`merge`].
///
/// An empty iterator yields an empty dictionary.
#[must_use]
pub fn merge_all(fragments: impl IntoIterator<Item = Dictionary>) -> Dictionary {
    let mut fragments = fragments.into_iter();
    let Some(first) = fragments.next() else {
        return Dictionary::new();
    };
    fragments.fold(first, |acc, next| merge(&acc, &next))
}
