//! Host-owned "last selected locale" cell.
//!
//! A UI layer that tears down and rebuilds its [`Localization`] (for example
//! when the dictionary source changes) needs the new engine to start in the
//! locale the user last picked. [`LocaleSlot`] is that hand-off: the host
//! creates one, passes clones to each engine it builds, and the engine both
//! seeds its initial locale from it and records every `set_locale` request
//! into it.
//!
//! [`Localization`]: crate::Localization

use std::cell::RefCell;
use std::rc::Rc;

use crate::dictionary::Locale;

/// Shared, single-threaded cell holding an optional locale.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct LocaleSlot {
    inner: Rc<RefCell<Option<Locale>>>,
}

impl LocaleSlot {
    /// An empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-filled with `locale`.
    #[must_use]
    pub fn with_locale(locale: impl Into<Locale>) -> Self {
        let slot = Self::new();
        slot.set(locale);
        slot
    }

    /// The stored locale, if any.
    #[must_use]
    pub fn get(&self) -> Option<Locale> {
        self.inner.borrow().clone()
    }

    /// Store `locale`, replacing any previous value.
    pub fn set(&self, locale: impl Into<Locale>) {
        *self.inner.borrow_mut() = Some(locale.into());
    }

    /// Remove and return the stored locale.
    pub fn take(&self) -> Option<Locale> {
        self.inner.borrow_mut().take()
    }

    /// Empty the slot.
    pub fn clear(&self) {
        self.inner.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let slot = LocaleSlot::new();
        let other = slot.clone();
        other.set("es");
        assert_eq!(slot.get().as_deref(), Some("es"));
        assert_eq!(LocaleSlot::new().get(), None);
    }

    #[test]
    fn take_and_clear() {
        let slot = LocaleSlot::with_locale("fr");
        assert_eq!(slot.take().as_deref(), Some("fr"));
        assert_eq!(slot.get(), None);
        slot.set("de");
        slot.clear();
        assert_eq!(slot.get(), None);
    }
}
