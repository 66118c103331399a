//! In-memory capability implementations.
//!
//! Used by the test suite and by headless hosts with no DOM. Each type is a
//! cheap-clone handle; clones share state, so a test can keep one handle and
//! give another to the resolver.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::capability::{PreferenceStore, SystemPreferenceSignal, ThemeTarget, TransitionTimer};
use crate::error::ThemeError;
use crate::mode::EffectiveTheme;

// =============================================================================
// STORE
// =============================================================================

/// Key-value store that can be switched into an unavailable state.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    available: Rc<Cell<bool>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Rc::default(), available: Rc::new(Cell::new(true)) }
    }

    /// A store that rejects every read and write, like storage in a locked
    /// down private window.
    #[must_use]
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.set_available(false);
        store
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// Write a raw value, bypassing availability.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    /// Read a raw value, bypassing availability.
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn check(&self) -> Result<(), ThemeError> {
        if self.available.get() {
            Ok(())
        } else {
            Err(ThemeError::StorageUnavailable("memory store disabled".to_owned()))
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError> {
        self.check()?;
        Ok(self.get_raw(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        self.check()?;
        self.insert_raw(key, value);
        Ok(())
    }
}

// =============================================================================
// SIGNAL
// =============================================================================

struct SignalInner {
    prefers_dark: Cell<Option<bool>>,
    watchable: bool,
    watchers: RefCell<Vec<Rc<dyn Fn(bool)>>>,
}

/// OS preference signal driven by the test.
#[derive(Clone)]
pub struct ManualSignal {
    inner: Rc<SignalInner>,
}

impl std::fmt::Debug for ManualSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualSignal")
            .field("prefers_dark", &self.inner.prefers_dark.get())
            .field("watchers", &self.watcher_count())
            .finish()
    }
}

impl ManualSignal {
    #[must_use]
    pub fn new(prefers_dark: bool) -> Self {
        Self::build(Some(prefers_dark), true)
    }

    /// A platform with no color-scheme query at all.
    #[must_use]
    pub fn unsupported() -> Self {
        Self::build(None, false)
    }

    fn build(prefers_dark: Option<bool>, watchable: bool) -> Self {
        Self {
            inner: Rc::new(SignalInner {
                prefers_dark: Cell::new(prefers_dark),
                watchable,
                watchers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Change the OS preference and notify every watcher.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.inner.prefers_dark.set(Some(prefers_dark));
        let watchers = self.inner.watchers.borrow().clone();
        for watcher in watchers {
            watcher(prefers_dark);
        }
    }

    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.inner.watchers.borrow().len()
    }
}

impl SystemPreferenceSignal for ManualSignal {
    fn prefers_dark(&self) -> Option<bool> {
        self.inner.prefers_dark.get()
    }

    fn watch(&self, on_change: Box<dyn Fn(bool)>) -> bool {
        if !self.inner.watchable {
            return false;
        }
        self.inner.watchers.borrow_mut().push(Rc::from(on_change));
        true
    }
}

// =============================================================================
// TARGET
// =============================================================================

#[derive(Debug, Default)]
struct TargetInner {
    attribute: RefCell<Option<String>>,
    transition: Cell<bool>,
    writes: RefCell<Vec<EffectiveTheme>>,
}

/// Root element stand-in that records every write.
#[derive(Clone, Debug, Default)]
pub struct MemoryTarget {
    inner: Rc<TargetInner>,
}

impl MemoryTarget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A root element pre-rendered with `raw` in its theme attribute.
    #[must_use]
    pub fn with_attribute(raw: &str) -> Self {
        let target = Self::new();
        target.set_raw_attribute(Some(raw));
        target
    }

    /// Overwrite the attribute as foreign code would.
    pub fn set_raw_attribute(&self, raw: Option<&str>) {
        *self.inner.attribute.borrow_mut() = raw.map(str::to_owned);
    }

    #[must_use]
    pub fn raw_attribute(&self) -> Option<String> {
        self.inner.attribute.borrow().clone()
    }

    #[must_use]
    pub fn transition_active(&self) -> bool {
        self.inner.transition.get()
    }

    /// Every theme written so far, oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<EffectiveTheme> {
        self.inner.writes.borrow().clone()
    }
}

impl ThemeTarget for MemoryTarget {
    fn attribute(&self) -> Option<String> {
        self.raw_attribute()
    }

    fn set_attribute(&self, theme: EffectiveTheme) {
        self.set_raw_attribute(Some(theme.as_str()));
        self.inner.writes.borrow_mut().push(theme);
    }

    fn set_transition_marker(&self, active: bool) {
        self.inner.transition.set(active);
    }
}

// =============================================================================
// TIMER
// =============================================================================

struct Pending {
    due: Duration,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct TimerInner {
    now: Cell<Duration>,
    pending: RefCell<Vec<Pending>>,
}

/// Timer whose clock only moves when the test calls [`ManualTimer::advance`].
#[derive(Clone, Default)]
pub struct ManualTimer {
    inner: Rc<TimerInner>,
}

impl std::fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualTimer")
            .field("now", &self.inner.now.get())
            .field("pending", &self.pending())
            .finish()
    }
}

impl ManualTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward and run every callback that has come due,
    /// in due order.
    pub fn advance(&self, by: Duration) {
        let now = self.inner.now.get() + by;
        self.inner.now.set(now);
        loop {
            let next = {
                let mut pending = self.inner.pending.borrow_mut();
                let due_index = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= now)
                    .min_by_key(|(_, p)| p.due)
                    .map(|(i, _)| i);
                due_index.map(|i| pending.remove(i))
            };
            match next {
                Some(p) => (p.callback)(),
                None => break,
            }
        }
    }

    /// Callbacks still waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.pending.borrow().len()
    }
}

impl TransitionTimer for ManualTimer {
    fn schedule(&self, after: Duration, callback: Box<dyn FnOnce()>) {
        let due = self.inner.now.get() + after;
        self.inner.pending.borrow_mut().push(Pending { due, callback });
    }
}
