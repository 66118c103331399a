//! Narrow capability interfaces the resolver reaches the page through.
//!
//! DESIGN
//! ======
//! Each trait covers one browser global (storage, the color-scheme media
//! query, the root element, timers). Methods take `&self`; implementations
//! use interior mutability so a single instance can be shared by the resolver
//! and by the callbacks it installs. All of it runs on the page's one thread,
//! so nothing here is `Send`.
//!
//! Browser implementations live in `browser` (behind `hydrate`); in-memory
//! ones live in `memory`.

use std::rc::Rc;
use std::time::Duration;

use crate::error::ThemeError;
use crate::mode::EffectiveTheme;

/// Durable key-value storage for the preference.
pub trait PreferenceStore {
    /// Read the raw value for `key`, `Ok(None)` if it was never written.
    ///
    /// # Errors
    ///
    /// [`ThemeError::StorageUnavailable`] when the environment denies access.
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// [`ThemeError::StorageUnavailable`] when the environment denies access.
    fn save(&self, key: &str, value: &str) -> Result<(), ThemeError>;
}

/// The OS-level light/dark preference.
pub trait SystemPreferenceSignal {
    /// Whether the OS currently prefers dark; `None` if it cannot say.
    fn prefers_dark(&self) -> Option<bool>;

    /// Install a listener called with the new value on every OS change.
    ///
    /// Returns `false` (and drops `on_change`) if the platform has no change
    /// notifications. Listeners live as long as the signal.
    fn watch(&self, on_change: Box<dyn Fn(bool)>) -> bool;
}

/// The root element the theme is rendered onto.
pub trait ThemeTarget {
    /// Raw value of the theme attribute, if present.
    fn attribute(&self) -> Option<String>;

    /// Write the effective theme to the theme attribute.
    fn set_attribute(&self, theme: EffectiveTheme);

    /// Add or remove the transition marker class.
    fn set_transition_marker(&self, active: bool);
}

/// One-shot timer for the cosmetic transition window.
pub trait TransitionTimer {
    /// Run `callback` once after `after` has elapsed.
    fn schedule(&self, after: Duration, callback: Box<dyn FnOnce()>);
}

/// The full set of capabilities a resolver is built from.
///
/// `timer` is optional; without one, transitions are applied instantly.
#[derive(Clone)]
pub struct Capabilities {
    pub store: Rc<dyn PreferenceStore>,
    pub signal: Rc<dyn SystemPreferenceSignal>,
    pub target: Rc<dyn ThemeTarget>,
    pub timer: Option<Rc<dyn TransitionTimer>>,
}
