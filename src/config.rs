//! Resolver configuration.
//!
//! Every field has a default, so a page only needs to supply the values it
//! wants to change. The browser start hook reads an optional JSON object from
//! the root element's `data-theme-config` attribute.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::Deserialize;

use crate::error::ThemeError;

const DEFAULT_STORAGE_KEY: &str = "theme-preference";
const DEFAULT_ATTRIBUTE: &str = "data-theme";
const DEFAULT_TRANSITION_CLASS: &str = "theme-transition";
const DEFAULT_TRANSITION_MS: u32 = 300;
const DEFAULT_MEDIA_QUERY: &str = "(prefers-color-scheme: dark)";
const DEFAULT_CONTROL_ID: &str = "theme-toggle";
const DEFAULT_CONTROL_MARKER: &str = "data-theme-toggle";
const DEFAULT_EVENT_NAME: &str = "themechange";

/// Names and timings the resolver and its browser adapters agree on.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Storage key holding the persisted preference.
    pub storage_key: String,
    /// Root element attribute carrying the effective theme.
    pub attribute: String,
    /// Marker class present on the root element during a transition.
    pub transition_class: String,
    /// Length of the transition window in milliseconds.
    pub transition_ms: u32,
    /// Media query whose match means the OS prefers dark.
    pub media_query: String,
    /// Element id of the primary toggle control.
    pub control_id: String,
    /// Attribute marking additional toggle controls.
    pub control_marker: String,
    /// Name of the DOM event re-dispatched on every change.
    pub event_name: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            attribute: DEFAULT_ATTRIBUTE.to_owned(),
            transition_class: DEFAULT_TRANSITION_CLASS.to_owned(),
            transition_ms: DEFAULT_TRANSITION_MS,
            media_query: DEFAULT_MEDIA_QUERY.to_owned(),
            control_id: DEFAULT_CONTROL_ID.to_owned(),
            control_marker: DEFAULT_CONTROL_MARKER.to_owned(),
            event_name: DEFAULT_EVENT_NAME.to_owned(),
        }
    }
}

impl ResolverConfig {
    /// Parse a (possibly partial) JSON object, filling gaps with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Config`] for malformed JSON or unknown fields.
    pub fn from_json(raw: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Transition window as a `Duration`.
    #[must_use]
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.transition_ms))
    }

    /// CSS selector matching every toggle control.
    #[must_use]
    pub fn control_selector(&self) -> String {
        format!("#{}, [{}]", self.control_id, self.control_marker)
    }
}
