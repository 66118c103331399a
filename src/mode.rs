//! Theme preference and rendered-theme value types.
//!
//! `ThemeMode` is what the user asked for; `EffectiveTheme` is what the page
//! actually renders. `system` only exists on the preference side and is
//! resolved against the OS-level signal before anything touches the DOM.

#[cfg(test)]
#[path = "mode_test.rs"]
mod mode_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// A user's stored theme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// All preference values, in display order.
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::System];

    /// Lowercase wire/storage form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Resolve the preference to a rendered theme.
    ///
    /// `prefers_dark` is the OS-level signal; `None` means the platform cannot
    /// report one, in which case `system` renders light.
    #[must_use]
    pub fn resolve(self, prefers_dark: Option<bool>) -> EffectiveTheme {
        match self {
            Self::Light => EffectiveTheme::Light,
            Self::Dark => EffectiveTheme::Dark,
            Self::System => EffectiveTheme::from_prefers_dark(prefers_dark),
        }
    }

    /// Parse a stored or hinted value, treating anything invalid as absent.
    #[must_use]
    pub fn parse_lenient(raw: Option<&str>) -> Option<Self> {
        raw.map(str::parse::<Self>).and_then(Result::ok)
    }
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ThemeError::InvalidArgument { value: s.to_owned() })
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The theme actually rendered on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveTheme {
    #[default]
    Light,
    Dark,
}

impl EffectiveTheme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Map the OS signal to a theme. No signal renders light.
    #[must_use]
    pub fn from_prefers_dark(prefers_dark: Option<bool>) -> Self {
        if prefers_dark == Some(true) { Self::Dark } else { Self::Light }
    }

    /// The explicit preference that pins this theme.
    #[must_use]
    pub fn as_mode(self) -> ThemeMode {
        match self {
            Self::Light => ThemeMode::Light,
            Self::Dark => ThemeMode::Dark,
        }
    }
}

impl FromStr for EffectiveTheme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<ThemeMode>()? {
            ThemeMode::Light => Ok(Self::Light),
            ThemeMode::Dark => Ok(Self::Dark),
            ThemeMode::System => Err(ThemeError::InvalidArgument { value: s.to_owned() }),
        }
    }
}

impl fmt::Display for EffectiveTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload delivered to observers whenever the applied theme changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeChange {
    /// The preference that was in force for this change.
    pub requested: ThemeMode,
    /// The theme written to the document.
    pub effective: EffectiveTheme,
}
