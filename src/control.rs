//! Accessible presentation for theme toggle controls.
//!
//! The label names the action the button will take, not the current state;
//! `aria-pressed` carries the state.

#[cfg(test)]
#[path = "control_test.rs"]
mod control_test;

use crate::mode::EffectiveTheme;

/// What a toggle control should expose for the current theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlState {
    /// `aria-pressed`: the dark theme is active.
    pub pressed: bool,
    /// `aria-label`: the action a click performs.
    pub label: &'static str,
    /// `title`: tooltip, mirrors the label.
    pub title: &'static str,
}

impl ControlState {
    #[must_use]
    pub fn for_theme(effective: EffectiveTheme) -> Self {
        match effective {
            EffectiveTheme::Light => Self {
                pressed: false,
                label: "Switch to dark mode",
                title: "Switch to dark mode",
            },
            EffectiveTheme::Dark => Self {
                pressed: true,
                label: "Switch to light mode",
                title: "Switch to light mode",
            },
        }
    }

    /// `aria-pressed` attribute value.
    #[must_use]
    pub fn aria_pressed(self) -> &'static str {
        if self.pressed { "true" } else { "false" }
    }
}
