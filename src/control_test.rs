use super::*;

#[test]
fn light_theme_offers_dark_mode() {
    let state = ControlState::for_theme(EffectiveTheme::Light);
    assert!(!state.pressed);
    assert_eq!(state.aria_pressed(), "false");
    assert_eq!(state.label, "Switch to dark mode");
}

#[test]
fn dark_theme_offers_light_mode() {
    let state = ControlState::for_theme(EffectiveTheme::Dark);
    assert!(state.pressed);
    assert_eq!(state.aria_pressed(), "true");
    assert_eq!(state.label, "Switch to light mode");
}

#[test]
fn label_differs_per_theme() {
    let light = ControlState::for_theme(EffectiveTheme::Light);
    let dark = ControlState::for_theme(EffectiveTheme::Dark);
    assert_ne!(light.label, dark.label);
}

#[test]
fn title_mirrors_label() {
    let light = ControlState::for_theme(EffectiveTheme::Light);
    assert_eq!(light.title, "Switch to dark mode");
    assert_eq!(light.title, light.label);

    let dark = ControlState::for_theme(EffectiveTheme::Dark);
    assert_eq!(dark.title, "Switch to light mode");
    assert_eq!(dark.title, dark.label);
}
