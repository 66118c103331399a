use super::*;

// =============================================================
// ThemeMode parsing
// =============================================================

#[test]
fn theme_mode_parses_every_valid_value() {
    assert_eq!("light".parse::<ThemeMode>().expect("light"), ThemeMode::Light);
    assert_eq!("dark".parse::<ThemeMode>().expect("dark"), ThemeMode::Dark);
    assert_eq!("system".parse::<ThemeMode>().expect("system"), ThemeMode::System);
}

#[test]
fn theme_mode_parse_ignores_case_and_whitespace() {
    assert_eq!(" Dark\n".parse::<ThemeMode>().expect("dark"), ThemeMode::Dark);
    assert_eq!("SYSTEM".parse::<ThemeMode>().expect("system"), ThemeMode::System);
}

#[test]
fn theme_mode_parse_rejects_unknown_values() {
    for raw in ["", "auto", "darkish", "true"] {
        let err = raw.parse::<ThemeMode>().expect_err("should be invalid");
        assert!(matches!(err, ThemeError::InvalidArgument { ref value } if value == raw));
    }
}

#[test]
fn parse_lenient_treats_invalid_as_absent() {
    assert_eq!(ThemeMode::parse_lenient(Some("dark")), Some(ThemeMode::Dark));
    assert_eq!(ThemeMode::parse_lenient(Some("purple")), None);
    assert_eq!(ThemeMode::parse_lenient(None), None);
}

#[test]
fn theme_mode_default_is_system() {
    assert_eq!(ThemeMode::default(), ThemeMode::System);
}

#[test]
fn theme_mode_display_matches_storage_form() {
    for mode in ThemeMode::ALL {
        assert_eq!(mode.to_string(), mode.as_str());
    }
}

// =============================================================
// Resolution
// =============================================================

#[test]
fn explicit_modes_ignore_os_signal() {
    assert_eq!(ThemeMode::Light.resolve(Some(true)), EffectiveTheme::Light);
    assert_eq!(ThemeMode::Dark.resolve(Some(false)), EffectiveTheme::Dark);
}

#[test]
fn system_mode_follows_os_signal() {
    assert_eq!(ThemeMode::System.resolve(Some(true)), EffectiveTheme::Dark);
    assert_eq!(ThemeMode::System.resolve(Some(false)), EffectiveTheme::Light);
}

#[test]
fn system_mode_without_signal_is_light() {
    assert_eq!(ThemeMode::System.resolve(None), EffectiveTheme::Light);
}

// =============================================================
// EffectiveTheme
// =============================================================

#[test]
fn opposite_is_an_involution() {
    for theme in [EffectiveTheme::Light, EffectiveTheme::Dark] {
        assert_ne!(theme.opposite(), theme);
        assert_eq!(theme.opposite().opposite(), theme);
    }
}

#[test]
fn effective_theme_rejects_system() {
    assert!("system".parse::<EffectiveTheme>().is_err());
    assert_eq!("light".parse::<EffectiveTheme>().expect("light"), EffectiveTheme::Light);
}

#[test]
fn effective_theme_maps_back_to_explicit_mode() {
    assert_eq!(EffectiveTheme::Dark.as_mode(), ThemeMode::Dark);
    assert_eq!(EffectiveTheme::Light.as_mode(), ThemeMode::Light);
}

// =============================================================
// Serialization
// =============================================================

#[test]
fn theme_change_serializes_lowercase() {
    let change = ThemeChange { requested: ThemeMode::System, effective: EffectiveTheme::Dark };
    let json = serde_json::to_value(change).expect("serialize");
    assert_eq!(json, serde_json::json!({"requested": "system", "effective": "dark"}));
}
