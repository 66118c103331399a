use super::*;

#[test]
fn defaults_match_document_contract() {
    let config = ResolverConfig::default();
    assert_eq!(config.storage_key, "theme-preference");
    assert_eq!(config.attribute, "data-theme");
    assert_eq!(config.transition_class, "theme-transition");
    assert_eq!(config.event_name, "themechange");
    assert_eq!(config.transition_duration(), Duration::from_millis(300));
}

#[test]
fn partial_json_keeps_defaults_for_missing_fields() {
    let config = ResolverConfig::from_json(r#"{"storage_key": "site-theme", "transition_ms": 150}"#)
        .expect("config should parse");
    assert_eq!(config.storage_key, "site-theme");
    assert_eq!(config.transition_ms, 150);
    assert_eq!(config.attribute, "data-theme");
}

#[test]
fn empty_object_is_default() {
    let config = ResolverConfig::from_json("{}").expect("config should parse");
    assert_eq!(config, ResolverConfig::default());
}

#[test]
fn malformed_json_is_config_error() {
    let err = ResolverConfig::from_json("{storage_key").expect_err("should fail");
    assert!(matches!(err, ThemeError::Config(_)));
}

#[test]
fn unknown_field_is_rejected() {
    let err = ResolverConfig::from_json(r#"{"storage": "x"}"#).expect_err("should fail");
    assert!(matches!(err, ThemeError::Config(_)));
}

#[test]
fn control_selector_covers_id_and_marker() {
    let config = ResolverConfig::default();
    assert_eq!(config.control_selector(), "#theme-toggle, [data-theme-toggle]");
}
