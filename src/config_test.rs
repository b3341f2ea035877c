use super::*;

#[test]
fn defaults_match_stock_behaviour() {
    let config = FxConfig::default();
    assert!((config.nav_threshold_px - 50.0).abs() < f64::EPSILON);
    assert!((config.back_to_top_threshold_px - 300.0).abs() < f64::EPSILON);
    assert_eq!(config.counter_step_ms(), 33);
    assert_eq!(config.storage_key, "theme");
    assert_eq!(config.log_level(), Some(log::Level::Info));
}

#[test]
fn partial_json_keeps_remaining_defaults() {
    let config = FxConfig::from_json(r#"{ "card_stagger_ms": 250, "log_level": "debug" }"#).unwrap();
    assert_eq!(config.card_stagger_ms, 250);
    assert_eq!(config.ripple_ms, 600);
    assert_eq!(config.log_level(), Some(log::Level::Debug));
}

#[test]
fn empty_object_is_default() {
    assert_eq!(FxConfig::from_json("{}").unwrap(), FxConfig::default());
}

#[test]
fn malformed_json_is_config_error() {
    assert!(matches!(FxConfig::from_json("{ nope"), Err(FxError::Config(_))));
}

#[test]
fn zero_counter_steps_rejected() {
    let err = FxConfig::from_json(r#"{ "counter_steps": 0 }"#).unwrap_err();
    assert!(matches!(err, FxError::InvalidConfig(_)));
}

#[test]
fn unknown_log_level_rejected() {
    let err = FxConfig::from_json(r#"{ "log_level": "loud" }"#).unwrap_err();
    assert!(err.to_string().contains("loud"));
}

#[test]
fn empty_storage_key_rejected() {
    assert!(FxConfig::from_json(r#"{ "storage_key": "" }"#).is_err());
}
