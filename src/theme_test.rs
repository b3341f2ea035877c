use super::*;

#[test]
fn parse_accepts_only_known_values() {
    assert_eq!(Theme::parse("light"), Some(Theme::Light));
    assert_eq!(Theme::parse(" dark "), Some(Theme::Dark));
    assert_eq!(Theme::parse("sepia"), None);
    assert_eq!(Theme::parse(""), None);
}

#[test]
fn default_is_dark() {
    assert_eq!(Theme::default(), Theme::Dark);
    assert!(Theme::default().is_dark());
}

#[test]
fn toggled_is_an_involution() {
    for theme in [Theme::Light, Theme::Dark] {
        assert_ne!(theme.toggled(), theme);
        assert_eq!(theme.toggled().toggled(), theme);
    }
}

#[test]
fn display_matches_attribute_value() {
    assert_eq!(Theme::Light.to_string(), "light");
    assert_eq!(Theme::Dark.to_string(), "dark");
}

#[test]
fn initial_theme_prefers_root_attribute() {
    let store = MemoryStore::with_entry("theme", "dark");
    assert_eq!(initial_theme(Some("light"), &store, "theme"), Theme::Light);
}

#[test]
fn initial_theme_falls_back_to_store() {
    let store = MemoryStore::with_entry("theme", "light");
    assert_eq!(initial_theme(None, &store, "theme"), Theme::Light);
    assert_eq!(initial_theme(Some("bogus"), &store, "theme"), Theme::Light);
}

#[test]
fn initial_theme_defaults_when_store_empty_or_garbled() {
    assert_eq!(initial_theme(None, &MemoryStore::new(), "theme"), Theme::Dark);
    let garbled = MemoryStore::with_entry("theme", "purple");
    assert_eq!(initial_theme(None, &garbled, "theme"), Theme::Dark);
}

#[test]
fn initial_theme_survives_unreadable_store() {
    assert_eq!(initial_theme(None, &UnavailableStore, "theme"), Theme::Dark);
}

#[test]
fn memory_store_round_trips_a_value() {
    let mut store = MemoryStore::new();
    store.save("theme", "light").unwrap();
    assert_eq!(store.get("theme"), Some("light"));
    assert_eq!(store.load("theme").unwrap().as_deref(), Some("light"));
}

#[test]
fn unavailable_store_errors_on_save() {
    let mut store = UnavailableStore;
    assert!(matches!(store.save("theme", "dark"), Err(FxError::Storage(_))));
}
