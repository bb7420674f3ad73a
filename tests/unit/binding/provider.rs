use super::*;

#[test]
fn static_provider_resolves_and_misses_to_empty() {
    let provider = StaticContentProvider::new().with(BindingKey::VERSE_TEXT, "In the beginning");
    assert_eq!(
        resolve_binding(&BindingKey::verse_text(), &provider),
        "In the beginning"
    );
    assert_eq!(
        resolve_binding(&BindingKey::new("countdownTitle"), &provider),
        ""
    );
}

#[test]
fn resolution_reflects_current_state() {
    let mut provider = StaticContentProvider::new().with("streakDays", "3");
    let key = BindingKey::new("streakDays");
    assert_eq!(resolve_binding(&key, &provider), "3");
    provider.set("streakDays", "4");
    assert_eq!(resolve_binding(&key, &provider), "4");
    provider.remove(&key);
    assert_eq!(resolve_binding(&key, &provider), "");
}

#[test]
fn closures_are_providers() {
    let provider = |key: &BindingKey| (key.as_str() == "date").then(|| "Today".to_string());
    assert_eq!(resolve_binding(&BindingKey::new("date"), &provider), "Today");
    assert_eq!(resolve_binding(&BindingKey::new("other"), &provider), "");
}

#[test]
fn preview_provider_covers_every_known_key() {
    for key in BindingKey::KNOWN {
        let key = BindingKey::new(key);
        assert!(key.is_known());
        assert!(!resolve_binding(&key, &PreviewContentProvider).is_empty());
    }
    assert_eq!(
        resolve_binding(&BindingKey::new("custom"), &PreviewContentProvider),
        ""
    );
    assert_eq!(resolve_binding(&BindingKey::verse_text(), &EmptyContentProvider), "");
}

#[test]
fn key_serializes_as_plain_string() {
    let key = BindingKey::verse_reference();
    assert_eq!(serde_json::to_string(&key).unwrap(), "\"verseReference\"");
    let back: BindingKey = serde_json::from_str("\"somethingNew\"").unwrap();
    assert_eq!(back.as_str(), "somethingNew");
}
