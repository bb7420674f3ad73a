use chrono::TimeZone;

use super::*;
use crate::{model::project::Project, paint::color::Color};

fn template(id: &str, category: TemplateCategory) -> Template {
    Template {
        id: id.to_string(),
        name: format!("Template {id}"),
        description: String::new(),
        category,
        widget_types: vec![WidgetType::VerseOfDay],
        widget_sizes: vec![WidgetSize::Small],
        tags: vec![],
        preview_color: Color::white(),
        project: Project::new(id, WidgetType::VerseOfDay, WidgetSize::Small),
        is_premium: false,
        is_featured: false,
        expires_at: None,
    }
}

fn library(n: usize) -> TemplateLibrary {
    TemplateLibrary::new((0..n).map(|i| template(&format!("t{i}"), TemplateCategory::Minimal)))
}

fn recent_ids(lib: &TemplateLibrary) -> Vec<&str> {
    lib.recents().iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn recents_are_bounded_most_recent_first() {
    let mut lib = library(12);
    for i in 0..12 {
        lib.mark_used(&format!("t{i}"));
    }
    assert_eq!(
        recent_ids(&lib),
        ["t11", "t10", "t9", "t8", "t7", "t6", "t5", "t4", "t3", "t2"]
    );

    lib.mark_used("t5");
    let ids = recent_ids(&lib);
    assert_eq!(ids.len(), RECENTS_CAPACITY);
    assert_eq!(ids[0], "t5");
    assert_eq!(ids.iter().filter(|id| **id == "t5").count(), 1);
    assert_eq!(ids[1], "t11");
}

#[test]
fn favorites_toggle() {
    let mut lib = library(3);
    assert!(!lib.is_favorite("t1"));
    assert!(lib.toggle_favorite("t1"));
    assert!(lib.toggle_favorite("t0"));
    assert!(lib.is_favorite("t1"));
    let ids: Vec<&str> = lib.favorites().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["t0", "t1"]);
    assert!(!lib.toggle_favorite("t1"));
    assert!(!lib.is_favorite("t1"));
}

#[test]
fn seasonal_filtering_affects_listing_not_lookup() {
    let now = Utc.with_ymd_and_hms(2026, 12, 30, 0, 0, 0).unwrap();
    let mut expired = template("xmas", TemplateCategory::Seasonal);
    expired.expires_at = Some(now - chrono::Duration::days(3));
    expired.is_featured = true;
    let mut live = template("lent", TemplateCategory::Seasonal);
    live.expires_at = Some(now + chrono::Duration::days(60));
    let lib = TemplateLibrary::new([expired, live]);

    let listed: Vec<&str> = lib
        .list_by_category_at(TemplateCategory::Seasonal, now)
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(listed, ["lent"]);
    assert!(lib.featured_at(now).is_empty());
    assert_eq!(lib.search_at("", now).len(), 1);
    assert!(lib.get("xmas").is_some());
}

#[test]
fn instantiate_by_id_marks_used() {
    let mut lib = library(2);
    let project = lib
        .instantiate("t1", WidgetType::VerseOfDay, WidgetSize::Small)
        .unwrap();
    assert_eq!(project.template_id.as_deref(), Some("t1"));
    assert_eq!(recent_ids(&lib), ["t1"]);
    assert!(lib.instantiate("missing", WidgetType::Quote, WidgetSize::Large).is_err());
}

#[test]
fn search_and_compatibility() {
    let mut a = template("a", TemplateCategory::Nature);
    a.tags = vec!["Forest".to_string()];
    a.widget_sizes = vec![WidgetSize::Large];
    let b = template("b", TemplateCategory::Bold);
    let lib = TemplateLibrary::new([a, b]);

    let found: Vec<&str> = lib.search("  FOREST ").iter().map(|t| t.id.as_str()).collect();
    assert_eq!(found, ["a"]);
    assert_eq!(lib.search("").len(), 2);

    let compatible: Vec<&str> = lib
        .compatible(WidgetType::VerseOfDay, WidgetSize::Small)
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(compatible, ["b"]);
}

#[test]
fn state_roundtrips_and_duplicates_are_dropped() {
    let mut lib = TemplateLibrary::new([
        template("a", TemplateCategory::Minimal),
        template("a", TemplateCategory::Bold),
        template("b", TemplateCategory::Minimal),
    ]);
    assert_eq!(lib.len(), 2);
    assert_eq!(lib.get("a").unwrap().category, TemplateCategory::Minimal);

    lib.mark_used("b");
    lib.toggle_favorite("a");
    let json = serde_json::to_string(lib.state()).unwrap();
    let state: LibraryState = serde_json::from_str(&json).unwrap();

    let restored = library(0).with_state(state.clone());
    assert_eq!(restored.state(), &state);
    assert!(restored.recents().is_empty());
    assert!(restored.is_favorite("a"));
}

#[test]
fn restored_recents_are_deduplicated() {
    let state = LibraryState {
        recents: ["t0", "t1", "t0", "t0", "t2", "t1"]
            .into_iter()
            .map(String::from)
            .collect(),
        favorites: Default::default(),
    };
    let mut lib = library(4).with_state(state);
    assert_eq!(recent_ids(&lib), ["t0", "t1", "t2"]);

    lib.mark_used("t3");
    lib.mark_used("t1");
    assert_eq!(recent_ids(&lib), ["t1", "t3", "t0", "t2"]);
    assert_eq!(lib.state().recents.len(), 4);
}
