use chrono::TimeZone;

use super::*;
use crate::{
    model::{element::Element, layer::Layer, layout::LayoutFrame},
    paint::background::Background,
};

fn sample() -> Template {
    let project = Project::new("Canonical", WidgetType::VerseOfDay, WidgetSize::Medium)
        .with_background(Background::solid(Color::black()))
        .with_layers([Layer::new(
            "Title",
            Element::text("Hello", Default::default()),
            LayoutFrame::full_canvas(),
        )]);
    Template {
        id: "t-1".to_string(),
        name: "Night".to_string(),
        description: "Dark and quiet".to_string(),
        category: TemplateCategory::Minimal,
        widget_types: vec![WidgetType::VerseOfDay, WidgetType::Quote],
        widget_sizes: vec![WidgetSize::Small, WidgetSize::Medium],
        tags: vec!["Dark".to_string()],
        preview_color: Color::black(),
        project,
        is_premium: false,
        is_featured: false,
        expires_at: None,
    }
}

#[test]
fn instantiate_copies_and_renames() {
    let template = sample();
    let project = template.instantiate(WidgetType::Quote, WidgetSize::Small);
    assert_eq!(project.name, "Night - Quote");
    assert_eq!(project.template_id.as_deref(), Some("t-1"));
    assert_ne!(project.id, template.project.id);
    assert_ne!(project.layers[0].id, template.project.layers[0].id);
    assert_eq!(project.widget_type, WidgetType::Quote);
    assert_eq!(project.widget_size, WidgetSize::Small);
    assert!(!project.is_favorite);
    assert_eq!(project.background, template.project.background);
    assert_eq!(project.layers[0].element, template.project.layers[0].element);
}

#[test]
fn instantiated_project_is_independent() {
    let mut source = sample();
    source.project.is_favorite = true;
    let before = source.clone();

    let mut project = source.instantiate(WidgetType::VerseOfDay, WidgetSize::Medium);
    assert!(!project.is_favorite);
    project.layers[0].name = "Changed".to_string();
    project.layers.clear();
    project.background = Background::solid(Color::white());

    assert_eq!(source, before);
    assert_eq!(source.project.layers.len(), 1);
}

#[test]
fn expiry_and_compatibility() {
    let mut t = sample();
    let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    assert!(!t.is_seasonal());
    assert!(!t.is_expired(now));

    t.expires_at = Some(now);
    assert!(t.is_seasonal());
    assert!(t.is_expired(now));
    assert!(!t.is_expired(now - chrono::Duration::seconds(1)));

    assert!(t.supports(WidgetType::Quote, WidgetSize::Small));
    assert!(!t.supports(WidgetType::Countdown, WidgetSize::Small));
    assert!(!t.supports(WidgetType::Quote, WidgetSize::Large));
}

#[test]
fn matches_is_case_insensitive_over_all_text() {
    let t = sample();
    assert!(t.matches("night"));
    assert!(t.matches("quiet"));
    assert!(t.matches("dar"));
    assert!(t.matches(""));
    assert!(!t.matches("sunrise"));
}

#[test]
fn category_names_parse() {
    assert_eq!(TemplateCategory::parse("Nature"), Some(TemplateCategory::Nature));
    assert_eq!(TemplateCategory::parse(" seasonal "), Some(TemplateCategory::Seasonal));
    assert_eq!(TemplateCategory::parse("unknown"), None);
    let json = serde_json::to_string(&TemplateCategory::Bold).unwrap();
    assert_eq!(json, "\"bold\"");
}
