use super::*;
use crate::{
    binding::provider::BindingKey,
    model::{
        element::{ShapeKind, TextStyle},
        layout::LayoutFrame,
    },
    paint::{
        color::Color,
        gradient::{Gradient, GradientStop},
    },
};

fn shape_layer(name: &str, z: i32) -> Layer {
    Layer::new(
        name,
        Element::shape(
            ShapeKind::Rectangle,
            ShapeFill::Solid {
                color: Color::black(),
            },
            0.0,
        ),
        LayoutFrame::full_canvas(),
    )
    .with_z(z)
}

#[test]
fn render_order_is_stable_on_ties() {
    let project = Project::new("p", WidgetType::Custom, WidgetSize::Small).with_layers([
        shape_layer("C", 1),
        shape_layer("A", 0),
        shape_layer("B", 0),
    ]);
    let names: Vec<&str> = project
        .layers_in_render_order()
        .iter()
        .map(|l| l.name.as_str())
        .collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[test]
fn add_layer_goes_on_top() {
    let mut project = Project::new("p", WidgetType::Custom, WidgetSize::Small);
    let first = project.add_layer(shape_layer("a", 40));
    assert_eq!(project.layer(first).unwrap().z_index, 0);
    project.layers[0].z_index = 5;
    let second = project.add_layer(shape_layer("b", -3));
    assert_eq!(project.layer(second).unwrap().z_index, 6);

    let removed = project.remove_layer(first).unwrap();
    assert_eq!(removed.name, "a");
    assert!(project.layer(first).is_none());
    assert!(project.remove_layer(first).is_none());
}

#[test]
fn validate_reports_duplicates_and_empty_gradients() {
    let layer = shape_layer("dup", 0);
    let project = Project::new("p", WidgetType::Custom, WidgetSize::Small)
        .with_layers([layer.clone(), layer]);
    assert!(project.validate().is_err());

    let project = Project::new("p", WidgetType::Custom, WidgetSize::Small).with_background(
        Background::Gradient {
            gradient: Gradient::linear(vec![]),
        },
    );
    assert!(project.validate().is_err());

    let ok = Project::new("p", WidgetType::Custom, WidgetSize::Medium).with_background(
        Background::Gradient {
            gradient: Gradient::linear(vec![GradientStop::new(Color::white(), 0.0)]),
        },
    );
    ok.validate().unwrap();
}

#[test]
fn older_documents_load_with_defaults() {
    let json = r#"{
        "id": "7d3c1c3e-52c4-4a5e-9a34-0f6f0f2a4b11",
        "name": "Legacy",
        "widgetType": "verseOfDay",
        "widgetSize": "medium",
        "layers": [
            {
                "id": "0b6c2a3e-6f4b-4c1d-8a2e-1f2f3a4b5c6d",
                "name": "Verse",
                "element": { "type": "dataBinding", "key": "verseText" }
            }
        ]
    }"#;
    let project = Project::from_json_str(json).unwrap();
    assert_eq!(project.schema_version, PROJECT_SCHEMA_VERSION);
    assert_eq!(project.background, Background::default());
    assert!(!project.is_favorite);
    assert!(project.template_id.is_none());

    let layer = &project.layers[0];
    assert_eq!(layer.frame, LayoutFrame::full_canvas());
    assert_eq!(layer.opacity, 1.0);
    assert!(layer.is_visible);
    match &layer.element {
        Element::DataBinding(b) => {
            assert_eq!(b.key, BindingKey::verse_text());
            assert_eq!(b.style, TextStyle::default());
        }
        other => panic!("unexpected element {other:?}"),
    }
}

#[test]
fn json_roundtrip_is_lossless() {
    let project = Project::new("Round", WidgetType::Quote, WidgetSize::Large)
        .with_layers([shape_layer("bg", 0)]);
    let json = project.to_json_string_pretty().unwrap();
    assert!(json.contains("\"widgetType\": \"quote\""));
    assert_eq!(Project::from_json_str(&json).unwrap(), project);
}

#[test]
fn widget_sizes_map_to_pixels() {
    assert_eq!(WidgetSize::Small.pixel_size(2.0), PixelSize::new(340, 340));
    assert_eq!(WidgetSize::Medium.pixel_size(1.0), PixelSize::new(364, 170));
    assert_eq!(WidgetSize::Large.pixel_size(-1.0), PixelSize::new(364, 382));
    assert!(WidgetSize::Medium.aspect_ratio() > 2.0);
}
