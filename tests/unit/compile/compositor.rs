use std::collections::HashMap;
use std::sync::Arc;

use super::*;
use crate::{
    assets::{cache::NoImages, decode::PreparedImage},
    binding::provider::{BindingKey, EmptyContentProvider, StaticContentProvider},
    model::{element::TextStyle, layer::Layer, layout::LayoutFrame, project::WidgetType},
    paint::gradient::{AnchorPoint, Gradient},
    pattern::generator::PatternKind,
};

fn text_layer(text: &str, z: i32) -> Layer {
    Layer::new(
        text,
        Element::text(text, TextStyle::default()),
        LayoutFrame::full_canvas(),
    )
    .with_z(z)
}

fn small() -> PixelSize {
    PixelSize::new(340, 340)
}

fn project(bg: Background) -> Project {
    Project::new("p", WidgetType::Custom, WidgetSize::Small).with_background(bg)
}

fn texts(plan: &RenderPlan) -> Vec<&str> {
    plan.text_runs().map(|r| r.text.as_str()).collect()
}

fn scene_ops(pass: &Pass) -> &[DrawOp] {
    match pass {
        Pass::Scene(s) => &s.ops,
        other => panic!("expected scene pass, got {other:?}"),
    }
}

#[test]
fn unit_scale_follows_pixel_density() {
    assert_eq!(unit_scale(WidgetSize::Small, small()), 2.0);
    assert_eq!(unit_scale(WidgetSize::Medium, PixelSize::new(364, 170)), 1.0);
}

#[test]
fn layers_draw_in_stable_z_order() {
    let project = project(Background::default()).with_layers([
        text_layer("C", 1),
        text_layer("A", 0),
        text_layer("B", 0),
    ]);
    let plan = compile_project(&project, small(), &EmptyContentProvider, &NoImages);
    assert_eq!(texts(&plan), ["A", "B", "C"]);
}

#[test]
fn binding_miss_draws_empty_text() {
    let layer = Layer::new(
        "title",
        Element::binding(BindingKey::new(BindingKey::COUNTDOWN_TITLE), TextStyle::default()),
        LayoutFrame::full_canvas(),
    );
    let project = project(Background::default()).with_layers([layer]);
    let plan = compile_project(&project, small(), &EmptyContentProvider, &NoImages);
    assert_eq!(texts(&plan), [""]);
}

#[test]
fn bindings_are_resolved_on_every_compile() {
    let layer = Layer::new(
        "verse",
        Element::binding(BindingKey::verse_text(), TextStyle::default()),
        LayoutFrame::full_canvas(),
    );
    let project = project(Background::default()).with_layers([layer]);
    let mut content = StaticContentProvider::new().with(BindingKey::VERSE_TEXT, "first");
    let a = compile_project(&project, small(), &content, &NoImages);
    content.set(BindingKey::VERSE_TEXT, "second");
    let b = compile_project(&project, small(), &content, &NoImages);
    assert_eq!(texts(&a), ["first"]);
    assert_eq!(texts(&b), ["second"]);
}

#[test]
fn hidden_transparent_and_degenerate_layers_are_skipped() {
    let mut hidden = text_layer("hidden", 0);
    hidden.is_visible = false;
    let clear = text_layer("clear", 0).with_opacity(0.0);
    let mut flat = text_layer("flat", 0);
    flat.frame = LayoutFrame::new(10.0, 10.0, 0.0, 40.0);
    let project =
        project(Background::default()).with_layers([hidden, clear, flat, text_layer("shown", 0)]);
    let plan = compile_project(&project, small(), &EmptyContentProvider, &NoImages);
    assert_eq!(texts(&plan), ["shown"]);
}

#[test]
fn compilation_is_deterministic() {
    let project = project(Background::Pattern(PatternBackground {
        pattern_kind: PatternKind::Waves,
        base_color: Color::black(),
        pattern_color: Color::white(),
        pattern_opacity: 0.3,
        pattern_scale: 1.0,
    }))
    .with_layers([text_layer("hello", 0)]);
    let a = compile_project(&project, small(), &EmptyContentProvider, &NoImages);
    let b = compile_project(&project, small(), &EmptyContentProvider, &NoImages);
    assert_eq!(a, b);
}

#[test]
fn solid_background_applies_opacity() {
    let plan = compile_project(
        &project(Background::Solid {
            color: Color::black(),
            opacity: 0.5,
        }),
        small(),
        &EmptyContentProvider,
        &NoImages,
    );
    assert_eq!(plan.passes.len(), 1);
    match &scene_ops(&plan.passes[0])[0] {
        DrawOp::Fill { paint, .. } => {
            assert_eq!(*paint, Paint::Solid(Color::black().with_alpha(0.5)));
        }
        other => panic!("unexpected op {other:?}"),
    }
}

#[test]
fn gradient_background_resolves_against_canvas() {
    let gradient = Gradient::linear_between(
        &[Color::white(), Color::black()],
        AnchorPoint::Top,
        AnchorPoint::Bottom,
    );
    let plan = compile_project(
        &project(Background::Gradient { gradient }),
        small(),
        &EmptyContentProvider,
        &NoImages,
    );
    match plan.draw_ops().next() {
        Some(DrawOp::Fill {
            paint: Paint::Gradient(g),
            ..
        }) => {
            assert_eq!(g.color_at(Point::new(170.0, 0.0)), Color::white());
            assert_eq!(g.color_at(Point::new(170.0, 340.0)), Color::black());
        }
        other => panic!("unexpected op {other:?}"),
    }
}

#[test]
fn missing_image_degrades_to_placeholder() {
    let mut bg = ImageBackground::new("photos/missing.png");
    bg.overlay = Color::black().with_alpha(0.4);
    let plan = compile_project(
        &project(Background::Image(bg)),
        small(),
        &EmptyContentProvider,
        &NoImages,
    );
    let ops: Vec<&DrawOp> = plan.draw_ops().collect();
    assert_eq!(ops.len(), 2);
    assert!(matches!(ops[0], DrawOp::Fill { paint: Paint::Placeholder, .. }));
    assert!(matches!(ops[1], DrawOp::Fill { paint: Paint::Solid(_), .. }));
}

#[test]
fn available_image_is_placed_per_content_mode() {
    let mut images = HashMap::new();
    images.insert(
        "wide.png".to_string(),
        Arc::new(PreparedImage::from_premul(2, 1, vec![255; 8])),
    );
    let mut bg = ImageBackground::new("wide.png");
    bg.blur = 4.0;
    bg.saturation = 0.0;
    let plan = compile_project(
        &project(Background::Image(bg)),
        small(),
        &EmptyContentProvider,
        &images,
    );
    match plan.draw_ops().next() {
        Some(DrawOp::Image(draw)) => {
            assert_eq!(draw.dest, Rect::new(-170.0, 0.0, 510.0, 340.0));
            assert_eq!(draw.blur, Blur::from_radius(8.0));
            assert_eq!(draw.saturation, 0.0);
            assert_eq!(draw.opacity, 1.0);
        }
        other => panic!("unexpected op {other:?}"),
    }
}

#[test]
fn content_modes_fit_and_stretch() {
    let canvas = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(
        place_image(200.0, 100.0, canvas, ContentMode::Fit),
        Rect::new(0.0, 25.0, 100.0, 75.0)
    );
    assert_eq!(place_image(200.0, 100.0, canvas, ContentMode::Stretch), canvas);
}

#[test]
fn glass_blurs_tint_and_noise_before_border() {
    let plan = compile_project(
        &project(Background::Glass(GlassBackground::default())),
        small(),
        &EmptyContentProvider,
        &NoImages,
    );
    assert_eq!(plan.passes.len(), 4);
    assert!(matches!(scene_ops(&plan.passes[0])[0], DrawOp::Fill { .. }));
    assert!(matches!(plan.passes[1], Pass::Noise(_)));
    assert!(matches!(plan.passes[2], Pass::Backdrop(_)));
    match &scene_ops(&plan.passes[3])[0] {
        DrawOp::Stroke { width, .. } => assert_eq!(*width, 2.0),
        other => panic!("unexpected op {other:?}"),
    }
}

#[test]
fn pattern_fills_base_then_primitives() {
    let bg = PatternBackground {
        pattern_kind: PatternKind::Dots,
        base_color: Color::black(),
        pattern_color: Color::white(),
        pattern_opacity: 0.3,
        pattern_scale: 1.0,
    };
    let expected = generate_for(&bg, small().rect().size(), 2.0).len();
    let plan = compile_project(
        &project(Background::Pattern(bg)),
        small(),
        &EmptyContentProvider,
        &NoImages,
    );
    let ops: Vec<&DrawOp> = plan.draw_ops().collect();
    assert_eq!(ops.len(), expected + 1);
    assert!(matches!(ops[0], DrawOp::Fill { paint: Paint::Solid(c), .. } if *c == Color::black()));
}

#[test]
fn icons_and_shapes_compile_to_geometry() {
    let icon = Layer::new(
        "icon",
        Element::icon("heart.fill", Color::white(), 24.0),
        LayoutFrame::centered(50.0, 50.0),
    );
    let line = Layer::new(
        "rule",
        Element::shape(
            ShapeKind::Line,
            ShapeFill::Solid {
                color: Color::white(),
            },
            0.0,
        ),
        LayoutFrame::new(10.0, 50.0, 80.0, 2.0),
    );
    let project = project(Background::default()).with_layers([icon, line]);
    let plan = compile_project(&project, small(), &EmptyContentProvider, &NoImages);
    let ops: Vec<&DrawOp> = plan.draw_ops().skip(1).collect();
    assert_eq!(ops.len(), 2);
    match ops[0] {
        DrawOp::Fill { transform, .. } => {
            // 24pt at 2px/pt is 48px, centered in the 170x170 frame.
            assert_eq!(*transform * Point::new(0.0, 0.0), Point::new(146.0, 146.0));
        }
        other => panic!("unexpected op {other:?}"),
    }
    assert!(matches!(ops[1], DrawOp::Stroke { width, .. } if *width == 4.0));
}

#[test]
fn shared_projects_compile_under_read_lock() {
    let lock = RwLock::new(project(Background::default()).with_layers([text_layer("x", 0)]));
    let plan = compile_shared(&lock, small(), &EmptyContentProvider, &NoImages);
    assert_eq!(texts(&plan), ["x"]);
}

#[test]
fn empty_size_yields_empty_plan() {
    let plan = compile_project(
        &project(Background::default()),
        PixelSize::new(0, 10),
        &EmptyContentProvider,
        &NoImages,
    );
    assert!(plan.passes.is_empty());
}
