//! The curated built-in template catalog.

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    binding::provider::BindingKey,
    catalog::template::{Template, TemplateCategory},
    model::{
        element::{
            Element, FontDescriptor, FontDesign, FontWeight, ShapeElement, ShapeFill, ShapeKind,
            TextAlignment, TextStyle,
        },
        layer::Layer,
        layout::LayoutFrame,
        project::{Project, WidgetSize, WidgetType},
    },
    paint::{
        background::{Background, ContentMode, GlassBackground, ImageBackground, PatternBackground},
        color::Color,
        gradient::{AnchorPoint, Gradient, GradientStop},
    },
    pattern::generator::PatternKind,
};

use TemplateCategory as Cat;
use WidgetSize::{ExtraLarge, Large, Medium, Small};
use WidgetType as W;

fn hex(s: &str) -> Color {
    Color::from_hex(s).unwrap_or_default()
}

fn style(size: f64, weight: FontWeight, design: FontDesign, color: Color) -> TextStyle {
    TextStyle::new(FontDescriptor::system(size, weight).with_design(design), color)
}

fn layer(name: &str, element: Element, frame: LayoutFrame, z: i32) -> Layer {
    Layer::new(name, element, frame).with_z(z)
}

fn verse_layers(text_color: Color, design: FontDesign) -> Vec<Layer> {
    vec![
        layer(
            "Verse",
            Element::binding(
                BindingKey::verse_text(),
                style(17.0, FontWeight::Medium, design, text_color),
            ),
            LayoutFrame::new(8.0, 12.0, 84.0, 58.0),
            1,
        ),
        layer(
            "Reference",
            Element::binding(
                BindingKey::verse_reference(),
                style(13.0, FontWeight::Semibold, FontDesign::Default, text_color.multiply_alpha(0.8)),
            ),
            LayoutFrame::new(8.0, 74.0, 84.0, 14.0),
            2,
        ),
    ]
}

struct Meta {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: TemplateCategory,
    types: &'static [WidgetType],
    sizes: &'static [WidgetSize],
    tags: &'static [&'static str],
    preview: &'static str,
    premium: bool,
    featured: bool,
    expires_at: Option<DateTime<Utc>>,
}

fn build(meta: Meta, background: Background, layers: Vec<Layer>) -> Template {
    let primary = meta.types.first().copied().unwrap_or(W::Custom);
    let size = meta.sizes.first().copied().unwrap_or(Medium);
    let project = Project::new(meta.name, primary, size)
        .with_background(background)
        .with_layers(layers);
    Template {
        id: meta.id.to_string(),
        name: meta.name.to_string(),
        description: meta.description.to_string(),
        category: meta.category,
        widget_types: meta.types.to_vec(),
        widget_sizes: meta.sizes.to_vec(),
        tags: meta.tags.iter().map(|t| t.to_string()).collect(),
        preview_color: hex(meta.preview),
        project,
        is_premium: meta.premium,
        is_featured: meta.featured,
        expires_at: meta.expires_at,
    }
}

fn utc(y: i32, m: u32, d: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single()
}

const VERSE_SIZES: &[WidgetSize] = &[Small, Medium, Large, ExtraLarge];

/// Every built-in template, in catalog order.
pub fn builtin_templates() -> Vec<Template> {
    vec![
        // Scripture
        build(
            Meta {
                id: "scripture-sunrise",
                name: "Sunrise Verse",
                description: "Daily verse over a warm dawn gradient.",
                category: Cat::Scripture,
                types: &[W::VerseOfDay, W::Quote],
                sizes: VERSE_SIZES,
                tags: &["verse", "morning", "warm", "gradient"],
                preview: "#F6A04D",
                premium: false,
                featured: true,
                expires_at: None,
            },
            Background::Gradient {
                gradient: Gradient::linear_between(
                    &[hex("#F6D365"), hex("#FDA085"), hex("#F76B1C")],
                    AnchorPoint::TopLeading,
                    AnchorPoint::BottomTrailing,
                ),
            },
            verse_layers(Color::white(), FontDesign::Serif),
        ),
        build(
            Meta {
                id: "scripture-parchment",
                name: "Parchment",
                description: "Serif verse on a quiet paper tone with a thin rule.",
                category: Cat::Scripture,
                types: &[W::VerseOfDay],
                sizes: &[Medium, Large],
                tags: &["verse", "classic", "serif", "paper"],
                preview: "#EFE6D2",
                premium: false,
                featured: false,
                expires_at: None,
            },
            Background::solid(hex("#EFE6D2")),
            {
                let mut layers = verse_layers(hex("#3B2F2F"), FontDesign::Serif);
                layers.push(layer(
                    "Rule",
                    Element::Shape(ShapeElement {
                        kind: ShapeKind::Line,
                        fill: ShapeFill::Solid {
                            color: hex("#3B2F2F").with_alpha(0.4),
                        },
                        corner_radius: 0.0,
                        stroke_width: 1.0,
                    }),
                    LayoutFrame::new(30.0, 70.0, 40.0, 2.0),
                    3,
                ));
                layers
            },
        ),
        // Prayer
        build(
            Meta {
                id: "prayer-glass",
                name: "Quiet Glass",
                description: "Frosted panel with a prayer reminder and a gentle icon.",
                category: Cat::Prayer,
                types: &[W::PrayerReminder, W::CommunityPrayer],
                sizes: &[Small, Medium],
                tags: &["prayer", "glass", "calm"],
                preview: "#A8C0FF",
                premium: true,
                featured: true,
                expires_at: None,
            },
            Background::Glass(GlassBackground {
                tint_color: hex("#A8C0FF"),
                tint_opacity: 0.35,
                ..GlassBackground::default()
            }),
            vec![
                layer(
                    "Hands",
                    Element::icon("hands.sparkles.fill", Color::white(), 28.0),
                    LayoutFrame::new(35.0, 10.0, 30.0, 30.0),
                    1,
                ),
                layer(
                    "Prompt",
                    Element::text(
                        "Take a moment to pray",
                        style(15.0, FontWeight::Semibold, FontDesign::Rounded, Color::white()),
                    ),
                    LayoutFrame::new(6.0, 48.0, 88.0, 22.0),
                    2,
                ),
                layer(
                    "Count",
                    Element::binding(
                        BindingKey::new(BindingKey::PRAYER_COUNT),
                        style(12.0, FontWeight::Regular, FontDesign::Rounded, Color::white().with_alpha(0.8)),
                    ),
                    LayoutFrame::new(6.0, 74.0, 88.0, 14.0),
                    3,
                ),
            ],
        ),
        build(
            Meta {
                id: "prayer-candle",
                name: "Candlelight",
                description: "Dark radial glow with a flame icon and a prayer streak.",
                category: Cat::Prayer,
                types: &[W::PrayerReminder],
                sizes: &[Small, Medium, Large],
                tags: &["prayer", "streak", "evening", "dark"],
                preview: "#2B1B0E",
                premium: false,
                featured: false,
                expires_at: None,
            },
            Background::Gradient {
                gradient: Gradient::radial(&[hex("#8A4B14"), hex("#2B1B0E"), hex("#0D0805")], AnchorPoint::Center),
            },
            vec![
                layer(
                    "Flame",
                    Element::icon("flame.fill", hex("#FFB347"), 32.0),
                    LayoutFrame::new(35.0, 14.0, 30.0, 34.0),
                    1,
                ),
                layer(
                    "Streak",
                    Element::binding(
                        BindingKey::new(BindingKey::STREAK_DAYS),
                        style(22.0, FontWeight::Bold, FontDesign::Rounded, hex("#FFE7C2")),
                    ),
                    LayoutFrame::new(10.0, 56.0, 80.0, 20.0),
                    2,
                ),
                layer(
                    "Caption",
                    Element::text(
                        "days in prayer",
                        style(11.0, FontWeight::Medium, FontDesign::Default, hex("#FFE7C2").with_alpha(0.7)),
                    ),
                    LayoutFrame::new(10.0, 76.0, 80.0, 12.0),
                    3,
                ),
            ],
        ),
        // Minimal
        build(
            Meta {
                id: "minimal-mono",
                name: "Mono",
                description: "Black text on white. Nothing else.",
                category: Cat::Minimal,
                types: &[W::VerseOfDay, W::Quote, W::Custom],
                sizes: VERSE_SIZES,
                tags: &["simple", "clean", "black", "white"],
                preview: "#FFFFFF",
                premium: false,
                featured: false,
                expires_at: None,
            },
            Background::solid(Color::white()),
            vec![layer(
                "Quote",
                Element::binding(
                    BindingKey::verse_text(),
                    style(16.0, FontWeight::Regular, FontDesign::Default, Color::black())
                        .aligned(TextAlignment::Leading),
                ),
                LayoutFrame::new(8.0, 10.0, 84.0, 80.0),
                0,
            )],
        ),
        build(
            Meta {
                id: "minimal-dots",
                name: "Dotted Note",
                description: "Soft dot grid with a single centered line of text.",
                category: Cat::Minimal,
                types: &[W::Quote, W::Custom, W::Countdown],
                sizes: &[Small, Medium],
                tags: &["dots", "pattern", "note", "subtle"],
                preview: "#F4F4F2",
                premium: false,
                featured: false,
                expires_at: None,
            },
            Background::Pattern(PatternBackground {
                pattern_kind: PatternKind::Dots,
                base_color: hex("#F4F4F2"),
                pattern_color: hex("#B0B0A8"),
                pattern_opacity: 0.5,
                pattern_scale: 0.8,
            }),
            vec![layer(
                "Note",
                Element::text(
                    "Be still.",
                    style(20.0, FontWeight::Light, FontDesign::Serif, hex("#333333")),
                ),
                LayoutFrame::centered(80.0, 30.0),
                0,
            )],
        ),
        // Nature
        build(
            Meta {
                id: "nature-meadow",
                name: "Meadow",
                description: "Photo background with a soft overlay and leaf accent.",
                category: Cat::Nature,
                types: &[W::VerseOfDay, W::ReadingProgress],
                sizes: &[Medium, Large, ExtraLarge],
                tags: &["photo", "green", "leaf", "outdoors"],
                preview: "#6A9955",
                premium: true,
                featured: true,
                expires_at: None,
            },
            Background::Image(ImageBackground {
                content_mode: ContentMode::Fill,
                blur: 2.0,
                overlay: Color::black().with_alpha(0.25),
                brightness: -0.05,
                saturation: 1.1,
                ..ImageBackground::new("backgrounds/meadow.jpg")
            }),
            {
                let mut layers = verse_layers(Color::white(), FontDesign::Default);
                layers.push(layer(
                    "Leaf",
                    Element::icon("leaf.fill", hex("#C7F0A4"), 18.0),
                    LayoutFrame::new(86.0, 4.0, 10.0, 14.0),
                    3,
                ));
                layers
            },
        ),
        build(
            Meta {
                id: "nature-waves",
                name: "Still Waters",
                description: "Ocean blues with a wave texture and a water-drop icon.",
                category: Cat::Nature,
                types: &[W::VerseOfDay, W::PrayerReminder],
                sizes: &[Small, Medium, Large],
                tags: &["water", "blue", "waves", "pattern", "calm"],
                preview: "#2E6F95",
                premium: false,
                featured: false,
                expires_at: None,
            },
            Background::Pattern(PatternBackground {
                pattern_kind: PatternKind::Waves,
                base_color: hex("#2E6F95"),
                pattern_color: Color::white(),
                pattern_opacity: 0.18,
                pattern_scale: 1.2,
            }),
            vec![
                layer(
                    "Drop",
                    Element::icon("drop.fill", Color::white(), 20.0),
                    LayoutFrame::new(42.0, 6.0, 16.0, 20.0),
                    1,
                ),
                layer(
                    "Verse",
                    Element::binding(
                        BindingKey::verse_text(),
                        style(15.0, FontWeight::Medium, FontDesign::Default, Color::white()),
                    ),
                    LayoutFrame::new(8.0, 30.0, 84.0, 60.0),
                    2,
                ),
            ],
        ),
        // Bold
        build(
            Meta {
                id: "bold-countdown",
                name: "Big Countdown",
                description: "Heavy numerals on a vivid card for counting down to a day.",
                category: Cat::Bold,
                types: &[W::Countdown],
                sizes: &[Small, Medium],
                tags: &["countdown", "numbers", "bright", "event"],
                preview: "#E63946",
                premium: false,
                featured: true,
                expires_at: None,
            },
            Background::solid(hex("#E63946")),
            vec![
                layer(
                    "Card",
                    Element::shape(
                        ShapeKind::RoundedRectangle,
                        ShapeFill::Solid {
                            color: Color::black().with_alpha(0.15),
                        },
                        16.0,
                    ),
                    LayoutFrame::new(6.0, 6.0, 88.0, 88.0),
                    0,
                ),
                layer(
                    "Days",
                    Element::binding(
                        BindingKey::new(BindingKey::COUNTDOWN_DAYS),
                        style(48.0, FontWeight::Black, FontDesign::Rounded, Color::white()),
                    ),
                    LayoutFrame::new(10.0, 14.0, 80.0, 50.0),
                    1,
                ),
                layer(
                    "Title",
                    Element::binding(
                        BindingKey::new(BindingKey::COUNTDOWN_TITLE),
                        style(14.0, FontWeight::Bold, FontDesign::Default, Color::white()),
                    ),
                    LayoutFrame::new(10.0, 68.0, 80.0, 18.0),
                    2,
                ),
            ],
        ),
        build(
            Meta {
                id: "bold-progress",
                name: "Progress Ring",
                description: "Reading plan progress inside a bold circle on a chevron field.",
                category: Cat::Bold,
                types: &[W::ReadingProgress],
                sizes: &[Small, Medium, Large],
                tags: &["reading", "plan", "progress", "chevrons"],
                preview: "#1D3557",
                premium: true,
                featured: false,
                expires_at: None,
            },
            Background::Pattern(PatternBackground {
                pattern_kind: PatternKind::Chevrons,
                base_color: hex("#1D3557"),
                pattern_color: hex("#457B9D"),
                pattern_opacity: 0.4,
                pattern_scale: 1.0,
            }),
            vec![
                layer(
                    "Ring",
                    Element::shape(
                        ShapeKind::Circle,
                        ShapeFill::Gradient {
                            gradient: Gradient::angular(
                                &[hex("#A8DADC"), hex("#F1FAEE"), hex("#A8DADC")],
                                AnchorPoint::Center,
                                270.0,
                            ),
                        },
                        0.0,
                    ),
                    LayoutFrame::new(25.0, 8.0, 50.0, 62.0),
                    0,
                ),
                layer(
                    "Progress",
                    Element::binding(
                        BindingKey::new(BindingKey::READING_PROGRESS),
                        style(22.0, FontWeight::Heavy, FontDesign::Rounded, hex("#1D3557")),
                    ),
                    LayoutFrame::new(25.0, 28.0, 50.0, 22.0),
                    1,
                ),
                layer(
                    "Plan",
                    Element::binding(
                        BindingKey::new(BindingKey::READING_PLAN_TITLE),
                        style(12.0, FontWeight::Semibold, FontDesign::Default, Color::white()),
                    ),
                    LayoutFrame::new(6.0, 76.0, 88.0, 16.0),
                    2,
                ),
            ],
        ),
        // Seasonal
        build(
            Meta {
                id: "seasonal-advent",
                name: "Advent Star",
                description: "Deep night sky with a star for the Advent season.",
                category: Cat::Seasonal,
                types: &[W::VerseOfDay, W::Countdown],
                sizes: &[Small, Medium, Large],
                tags: &["advent", "christmas", "star", "winter"],
                preview: "#0B1D3A",
                premium: false,
                featured: true,
                expires_at: utc(2026, 12, 26),
            },
            Background::Gradient {
                gradient: Gradient::linear(vec![
                    GradientStop::new(hex("#0B1D3A"), 0.0),
                    GradientStop::new(hex("#274472"), 1.0),
                ]),
            },
            vec![
                layer(
                    "Star",
                    Element::icon("star.fill", hex("#FFD166"), 26.0),
                    LayoutFrame::new(40.0, 6.0, 20.0, 24.0),
                    1,
                ),
                layer(
                    "Verse",
                    Element::binding(
                        BindingKey::verse_text(),
                        style(15.0, FontWeight::Medium, FontDesign::Serif, Color::white()),
                    ),
                    LayoutFrame::new(8.0, 34.0, 84.0, 56.0),
                    2,
                ),
            ],
        ),
        build(
            Meta {
                id: "seasonal-easter",
                name: "Easter Morning",
                description: "Pastel crosses pattern with a sunrise icon for Holy Week.",
                category: Cat::Seasonal,
                types: &[W::VerseOfDay, W::Countdown, W::Quote],
                sizes: &[Small, Medium],
                tags: &["easter", "spring", "cross", "pastel"],
                preview: "#FCE4EC",
                premium: false,
                featured: false,
                expires_at: utc(2027, 4, 5),
            },
            Background::Pattern(PatternBackground {
                pattern_kind: PatternKind::Crosses,
                base_color: hex("#FCE4EC"),
                pattern_color: hex("#F8BBD0"),
                pattern_opacity: 0.6,
                pattern_scale: 1.0,
            }),
            vec![
                layer(
                    "Sun",
                    Element::icon("sun.max.fill", hex("#FFB300"), 24.0),
                    LayoutFrame::new(40.0, 8.0, 20.0, 24.0),
                    1,
                ),
                layer(
                    "Title",
                    Element::text(
                        "He is risen",
                        style(20.0, FontWeight::Bold, FontDesign::Serif, hex("#6D4C41")),
                    ),
                    LayoutFrame::new(8.0, 40.0, 84.0, 22.0),
                    2,
                ),
                layer(
                    "Badge",
                    Element::shape(
                        ShapeKind::Rectangle,
                        ShapeFill::Solid {
                            color: hex("#6D4C41").with_alpha(0.12),
                        },
                        0.0,
                    ),
                    LayoutFrame::new(20.0, 70.0, 60.0, 14.0),
                    3,
                ),
                layer(
                    "Days",
                    Element::binding(
                        BindingKey::new(BindingKey::COUNTDOWN_DAYS),
                        style(11.0, FontWeight::Semibold, FontDesign::Default, hex("#6D4C41")),
                    ),
                    LayoutFrame::new(20.0, 70.0, 60.0, 14.0),
                    4,
                ),
            ],
        ),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/builtin.rs"]
mod tests;
