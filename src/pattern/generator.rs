//! Stateless generators for tileable geometric textures.
//!
//! Every generator is a pure function of `(kind, canvas, scale)`: identical inputs always
//! produce identical primitive sequences, in the same order.

use crate::{
    foundation::core::{BezPath, Point, Rect, Size},
    paint::{background::PatternBackground, color::Color},
};

/// Base tile spacing in canvas units at scale 1.
pub const BASE_SPACING: f64 = 20.0;

const MIN_SCALE: f64 = 0.05;
const HAIRLINE: f64 = 0.5;
const STROKE: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternKind {
    Dots,
    Lines,
    Grid,
    Crosses,
    Waves,
    Diagonals,
    Chevrons,
    Circles,
}

impl PatternKind {
    pub const ALL: [PatternKind; 8] = [
        Self::Dots,
        Self::Lines,
        Self::Grid,
        Self::Crosses,
        Self::Waves,
        Self::Diagonals,
        Self::Chevrons,
        Self::Circles,
    ];
}

/// Geometry of one pattern primitive, in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum PatternShape {
    /// Stroked straight segment.
    Line { from: Point, to: Point, width: f64 },
    /// Filled circle.
    Dot { center: Point, radius: f64 },
    /// Stroked circle.
    Ring {
        center: Point,
        radius: f64,
        width: f64,
    },
    /// Filled plus sign.
    Cross {
        center: Point,
        arm: f64,
        thickness: f64,
    },
    /// Stroked open path (waves, chevrons).
    Polyline { path: BezPath, width: f64 },
}

impl PatternShape {
    /// Conservative bounds including stroke width.
    pub fn bounds(&self) -> Rect {
        use kurbo::Shape;
        match self {
            Self::Line { from, to, width } => Rect::from_points(*from, *to).inflate(*width, *width),
            Self::Dot { center, radius } => Rect::from_center_size(*center, (radius * 2.0, radius * 2.0)),
            Self::Ring {
                center,
                radius,
                width,
            } => {
                let d = (radius + width) * 2.0;
                Rect::from_center_size(*center, (d, d))
            }
            Self::Cross { center, arm, .. } => Rect::from_center_size(*center, (arm * 2.0, arm * 2.0)),
            Self::Polyline { path, width } => path.bounding_box().inflate(*width, *width),
        }
    }
}

/// A pattern primitive carrying its final color (pattern color at pattern opacity).
#[derive(Clone, Debug, PartialEq)]
pub struct PatternPrimitive {
    pub shape: PatternShape,
    pub color: Color,
}

pub(crate) fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.max(MIN_SCALE)
    } else {
        1.0
    }
}

/// Generate primitives for `kind` over a `canvas`-sized area.
///
/// All primitives are colored with `ink`; the caller fills the base color beneath them.
pub fn generate(kind: PatternKind, canvas: Size, scale: f64, ink: Color) -> Vec<PatternPrimitive> {
    if canvas.width <= 0.0 || canvas.height <= 0.0 {
        return Vec::new();
    }
    let scale = sanitize_scale(scale);
    let spacing = BASE_SPACING * scale;
    let shapes = match kind {
        PatternKind::Dots => centered_grid(canvas, spacing, |center| PatternShape::Dot {
            center,
            radius: spacing * 0.1,
        }),
        PatternKind::Circles => centered_grid(canvas, spacing, |center| PatternShape::Ring {
            center,
            radius: spacing * 0.3,
            width: STROKE,
        }),
        PatternKind::Crosses => centered_grid(canvas, spacing, |center| PatternShape::Cross {
            center,
            arm: spacing * 0.25,
            thickness: spacing * 0.075,
        }),
        PatternKind::Lines => horizontal_lines(canvas, spacing),
        PatternKind::Grid => {
            let mut out = horizontal_lines(canvas, spacing);
            out.extend(vertical_lines(canvas, spacing));
            out
        }
        PatternKind::Diagonals => diagonals(canvas, spacing),
        PatternKind::Waves => waves(canvas, spacing),
        PatternKind::Chevrons => chevrons(canvas, spacing),
    };
    shapes
        .into_iter()
        .map(|shape| PatternPrimitive { shape, color: ink })
        .collect()
}

/// Generate the texture described by a pattern background.
///
/// `unit_scale` converts canvas points to output units (1 when rendering at point size).
pub fn generate_for(bg: &PatternBackground, canvas: Size, unit_scale: f64) -> Vec<PatternPrimitive> {
    let opacity = if bg.pattern_opacity.is_finite() {
        bg.pattern_opacity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let ink = bg.pattern_color.multiply_alpha(opacity);
    generate(
        bg.pattern_kind,
        canvas,
        sanitize_scale(bg.pattern_scale) * sanitize_scale(unit_scale),
        ink,
    )
}

/// `start, start + step, ...` strictly below `end`.
fn stride(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = if end > start {
        ((end - start) / step).ceil() as usize
    } else {
        0
    };
    (0..count).map(move |i| start + step * i as f64)
}

fn centered_grid(
    canvas: Size,
    spacing: f64,
    mut make: impl FnMut(Point) -> PatternShape,
) -> Vec<PatternShape> {
    let half = spacing * 0.5;
    let mut out = Vec::new();
    for y in stride(half, canvas.height + half, spacing) {
        for x in stride(half, canvas.width + half, spacing) {
            out.push(make(Point::new(x, y)));
        }
    }
    out
}

fn horizontal_lines(canvas: Size, spacing: f64) -> Vec<PatternShape> {
    stride(0.0, canvas.height, spacing)
        .map(|y| PatternShape::Line {
            from: Point::new(0.0, y),
            to: Point::new(canvas.width, y),
            width: HAIRLINE,
        })
        .collect()
}

fn vertical_lines(canvas: Size, spacing: f64) -> Vec<PatternShape> {
    stride(0.0, canvas.width, spacing)
        .map(|x| PatternShape::Line {
            from: Point::new(x, 0.0),
            to: Point::new(x, canvas.height),
            width: HAIRLINE,
        })
        .collect()
}

/// 45-degree strokes whose start points span `[-height, width + height)`.
///
/// The span is kept as-is for parity; strokes that would land entirely outside the canvas
/// are dropped.
fn diagonals(canvas: Size, spacing: f64) -> Vec<PatternShape> {
    let (w, h) = (canvas.width, canvas.height);
    stride(-h, w + h, spacing)
        .filter(|&x| x < w && x + h > 0.0)
        .map(|x| PatternShape::Line {
            from: Point::new(x, 0.0),
            to: Point::new(x + h, h),
            width: STROKE,
        })
        .collect()
}

fn waves(canvas: Size, spacing: f64) -> Vec<PatternShape> {
    let band = spacing * 1.5;
    let amplitude = spacing * 0.25;
    let mut out = Vec::new();
    for y in stride(0.0, canvas.height + band * 0.5, band) {
        let mut path = BezPath::new();
        path.move_to((0.0, y));
        for (i, x) in stride(0.0, canvas.width, spacing).enumerate() {
            let dir = if i % 2 == 0 { -1.0 } else { 1.0 };
            path.quad_to((x + spacing * 0.5, y + dir * amplitude), (x + spacing, y));
        }
        out.push(PatternShape::Polyline { path, width: STROKE });
    }
    out
}

fn chevrons(canvas: Size, spacing: f64) -> Vec<PatternShape> {
    let motif = spacing * 2.0;
    let depth = spacing * 0.5;
    let mut out = Vec::new();
    for y in stride(0.0, canvas.height, spacing) {
        let mut path = BezPath::new();
        path.move_to((0.0, y));
        for x in stride(0.0, canvas.width, motif) {
            path.line_to((x + motif * 0.5, y + depth));
            path.line_to((x + motif, y));
        }
        out.push(PatternShape::Polyline { path, width: STROKE });
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/generator.rs"]
mod tests;
