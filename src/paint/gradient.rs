use std::f64::consts::TAU;

use crate::{
    foundation::core::{Point, Rect},
    paint::color::Color,
};

/// One of the nine named anchor points of a rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorPoint {
    TopLeading,
    Top,
    TopTrailing,
    Leading,
    #[default]
    Center,
    Trailing,
    BottomLeading,
    Bottom,
    BottomTrailing,
}

impl AnchorPoint {
    /// Position in unit space, `(0, 0)` top-left to `(1, 1)` bottom-right.
    pub fn unit(self) -> (f64, f64) {
        match self {
            Self::TopLeading => (0.0, 0.0),
            Self::Top => (0.5, 0.0),
            Self::TopTrailing => (1.0, 0.0),
            Self::Leading => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::Trailing => (1.0, 0.5),
            Self::BottomLeading => (0.0, 1.0),
            Self::Bottom => (0.5, 1.0),
            Self::BottomTrailing => (1.0, 1.0),
        }
    }

    /// Absolute position of this anchor inside `rect`.
    pub fn in_rect(self, rect: Rect) -> Point {
        let (ux, uy) = self.unit();
        Point::new(rect.x0 + ux * rect.width(), rect.y0 + uy * rect.height())
    }
}

/// How stop locations map onto the painted area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
    Angular,
}

/// A color at a location in `[0, 1]`. The location is clamped on construction.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "StopFields")]
pub struct GradientStop {
    color: Color,
    location: f64,
}

#[derive(serde::Deserialize)]
struct StopFields {
    color: Color,
    #[serde(default)]
    location: f64,
}

impl From<StopFields> for GradientStop {
    fn from(f: StopFields) -> Self {
        Self::new(f.color, f.location)
    }
}

impl GradientStop {
    /// Build a stop; `location` is clamped to `[0, 1]` (non-finite becomes `0`).
    pub fn new(color: Color, location: f64) -> Self {
        let location = if location.is_finite() {
            location.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { color, location }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn location(&self) -> f64 {
        self.location
    }
}

/// Multi-stop gradient paint.
///
/// Stops may be stored in any order; they are sorted (stably) before interpolation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    #[serde(default)]
    pub kind: GradientKind,
    pub stops: Vec<GradientStop>,
    /// Linear start, radial and angular center.
    #[serde(default = "default_start")]
    pub start_point: AnchorPoint,
    /// Linear end; unused by radial/angular.
    #[serde(default = "default_end")]
    pub end_point: AnchorPoint,
    /// Angular start angle in degrees, clockwise from the trailing edge. Wraps modulo 360.
    #[serde(default)]
    pub angle_degrees: f64,
}

fn default_start() -> AnchorPoint {
    AnchorPoint::Top
}

fn default_end() -> AnchorPoint {
    AnchorPoint::Bottom
}

impl Gradient {
    /// Top-to-bottom linear gradient.
    pub fn linear(stops: Vec<GradientStop>) -> Self {
        Self {
            kind: GradientKind::Linear,
            stops,
            start_point: default_start(),
            end_point: default_end(),
            angle_degrees: 0.0,
        }
    }

    /// Evenly spaced linear gradient between `start` and `end` anchors.
    pub fn linear_between(colors: &[Color], start: AnchorPoint, end: AnchorPoint) -> Self {
        Self {
            start_point: start,
            end_point: end,
            ..Self::linear(evenly_spaced(colors))
        }
    }

    /// Radial gradient centered on `center`.
    pub fn radial(colors: &[Color], center: AnchorPoint) -> Self {
        Self {
            kind: GradientKind::Radial,
            start_point: center,
            ..Self::linear(evenly_spaced(colors))
        }
    }

    /// Angular (sweep) gradient around `center` starting at `angle_degrees`.
    pub fn angular(colors: &[Color], center: AnchorPoint, angle_degrees: f64) -> Self {
        Self {
            kind: GradientKind::Angular,
            start_point: center,
            angle_degrees,
            ..Self::linear(evenly_spaced(colors))
        }
    }

    /// Stops sorted by location; ties keep declaration order.
    pub fn sorted_stops(&self) -> Vec<GradientStop> {
        let mut stops = self.stops.clone();
        stops.sort_by(|a, b| a.location.total_cmp(&b.location));
        stops
    }

    /// Color at parameter `t` along the stop list.
    pub fn sample(&self, t: f64) -> Color {
        sample_sorted(&self.sorted_stops(), t)
    }

    /// Normalized start angle in `[0, 360)`.
    pub fn wrapped_angle_degrees(&self) -> f64 {
        if self.angle_degrees.is_finite() {
            self.angle_degrees.rem_euclid(360.0)
        } else {
            0.0
        }
    }

    /// Resolve anchors against the rectangle being painted.
    pub fn resolve(&self, rect: Rect) -> ResolvedGradient {
        let geometry = match self.kind {
            GradientKind::Linear => GradientGeometry::Linear {
                start: self.start_point.in_rect(rect),
                end: self.end_point.in_rect(rect),
            },
            GradientKind::Radial => GradientGeometry::Radial {
                center: self.start_point.in_rect(rect),
                radius: 0.5 * rect.width().max(rect.height()),
            },
            GradientKind::Angular => GradientGeometry::Angular {
                center: self.start_point.in_rect(rect),
                start_rad: self.wrapped_angle_degrees().to_radians(),
            },
        };
        ResolvedGradient {
            geometry,
            stops: self.sorted_stops(),
        }
    }
}

fn evenly_spaced(colors: &[Color]) -> Vec<GradientStop> {
    let n = colors.len();
    colors
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let loc = if n <= 1 {
                0.0
            } else {
                i as f64 / (n - 1) as f64
            };
            GradientStop::new(*c, loc)
        })
        .collect()
}

/// Gradient geometry in absolute pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GradientGeometry {
    Linear { start: Point, end: Point },
    Radial { center: Point, radius: f64 },
    Angular { center: Point, start_rad: f64 },
}

/// A gradient with resolved geometry and pre-sorted stops, ready to sample per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedGradient {
    pub geometry: GradientGeometry,
    pub stops: Vec<GradientStop>,
}

impl ResolvedGradient {
    /// Gradient parameter `t` for a point, before stop lookup.
    pub fn param_at(&self, p: Point) -> f64 {
        match self.geometry {
            GradientGeometry::Linear { start, end } => {
                let d = end - start;
                let len2 = d.hypot2();
                if len2 <= f64::EPSILON {
                    return 0.0;
                }
                ((p - start).dot(d) / len2).clamp(0.0, 1.0)
            }
            GradientGeometry::Radial { center, radius } => {
                if radius <= f64::EPSILON {
                    return 1.0;
                }
                ((p - center).hypot() / radius).clamp(0.0, 1.0)
            }
            GradientGeometry::Angular { center, start_rad } => {
                let v = p - center;
                let a = v.y.atan2(v.x) - start_rad;
                a.rem_euclid(TAU) / TAU
            }
        }
    }

    /// Color at absolute point `p`.
    pub fn color_at(&self, p: Point) -> Color {
        sample_sorted(&self.stops, self.param_at(p))
    }
}

/// Interpolate pre-sorted stops at `t`.
///
/// Outside the stop range the nearest end stop is used; a single stop is a flat fill; no
/// stops at all yields transparent.
pub fn sample_sorted(stops: &[GradientStop], t: f64) -> Color {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Color::clear();
    };
    if t <= first.location {
        return first.color;
    }
    if t >= last.location {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t >= a.location && t <= b.location {
            let span = b.location - a.location;
            if span <= f64::EPSILON {
                return b.color;
            }
            return Color::lerp(a.color, b.color, (t - a.location) / span);
        }
    }
    last.color
}

#[cfg(test)]
#[path = "../../tests/unit/paint/gradient.rs"]
mod tests;
