use crate::foundation::core::{Affine, PixelSize, Rect};

/// Placement of a layer as percentages (0-100) of the canvas width/height, plus rotation.
///
/// Frames may extend past the canvas (bleed); only width/height are constrained to be
/// non-negative, and that is enforced on construction and deserialization.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "FrameFields")]
pub struct LayoutFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees about the frame center.
    pub rotation: f64,
}

#[derive(serde::Deserialize)]
struct FrameFields {
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default = "full")]
    width: f64,
    #[serde(default = "full")]
    height: f64,
    #[serde(default)]
    rotation: f64,
}

fn full() -> f64 {
    100.0
}

impl From<FrameFields> for LayoutFrame {
    fn from(f: FrameFields) -> Self {
        Self::new(f.x, f.y, f.width, f.height).rotated(f.rotation)
    }
}

impl Default for LayoutFrame {
    fn default() -> Self {
        Self::full_canvas()
    }
}

impl LayoutFrame {
    /// Build an unrotated frame; negative width/height clamp to zero.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
            rotation: 0.0,
        }
    }

    /// `(0, 0, 100, 100)`.
    pub fn full_canvas() -> Self {
        Self::new(0.0, 0.0, 100.0, 100.0)
    }

    /// A frame of the given size centered on the canvas.
    pub fn centered(width: f64, height: f64) -> Self {
        Self::new(50.0 - width * 0.5, 50.0 - height * 0.5, width, height)
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height, self.rotation]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Resolve against a concrete canvas size. See [`resolve_frame`].
    pub fn resolve(&self, size: PixelSize) -> ResolvedFrame {
        resolve_frame(self, size)
    }
}

/// A layout frame mapped into pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedFrame {
    /// Unrotated pixel rectangle.
    pub rect: Rect,
    pub rotation_degrees: f64,
}

impl ResolvedFrame {
    /// Rotation about the rectangle center; identity when unrotated.
    pub fn transform(&self) -> Affine {
        if self.rotation_degrees == 0.0 || !self.rotation_degrees.is_finite() {
            return Affine::IDENTITY;
        }
        Affine::rotate_about(self.rotation_degrees.to_radians(), self.rect.center())
    }

    /// Zero-area frames are valid but draw nothing.
    pub fn is_degenerate(&self) -> bool {
        self.rect.width() <= 0.0 || self.rect.height() <= 0.0
    }

    /// Axis-aligned bounds after rotation.
    pub fn bounds(&self) -> Rect {
        self.transform().transform_rect_bbox(self.rect)
    }

    /// `true` when any part of the rotated frame overlaps `canvas`.
    pub fn touches(&self, canvas: Rect) -> bool {
        let b = self.bounds();
        !self.is_degenerate()
            && b.x1 > canvas.x0
            && b.x0 < canvas.x1
            && b.y1 > canvas.y0
            && b.y0 < canvas.y1
    }
}

/// Map percentage coordinates to pixels: `(x*W/100, y*H/100, w*W/100, h*H/100)`.
///
/// No clamping against the canvas is performed; non-finite inputs collapse to zero so the
/// result is always a usable rectangle.
pub fn resolve_frame(frame: &LayoutFrame, size: PixelSize) -> ResolvedFrame {
    let w = f64::from(size.width);
    let h = f64::from(size.height);
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    let x0 = finite(frame.x) * w / 100.0;
    let y0 = finite(frame.y) * h / 100.0;
    let fw = finite(frame.width).max(0.0) * w / 100.0;
    let fh = finite(frame.height).max(0.0) * h / 100.0;
    ResolvedFrame {
        rect: Rect::new(x0, y0, x0 + fw, y0 + fh),
        rotation_degrees: finite(frame.rotation),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/layout.rs"]
mod tests;
