use kurbo::Shape;

use crate::foundation::core::{Affine, BezPath, Circle, Rect};

/// Side of the square design box every outline is drawn in.
pub(crate) const ICON_BOX: f64 = 24.0;
pub(crate) const FALLBACK_SYMBOL: &str = "circle.fill";

/// Outlines as SVG path data in a 24x24 box, filled with non-zero winding.
pub(crate) const SYMBOLS: &[(&str, &str)] = &[
    (
        "circle.fill",
        "M22 12C22 17.523 17.523 22 12 22C6.477 22 2 17.523 2 12C2 6.477 6.477 2 12 2C17.523 2 22 6.477 22 12Z",
    ),
    (
        "heart.fill",
        "M12 21.35L10.55 20.03C5.4 15.36 2 12.28 2 8.5C2 5.42 4.42 3 7.5 3C9.24 3 10.91 3.81 12 5.09C13.09 3.81 14.76 3 16.5 3C19.58 3 22 5.42 22 8.5C22 12.28 18.6 15.36 13.45 20.04Z",
    ),
    (
        "star.fill",
        "M12 17.27L18.18 21L16.54 13.97L22 9.24L14.81 8.63L12 2L9.19 8.63L2 9.24L7.46 13.97L5.82 21Z",
    ),
    (
        "sun.max.fill",
        "M17 12C17 14.761 14.761 17 12 17C9.239 17 7 14.761 7 12C7 9.239 9.239 7 12 7C14.761 7 17 9.239 17 12Z \
         M11 1H13V4H11Z M11 20H13V23H11Z M1 11H4V13H1Z M20 11H23V13H20Z \
         M4.22 5.64L5.64 4.22L7.76 6.34L6.34 7.76Z M16.24 17.66L17.66 16.24L19.78 18.36L18.36 19.78Z \
         M4.22 18.36L6.34 16.24L7.76 17.66L5.64 19.78Z M16.24 6.34L18.36 4.22L19.78 5.64L17.66 7.76Z",
    ),
    (
        "moon.fill",
        "M12.3 2C7.2 2.4 3 6.7 3 12C3 17.5 7.5 22 13 22C17.6 22 21.4 18.9 22.6 14.7C21.3 15.5 19.8 16 18.2 16C13.6 16 9.9 12.3 9.9 7.7C9.9 5.5 10.8 3.5 12.3 2Z",
    ),
    (
        "book.fill",
        "M3 4H10C11.1 4 12 4.9 12 6V21C12 20.2 11.3 19.5 10.5 19.5H3Z \
         M21 4H14C12.9 4 12 4.9 12 6V21C12 20.2 12.7 19.5 13.5 19.5H21Z",
    ),
    ("cross.fill", "M10 2H14V8H20V12H14V22H10V12H4V8H10Z"),
    (
        "leaf.fill",
        "M21 3C12 3 5 7.5 5 15C5 16.6 5.4 18 6 19.2L3 22.2L4.4 23.6L7.3 20.7C8.6 21.5 10.1 22 11.8 22C18.5 22 21.8 14.5 21 3Z",
    ),
    (
        "flame.fill",
        "M12 2C12 2 5 8.5 5 14C5 18.4 8.1 22 12 22C15.9 22 19 18.4 19 14C19 10.5 16.5 7.5 15 6C15 8.5 14 10 12.5 10.5C13.5 7.5 12 2 12 2Z",
    ),
    (
        "sparkle",
        "M12 2C12.8 8 16 11.2 22 12C16 12.8 12.8 16 12 22C11.2 16 8 12.8 2 12C8 11.2 11.2 8 12 2Z",
    ),
    (
        "cloud.fill",
        "M6.5 19C4 19 2 17 2 14.5C2 12.2 3.7 10.3 6 10C6.8 7.1 9.2 5 12.2 5C15.6 5 18.4 7.6 18.7 10.9C20.6 11.3 22 13 22 15C22 17.2 20.2 19 18 19Z",
    ),
    (
        "bell.fill",
        "M12 22C13.1 22 14 21.1 14 20H10C10 21.1 10.9 22 12 22Z \
         M18 16V11C18 7.9 16.4 5.4 13.5 4.7V4C13.5 3.2 12.8 2.5 12 2.5C11.2 2.5 10.5 3.2 10.5 4V4.7C7.6 5.4 6 7.9 6 11V16L4 18V19H20V18Z",
    ),
    ("checkmark", "M9 16.2L4.8 12L3.4 13.4L9 19L21 7L19.6 5.6Z"),
    ("bolt.fill", "M13 2L4 14H11L10 22L20 9H13Z"),
    (
        "drop.fill",
        "M12 2C12 2 5 10 5 15C5 18.9 8.1 22 12 22C15.9 22 19 18.9 19 15C19 10 12 2 12 2Z",
    ),
];

const ALIASES: &[(&str, &str)] = &[("hands.sparkles.fill", "sparkle")];

fn path_data(symbol: &str) -> Option<&'static str> {
    let symbol = ALIASES
        .iter()
        .find(|(alias, _)| *alias == symbol)
        .map_or(symbol, |(_, target)| *target);
    SYMBOLS
        .iter()
        .find(|(name, _)| *name == symbol)
        .map(|(_, d)| *d)
}

/// Outline of `symbol` in the 24x24 design box; unknown symbols draw as a filled circle.
pub(crate) fn icon_outline(symbol: &str) -> BezPath {
    let d = path_data(symbol).unwrap_or_else(|| {
        tracing::debug!(symbol, fallback = FALLBACK_SYMBOL, "unknown icon symbol");
        SYMBOLS[0].1
    });
    BezPath::from_svg(d).unwrap_or_else(|err| {
        tracing::warn!(symbol, %err, "icon outline failed to parse");
        Circle::new((ICON_BOX * 0.5, ICON_BOX * 0.5), ICON_BOX * 0.5 - 2.0).to_path(0.1)
    })
}

/// Map the design box onto a `side`-sized square centered in `rect`.
pub(crate) fn icon_placement(rect: Rect, side: f64) -> Affine {
    let s = side.max(0.0) / ICON_BOX;
    let c = rect.center();
    Affine::translate((c.x - side * 0.5, c.y - side * 0.5)) * Affine::scale(s)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/icons.rs"]
mod tests;
