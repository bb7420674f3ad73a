//! Font-independent text layout.
//!
//! Line breaking uses an average glyph advance so plans stay deterministic and do not depend
//! on which fonts happen to be installed; glyph shaping happens later in the backend.

use crate::{
    compile::plan::{TextLine, TextRun},
    foundation::core::{Affine, Rect},
    model::element::{TextAlignment, TextStyle},
};

/// Average glyph advance as a fraction of the font size.
pub const AVG_ADVANCE_EM: f64 = 0.52;
/// Line box height as a fraction of the font size.
pub const LINE_HEIGHT_EM: f64 = 1.2;
/// Distance from the top of a line box to its baseline, as a fraction of the font size.
const BASELINE_EM: f64 = 0.9;

/// Estimated advance width of `s`.
pub fn estimate_width(s: &str, font_size: f64, letter_spacing: f64) -> f64 {
    let n = s.chars().count() as f64;
    n * (font_size * AVG_ADVANCE_EM + letter_spacing)
}

/// Greedy word wrap. Explicit newlines always break; words wider than `max_width` are split
/// between characters. A non-positive `max_width` disables wrapping.
pub fn wrap_lines(text: &str, max_width: f64, font_size: f64, letter_spacing: f64) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let advance = (font_size * AVG_ADVANCE_EM + letter_spacing).max(f64::EPSILON);
    let max_chars = if max_width > 0.0 && max_width.is_finite() {
        ((max_width / advance).floor() as usize).max(1)
    } else {
        usize::MAX
    };

    let mut out = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0usize;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            let sep = usize::from(line_len > 0);
            if line_len + sep + word.len() <= max_chars {
                if sep == 1 {
                    line.push(' ');
                }
                line.extend(word.iter());
                line_len += sep + word.len();
                continue;
            }
            if line_len > 0 {
                out.push(std::mem::take(&mut line));
            }
            while word.len() > max_chars {
                let rest = word.split_off(max_chars);
                out.push(word.into_iter().collect());
                word = rest;
            }
            line_len = word.len();
            line = word.into_iter().collect();
        }
        out.push(line);
    }
    out
}

/// Lay out `text` inside `rect`, with the block centered vertically.
///
/// `unit` converts canvas points (font size, spacing) into output pixels.
pub fn layout_text(
    text: String,
    style: &TextStyle,
    rect: Rect,
    unit: f64,
    transform: Affine,
    opacity: f32,
) -> TextRun {
    let mut font = style.font.clone();
    font.size = finite_or(font.size, 0.0).max(0.0) * unit;
    let letter_spacing = finite_or(style.letter_spacing, 0.0) * unit;
    let line_spacing = finite_or(style.line_spacing, 0.0) * unit;

    let wrapped = wrap_lines(&text, rect.width(), font.size, letter_spacing);
    let step = font.size * LINE_HEIGHT_EM + line_spacing;
    let n = wrapped.len() as f64;
    let block = if wrapped.is_empty() {
        0.0
    } else {
        n * font.size * LINE_HEIGHT_EM + (n - 1.0) * line_spacing
    };
    let top = rect.center().y - block * 0.5;
    let x = match style.alignment {
        TextAlignment::Leading => rect.x0,
        TextAlignment::Center => rect.center().x,
        TextAlignment::Trailing => rect.x1,
    };

    let lines = wrapped
        .into_iter()
        .enumerate()
        .map(|(i, text)| TextLine {
            text,
            x,
            baseline: top + font.size * BASELINE_EM + step * i as f64,
        })
        .collect();

    TextRun {
        text,
        lines,
        font,
        color: style.color,
        alignment: style.alignment,
        letter_spacing,
        rect,
        transform,
        opacity,
    }
}

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/text.rs"]
mod tests;
