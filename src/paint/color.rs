use crate::foundation::{
    error::{LayerkitError, LayerkitResult},
    math::unit_to_u8,
};

/// Portable straight-alpha RGBA color with channels in `[0, 1]`.
///
/// Channels are clamped on construction (including deserialization); a stored channel is
/// never negative or above one. Non-finite inputs become `0`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "ColorChannels")]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
}

#[derive(serde::Deserialize)]
struct ColorChannels {
    #[serde(default)]
    red: f64,
    #[serde(default)]
    green: f64,
    #[serde(default)]
    blue: f64,
    #[serde(default = "one")]
    alpha: f64,
}

fn one() -> f64 {
    1.0
}

impl From<ColorChannels> for Color {
    fn from(c: ColorChannels) -> Self {
        Self::new(c.red, c.green, c.blue, c.alpha)
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

impl Color {
    /// Build a color, clamping every channel into `[0, 1]`.
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red: clamp_unit(red),
            green: clamp_unit(green),
            blue: clamp_unit(blue),
            alpha: clamp_unit(alpha),
        }
    }

    /// Opaque color from RGB channels.
    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    /// Opaque color from 8-bit sRGB channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Opaque white.
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Opaque black.
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Fully transparent black.
    pub fn clear() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> LayerkitResult<Self> {
        let s = hex.trim().trim_start_matches('#');
        if !(s.len() == 6 || s.len() == 8) || !s.is_ascii() {
            return Err(LayerkitError::validation(format!(
                "color hex '{hex}' must be #RRGGBB or #RRGGBBAA"
            )));
        }
        let byte = |i: usize| -> LayerkitResult<u8> {
            u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| {
                LayerkitError::validation(format!("color hex '{hex}' has non-hex digits"))
            })
        };
        let a = if s.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::new(
            f64::from(byte(0)?) / 255.0,
            f64::from(byte(2)?) / 255.0,
            f64::from(byte(4)?) / 255.0,
            f64::from(a) / 255.0,
        ))
    }

    /// Format as `#RRGGBBAA`.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8_straight();
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }

    /// Red channel.
    pub fn red(self) -> f64 {
        self.red
    }

    /// Green channel.
    pub fn green(self) -> f64 {
        self.green
    }

    /// Blue channel.
    pub fn blue(self) -> f64 {
        self.blue
    }

    /// Alpha channel.
    pub fn alpha(self) -> f64 {
        self.alpha
    }

    /// Same color with alpha replaced (clamped).
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self::new(self.red, self.green, self.blue, alpha)
    }

    /// Same color with alpha scaled by `factor` (clamped).
    pub fn multiply_alpha(self, factor: f64) -> Self {
        self.with_alpha(self.alpha * factor)
    }

    /// Component-wise linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        let t = clamp_unit(t);
        let mix = |x: f64, y: f64| x + (y - x) * t;
        Self::new(
            mix(a.red, b.red),
            mix(a.green, b.green),
            mix(a.blue, b.blue),
            mix(a.alpha, b.alpha),
        )
    }

    /// Straight-alpha RGBA8.
    pub fn to_rgba8_straight(self) -> [u8; 4] {
        [
            unit_to_u8(self.red),
            unit_to_u8(self.green),
            unit_to_u8(self.blue),
            unit_to_u8(self.alpha),
        ]
    }

    /// Premultiplied RGBA8.
    pub fn to_rgba8_premul(self) -> [u8; 4] {
        [
            unit_to_u8(self.red * self.alpha),
            unit_to_u8(self.green * self.alpha),
            unit_to_u8(self.blue * self.alpha),
            unit_to_u8(self.alpha),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/color.rs"]
mod tests;
