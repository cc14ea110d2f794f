//! Color values and string parsing.
//!
//! Styles store colors as HSLA. `parse_color` accepts the formats the
//! authoring surface hands us: hex (#RGB, #RRGGBB, #RRGGBBAA), rgb()/rgba(),
//! hsla(), and a handful of named colors.

use serde::{Deserialize, Serialize};

/// HSLA color. All components are in the 0.0–1.0 range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

/// RGBA color with 0.0–1.0 components. Used by the rasterizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Hsla {
    pub fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    pub fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    pub fn white() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Return the same color with a different alpha.
    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a.clamp(0.0, 1.0);
        self
    }

    pub fn to_rgba(self) -> Rgba {
        let Hsla { h, s, l, a } = self;
        if s == 0.0 {
            return Rgba {
                r: l,
                g: l,
                b: l,
                a,
            };
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Rgba {
            r: hue_component(p, q, h + 1.0 / 3.0),
            g: hue_component(p, q, h),
            b: hue_component(p, q, h - 1.0 / 3.0),
            a,
        }
    }
}

impl Rgba {
    pub fn to_hsla(self) -> Hsla {
        let Rgba { r, g, b, a } = self;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsla::new(0.0, 0.0, l, a);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / d + 2.0) / 6.0
        } else {
            ((r - g) / d + 4.0) / 6.0
        };

        Hsla::new(h, s, l, a)
    }

    /// 8-bit channel values, alpha included.
    pub fn to_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

fn hue_component(p: f32, q: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Parse a color string into an HSLA color.
///
/// Returns `None` for anything unrecognized; callers treat that as
/// "use default rendering" rather than an error.
pub fn parse_color(value: &str) -> Option<Hsla> {
    let value = value.trim();

    if value.eq_ignore_ascii_case("transparent") {
        return Some(Hsla::transparent());
    }

    if let Some(hsla) = parse_hex_color(value) {
        return Some(hsla);
    }

    if value.starts_with("rgb") {
        return parse_rgb_color(value);
    }

    if value.starts_with("hsla") {
        return parse_hsla_color(value);
    }

    match value.to_lowercase().as_str() {
        "black" => Some(Hsla::black()),
        "white" => Some(Hsla::white()),
        "red" => Some(Hsla::new(0.0, 1.0, 0.5, 1.0)),
        "green" => Some(Hsla::new(0.33, 1.0, 0.5, 1.0)),
        "blue" => Some(Hsla::new(0.67, 1.0, 0.5, 1.0)),
        "yellow" => Some(Hsla::new(0.17, 1.0, 0.5, 1.0)),
        "cyan" => Some(Hsla::new(0.5, 1.0, 0.5, 1.0)),
        "magenta" => Some(Hsla::new(0.83, 1.0, 0.5, 1.0)),
        "gray" | "grey" => Some(Hsla::new(0.0, 0.0, 0.5, 1.0)),
        _ => None,
    }
}

fn parse_hex_color(value: &str) -> Option<Hsla> {
    let hex = value.strip_prefix('#')?;

    let (r, g, b, a) = match hex.len() {
        3 => (
            hex_channel(&hex[0..1].repeat(2))?,
            hex_channel(&hex[1..2].repeat(2))?,
            hex_channel(&hex[2..3].repeat(2))?,
            1.0,
        ),
        6 => (
            hex_channel(&hex[0..2])?,
            hex_channel(&hex[2..4])?,
            hex_channel(&hex[4..6])?,
            1.0,
        ),
        8 => (
            hex_channel(&hex[0..2])?,
            hex_channel(&hex[2..4])?,
            hex_channel(&hex[4..6])?,
            hex_channel(&hex[6..8])?,
        ),
        _ => return None,
    };

    Some(Rgba { r, g, b, a }.to_hsla())
}

fn hex_channel(s: &str) -> Option<f32> {
    u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0)
}

fn parse_rgb_color(value: &str) -> Option<Hsla> {
    let components = if let Some(inner) = value.strip_prefix("rgba(") {
        inner.strip_suffix(')')?
    } else if let Some(inner) = value.strip_prefix("rgb(") {
        inner.strip_suffix(')')?
    } else {
        return None;
    };

    let parts: Vec<&str> = components.split(',').collect();
    if parts.len() < 3 {
        return None;
    }

    let r = parse_rgb_component(parts[0])?;
    let g = parse_rgb_component(parts[1])?;
    let b = parse_rgb_component(parts[2])?;
    let a = if parts.len() > 3 {
        parts[3].trim().parse::<f32>().unwrap_or(1.0)
    } else {
        1.0
    };

    Some(Rgba { r, g, b, a }.to_hsla())
}

/// A single RGB component: a number (0-255) or a percentage.
fn parse_rgb_component(value: &str) -> Option<f32> {
    let value = value.trim();
    if let Some(pct) = value.strip_suffix('%') {
        pct.parse::<f32>().ok().map(|v| v / 100.0)
    } else {
        value.parse::<u8>().ok().map(|v| v as f32 / 255.0)
    }
}

fn parse_hsla_color(value: &str) -> Option<Hsla> {
    let content = value.trim().strip_prefix("hsla(")?.strip_suffix(')')?;
    let parts: Vec<&str> = content.split(',').collect();
    if parts.len() != 4 {
        return None;
    }

    // Hue is in degrees; saturation and lightness are percentages.
    let h = parts[0].trim().parse::<f32>().ok()?;
    let s = parse_percent(parts[1])?;
    let l = parse_percent(parts[2])?;
    let a = parts[3].trim().parse::<f32>().ok()?;

    Some(Hsla::new(
        (h / 360.0).clamp(0.0, 1.0),
        s.clamp(0.0, 1.0),
        l.clamp(0.0, 1.0),
        a.clamp(0.0, 1.0),
    ))
}

fn parse_percent(value: &str) -> Option<f32> {
    let value = value.trim();
    let digits = value.strip_suffix('%').unwrap_or(value);
    digits.parse::<f32>().ok().map(|v| v / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        let c = parse_color("#ff0000").unwrap();
        let rgba = c.to_rgba();
        assert!((rgba.r - 1.0).abs() < 0.01);
        assert!(rgba.g.abs() < 0.01);
        assert!(rgba.b.abs() < 0.01);
        assert_eq!(rgba.a, 1.0);
    }

    #[test]
    fn parses_short_hex_with_expansion() {
        let c = parse_color("#fff").unwrap();
        assert!((c.l - 1.0).abs() < 0.01);
    }

    #[test]
    fn parses_hex_with_alpha() {
        let c = parse_color("#00000080").unwrap();
        assert!((c.a - 0.5).abs() < 0.01);
    }

    #[test]
    fn parses_rgb_functional() {
        let c = parse_color("rgb(0, 255, 0)").unwrap();
        let rgba = c.to_rgba();
        assert!(rgba.r.abs() < 0.01);
        assert!((rgba.g - 1.0).abs() < 0.01);
    }

    #[test]
    fn parses_hsla_functional() {
        let c = parse_color("hsla(240, 100%, 50%, 0.5)").unwrap();
        assert!((c.h - 240.0 / 360.0).abs() < 0.01);
        assert!((c.a - 0.5).abs() < 0.01);
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(parse_color("black"), Some(Hsla::black()));
        assert_eq!(parse_color("transparent"), Some(Hsla::transparent()));
        assert!(parse_color("blurple").is_none());
    }

    #[test]
    fn with_alpha_replaces_alpha_and_clamps() {
        let c = Hsla::new(0.0, 0.0, 0.9, 1.0).with_alpha(0.5);
        assert_eq!(c.a, 0.5);
        assert_eq!((c.h, c.s, c.l), (0.0, 0.0, 0.9));
        assert_eq!(Hsla::white().with_alpha(3.0).a, 1.0);
        assert_eq!(Hsla::white().with_alpha(-1.0).a, 0.0);
    }

    #[test]
    fn hsla_rgba_roundtrip() {
        let original = Hsla::new(0.62, 0.7, 0.4, 1.0);
        let back = original.to_rgba().to_hsla();
        assert!((original.h - back.h).abs() < 0.01);
        assert!((original.s - back.s).abs() < 0.01);
        assert!((original.l - back.l).abs() < 0.01);
    }
}
