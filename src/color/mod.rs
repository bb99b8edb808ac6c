//! RGB colours, HSL interpolation and per-vertex gradient buffers.

pub mod palette;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Linear RGB colour, channels in `[0, 1]`, no alpha
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Hue, saturation and lightness, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0] as f32 / 255.0, rgb[1] as f32 / 255.0, rgb[2] as f32 / 255.0)
    }

    /// CSS colour name such as `"yellow"` or `"darkgreen"`
    pub fn from_name(name: &str) -> Option<Self> {
        palette::lookup(name).map(Self::from_rgb8)
    }

    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new(l, l, l);
        }

        let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let q = 2.0 * l - p;

        Self::new(
            hue_to_rgb(q, p, h + 1.0 / 3.0),
            hue_to_rgb(q, p, h),
            hue_to_rgb(q, p, h - 1.0 / 3.0),
        )
    }

    pub fn to_hsl(&self) -> Hsl {
        let (r, g, b) = (self.r, self.g, self.b);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (min + max) / 2.0;

        if min == max {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let delta = max - min;
        let s = if l <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let h = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Hsl { h: h / 6.0, s, l }
    }

    /// Move `alpha` of the way towards `target`, interpolating hue,
    /// saturation and lightness independently.
    pub fn lerp_hsl(&self, target: &Color, alpha: f32) -> Color {
        let a = self.to_hsl();
        let b = target.to_hsl();

        Color::from_hsl(
            lerp(a.h, b.h, alpha),
            lerp(a.s, b.s, alpha),
            lerp(a.l, b.l, alpha),
        )
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Flat RGB buffer of `segments` triples ramping from `start` towards `end`.
///
/// The ramp compounds: each entry is the previous colour moved a further
/// `1 / segments` of the way to `end` in HSL space, so it approaches `end`
/// geometrically rather than linearly.
pub fn gradient_buffer(start: Color, end: Color, segments: usize) -> Result<Vec<f32>, GeometryError> {
    if segments == 0 {
        return Err(GeometryError::DegenerateGradient);
    }

    let step = 1.0 / segments as f32;
    let mut current = start;
    let mut colors = Vec::with_capacity(segments * 3);

    for _ in 0..segments {
        current = current.lerp_hsl(&end, step);
        colors.extend_from_slice(&current.to_array());
    }

    Ok(colors)
}
